// Copyright: Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Removal of the attribution is not allowed, as covered under the AGPL license

diesel::table! {
    use diesel::sql_types::*;

    places (id) {
        id -> Int8,
        #[sql_name = "placeId"]
        place_id -> Text,
        #[sql_name = "placeName"]
        place_name -> Text,
        #[sql_name = "placeAddress"]
        place_address -> Nullable<Text>,
        #[sql_name = "placeDistrict"]
        place_district -> Nullable<Text>,
        #[sql_name = "placeBusinessStatus"]
        place_business_status -> Nullable<Text>,
        #[sql_name = "placeLatitude"]
        place_latitude -> Text,
        #[sql_name = "placeLongitude"]
        place_longitude -> Text,
        #[sql_name = "placeCategory"]
        place_category -> Text,
        description -> Nullable<Text>,
        #[sql_name = "isCurrent"]
        is_current -> Bool,
    }
}
