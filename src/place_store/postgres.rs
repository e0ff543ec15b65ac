use super::PlaceStore;
use crate::errors::StoreError;
use crate::place::PlaceRecord;
use crate::postgres_tools::PlacemapPostgresPool;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use std::sync::Arc;

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlaceRow {
    pub id: i64,
    pub place_id: String,
    pub place_name: String,
    pub place_address: Option<String>,
    pub place_district: Option<String>,
    pub place_business_status: Option<String>,
    pub place_latitude: String,
    pub place_longitude: String,
    pub place_category: String,
    pub description: Option<String>,
    pub is_current: bool,
}

impl From<PlaceRow> for PlaceRecord {
    fn from(row: PlaceRow) -> Self {
        PlaceRecord {
            id: row.id,
            place_id: row.place_id,
            name: row.place_name,
            address: row.place_address,
            district: row.place_district,
            latitude: row.place_latitude,
            longitude: row.place_longitude,
            category: row.place_category,
            business_status: row.place_business_status,
            description: row.description,
            is_current: row.is_current,
        }
    }
}

/// Reads current places straight out of the registry's `places` table.
pub struct PostgresPlaceStore {
    pool: Arc<PlacemapPostgresPool>,
}

impl PostgresPlaceStore {
    pub fn new(pool: Arc<PlacemapPostgresPool>) -> Self {
        PostgresPlaceStore { pool }
    }
}

impl PlaceStore for PostgresPlaceStore {
    async fn current_places(&self) -> Result<Vec<PlaceRecord>, StoreError> {
        let conn_pre = self.pool.get().await;

        let conn = &mut conn_pre.map_err(|e| StoreError::Pool(e.to_string()))?;

        let rows = crate::schema::places::table
            .filter(crate::schema::places::is_current.eq(true))
            .order_by(crate::schema::places::id)
            .select(PlaceRow::as_select())
            .load::<PlaceRow>(conn)
            .await?;

        Ok(rows.into_iter().map(PlaceRecord::from).collect())
    }
}
