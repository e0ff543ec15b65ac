use super::PlaceStore;
use crate::errors::StoreError;
use crate::place::PlaceRecord;
use std::path::Path;

/// A fixed snapshot of place records held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPlaceStore {
    places: Vec<PlaceRecord>,
}

impl InMemoryPlaceStore {
    pub fn new(places: Vec<PlaceRecord>) -> Self {
        InMemoryPlaceStore { places }
    }

    /// Loads a registry export with the registry's column headers
    /// (`placeId`, `placeName`, `placeLatitude`, ...).
    pub fn from_csv_path(path: &Path) -> Result<Self, StoreError> {
        let csv_err = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(csv_err)?;

        let places = reader
            .deserialize::<PlaceRecord>()
            .collect::<Result<Vec<PlaceRecord>, csv::Error>>()
            .map_err(csv_err)?;

        Ok(InMemoryPlaceStore { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PlaceStore for InMemoryPlaceStore {
    async fn current_places(&self) -> Result<Vec<PlaceRecord>, StoreError> {
        Ok(self
            .places
            .iter()
            .filter(|place| place.is_current)
            .cloned()
            .collect())
    }
}
