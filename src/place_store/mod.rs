//! Where place records come from.
//!
//! The map pipeline only ever asks for the current version of every place;
//! how versions are kept is the registry's business.

mod memory;
mod postgres;

pub use memory::InMemoryPlaceStore;
pub use postgres::PostgresPlaceStore;

use crate::errors::StoreError;
use crate::place::PlaceRecord;

#[allow(async_fn_in_trait)]
pub trait PlaceStore {
    /// All current (non-historical) place records.
    async fn current_places(&self) -> Result<Vec<PlaceRecord>, StoreError>;
}

/// The store the server is started with.
pub enum AnyPlaceStore {
    Postgres(PostgresPlaceStore),
    InMemory(InMemoryPlaceStore),
}

impl PlaceStore for AnyPlaceStore {
    async fn current_places(&self) -> Result<Vec<PlaceRecord>, StoreError> {
        match self {
            AnyPlaceStore::Postgres(store) => store.current_places().await,
            AnyPlaceStore::InMemory(store) => store.current_places().await,
        }
    }
}
