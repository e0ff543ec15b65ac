use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not check out a database connection: {0}")]
    Pool(String),
    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("Could not read places file '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Error, Debug)]
pub enum MapDataError {
    #[error("Place store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
