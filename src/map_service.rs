use crate::clustering::cluster_points;
use crate::errors::MapDataError;
use crate::map_features::MapFeature;
use crate::place_store::PlaceStore;
use crate::result_cache::{MapResultCache, ViewportKey};
use crate::viewport::Viewport;
use crate::viewport_query::{row_limit_for_zoom, select_candidates};
use std::sync::Arc;
use tracing::{debug, error};

/// The viewport to map-features pipeline: store read, candidate selection,
/// clustering, with an optional result cache in front.
pub struct MapService<S> {
    store: S,
    cache: Option<MapResultCache>,
}

impl<S: PlaceStore> MapService<S> {
    pub fn new(store: S, cache: Option<MapResultCache>) -> Self {
        MapService { store, cache }
    }

    pub fn uncached(store: S) -> Self {
        MapService { store, cache: None }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> Option<&MapResultCache> {
        self.cache.as_ref()
    }

    pub async fn features_for_viewport(
        &self,
        viewport: &Viewport,
    ) -> Result<Arc<Vec<MapFeature>>, MapDataError> {
        let Some(cache) = &self.cache else {
            return self.compute(viewport).await.map(Arc::new);
        };

        let key = ViewportKey::for_viewport(viewport);

        if let Some(cached) = cache.get(&key) {
            debug!(zoom = viewport.zoom, "map result cache hit");
            return Ok(cached);
        }

        debug!(zoom = viewport.zoom, "map result cache miss");

        let features = Arc::new(self.compute(viewport).await?);
        cache.insert(key, Arc::clone(&features));

        Ok(features)
    }

    async fn compute(&self, viewport: &Viewport) -> Result<Vec<MapFeature>, MapDataError> {
        // zoomed out too far for any rows, skip the store entirely
        if row_limit_for_zoom(viewport.zoom) == 0 {
            return Ok(Vec::new());
        }

        let records = self.store.current_places().await.map_err(|e| {
            error!("Error loading places for map: {}", e);
            e
        })?;

        let candidates = select_candidates(records, viewport);

        Ok(cluster_points(candidates, viewport.zoom))
    }
}
