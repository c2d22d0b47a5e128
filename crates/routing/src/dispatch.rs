//! Fans a request out to one task per strategy, collects whichever succeed,
//! and collapses the failure modes the way callers see them: a populated
//! map, `NoRoutesFound`, or `StoreUnavailable`.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, warn};
use model::journey::Journey;
use model::Coordinates;

use crate::astar::find_route;
use crate::cache::{cache_key, get_or_compute, JourneyCache};
use crate::config::RoutingConfig;
use crate::error::{RouteError, SearchError};
use crate::store::{GraphStore, StoreError};
use crate::strategy::Strategy;

pub struct Router<S, C> {
    store: Arc<S>,
    cache: Arc<C>,
    config: Arc<RoutingConfig>,
}

impl<S, C> Clone for Router<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S, C> Router<S, C>
where
    S: GraphStore + 'static,
    C: JourneyCache + 'static,
{
    pub fn new(store: Arc<S>, cache: Arc<C>, config: RoutingConfig) -> Self {
        Self {
            store,
            cache,
            config: Arc::new(config),
        }
    }

    /// Routes between two coordinates under the requested strategies (all
    /// four when unspecified). Strategies that fail internally are omitted
    /// from the map; an empty map is `NoRoutesFound` unless every failure
    /// was the store being unreachable.
    pub async fn search(
        &self,
        from: Coordinates,
        to: Coordinates,
        strategies: Option<&[Strategy]>,
    ) -> Result<HashMap<Strategy, Journey>, RouteError> {
        if !from.is_valid() || !to.is_valid() {
            return Err(RouteError::InvalidCoords);
        }

        let requested: Vec<Strategy> = match strategies {
            Some(subset) if !subset.is_empty() => subset.to_vec(),
            _ => Strategy::ALL.to_vec(),
        };

        let tasks = requested.into_iter().map(|strategy| {
            let store = Arc::clone(&self.store);
            let cache = Arc::clone(&self.cache);
            let config = Arc::clone(&self.config);
            tokio::spawn(async move {
                let key = cache_key(from, to, strategy);
                let result = get_or_compute(cache.as_ref(), &key, &config, || {
                    find_route(store.as_ref(), &config, strategy, from, to)
                })
                .await;
                (strategy, result)
            })
        });

        let mut journeys = HashMap::new();
        let mut store_failure: Option<StoreError> = None;
        for joined in join_all(tasks).await {
            let (strategy, result) = match joined {
                Ok(outcome) => outcome,
                Err(why) => {
                    error!("strategy task panicked: {why}");
                    continue;
                }
            };
            match result {
                Ok(journey) => {
                    journeys.insert(strategy, journey);
                }
                Err(SearchError::Store(why)) => {
                    warn!("strategy {strategy} failed against the store: {why}");
                    store_failure = Some(why);
                }
                Err(why) => {
                    // NoPath / Timeout / ExplorationCapReached are omissions,
                    // distinguishable here but not in the response
                    debug!("strategy {strategy} returned no journey: {why}");
                }
            }
        }

        if journeys.is_empty() {
            return match store_failure {
                Some(why) => Err(RouteError::Store(why)),
                None => Err(RouteError::NoRoutesFound),
            };
        }
        Ok(journeys)
    }
}
