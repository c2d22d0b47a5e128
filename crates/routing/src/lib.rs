//! The routing core: graph store abstraction, graph builder, the four
//! search strategies, the A* engine, step consolidation, the journey cache
//! with single-flight coalescing, and the parallel dispatcher.

pub mod astar;
pub mod builder;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod steps;
pub mod store;
pub mod strategy;

pub use cache::{JourneyCache, MemoryCache};
pub use config::RoutingConfig;
pub use dispatch::Router;
pub use error::{CacheError, RouteError, SearchError};
pub use memory::MemoryGraphStore;
pub use store::{GraphStore, StoreError};
pub use strategy::Strategy;
