pub mod config;
pub mod constants;
pub mod extent;
pub mod geo;
pub mod map;
pub mod viewport;

// Re-export the essential types
pub use config::MapConfig;
pub use extent::Extent;
pub use geo::{GamePoint, Point, TileCoord};
pub use map::{Map, ViewportObserver, ViewportRequest, ViewportRequests};
pub use viewport::{Viewport, ZoomTransform};
