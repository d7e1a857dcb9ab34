//! # Seamap
//!
//! The tile-based viewport engine behind a naval MMO companion map.
//!
//! The engine bridges three coordinate systems: the game's native "F11"
//! plane, the map's internal world-pixel space, and on-screen pixels. A
//! single [`Viewport`] owns the continuous zoom/pan transform, a pure tile
//! selector derives the visible slice of the pre-rendered tile pyramid, and
//! a keyed-diff renderer keeps an abstract tile sink (the DOM in
//! production) in sync. Everything is synchronous and single-threaded by
//! design; tile image loading is the sink's fire-and-forget concern.

pub mod core;
pub mod input;
pub mod tiles;

pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    extent::Extent,
    geo::{GamePoint, Point, TileCoord},
    map::{Map, ViewportObserver, ViewportRequest, ViewportRequests},
    viewport::{Viewport, ZoomTransform},
};

pub use crate::input::events::GestureEvent;

pub use crate::tiles::{
    renderer::{RecordingSink, RenderStats, TileRenderer, TileSink},
    selector::{select_tiles, DisplayTransform, TileSelection},
    source::{PyramidSource, TileSource},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Viewport error: {0}")]
    Viewport(String),
}

/// Error type alias for convenience
pub type Error = MapError;
