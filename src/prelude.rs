//! Prelude module for common seamap types and traits
//!
//! Re-exports the most commonly used types and helpers for easy importing
//! with `use seamap::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    constants,
    extent::Extent,
    geo::{game_to_world, world_to_game, GamePoint, Point, TileCoord},
    map::{Map, ViewportObserver, ViewportRequest, ViewportRequests},
    viewport::{Viewport, ZoomTransform},
};

pub use crate::input::events::GestureEvent;

pub use crate::tiles::{
    renderer::{RecordingSink, RenderStats, TileRenderer, TileSink},
    selector::{select_tiles, DisplayTransform, TileSelection},
    source::{PyramidSource, TileSource},
};

pub use crate::{Error as MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
