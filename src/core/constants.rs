//! Engine-wide constants derived from the game map's pre-rendered tile
//! pyramid and common web-map conventions. Keeping them in a single place
//! makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels (native pyramid resolution).
pub const TILE_EDGE_PX: u32 = 256;

/// World-pixel extent of the map on both axes. Power of two.
pub const DEFAULT_WORLD_SIZE: f64 = 8192.0;

/// Highest pre-rendered pyramid level shipped with the map.
pub const DEFAULT_MAX_TILE_ZOOM: u8 = 5;

/// Upper zoom bound. Power of two.
pub const DEFAULT_MAX_SCALE: f64 = 32.0;

/// Scale applied when jumping to a port or an F11 position without an
/// explicit target scale.
pub const DEFAULT_INSPECT_SCALE: f64 = 8.0;

/// Continuous-zoom offset subtracted before snapping to a pyramid level.
/// One level of headroom displays a coarser level magnified past its
/// native resolution instead of demanding ever-finer pyramid levels.
pub const DEFAULT_PYRAMID_ZOOM_DELTA: f64 = 1.0;

/// How far the map may be dragged past the world edge, in screen pixels.
/// Sized for the left/top UI gutter (a few character heights).
pub const DEFAULT_OVERSCROLL_MARGIN_PX: f64 = 48.0;

/// Delay before a burst of resize events is collapsed into one re-layout.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Multiplicative step for one wheel notch or one programmatic zoom step.
pub const ZOOM_STEP_FACTOR: f64 = 2.0;
