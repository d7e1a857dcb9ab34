//! Dynamic tile selection: bridges the continuous zoom scale with the
//! discrete pyramid levels of the pre-rendered map tiles.

use crate::core::{config::MapConfig, geo::Point, geo::TileCoord, viewport::ZoomTransform};

/// Group-level transform the renderer applies for sub-tile positioning.
/// `scale` is the magnification of one native tile raster on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayTransform {
    pub translate: Point,
    pub scale: f64,
}

/// Result of one selection pass: the tiles intersecting the viewport at
/// the chosen pyramid level, plus the transform that positions them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileSelection {
    pub tiles: Vec<TileCoord>,
    pub display: DisplayTransform,
    pub level: u8,
}

impl TileSelection {
    fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Computes the pyramid level and the integer row/column range of tiles
/// intersecting the viewport for the given view transform.
///
/// The continuous zoom equivalent level is `log2(k) + log2(world/tile)`;
/// the displayed level backs off by the configured headroom so a coarser
/// level is magnified instead of demanding unbounded pyramid depth.
/// Row/column bounds round outward (floor/ceil), with edge-on-boundary
/// ties resolved to the lower-index tile only, so the viewport is never
/// under-covered and edge tiles are never duplicated.
///
/// Any non-finite intermediate degrades to an empty selection rather than
/// propagating into DOM attributes.
pub fn select_tiles(
    transform: &ZoomTransform,
    viewport: Point,
    config: &MapConfig,
) -> TileSelection {
    if !transform.is_finite() || transform.k <= 0.0 || !viewport.is_finite() {
        log::warn!(
            "non-finite view state (k={}, viewport={}x{}), emitting empty tile set",
            transform.k,
            viewport.x,
            viewport.y
        );
        return TileSelection::empty();
    }

    let continuous_zoom = transform.k.log2() + config.native_tile_zoom();
    let level = (continuous_zoom - config.pyramid_zoom_delta)
        .max(0.0)
        .round()
        .min(f64::from(config.max_tile_zoom)) as u8;
    let tiles_per_side = 1u32 << level;

    // On-screen pixel size of one level tile at the requested continuous scale
    let tile_screen_px = transform.k * config.world_size / f64::from(tiles_per_side);
    if !tile_screen_px.is_finite() || tile_screen_px <= 0.0 {
        return TileSelection::empty();
    }

    // Viewport corners in the level's row/column index space
    let col_lo = (0.0 - transform.tx) / tile_screen_px;
    let col_hi = (viewport.x - transform.tx) / tile_screen_px;
    let row_lo = (0.0 - transform.ty) / tile_screen_px;
    let row_hi = (viewport.y - transform.ty) / tile_screen_px;
    if ![col_lo, col_hi, row_lo, row_hi].iter().all(|v| v.is_finite()) {
        return TileSelection::empty();
    }

    let last = f64::from(tiles_per_side - 1);
    let col_min = col_lo.floor().max(0.0);
    let col_max = (col_hi.ceil() - 1.0).min(last);
    let row_min = row_lo.floor().max(0.0);
    let row_max = (row_hi.ceil() - 1.0).min(last);
    if col_min > col_max || row_min > row_max {
        // Transient during extreme zoom-out before clamping settles
        return TileSelection::empty();
    }

    let (col_min, col_max) = (col_min as u32, col_max as u32);
    let (row_min, row_max) = (row_min as u32, row_max as u32);

    let mut tiles =
        Vec::with_capacity(((row_max - row_min + 1) * (col_max - col_min + 1)) as usize);
    for row in row_min..=row_max {
        for col in col_min..=col_max {
            tiles.push(TileCoord::new(level, row, col));
        }
    }

    TileSelection {
        tiles,
        display: DisplayTransform {
            translate: Point::new(transform.tx, transform.ty),
            scale: tile_screen_px / f64::from(config.tile_edge_px),
        },
        level,
    }
}
