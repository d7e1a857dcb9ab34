//! Configuration consumed once at process start. Nothing here is
//! re-derived at runtime; the viewport computes its fit scale from the
//! current canvas size, everything else comes from this struct.

use crate::core::constants;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// World-pixel extent on both axes. Power of two.
    pub world_size: f64,
    /// Native edge length of one pyramid tile, in pixels.
    pub tile_edge_px: u32,
    /// Highest available pyramid level.
    pub max_tile_zoom: u8,
    /// Upper zoom bound. Power of two.
    pub max_scale: f64,
    /// Initial scale; when absent the viewport starts at its fit scale.
    pub init_scale: Option<f64>,
    /// Scale used by zoom-and-pan requests that carry no explicit target.
    pub inspect_scale: f64,
    /// Headroom subtracted from the continuous zoom before snapping to a
    /// pyramid level (coarser level shown magnified instead).
    pub pyramid_zoom_delta: f64,
    /// Overscroll allowance past the world's left/top edge, in pixels.
    pub overscroll_margin_px: f64,
    /// Resize coalescing delay, in milliseconds.
    pub resize_debounce_ms: u64,
    /// Base path of the tile pyramid URL scheme.
    pub tile_url_base: String,
    /// Image extension of the pre-rendered tiles.
    pub tile_url_ext: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_size: constants::DEFAULT_WORLD_SIZE,
            tile_edge_px: constants::TILE_EDGE_PX,
            max_tile_zoom: constants::DEFAULT_MAX_TILE_ZOOM,
            max_scale: constants::DEFAULT_MAX_SCALE,
            init_scale: None,
            inspect_scale: constants::DEFAULT_INSPECT_SCALE,
            pyramid_zoom_delta: constants::DEFAULT_PYRAMID_ZOOM_DELTA,
            overscroll_margin_px: constants::DEFAULT_OVERSCROLL_MARGIN_PX,
            resize_debounce_ms: constants::DEFAULT_RESIZE_DEBOUNCE_MS,
            tile_url_base: "images/map".to_string(),
            tile_url_ext: "webp".to_string(),
        }
    }
}

impl MapConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(MapError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Enforces the invariants the engine assumes: power-of-two world and
    /// zoom bounds, a pyramid that does not exceed native resolution.
    pub fn validate(&self) -> Result<()> {
        if !is_power_of_two(self.world_size) {
            return Err(Box::new(MapError::Config(format!(
                "world_size {} is not a power of two",
                self.world_size
            ))));
        }
        if self.tile_edge_px == 0 || !self.tile_edge_px.is_power_of_two() {
            return Err(Box::new(MapError::Config(format!(
                "tile_edge_px {} is not a power of two",
                self.tile_edge_px
            ))));
        }
        if !is_power_of_two(self.max_scale) {
            return Err(Box::new(MapError::Config(format!(
                "max_scale {} is not a power of two",
                self.max_scale
            ))));
        }
        if let Some(init) = self.init_scale {
            if !is_power_of_two(init) {
                return Err(Box::new(MapError::Config(format!(
                    "init_scale {init} is not a power of two"
                ))));
            }
        }
        let native_zoom = self.native_tile_zoom();
        if f64::from(self.max_tile_zoom) > native_zoom {
            return Err(Box::new(MapError::Config(format!(
                "max_tile_zoom {} exceeds the native pyramid depth {}",
                self.max_tile_zoom, native_zoom
            ))));
        }
        if !self.pyramid_zoom_delta.is_finite() || self.pyramid_zoom_delta < 0.0 {
            return Err(Box::new(MapError::Config(format!(
                "pyramid_zoom_delta {} is not a non-negative number",
                self.pyramid_zoom_delta
            ))));
        }
        Ok(())
    }

    /// Pyramid level at which tiles render 1:1, `log2(world_size / tile_edge)`.
    pub fn native_tile_zoom(&self) -> f64 {
        (self.world_size / f64::from(self.tile_edge_px)).log2()
    }

    /// Resize coalescing delay as a [`Duration`]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

fn is_power_of_two(value: f64) -> bool {
    value > 0.0 && value.is_finite() && value.log2().fract() == 0.0
}
