use crate::core::{config::MapConfig, geo::TileCoord};

/// Trait representing anything that can produce tile URLs for a given
/// coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// The offline-built map pyramid, laid out as
/// `{base}/{zoom}/{row}/{col}.{ext}` with zero-based integer indices.
pub struct PyramidSource {
    base: String,
    ext: String,
}

impl PyramidSource {
    pub fn new(base: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ext: ext.into(),
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.tile_url_base.clone(), config.tile_url_ext.clone())
    }
}

impl Default for PyramidSource {
    fn default() -> Self {
        Self::new("images/map", "webp")
    }
}

impl TileSource for PyramidSource {
    fn url(&self, coord: TileCoord) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.base, coord.z, coord.row, coord.col, self.ext
        )
    }
}
