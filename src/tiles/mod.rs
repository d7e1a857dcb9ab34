pub mod renderer;
pub mod selector;
pub mod source;

// Re-exports for convenience
pub use renderer::{RecordingSink, RenderStats, TileRenderer, TileSink};
pub use selector::{select_tiles, DisplayTransform, TileSelection};
pub use source::{PyramidSource, TileSource};
