use crate::core::geo::{Point, TileCoord};
use crate::prelude::{HashMap, HashSet};
use crate::tiles::{selector::TileSelection, source::TileSource};

/// Sink for the renderer's keyed mutations: the SVG/DOM tile group in
/// production, a recorder in tests. Image fetches triggered by
/// `insert_tile` are fire-and-forget; the engine never awaits loads.
pub trait TileSink {
    fn insert_tile(&mut self, coord: TileCoord, url: &str);
    fn remove_tile(&mut self, coord: TileCoord);
    fn set_group_transform(&mut self, translate: Point, scale: f64);
}

/// Mutation counts for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub inserted: usize,
    pub removed: usize,
}

/// Data-joins each computed tile list against the sink: new tiles are
/// inserted, stale ones removed, tiles present in both are left untouched
/// (no re-fetch). Keeps only the currently rendered set, diffed against
/// the previous one.
pub struct TileRenderer {
    source: Box<dyn TileSource>,
    current: HashSet<TileCoord>,
}

impl TileRenderer {
    pub fn new(source: Box<dyn TileSource>) -> Self {
        Self {
            source,
            current: HashSet::default(),
        }
    }

    /// Applies one selection to the sink. An empty selection leaves the
    /// sink untouched entirely, so a transient empty tile set never blanks
    /// the map.
    pub fn render(&mut self, selection: &TileSelection, sink: &mut dyn TileSink) -> RenderStats {
        if selection.tiles.is_empty() {
            return RenderStats::default();
        }

        let next: HashSet<TileCoord> = selection.tiles.iter().copied().collect();
        let mut stats = RenderStats::default();

        let stale: Vec<TileCoord> = self
            .current
            .iter()
            .copied()
            .filter(|coord| !next.contains(coord))
            .collect();
        for coord in stale {
            sink.remove_tile(coord);
            stats.removed += 1;
        }

        // Selection order keeps inserts deterministic (row-major)
        for &coord in &selection.tiles {
            if !self.current.contains(&coord) {
                sink.insert_tile(coord, &self.source.url(coord));
                stats.inserted += 1;
            }
        }

        self.current = next;

        // Applied every pass so sub-tile alignment always reflects the
        // continuous zoom, even when the tile set itself is unchanged.
        sink.set_group_transform(selection.display.translate, selection.display.scale);

        stats
    }

    /// Number of tiles currently attached to the sink
    pub fn tile_count(&self) -> usize {
        self.current.len()
    }
}

/// Sink that records mutations instead of touching a DOM. Used by tests
/// and the headless demo.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub tiles: HashMap<TileCoord, String>,
    pub group_transform: Option<(Point, f64)>,
    pub total_inserts: usize,
    pub total_removes: usize,
}

impl TileSink for RecordingSink {
    fn insert_tile(&mut self, coord: TileCoord, url: &str) {
        self.tiles.insert(coord, url.to_string());
        self.total_inserts += 1;
    }

    fn remove_tile(&mut self, coord: TileCoord) {
        self.tiles.remove(&coord);
        self.total_removes += 1;
    }

    fn set_group_transform(&mut self, translate: Point, scale: f64) {
        self.group_transform = Some((translate, scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::selector::DisplayTransform;
    use crate::tiles::source::PyramidSource;

    fn selection(tiles: Vec<TileCoord>) -> TileSelection {
        TileSelection {
            tiles,
            display: DisplayTransform {
                translate: Point::new(10.0, 20.0),
                scale: 2.0,
            },
            level: 1,
        }
    }

    fn renderer() -> TileRenderer {
        TileRenderer::new(Box::new(PyramidSource::default()))
    }

    #[test]
    fn test_initial_render_inserts_all() {
        let mut renderer = renderer();
        let mut sink = RecordingSink::default();

        let stats = renderer.render(
            &selection(vec![TileCoord::new(1, 0, 0), TileCoord::new(1, 0, 1)]),
            &mut sink,
        );

        assert_eq!(stats, RenderStats { inserted: 2, removed: 0 });
        assert_eq!(sink.tiles.len(), 2);
        assert_eq!(
            sink.tiles.get(&TileCoord::new(1, 0, 1)).unwrap(),
            "images/map/1/0/1.webp"
        );
        assert_eq!(sink.group_transform, Some((Point::new(10.0, 20.0), 2.0)));
    }

    #[test]
    fn test_rerender_same_set_is_idempotent() {
        let mut renderer = renderer();
        let mut sink = RecordingSink::default();
        let tiles = selection(vec![TileCoord::new(1, 0, 0), TileCoord::new(1, 1, 1)]);

        renderer.render(&tiles, &mut sink);
        let stats = renderer.render(&tiles, &mut sink);

        assert_eq!(stats, RenderStats::default());
        assert_eq!(sink.total_inserts, 2);
        assert_eq!(sink.total_removes, 0);
    }

    #[test]
    fn test_diff_removes_stale_and_keeps_shared() {
        let mut renderer = renderer();
        let mut sink = RecordingSink::default();

        renderer.render(
            &selection(vec![TileCoord::new(1, 0, 0), TileCoord::new(1, 0, 1)]),
            &mut sink,
        );
        let stats = renderer.render(
            &selection(vec![TileCoord::new(1, 0, 1), TileCoord::new(1, 1, 1)]),
            &mut sink,
        );

        assert_eq!(stats, RenderStats { inserted: 1, removed: 1 });
        assert!(!sink.tiles.contains_key(&TileCoord::new(1, 0, 0)));
        assert!(sink.tiles.contains_key(&TileCoord::new(1, 0, 1)));
        assert!(sink.tiles.contains_key(&TileCoord::new(1, 1, 1)));
        assert_eq!(renderer.tile_count(), 2);
    }

    #[test]
    fn test_empty_selection_leaves_sink_unchanged() {
        let mut renderer = renderer();
        let mut sink = RecordingSink::default();

        renderer.render(&selection(vec![TileCoord::new(1, 0, 0)]), &mut sink);
        let transform_before = sink.group_transform;

        let stats = renderer.render(&TileSelection::default(), &mut sink);

        assert_eq!(stats, RenderStats::default());
        assert_eq!(sink.tiles.len(), 1);
        assert_eq!(sink.group_transform, transform_before);
        // The renderer still remembers what is attached
        assert_eq!(renderer.tile_count(), 1);
    }
}
