use crate::core::{config::MapConfig, constants, extent::Extent, geo::Point};
use crate::input::events::GestureEvent;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// The affine `(translate, scale)` pair mapping world coordinates to
/// screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub tx: f64,
    pub ty: f64,
    pub k: f64,
}

impl ZoomTransform {
    pub fn new(tx: f64, ty: f64, k: f64) -> Self {
        Self { tx, ty, k }
    }

    /// World pixels to screen pixels
    pub fn apply(&self, world: Point) -> Point {
        Point::new(world.x * self.k + self.tx, world.y * self.k + self.ty)
    }

    /// Screen pixels back to world pixels
    pub fn invert(&self, screen: Point) -> Point {
        Point::new((screen.x - self.tx) / self.k, (screen.y - self.ty) / self.k)
    }

    pub fn is_finite(&self) -> bool {
        self.tx.is_finite() && self.ty.is_finite() && self.k.is_finite()
    }
}

/// Owns the current view of the map: a continuous zoom scale, a 2D
/// translation, and the canvas size. All gesture handling funnels through
/// [`Viewport::apply`], one synchronous transition per event; there is no
/// animation state between events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    transform: ZoomTransform,
    size: Point,
    min_scale: f64,
    max_scale: f64,
    world_size: f64,
    inspect_scale: f64,
    overscroll_margin: f64,
    drag_active: bool,
}

impl Viewport {
    /// Creates a viewport sized to the canvas, starting at the configured
    /// initial scale (or the fit scale) with the world centered.
    pub fn new(size: Point, config: &MapConfig) -> Result<Self> {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(Box::new(MapError::Viewport(format!(
                "degenerate canvas size {}x{}",
                size.x, size.y
            ))));
        }

        let min_scale = Self::fit_scale(size, config.world_size).min(config.max_scale);
        let k = config
            .init_scale
            .unwrap_or(min_scale)
            .clamp(min_scale, config.max_scale);

        let mut viewport = Self {
            transform: ZoomTransform::new(0.0, 0.0, k),
            size,
            min_scale,
            max_scale: config.max_scale,
            world_size: config.world_size,
            inspect_scale: config.inspect_scale,
            overscroll_margin: config.overscroll_margin_px,
            drag_active: false,
        };
        viewport.center_world();
        Ok(viewport)
    }

    /// Largest power of two at which the whole world still fits the
    /// canvas: `2^floor(log2(min(w, h) / world_size))`.
    pub fn fit_scale(size: Point, world_size: f64) -> f64 {
        let ratio = size.x.min(size.y) / world_size;
        2f64.powi(ratio.log2().floor() as i32)
    }

    /// The single transition function. Returns whether the transform
    /// changed (callers re-render and notify only on `true`).
    pub fn apply(&mut self, event: &GestureEvent) -> bool {
        match event {
            GestureEvent::Wheel { delta_y, position } => {
                if *delta_y == 0.0 || !position.is_finite() {
                    return false;
                }
                let factor = if *delta_y < 0.0 {
                    constants::ZOOM_STEP_FACTOR
                } else {
                    1.0 / constants::ZOOM_STEP_FACTOR
                };
                self.zoom_about(factor, *position)
            }
            GestureEvent::DragStart { .. } => {
                self.drag_active = true;
                false
            }
            GestureEvent::DragMove { dx, dy } => {
                if !self.drag_active {
                    log::debug!("ignoring DragMove outside an active drag");
                    return false;
                }
                self.pan(*dx, *dy)
            }
            GestureEvent::DragEnd => {
                self.drag_active = false;
                false
            }
            GestureEvent::Resize { width, height } => self.set_size(Point::new(*width, *height)),
        }
    }

    /// Multiplies the scale by `factor`, keeping the world point under
    /// `cursor` fixed on screen.
    pub fn zoom_about(&mut self, factor: f64, cursor: Point) -> bool {
        let k = self.transform.k;
        let k_new = (k * factor).clamp(self.min_scale, self.max_scale);
        if k_new == k {
            return false;
        }

        let ratio = k_new / k;
        self.transform.tx = cursor.x - (cursor.x - self.transform.tx) * ratio;
        self.transform.ty = cursor.y - (cursor.y - self.transform.ty) * ratio;
        self.transform.k = k_new;
        self.clamp_translate();
        true
    }

    /// One zoom step in about the viewport center
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_about(constants::ZOOM_STEP_FACTOR, self.center_screen())
    }

    /// One zoom step out about the viewport center
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_about(1.0 / constants::ZOOM_STEP_FACTOR, self.center_screen())
    }

    /// Translates the view by a pixel delta, clamped so the world keeps
    /// covering the viewport up to the overscroll margin.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let before = self.transform;
        self.transform.tx += dx;
        self.transform.ty += dy;
        self.clamp_translate();
        self.transform != before
    }

    /// Centers the given world point at the given scale. A missing scale
    /// means the configured inspect scale.
    pub fn zoom_and_pan_to(&mut self, world: Point, scale: Option<f64>) -> bool {
        if !world.is_finite() {
            return false;
        }
        let k = scale
            .unwrap_or(self.inspect_scale)
            .clamp(self.min_scale, self.max_scale);

        let before = self.transform;
        self.transform.k = k;
        self.transform.tx = self.size.x / 2.0 - world.x * k;
        self.transform.ty = self.size.y / 2.0 - world.y * k;
        self.clamp_translate();
        self.transform != before
    }

    /// Returns to the fit scale with the world centered
    pub fn fit_to_view(&mut self) -> bool {
        let before = self.transform;
        self.transform.k = self.min_scale;
        self.center_world();
        self.clamp_translate();
        self.transform != before
    }

    /// Applies a new canvas size. The fit scale is recomputed and the
    /// transform re-clamped into the new bounds. Degenerate sizes are
    /// ignored until a sane one arrives.
    pub fn set_size(&mut self, size: Point) -> bool {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            log::warn!("ignoring degenerate resize to {}x{}", size.x, size.y);
            return false;
        }

        let before = self.transform;
        let size_changed = size != self.size;
        self.size = size;
        self.min_scale = Self::fit_scale(size, self.world_size).min(self.max_scale);
        self.transform.k = self.transform.k.clamp(self.min_scale, self.max_scale);
        self.clamp_translate();
        size_changed || self.transform != before
    }

    /// The currently visible world rectangle, clamped to the world square
    pub fn extent(&self) -> Extent {
        let min = self.transform.invert(Point::new(0.0, 0.0));
        let max = self.transform.invert(Point::new(self.size.x, self.size.y));
        Extent::new(min, max).clamped_to_world(self.world_size)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform.apply(world)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.transform.invert(screen)
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn scale(&self) -> f64 {
        self.transform.k
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_active
    }

    fn center_screen(&self) -> Point {
        Point::new(self.size.x / 2.0, self.size.y / 2.0)
    }

    fn center_world(&mut self) {
        let world_px = self.world_size * self.transform.k;
        self.transform.tx = (self.size.x - world_px) / 2.0;
        self.transform.ty = (self.size.y - world_px) / 2.0;
    }

    fn clamp_translate(&mut self) {
        let world_px = self.world_size * self.transform.k;
        self.transform.tx = clamp_axis(
            self.transform.tx,
            self.size.x,
            world_px,
            self.overscroll_margin,
        );
        self.transform.ty = clamp_axis(
            self.transform.ty,
            self.size.y,
            world_px,
            self.overscroll_margin,
        );
    }
}

/// One-axis translate clamp. The world must keep covering the viewport up
/// to the overscroll margin; when the scaled world is smaller than the
/// viewport the two one-sided limits cross, and the translate is held
/// between them instead of snapping to either edge.
fn clamp_axis(t: f64, viewport_px: f64, world_px: f64, margin: f64) -> f64 {
    let hi = margin;
    let lo = viewport_px - world_px;
    t.clamp(lo.min(hi), lo.max(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_1024x768() -> Viewport {
        Viewport::new(Point::new(1024.0, 768.0), &MapConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_fit_scale_and_centering() {
        let viewport = viewport_1024x768();

        // 768 / 8192 = 0.09375, largest power of two below is 1/16
        assert_eq!(viewport.scale(), 0.0625);

        // World is 512px at that scale; centered in 1024x768
        let t = viewport.transform();
        assert_eq!(t.tx, 256.0);
        assert_eq!(t.ty, 128.0);
    }

    #[test]
    fn test_rejects_degenerate_canvas() {
        assert!(Viewport::new(Point::new(0.0, 600.0), &MapConfig::default()).is_err());
        assert!(Viewport::new(Point::new(800.0, -1.0), &MapConfig::default()).is_err());
    }

    #[test]
    fn test_scale_stays_bounded() {
        let mut viewport = viewport_1024x768();
        let cursor = Point::new(512.0, 384.0);

        for _ in 0..40 {
            viewport.apply(&GestureEvent::Wheel {
                delta_y: -1.0,
                position: cursor,
            });
        }
        assert_eq!(viewport.scale(), viewport.max_scale());

        for _ in 0..40 {
            viewport.apply(&GestureEvent::Wheel {
                delta_y: 1.0,
                position: cursor,
            });
        }
        assert_eq!(viewport.scale(), viewport.min_scale());
    }

    #[test]
    fn test_zoom_keeps_cursor_point_fixed() {
        let mut viewport = viewport_1024x768();
        viewport.zoom_and_pan_to(Point::new(4096.0, 4096.0), Some(1.0));

        let cursor = Point::new(600.0, 400.0);
        let anchor = viewport.screen_to_world(cursor);

        assert!(viewport.zoom_about(2.0, cursor));
        let after = viewport.screen_to_world(cursor);

        assert!((after.x - anchor.x).abs() < 1e-9);
        assert!((after.y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_out_round_trip() {
        let mut viewport = viewport_1024x768();
        viewport.zoom_and_pan_to(Point::new(4096.0, 4096.0), Some(1.0));
        let before = viewport.transform();

        let cursor = Point::new(600.0, 400.0);
        viewport.zoom_about(2.0, cursor);
        viewport.zoom_about(0.5, cursor);
        let after = viewport.transform();

        assert!((after.tx - before.tx).abs() < 1e-9);
        assert!((after.ty - before.ty).abs() < 1e-9);
        assert_eq!(after.k, before.k);
    }

    #[test]
    fn test_pan_is_clamped_to_margin() {
        let mut viewport = viewport_1024x768();
        viewport.zoom_and_pan_to(Point::new(4096.0, 4096.0), Some(1.0));

        // Drag far right/down; the left/top world edge may pass the origin
        // only by the overscroll margin.
        viewport.apply(&GestureEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        viewport.apply(&GestureEvent::DragMove {
            dx: 1e6,
            dy: 1e6,
        });

        let t = viewport.transform();
        assert_eq!(t.tx, constants::DEFAULT_OVERSCROLL_MARGIN_PX);
        assert_eq!(t.ty, constants::DEFAULT_OVERSCROLL_MARGIN_PX);

        // And far left/up: the world's far edge keeps covering the viewport
        viewport.apply(&GestureEvent::DragMove {
            dx: -1e6,
            dy: -1e6,
        });
        let t = viewport.transform();
        assert_eq!(t.tx, 1024.0 - 8192.0);
        assert_eq!(t.ty, 768.0 - 8192.0);
    }

    #[test]
    fn test_drag_move_requires_active_drag() {
        let mut viewport = viewport_1024x768();
        viewport.zoom_and_pan_to(Point::new(4096.0, 4096.0), Some(1.0));
        let before = viewport.transform();

        assert!(!viewport.apply(&GestureEvent::DragMove { dx: 50.0, dy: 0.0 }));
        assert_eq!(viewport.transform(), before);

        viewport.apply(&GestureEvent::DragStart {
            position: Point::new(10.0, 10.0),
        });
        assert!(viewport.apply(&GestureEvent::DragMove { dx: 50.0, dy: 0.0 }));
        viewport.apply(&GestureEvent::DragEnd);
        assert!(!viewport.is_dragging());
    }

    #[test]
    fn test_extent_stays_inside_world() {
        let mut viewport = viewport_1024x768();
        let world = viewport.world_size();

        let extent = viewport.extent();
        assert!(extent.min.x >= 0.0 && extent.min.y >= 0.0);
        assert!(extent.max.x <= world && extent.max.y <= world);

        viewport.zoom_and_pan_to(Point::new(100.0, 100.0), Some(4.0));
        viewport.apply(&GestureEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        viewport.apply(&GestureEvent::DragMove { dx: 5e5, dy: 5e5 });
        let extent = viewport.extent();
        assert!(extent.is_valid());
        assert!(extent.min.x >= 0.0 && extent.max.x <= world);
        assert!(extent.min.y >= 0.0 && extent.max.y <= world);
    }

    #[test]
    fn test_zoom_and_pan_to_centers_target() {
        let mut viewport = viewport_1024x768();
        let target = Point::new(2000.0, 3000.0);

        assert!(viewport.zoom_and_pan_to(target, Some(8.0)));
        let center = viewport.screen_to_world(Point::new(512.0, 384.0));
        assert!((center.x - target.x).abs() < 1e-9);
        assert!((center.y - target.y).abs() < 1e-9);
        assert_eq!(viewport.scale(), 8.0);
    }

    #[test]
    fn test_resize_reclamps_scale() {
        let mut viewport = viewport_1024x768();
        assert_eq!(viewport.scale(), 0.0625);

        // Shrinking the canvas lowers the fit scale; the current scale
        // still sits inside the new bounds and is kept.
        assert!(viewport.set_size(Point::new(512.0, 300.0)));
        assert_eq!(viewport.min_scale(), 2f64.powi(-5));
        assert_eq!(viewport.scale(), 0.0625);

        // Degenerate sizes are ignored
        assert!(!viewport.set_size(Point::new(0.0, 0.0)));
        assert_eq!(viewport.size(), Point::new(512.0, 300.0));
    }

    #[test]
    fn test_fit_to_view() {
        let mut viewport = viewport_1024x768();
        viewport.zoom_and_pan_to(Point::new(1000.0, 1000.0), Some(16.0));

        assert!(viewport.fit_to_view());
        assert_eq!(viewport.scale(), viewport.min_scale());
        assert_eq!(viewport.transform().tx, 256.0);
        assert_eq!(viewport.transform().ty, 128.0);
    }
}
