use crate::{
    core::{config::MapConfig, extent::Extent, geo::Point, viewport::Viewport},
    input::events::GestureEvent,
    prelude::{Arc, Duration, Instant, VecDeque},
    tiles::{
        renderer::{TileRenderer, TileSink},
        selector::select_tiles,
        source::PyramidSource,
    },
    Result,
};
use std::sync::Mutex;

/// Read-only notifications pushed to overlay consumers (port icons, trade
/// routes, selection polygons) after every completed transition. Observers
/// must not mutate the map from inside a callback; mutation goes through
/// [`ViewportRequests`] and lands on the next [`Map::pump`].
pub trait ViewportObserver {
    fn on_viewport_change(&mut self, extent: &Extent);

    /// Called only when the zoom scale actually changed
    fn on_scale_change(&mut self, _scale: f64) {}
}

/// A transition request issued by an overlay or the surrounding UI
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportRequest {
    /// Center the given world point, optionally at an explicit scale
    ZoomAndPan { world: Point, scale: Option<f64> },
    /// Re-layout to a new canvas size (debounced like any other resize)
    Resize { width: f64, height: f64 },
}

/// Cloneable request port handed to overlays. Requests are queued and
/// drained on the next pump, never applied re-entrantly, which keeps
/// observer callbacks free to issue them mid-notification.
#[derive(Clone, Default)]
pub struct ViewportRequests {
    queue: Arc<Mutex<VecDeque<ViewportRequest>>>,
}

impl ViewportRequests {
    pub fn request_zoom_and_pan(&self, world: Point, scale: Option<f64>) {
        self.push(ViewportRequest::ZoomAndPan { world, scale });
    }

    pub fn request_resize(&self, width: f64, height: f64) {
        self.push(ViewportRequest::Resize { width, height });
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    fn push(&self, request: ViewportRequest) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(request);
        }
    }

    fn drain(&self) -> Vec<ViewportRequest> {
        self.queue
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

/// Coalesces resize bursts into one re-layout: each schedule cancels the
/// previous deadline (last-write-wins timer reset, not a queue).
#[derive(Debug)]
struct ResizeDebouncer {
    pending: Option<Point>,
    deadline: Option<Instant>,
    delay: Duration,
}

impl ResizeDebouncer {
    fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            deadline: None,
            delay,
        }
    }

    fn schedule(&mut self, size: Point) {
        self.pending = Some(size);
        self.deadline = Some(Instant::now() + self.delay);
    }

    fn take_due(&mut self) -> Option<Point> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Wires the viewport, the tile selector and the tile renderer into the
/// event-driven pipeline: gesture → transition → tile selection → sink
/// update → observer notification. Lives for the page session; there is no
/// terminal state.
pub struct Map {
    viewport: Viewport,
    renderer: TileRenderer,
    config: MapConfig,
    observers: Vec<Box<dyn ViewportObserver>>,
    requests: ViewportRequests,
    resize: ResizeDebouncer,
    last_scale: f64,
}

impl Map {
    pub fn new(config: MapConfig, canvas_size: Point) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(canvas_size, &config)?;
        let renderer = TileRenderer::new(Box::new(PyramidSource::from_config(&config)));
        let resize = ResizeDebouncer::new(config.resize_debounce());
        let last_scale = viewport.scale();

        Ok(Self {
            viewport,
            renderer,
            config,
            observers: Vec::new(),
            requests: ViewportRequests::default(),
            resize,
            last_scale,
        })
    }

    /// Feeds one gesture through the pipeline. Resize events are only
    /// scheduled here; they land after the debounce window via
    /// [`Map::pump`]. Everything else renders synchronously.
    pub fn handle_gesture(&mut self, event: &GestureEvent, sink: &mut dyn TileSink) -> Result<()> {
        match event {
            GestureEvent::Resize { width, height } => {
                self.resize.schedule(Point::new(*width, *height));
            }
            other => {
                if self.viewport.apply(other) {
                    self.refresh(sink);
                }
            }
        }
        Ok(())
    }

    /// Applies work deferred to the next event-loop turn: the debounced
    /// resize (if due) and any queued overlay requests.
    pub fn pump(&mut self, sink: &mut dyn TileSink) -> Result<()> {
        let mut changed = false;

        if let Some(size) = self.resize.take_due() {
            changed |= self.viewport.set_size(size);
        }

        for request in self.requests.drain() {
            match request {
                ViewportRequest::ZoomAndPan { world, scale } => {
                    changed |= self.viewport.zoom_and_pan_to(world, scale);
                }
                ViewportRequest::Resize { width, height } => {
                    self.resize.schedule(Point::new(width, height));
                }
            }
        }

        if changed {
            self.refresh(sink);
        }
        Ok(())
    }

    /// Forces a full selection/render pass, e.g. for the initial paint
    pub fn render(&mut self, sink: &mut dyn TileSink) -> Result<()> {
        self.refresh(sink);
        Ok(())
    }

    /// Programmatic "zoom and pan to point", e.g. jumping to a port
    pub fn zoom_and_pan_to(
        &mut self,
        world: Point,
        scale: Option<f64>,
        sink: &mut dyn TileSink,
    ) -> Result<()> {
        if self.viewport.zoom_and_pan_to(world, scale) {
            self.refresh(sink);
        }
        Ok(())
    }

    pub fn zoom_in(&mut self, sink: &mut dyn TileSink) -> Result<()> {
        if self.viewport.zoom_in() {
            self.refresh(sink);
        }
        Ok(())
    }

    pub fn zoom_out(&mut self, sink: &mut dyn TileSink) -> Result<()> {
        if self.viewport.zoom_out() {
            self.refresh(sink);
        }
        Ok(())
    }

    /// Registers an overlay for viewport notifications. The map owns the
    /// observer; overlays reach back only through the request port.
    pub fn add_observer(&mut self, observer: Box<dyn ViewportObserver>) {
        self.observers.push(observer);
    }

    /// Clonable handle overlays use to request transitions
    pub fn requests(&self) -> ViewportRequests {
        self.requests.clone()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    fn refresh(&mut self, sink: &mut dyn TileSink) {
        let selection = select_tiles(&self.viewport.transform(), self.viewport.size(), &self.config);
        let stats = self.renderer.render(&selection, sink);

        log::debug!(
            "level {} tiles {} (+{} -{}) k={}",
            selection.level,
            selection.tiles.len(),
            stats.inserted,
            stats.removed,
            self.viewport.scale()
        );

        let extent = self.viewport.extent();
        let scale = self.viewport.scale();
        let scale_changed = scale != self.last_scale;
        self.last_scale = scale;

        for observer in &mut self.observers {
            observer.on_viewport_change(&extent);
            if scale_changed {
                observer.on_scale_change(scale);
            }
        }
    }
}
