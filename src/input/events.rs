use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Gesture-level input consumed by the viewport's single transition
/// function. The UI layer translates raw DOM events into these; tests
/// construct them directly, no DOM required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Scroll wheel or pinch; positive `delta_y` zooms out. `position` is
    /// the cursor in screen pixels and stays fixed during the zoom.
    Wheel { delta_y: f64, position: Point },
    /// Start of a drag operation
    DragStart { position: Point },
    /// Drag in progress; pixel delta since the previous event
    DragMove { dx: f64, dy: f64 },
    /// End of a drag operation
    DragEnd,
    /// Canvas resize. Applied after the debounce window, not immediately.
    Resize { width: f64, height: f64 },
}

impl GestureEvent {
    /// Gets the screen position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            GestureEvent::Wheel { position, .. } => Some(*position),
            GestureEvent::DragStart { position } => Some(*position),
            _ => None,
        }
    }

    /// Checks if this event is part of a drag sequence
    pub fn is_drag_event(&self) -> bool {
        matches!(
            self,
            GestureEvent::DragStart { .. } | GestureEvent::DragMove { .. } | GestureEvent::DragEnd
        )
    }
}
