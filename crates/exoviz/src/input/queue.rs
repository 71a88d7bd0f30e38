/// Input events the viewer understands.
/// Pointer coordinates are normalized device coordinates: x right, y up,
/// both in [-1, 1] across the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved over the surface.
    PointerMove { x: f32, y: f32 },
    /// The cursor left the surface.
    PointerLeave,
    /// A click (press + release) on the surface.
    Click { x: f32, y: f32 },
    /// The surface was resized, in CSS pixels.
    Resize { width: f32, height: f32 },
    /// The info affordance was pressed.
    InfoPressed,
    /// The "show all systems" control was pressed.
    ShowAllSystems,
}

/// A queue of input events.
/// DOM listeners write events into the queue; the viewer drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
