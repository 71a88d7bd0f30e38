use serde::Serialize;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Pointer affordance the viewer asks the host surface to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Default,
    /// The pointer is over a pickable planet.
    Pointer,
}

impl CursorStyle {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
        }
    }
}

/// Requests the viewer raises toward the owner of the selection state.
///
/// The viewer never mutates selection itself; the owner applies these and
/// hands the updated parameters back through the next sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// A planet was clicked (`Some`) or "show all systems" was pressed (`None`).
    FocusRequested { id: Option<String> },
    /// The focused planet was removed from the scene during reconciliation.
    FocusCleared { id: String },
    /// The info affordance was pressed.
    PopoverRequested { open: bool },
}
