pub mod popover;
pub mod selection;

pub use popover::PopoverContent;
pub use selection::{FetchTicket, PopoverState, SelectionState, MAX_SELECTED};
