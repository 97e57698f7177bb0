//! Operation state machine
//!
//! The panel is always in exactly one state. Key presses, pedal edges and
//! the turn counter produce events; `OperationState::transition` decides
//! where they lead. Side effects live in the controller.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::OperationState;
