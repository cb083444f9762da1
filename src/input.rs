//! Input subsystem.
//!
//! Translates crossterm events into domain-level [`InputAction`]s for the
//! application loop. Modules outside this crate should prefer importing from
//! `crate::input` rather than reaching into submodules.

pub mod service;

pub use service::{
    spawn_input_thread, Focus, InputAction, InputService, InputState, InputStateMachine,
    ScrollDirection,
};
