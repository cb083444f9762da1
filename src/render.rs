//! Rendering subsystem.
//!
//! Hosts the protocol spoken between the application loop and the search worker,
//! and the ratatui terminal front end.

pub mod protocol;
pub mod ui;
