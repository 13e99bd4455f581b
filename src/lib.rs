//! Client-side implementation of the candidate-management admin panel.
//!
//! The library owns the flow, not the pixels: fetching and scoping the
//! candidate list, the two-phase registration form (image upload, then
//! candidate creation), and the confirm-before-delete state machine. The
//! actual rendering collaborators (table, confirmation dialog, spinner) are
//! supplied by whatever front end drives it; `src/main.rs` ships a plain
//! terminal one.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod panel;

pub use config::Config;
pub use error::{Error, Result};
