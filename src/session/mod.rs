//! Top-level screen controller
//!
//! Owns the search state, at most one live [`Scene`](crate::scene::Scene),
//! and the notification channel. Switches between the search and edit
//! screens and funnels every provider failure into an advisory
//! notification instead of propagating it.

mod controller;
mod state;

pub use controller::*;
pub use state::*;
