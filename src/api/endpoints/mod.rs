//! API endpoint handlers.
//!
//! Each module corresponds to one stage of the identification workflow.
//! Handlers bridge into the blocking inference layer with `spawn_blocking`.

pub mod extract;
pub mod health;
pub mod help;
pub mod resolve;
pub mod review;
