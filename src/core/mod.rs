//! Core algorithms – pointer sampling, throttled averaging, translation
//! clamping, and the collapsed/extended state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod geometry;
pub mod sampler;
pub mod sheet;
