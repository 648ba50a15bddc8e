//! Core engine: the single-pass pipeline and the loop that drives it.

pub mod pipeline;
pub mod poller;
