//! Integration tests: full passes and polling runs over in-memory
//! collaborators.

mod mock_sources;
mod simulation;
