//! Step definitions for task tracking scenarios.

mod given;
mod then;
pub mod world;
