//! Runner Engine - headless host for the runner gameplay core.
//!
//! This crate provides configuration loading, frame pacing and the
//! scripted game loop that drives a [`runner_gameplay::Session`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod timing;

pub use app::{RunSummary, RunnerApp};
pub use config::{EngineConfig, ScriptStep};
pub use timing::FrameTiming;
