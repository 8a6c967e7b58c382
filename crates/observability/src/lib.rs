//! Tracing/logging setup shared by anything embedding the engine.

pub mod tracing;

pub use tracing::init;
