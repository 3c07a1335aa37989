//! Input/output around the generator: CLI, image export, progress and errors

/// Command-line interface and batch driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG export of grid snapshots
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Animated GIF capture of generation steps
pub mod visualization;
