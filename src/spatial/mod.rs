//! Spatial data structures for generation state
//!
//! This module contains:
//! - Per-position cell state
//! - The bounds-checked grid of cells and its render snapshot

/// Per-position generation state
pub mod cell;
/// Grid container and neighbour lookup
pub mod grid;

pub use cell::Cell;
pub use grid::{CellView, Grid, Position};
