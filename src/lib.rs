//! Wave function collapse grid generation from learned adjacency statistics
//!
//! The system learns which colors sit next to which in a sample image, then fills
//! a new grid by repeatedly collapsing the least certain cell and propagating the
//! constraint it imposes on its neighbours.

#![forbid(unsafe_code)]

/// Core algorithm: candidate sets, selection, collapse, propagation and the generator
pub mod algorithm;
/// Adjacency learning and sample decoding
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy calculation
pub mod math;
/// Cell state and grid container
pub mod spatial;

pub use algorithm::executor::{GenerationConfig, Generator, StepOutcome};
pub use analysis::adjacency::{AdjacencyCondition, AdjacencyModel, Color, Direction};
pub use io::error::{AlgorithmError, Result};
