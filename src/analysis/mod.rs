/// Directional adjacency rules learned from a sample
pub mod adjacency;
/// Sample image decoding into color arrays
pub mod sample;
