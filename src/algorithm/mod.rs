/// Bitset of candidate condition indices
pub mod bitset;
/// Weighted resolution of a single cell
pub mod collapse;
/// Generation driver and step orchestration
pub mod executor;
/// Neighbour narrowing and forced-collapse cascades
pub mod propagation;
/// Minimum-entropy cell selection
pub mod selection;
