/// Shannon entropy over weighted candidate sets
pub mod entropy;
