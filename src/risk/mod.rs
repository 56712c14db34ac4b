// Article risk scoring
// Lexicon-driven detection, scoring and the engine factory

pub mod errors;
pub mod lexicon;
pub mod detection;
pub mod scoring;
pub mod traits;
pub mod engines;
pub mod factory;

// Re-export main types
pub use errors::*;
pub use lexicon::{BandThresholds, CategoryTriggers, Lexicon};
pub use traits::*;
pub use engines::*;
pub use factory::*;

// Rule set version reported by engines
pub const VERSION: &str = "1.0.0";
