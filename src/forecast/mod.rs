pub mod aligner;
pub mod extrapolation;

pub use aligner::*;
pub use extrapolation::*;
