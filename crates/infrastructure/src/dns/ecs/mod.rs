mod normalizer;

pub use normalizer::{EcsNormalizer, EcsOutcome};
