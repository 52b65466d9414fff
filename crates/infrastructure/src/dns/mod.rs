pub mod classifier;
pub mod ecs;
pub mod transport;

pub use classifier::{DomainSet, ReloadableClassifier};
pub use ecs::{EcsNormalizer, EcsOutcome};
pub use transport::https::HttpsForwarder;
