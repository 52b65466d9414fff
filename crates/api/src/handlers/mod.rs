pub mod classifier;
pub mod doh;
pub mod health;
pub mod quota;

pub use classifier::reload_classifier;
pub use health::health_check;
pub use quota::{credit_quota, get_quota};
