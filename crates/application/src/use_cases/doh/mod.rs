mod handle_doh_query;

pub use handle_doh_query::{DohAnswer, HandleDohQueryUseCase};
