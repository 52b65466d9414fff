mod reload_classifier;

pub use reload_classifier::ReloadClassifierUseCase;
