pub mod generation;
pub mod metrics;
pub mod providers;

pub use generation::{
    AttemptFailure, FallbackGenerator, Generation, GenerationError, ModelChain, ALL_MODELS_FAILED,
};
pub use metrics::{get_metrics, init_metrics};
pub use providers::{ProviderError, TextProvider};
