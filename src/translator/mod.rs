pub mod detect;
pub mod google;
pub mod interface;
pub mod llm;
pub mod mtran;
pub mod pool;
pub mod registry;
pub mod transport;

pub use interface::{
    BatchTranslationRequest, BatchTranslationResponse, Provider, TranslateError,
    TranslationRequest, TranslationResponse,
};
pub use registry::{ProviderMap, DEFAULT_PROVIDER};
