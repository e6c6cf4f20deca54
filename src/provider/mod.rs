pub mod cohere;
pub mod mock;
pub mod openai_compat;
pub mod registry;
pub mod traits;

pub use cohere::CohereProvider;
pub use mock::{MockProvider, MockResponse};
pub use openai_compat::OpenAiCompatProvider;
pub use registry::{ProviderKind, ProviderRegistry};
pub use traits::*;
