//! figrec common - catalog, prompt pipeline and LLM client for figrecd
//!
//! Everything with designable behavior lives here so it can be tested without
//! a network: catalog loading and filtering, context/prompt building, the
//! chat-completion client behind a trait seam, and the defensive extractor
//! that turns noisy model output back into catalog-validated recommendations.

pub mod catalog;
pub mod context;
pub mod extract;
pub mod llm_client;
pub mod prompt;
pub mod recommender;
pub mod types;

pub use catalog::{Catalog, CatalogError, Module};
pub use context::build_context;
pub use extract::{extract, ParseError};
pub use llm_client::{FakeLlmClient, HttpLlmClient, LlmClient, LlmConfig, LlmError};
pub use prompt::{compose, SYSTEM_PROMPT};
pub use recommender::{RecommendError, Recommendation, Recommender};
pub use types::*;
