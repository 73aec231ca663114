//! The recommendation pipeline: catalog -> context -> prompt -> model -> typed result.

use crate::catalog::Catalog;
use crate::context::build_context;
use crate::extract::{extract, ParseError};
use crate::llm_client::{LlmClient, LlmError};
use crate::prompt::{compose, SYSTEM_PROMPT};
use crate::types::ModuleRecommendation;
use std::sync::Arc;
use tracing::info;

/// Request-level failure. `Llm` means the model was unreachable or rejected
/// the call; `Parse` means it replied but with nothing usable.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply unusable: {0}")]
    Parse(#[from] ParseError),
}

/// A complete recommendation result.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub recommendations: Vec<ModuleRecommendation>,
    pub explanation: String,
}

/// Ties the pipeline together. Holds the shared read-only catalog and the
/// client seam; cheap to clone, safe to use from concurrent handlers.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    client: Arc<dyn LlmClient>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, client: Arc<dyn LlmClient>) -> Self {
        Self { catalog, client }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one recommendation request: one outbound model call, no retries.
    pub async fn recommend(&self, query: &str) -> Result<Recommendation, RecommendError> {
        let context = build_context(self.catalog.modules());
        let prompt = compose(query, &context);

        let raw = self.client.complete(SYSTEM_PROMPT, &prompt).await?;
        let (recommendations, explanation) = extract(&raw, &self.catalog)?;

        info!(
            "Recommendation complete: {} modules recommended for query ({} chars)",
            recommendations.len(),
            query.len()
        );

        Ok(Recommendation {
            recommendations,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Module;
    use crate::llm_client::FakeLlmClient;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_modules(vec![
            Module {
                module: "A".to_string(),
                description: "volcano plot".to_string(),
                use_case: "differential expression".to_string(),
                chart_type: "scatter".to_string(),
                status: "ok".to_string(),
            },
            Module {
                module: "B".to_string(),
                description: "unfinished".to_string(),
                use_case: "".to_string(),
                chart_type: "".to_string(),
                status: "pending".to_string(),
            },
        ]))
    }

    #[tokio::test]
    async fn end_to_end_with_noisy_reply() {
        let fake = Arc::new(FakeLlmClient::always(
            r#"blah {"recommendations":[{"module":"A","score":0.9,"reason":"fits"}], "explanation":"ok"} trailing text"#,
        ));
        let recommender = Recommender::new(catalog(), fake.clone());

        let result = recommender.recommend("show differential expression").await.unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].module, "A");
        assert_eq!(result.recommendations[0].score, 0.9);
        assert_eq!(result.recommendations[0].description, "volcano plot");
        assert_eq!(result.explanation, "ok");
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn prompt_contains_only_eligible_modules() {
        let fake = Arc::new(FakeLlmClient::always(
            r#"{"recommendations":[],"explanation":"none"}"#,
        ));
        let recommender = Recommender::new(catalog(), fake.clone());

        recommender.recommend("anything").await.unwrap();

        let prompt = fake.last_prompt().unwrap();
        assert!(prompt.contains("Module: A"));
        assert!(!prompt.contains("Module: B"));
        assert!(prompt.contains("User query: anything"));
    }

    #[tokio::test]
    async fn unknown_module_reply_is_empty_result_not_error() {
        let fake = Arc::new(FakeLlmClient::always(
            r#"{"recommendations":[{"module":"C","score":0.8,"reason":"r"}],"explanation":"best guess"}"#,
        ));
        let recommender = Recommender::new(catalog(), fake);

        let result = recommender.recommend("query").await.unwrap();
        assert!(result.recommendations.is_empty());
        assert_eq!(result.explanation, "best guess");
    }

    #[tokio::test]
    async fn llm_failure_surfaces_as_llm_error() {
        let fake = Arc::new(FakeLlmClient::always_error(LlmError::Auth {
            status: 401,
            body: "bad key".to_string(),
        }));
        let recommender = Recommender::new(catalog(), fake);

        match recommender.recommend("query").await {
            Err(RecommendError::Llm(LlmError::Auth { status, .. })) => assert_eq!(status, 401),
            other => panic!("expected auth failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_reply_surfaces_as_parse_error() {
        let fake = Arc::new(FakeLlmClient::always("no structure here at all"));
        let recommender = Recommender::new(catalog(), fake);

        assert!(matches!(
            recommender.recommend("query").await,
            Err(RecommendError::Parse(ParseError::NoPayload))
        ));
    }
}
