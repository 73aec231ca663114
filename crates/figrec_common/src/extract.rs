//! Defensive extraction of the structured payload from a model reply.
//!
//! Models wrap their JSON in prose, code fences, or trailing commentary. The
//! contract here is deliberately simple: the candidate payload is the
//! substring between the first `{` and the last `}` in the reply. That is
//! fragile against stray braces in surrounding prose, but it is the documented
//! behavior and the one the tests pin down.

use crate::catalog::Catalog;
use crate::types::ModuleRecommendation;
use serde::Deserialize;
use tracing::debug;

/// The model replied, but no usable structured payload was found.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("no JSON object found in model reply")]
    NoPayload,

    #[error("failed to decode model payload: {0}")]
    InvalidPayload(String),
}

/// Loose payload shape. Both fields defaulted: a reply with only an
/// explanation, or only recommendations, still decodes.
#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    recommendations: Vec<serde_json::Value>,
    #[serde(default)]
    explanation: String,
}

/// One decoded recommendation entry before catalog validation.
#[derive(Debug, Deserialize)]
struct RawRecommendation {
    #[serde(default)]
    module: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reason: String,
}

/// Extract and validate recommendations from a raw model reply.
///
/// Entries referencing modules the catalog does not know, and entries that do
/// not decode at all, are dropped silently - one bad entry never fails the
/// request. Ordering follows the model's array order (its implied ranking);
/// no re-sorting. An empty list after filtering is a valid result.
pub fn extract(
    raw: &str,
    catalog: &Catalog,
) -> Result<(Vec<ModuleRecommendation>, String), ParseError> {
    let start = raw.find('{').ok_or(ParseError::NoPayload)?;
    let end = raw.rfind('}').ok_or(ParseError::NoPayload)?;
    if end < start {
        return Err(ParseError::NoPayload);
    }

    let payload: RawPayload = serde_json::from_str(&raw[start..=end])
        .map_err(|e| ParseError::InvalidPayload(e.to_string()))?;

    let mut recommendations = Vec::new();
    for value in payload.recommendations {
        let rec: RawRecommendation = match serde_json::from_value(value) {
            Ok(rec) => rec,
            Err(e) => {
                debug!("Dropping undecodable recommendation entry: {e}");
                continue;
            }
        };

        match catalog.get(&rec.module) {
            Some(module) => recommendations.push(ModuleRecommendation {
                module: module.module.clone(),
                description: module.description.clone(),
                use_case: module.use_case.clone(),
                chart_type: module.chart_type.clone(),
                score: rec.score,
                reason: rec.reason,
            }),
            None => {
                debug!("Dropping recommendation for unknown module '{}'", rec.module);
            }
        }
    }

    Ok((recommendations, payload.explanation))
}
