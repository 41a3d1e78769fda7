//! Free-text query interpretation.
//!
//! One low-temperature chat completion turns the raw query into a
//! `ParsedQuery`; every failure mode (no credential, transport error,
//! non-JSON output, wrong shape) degrades to whitespace tokenization.
//! This stage never errors.

use std::sync::Arc;

use mensa_core::constants::LLM_TEMPERATURE;
use mensa_core::models::ParsedQuery;
use mensa_core::traits::ILlmClient;
use serde_json::Value;
use tracing::{debug, warn};

pub struct QueryInterpreter<L: ILlmClient> {
    llm: Arc<L>,
}

impl<L: ILlmClient> QueryInterpreter<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Parse a raw query into keywords and structured filters. The
    /// whitespace-token fallback is the designated degradation path,
    /// not an error.
    pub async fn parse(&self, raw_query: &str) -> ParsedQuery {
        let prompt = build_prompt(raw_query);
        let response = match self.llm.complete(&prompt, LLM_TEMPERATURE).await {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "query interpretation unavailable; falling back to tokenization");
                return ParsedQuery::fallback(raw_query);
            }
        };

        match parse_response(&response) {
            Some(parsed) => parsed,
            None => {
                warn!("unparseable interpreter output; falling back to tokenization");
                ParsedQuery::fallback(raw_query)
            }
        }
    }
}

fn build_prompt(raw_query: &str) -> String {
    format!(
        "Parse the following restaurant search query into structured components.\n\
         Return a JSON object with:\n\
         - keywords: the main search terms (e.g., \"tacos\", \"pizza\")\n\
         - price_max: maximum price if mentioned (e.g., 15 for \"under 15\"), null otherwise\n\
         - dietary: dietary restrictions if mentioned (e.g., \"vegan\", \"gluten-free\"), null otherwise\n\
         - location: location if mentioned (e.g., \"near Harvard\"), null otherwise\n\
         \n\
         Query: \"{raw_query}\"\n\
         \n\
         Respond only with valid JSON."
    )
}

/// Extract and validate the JSON object from the model output. Models
/// routinely wrap JSON in prose or code fences; take the outermost
/// braces.
fn parse_response(response: &str) -> Option<ParsedQuery> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    let value: Value = serde_json::from_str(&response[start..=end]).ok()?;
    let object = value.as_object()?;

    // keywords arrives as either a string ("vegan tacos") or an array.
    let keywords = match object.get("keywords")? {
        Value::String(s) => s.split_whitespace().map(String::from).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => return None,
    };

    Some(ParsedQuery {
        keywords,
        price_max: object.get("price_max").and_then(Value::as_f64),
        dietary: non_empty_str(object.get("dietary")),
        location: non_empty_str(object.get("location")),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}
