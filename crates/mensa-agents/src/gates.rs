//! Binary candidate gates: quality (relevance + safety) and compliance
//! (business rules).
//!
//! Each candidate gets an independent yes/no judgment; survivors keep
//! their input order. An ambiguous verdict rejects the candidate
//! (fail-closed). A transport error is a stage failure and escalates to
//! the coordinator's fallback.

use std::sync::Arc;

use mensa_core::constants::LLM_TEMPERATURE;
use mensa_core::errors::AgentError;
use mensa_core::models::SearchResult;
use mensa_core::traits::ILlmClient;
use tracing::{debug, warn};

/// Permissive yes/no parse: the first alphabetic token decides.
/// Anything that is not an affirmative rejects.
fn verdict_accepts(response: &str) -> bool {
    let token: String = response
        .trim()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    matches!(token.as_str(), "yes" | "y")
}

async fn judge_all<L: ILlmClient>(
    llm: &L,
    stage: &str,
    results: Vec<SearchResult>,
    prompt_for: impl Fn(&SearchResult) -> String,
) -> Result<Vec<SearchResult>, AgentError> {
    let mut survivors = Vec::with_capacity(results.len());
    for result in results {
        let prompt = prompt_for(&result);
        let response = llm
            .complete(&prompt, LLM_TEMPERATURE)
            .await
            .map_err(|e| AgentError::stage(stage, e))?;
        if verdict_accepts(&response) {
            survivors.push(result);
        } else {
            debug!(stage, id = %result.id, "candidate rejected");
        }
    }
    Ok(survivors)
}

/// Relevance and safety gate.
pub struct QualityGate<L: ILlmClient> {
    llm: Arc<L>,
}

impl<L: ILlmClient> QualityGate<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    pub async fn filter(
        &self,
        results: Vec<SearchResult>,
        original_query: &str,
    ) -> Result<Vec<SearchResult>, AgentError> {
        let before = results.len();
        let survivors = judge_all(self.llm.as_ref(), "quality", results, |result| {
            format!(
                "You are a quality assurance reviewer for restaurant search results.\n\
                 Query: \"{original_query}\"\n\
                 Candidate menu item: {}\n\
                 Price: ${}\n\
                 \n\
                 Is this result relevant to the query, complete, and safe to show?\n\
                 Answer only \"yes\" or \"no\".",
                result.meta_str("text"),
                result.meta_str("price"),
            )
        })
        .await?;
        if survivors.len() < before {
            warn!(
                rejected = before - survivors.len(),
                "quality gate rejected candidates"
            );
        }
        Ok(survivors)
    }
}

/// Business-rule compliance gate. The standing rule is that a listed
/// price must fall strictly within (0, 1000) dollars.
pub struct ComplianceGate<L: ILlmClient> {
    llm: Arc<L>,
}

impl<L: ILlmClient> ComplianceGate<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    pub async fn filter(
        &self,
        results: Vec<SearchResult>,
        _original_query: &str,
    ) -> Result<Vec<SearchResult>, AgentError> {
        judge_all(self.llm.as_ref(), "compliance", results, |result| {
            format!(
                "You are a compliance reviewer for restaurant search results.\n\
                 Business rule: a listed price must be greater than $0 and less than $1000.\n\
                 Candidate menu item: {}\n\
                 Price: ${}\n\
                 \n\
                 Does this result comply with the business rule?\n\
                 Answer only \"yes\" or \"no\".",
                result.meta_str("text"),
                result.meta_str("price"),
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLlm;
    use mensa_core::errors::LlmError;
    use serde_json::json;

    fn candidate(id: &str) -> SearchResult {
        SearchResult {
            id: id.into(),
            score: 0.5,
            metadata: json!({"text": "vegan taco", "price": "9.5"})
                .as_object()
                .cloned()
                .unwrap(),
        }
    }

    #[test]
    fn verdict_parse_is_permissive_but_fail_closed() {
        assert!(verdict_accepts("yes"));
        assert!(verdict_accepts("Yes."));
        assert!(verdict_accepts("YES, it complies"));
        assert!(verdict_accepts("y"));
        assert!(!verdict_accepts("no"));
        assert!(!verdict_accepts("No way"));
        assert!(!verdict_accepts("maybe"));
        assert!(!verdict_accepts(""));
        assert!(!verdict_accepts("10/10 relevant"));
    }

    #[tokio::test]
    async fn survivors_keep_input_order() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("yes".into()),
            Ok("no".into()),
            Ok("yes".into()),
        ]));
        let gate = QualityGate::new(llm);
        let survivors = gate
            .filter(vec![candidate("a"), candidate("b"), candidate("c")], "tacos")
            .await
            .unwrap();
        let ids: Vec<&str> = survivors.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn ambiguous_verdict_rejects() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok("maybe".into())]));
        let gate = QualityGate::new(llm);
        let survivors = gate.filter(vec![candidate("a")], "tacos").await.unwrap();
        assert!(survivors.is_empty());
    }

    #[tokio::test]
    async fn transport_error_escalates() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(LlmError::Timeout {
            seconds: 30,
        })]));
        let gate = ComplianceGate::new(llm);
        let err = gate
            .filter(vec![candidate("a")], "tacos")
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::StageFailed { .. }));
    }
}
