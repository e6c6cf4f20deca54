//! Answer checks: decide whether a candidate answer satisfies a question.

use crate::llm::Llm;
use crate::provider::ProviderError;
use crate::types::*;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("judge returned an unparseable payload: {0}")]
    Parse(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A strategy that judges `answer` against `question`.
#[async_trait]
pub trait AnswerCheck: Send + Sync {
    async fn judge(&self, question: &str, answer: &str) -> Result<ConditionResult, CheckError>;
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

/// Local check on answer length and, when the question asks for
/// "N bullets", the number of bullet lines.
#[derive(Debug, Clone)]
pub struct HeuristicCheck {
    pub min_chars: usize,
}

impl Default for HeuristicCheck {
    fn default() -> Self {
        Self { min_chars: 80 }
    }
}

impl HeuristicCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn check(&self, question: &str, answer: &str) -> ConditionResult {
        let answer = answer.trim();
        if answer.is_empty() {
            return ConditionResult::fail("empty answer");
        }

        let len = answer.chars().count();
        if len < self.min_chars {
            return ConditionResult::fail(format!(
                "answer too short ({} chars, need at least {})",
                len, self.min_chars
            ));
        }

        if let Some(wanted) = requested_bullets(question) {
            let found = answer.lines().filter(|l| is_bullet_line(l)).count();
            if found < wanted {
                return ConditionResult::fail(format!(
                    "expected {} bullets, found {}",
                    wanted, found
                ));
            }
        }

        ConditionResult::pass("answer is long enough and follows the requested format")
    }
}

#[async_trait]
impl AnswerCheck for HeuristicCheck {
    async fn judge(&self, question: &str, answer: &str) -> Result<ConditionResult, CheckError> {
        Ok(self.check(question, answer))
    }
}

fn bullet_request_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+)\s+bullet(?:s|\s+points?)?\b").expect("valid bullet request regex")
    })
}

fn bullet_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-|\*|•|\d+[.)])\s+\S").expect("valid bullet line regex"))
}

fn requested_bullets(question: &str) -> Option<usize> {
    bullet_request_re()
        .captures(question)
        .and_then(|c| c[1].parse().ok())
}

fn is_bullet_line(line: &str) -> bool {
    bullet_line_re().is_match(line.trim_start())
}

// ---------------------------------------------------------------------------
// LLM judge
// ---------------------------------------------------------------------------

const JUDGE_SYSTEM: &str = "You are a strict grader. Judge if the answer addresses the question.";

/// Ask a second LLM call to grade the answer as `{"ok": bool, "reason": str}`.
///
/// An unparseable payload is an error; there is no heuristic fallback.
pub struct LlmJudge<'a> {
    llm: &'a Llm,
}

impl<'a> LlmJudge<'a> {
    pub fn new(llm: &'a Llm) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AnswerCheck for LlmJudge<'_> {
    async fn judge(&self, question: &str, answer: &str) -> Result<ConditionResult, CheckError> {
        let prompt = format!(
            "Return JSON only with keys ok (boolean) and reason (string).\n\n\
             QUESTION: {}\n\nANSWER: {}\n",
            question, answer
        );
        let options = CompletionOptions::default()
            .with_temperature(0.0)
            .with_max_tokens(200);
        let resp = self.llm.complete(&prompt, Some(JUDGE_SYSTEM), options).await?;
        parse_judgement(&resp.text)
    }
}

/// Parse the grader payload. `ok` follows JSON truthiness; a missing
/// `reason` is empty.
pub fn parse_judgement(text: &str) -> Result<ConditionResult, CheckError> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| CheckError::Parse(format!("{} in {:?}", e, truncate_chars(text, 120))))?;
    let obj = value
        .as_object()
        .ok_or_else(|| CheckError::Parse(format!("expected a JSON object, got {}", value)))?;

    let ok = obj.get("ok").map(truthy).unwrap_or(false);
    let reason = match obj.get("reason") {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Ok(ConditionResult { ok, reason })
}

fn truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_bullets() {
        assert_eq!(requested_bullets("Explain ReAct in 3 bullets"), Some(3));
        assert_eq!(requested_bullets("give me 2 bullet points"), Some(2));
        assert_eq!(requested_bullets("What is agentic AI?"), None);
    }

    #[test]
    fn test_is_bullet_line() {
        assert!(is_bullet_line("- one"));
        assert!(is_bullet_line("  * two"));
        assert!(is_bullet_line("• three"));
        assert!(is_bullet_line("4. four"));
        assert!(is_bullet_line("5) five"));
        assert!(!is_bullet_line("-nospace"));
        assert!(!is_bullet_line("plain text"));
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&serde_json::json!(true)));
        assert!(truthy(&serde_json::json!(1)));
        assert!(truthy(&serde_json::json!("yes")));
        assert!(!truthy(&serde_json::json!(0)));
        assert!(!truthy(&serde_json::json!("")));
        assert!(!truthy(&serde_json::json!(null)));
    }
}
