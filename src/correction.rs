//! Self-correction: ask, check, and re-ask with the failure reason until the
//! check passes or the try budget runs out.

use crate::condition::{AnswerCheck, CheckError};
use crate::llm::Llm;
use crate::provider::ProviderError;
use crate::types::*;
use tracing::info;

const SYSTEM: &str = "You are a helpful assistant. Be concise and follow the requested format.";

#[derive(Debug, thiserror::Error)]
pub enum CorrectionError {
    #[error("Failed to satisfy condition within max tries.")]
    Exhausted { tries: usize, attempts: Vec<Attempt> },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// One ask/check round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub prompt: String,
    pub response: CompletionResult,
    pub check: ConditionResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionOutcome {
    pub answer: String,
    pub check: ConditionResult,
    pub tries: usize,
    pub attempts: Vec<Attempt>,
}

/// Prompt used after a failed check.
pub fn retry_prompt(question: &str, reason: &str) -> String {
    format!(
        "The previous answer did not satisfy the requirement ({}).\n\
         Please answer the question again and strictly follow the requested format.\n\n\
         Question: {}",
        reason, question
    )
}

/// Ask `question` up to `max_tries` times, feeding each failure reason back.
pub async fn self_correct(
    llm: &Llm,
    question: &str,
    checker: &dyn AnswerCheck,
    max_tries: usize,
) -> Result<CorrectionOutcome, CorrectionError> {
    let mut prompt = question.to_string();
    let mut attempts = Vec::new();

    for i in 1..=max_tries {
        let response = llm
            .complete(&prompt, Some(SYSTEM), CompletionOptions::default())
            .await?;
        let check = checker.judge(question, &response.text).await?;
        info!("try {}: {} (mock={})", i, check, response.used_mock);

        let next_prompt = retry_prompt(question, &check.reason);
        let passed = check.ok;
        attempts.push(Attempt {
            prompt: std::mem::replace(&mut prompt, next_prompt),
            response,
            check,
        });

        if passed {
            let last = &attempts[attempts.len() - 1];
            return Ok(CorrectionOutcome {
                answer: last.response.text.clone(),
                check: last.check.clone(),
                tries: i,
                attempts,
            });
        }
    }

    Err(CorrectionError::Exhausted {
        tries: max_tries,
        attempts,
    })
}
