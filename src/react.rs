//! ReAct-style loop: the model either asks for a search or gives a final
//! answer, and every observation lands in a free-text scratchpad that is fed
//! back on the next turn. No planner, no memory.

use crate::llm::Llm;
use crate::provider::ProviderError;
use crate::tools::WebSearch;
use crate::types::*;
use tracing::{info, warn};

pub const REACT_SYSTEM: &str = "You are a helpful assistant.

If you need to look something up on the web, respond with:
SEARCH: <query>

If you can answer directly, respond with:
FINAL: <answer>

Be brief and accurate.
";

const SEARCH_RESULTS_PER_QUERY: usize = 5;

pub struct ReactConfig<'a> {
    pub llm: &'a Llm,
    pub search: WebSearch,
    pub allow_web: bool,
    pub serpapi_api_key: Option<String>,
    pub max_iters: usize,
}

impl<'a> ReactConfig<'a> {
    pub fn new(llm: &'a Llm) -> Self {
        Self {
            llm,
            search: WebSearch::default(),
            allow_web: false,
            serpapi_api_key: None,
            max_iters: 4,
        }
    }

    pub fn with_web(mut self, allow_web: bool, serpapi_api_key: Option<String>) -> Self {
        self.allow_web = allow_web;
        self.serpapi_api_key = serpapi_api_key;
        self
    }

    pub fn with_search(mut self, search: WebSearch) -> Self {
        self.search = search;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactOutcome {
    /// `None` when the budget ran out without a `FINAL:` reply
    pub answer: Option<String>,
    pub scratchpad: String,
    pub iterations: usize,
}

/// Render search results the way they are shown to the model.
pub fn format_results(query: &str, results: &[WebResult]) -> String {
    let lines: Vec<String> = results
        .iter()
        .map(|r| {
            let mut line = format!("- {} ({})", r.title, r.link);
            if let Some(snippet) = r.snippet.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!("\n  {}", snippet));
            }
            line
        })
        .collect();
    format!("\n\nSearch results for '{}':\n{}\n", query, lines.join("\n"))
}

/// Answer `question`, searching when the model asks and the web is allowed.
///
/// Prefixes are matched case-sensitively here.
pub async fn run_react(question: &str, config: &ReactConfig<'_>) -> Result<ReactOutcome, ProviderError> {
    let mut scratch = String::new();

    for i in 0..config.max_iters {
        let prompt = format!(
            "Question: {}\n\nScratchpad:\n{}\n\nDecide what to do next.",
            question, scratch
        );
        let resp = config
            .llm
            .complete(
                prompt.trim(),
                Some(REACT_SYSTEM),
                CompletionOptions::default().with_max_tokens(300),
            )
            .await?;
        let text = resp.text.trim();
        info!("react iter {}: {}", i, truncate_chars(text, 200));

        if let Some(answer) = text.strip_prefix("FINAL:") {
            return Ok(ReactOutcome {
                answer: Some(answer.trim().to_string()),
                scratchpad: scratch,
                iterations: i + 1,
            });
        }

        let Some(query) = text.strip_prefix("SEARCH:").map(str::trim) else {
            scratch.push_str(&format!("\nUnexpected format. Model said: {}", text));
            continue;
        };

        if query.is_empty() {
            scratch.push_str("\nModel requested SEARCH but provided an empty query.");
            continue;
        }
        if !config.allow_web {
            scratch.push_str(&format!(
                "\nTool call blocked (web disabled). Would have searched: {}",
                query
            ));
            continue;
        }
        let Some(api_key) = config.serpapi_api_key.as_deref() else {
            scratch.push_str("\nNo SERPAPI_API_KEY set, cannot search.");
            continue;
        };

        match config
            .search
            .search(query, api_key, SEARCH_RESULTS_PER_QUERY)
            .await
        {
            Ok(results) => scratch.push_str(&format_results(query, &results)),
            Err(e) => {
                warn!("search error: {}", e);
                scratch.push_str(&format!("\nSearch error: {}", e));
            }
        }
    }

    Ok(ReactOutcome {
        answer: None,
        scratchpad: scratch,
        iterations: config.max_iters,
    })
}
