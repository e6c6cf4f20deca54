//! The agent loop: plan → ask → (search | draft → check) → repeat.
//!
//! - `make_plan()` runs once and the plan is persisted to memory
//! - each iteration asks the LLM what to do next, given goal, plan and notes
//! - a `SEARCH:` reply runs the web tool (when allowed) and stores a note
//! - anything else is a draft answer and goes through the checker
//! - the loop ends on the first passing check or after `max_iters`
//!
//! Tool and check failures become trace entries and the loop keeps going.
//! Planner, LLM and memory failures end the run.

use crate::condition::AnswerCheck;
use crate::llm::Llm;
use crate::memory::{JsonMemory, MemoryError};
use crate::planner::{make_plan, DEFAULT_MAX_TODOS};
use crate::provider::ProviderError;
use crate::tools::WebSearch;
use crate::types::*;
use serde_json::Value;
use tracing::{info, warn};

pub const GOAL_KEY: &str = "goal";
pub const PLAN_KEY: &str = "plan";
pub const NOTES_KEY: &str = "notes";
pub const FINAL_ANSWER_KEY: &str = "final_answer";

const SEARCH_RESULTS_PER_QUERY: usize = 5;
const TRACE_PREVIEW_CHARS: usize = 200;

const AGENT_SYSTEM: &str = "You are a helpful agent. \
You may optionally ask to SEARCH if you need external facts. \
If you want to search, output exactly: SEARCH: <your query>. \
Otherwise output your answer directly.";

/// What the model asked for, judged only by its reply prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `SEARCH: <query>`
    Search(String),
    /// `FINAL: <answer>`
    Answer(String),
    /// Anything else, kept verbatim
    Unrecognized(String),
}

/// Classify a trimmed model reply. Prefixes match case-insensitively and the
/// payload is everything after the first colon, trimmed.
pub fn parse_action(text: &str) -> Action {
    let text = text.trim();
    if let Some(rest) = strip_prefix_ignore_case(text, "SEARCH:") {
        Action::Search(rest.trim().to_string())
    } else if let Some(rest) = strip_prefix_ignore_case(text, "FINAL:") {
        Action::Answer(rest.trim().to_string())
    } else {
        Action::Unrecognized(text.to_string())
    }
}

fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Configuration for the agent loop
pub struct AgentLoopConfig<'a> {
    pub llm: &'a Llm,
    pub memory: &'a JsonMemory,
    pub checker: &'a dyn AnswerCheck,
    pub search: WebSearch,
    /// Honour `SEARCH:` replies by calling the web tool.
    pub allow_web: bool,
    pub serpapi_api_key: Option<String>,
    pub max_iters: usize,
    pub max_todos: usize,
}

impl<'a> AgentLoopConfig<'a> {
    pub fn new(llm: &'a Llm, memory: &'a JsonMemory, checker: &'a dyn AnswerCheck) -> Self {
        Self {
            llm,
            memory,
            checker,
            search: WebSearch::default(),
            allow_web: false,
            serpapi_api_key: None,
            max_iters: 6,
            max_todos: DEFAULT_MAX_TODOS,
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

/// Run the agent toward `goal`.
///
/// Never fails for an unmet goal: after `max_iters` the last draft is
/// returned, which is empty if every iteration searched.
pub async fn run_agent(goal: &str, config: &AgentLoopConfig<'_>) -> Result<AgentResult, AgentError> {
    let memory = config.memory;
    let mut steps: Vec<String> = Vec::new();
    let mut used_web = false;

    let plan = make_plan(config.llm, goal, config.max_todos).await?;
    info!("agent plan: {:?}", plan.todos);
    memory.write(GOAL_KEY, goal)?;
    memory.write(PLAN_KEY, &plan.todos)?;
    memory.write(NOTES_KEY, Vec::<Value>::new())?;

    let plan_json = serde_json::to_string(&plan.todos).unwrap_or_default();
    let mut last_answer = String::new();

    for i in 1..=config.max_iters {
        let notes = match memory.read(NOTES_KEY)? {
            Some(Value::Array(items)) => Value::Array(items),
            _ => Value::Array(Vec::new()),
        };
        let prompt = format!(
            "GOAL: {}\nPLAN: {}\nNOTES: {}\n\n\
             What should you do next? If you need web facts, use SEARCH:. Otherwise answer the goal.",
            goal, plan_json, notes
        );

        let resp = config
            .llm
            .complete(&prompt, Some(AGENT_SYSTEM), CompletionOptions::default().with_max_tokens(512))
            .await?;
        let text = resp.text.trim().to_string();
        info!("iter {} response: {}", i, truncate_chars(&text, TRACE_PREVIEW_CHARS));
        steps.push(format!("iter {}: {}", i, truncate_chars(&text, TRACE_PREVIEW_CHARS)));

        let draft = match parse_action(&text) {
            Action::Search(query) if config.allow_web => {
                let Some(api_key) = config.serpapi_api_key.as_deref() else {
                    steps.push("web search requested but SERPAPI_API_KEY not set; skipping".into());
                    continue;
                };
                match config
                    .search
                    .search(&query, api_key, SEARCH_RESULTS_PER_QUERY)
                    .await
                {
                    Ok(results) => {
                        info!("web search {:?}: {} results", query, results.len());
                        used_web = true;
                        memory.append_to_list(NOTES_KEY, Note { query, results })?;
                    }
                    Err(e) => {
                        warn!("web search failed: {}", e);
                        steps.push(format!("web search failed: {}", e));
                    }
                }
                continue;
            }
            // With web disabled the raw reply, prefix included, is the draft.
            Action::Search(_) => text,
            Action::Answer(answer) => answer,
            Action::Unrecognized(raw) => raw,
        };

        last_answer = draft;
        match config.checker.judge(goal, &last_answer).await {
            Ok(check) => {
                info!("check: {}", check);
                steps.push(format!("check: {}", check));
                if check.ok {
                    break;
                }
            }
            Err(e) => {
                warn!("check failed: {}", e);
                steps.push(format!("check failed: {}", e));
            }
        }
    }

    memory.write(FINAL_ANSWER_KEY, &last_answer)?;
    Ok(AgentResult {
        answer: last_answer,
        used_web,
        steps,
    })
}
