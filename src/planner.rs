//! Planner: turn a goal into an ordered todo list.

use crate::llm::Llm;
use crate::provider::ProviderError;
use crate::types::*;
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

pub const DEFAULT_MAX_TODOS: usize = 6;

fn list_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-|•|\d+[.)])\s+(.*)$").expect("valid list marker regex"))
}

/// Extract list items from model output.
///
/// Lines led by `-`, `•`, `N.` or `N)` contribute their remainder. If no line
/// has a marker, every non-blank line is an item.
pub fn parse_bullets(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let bullets: Vec<String> = lines
        .iter()
        .filter_map(|l| list_marker_re().captures(l))
        .map(|c| c[1].trim().to_string())
        .collect();

    if !bullets.is_empty() {
        return bullets;
    }
    lines.into_iter().map(String::from).collect()
}

/// Ask the model for a todo list toward `goal`, capped at `max_todos` items.
pub async fn make_plan(llm: &Llm, goal: &str, max_todos: usize) -> Result<Plan, ProviderError> {
    let prompt = format!(
        "Write a TODO list to achieve the user's goal.\n\
         Rules:\n\
         - Maximum {} bullet items\n\
         - Make each item actionable\n\n\
         GOAL: {}",
        max_todos, goal
    );
    let resp = llm
        .complete(&prompt, Some("You are a careful planner."), CompletionOptions::default())
        .await?;

    let mut todos = parse_bullets(&resp.text);
    todos.truncate(max_todos);
    info!("plan built with {} todos", todos.len());

    Ok(Plan {
        goal: goal.to_string(),
        todos,
    })
}
