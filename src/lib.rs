pub mod agent_loop;
pub mod cli;
pub mod condition;
pub mod config;
pub mod correction;
pub mod llm;
pub mod memory;
pub mod planner;
pub mod provider;
pub mod react;
pub mod tools;
pub mod types;

pub use agent_loop::{parse_action, run_agent, Action, AgentError, AgentLoopConfig};
pub use condition::{AnswerCheck, CheckError, HeuristicCheck, LlmJudge};
pub use config::{load_env, Settings};
pub use correction::{self_correct, CorrectionError, CorrectionOutcome};
pub use llm::Llm;
pub use memory::{JsonMemory, MemoryError};
pub use planner::{make_plan, parse_bullets};
pub use react::{run_react, ReactConfig, ReactOutcome};
pub use tools::{search_web, SearchError, WebSearch};
pub use types::*;
