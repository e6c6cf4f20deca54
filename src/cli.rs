//! Pieces shared by the `step*` binaries: common flags, logging setup and
//! terminal colors.

use crate::condition::{AnswerCheck, HeuristicCheck, LlmJudge};
use crate::config::{load_env, Settings};
use crate::llm::Llm;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ANSI color helpers
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Env file to load before reading settings (default: ./.env)
    #[arg(long, value_name = "PATH", global = true)]
    pub env_file: Option<PathBuf>,
}

impl CommonArgs {
    /// Initialise logging, load the env file and read settings.
    pub fn bootstrap(&self) -> Settings {
        init_logging(self.verbose);
        load_env(self.env_file.as_deref());
        Settings::from_env()
    }
}

/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Which answer check a binary should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckerKind {
    /// Local length / bullet-count heuristic
    Heuristic,
    /// Second LLM call acting as a grader
    Llm,
}

impl CheckerKind {
    pub fn build<'a>(self, llm: &'a Llm) -> Box<dyn AnswerCheck + 'a> {
        match self {
            Self::Heuristic => Box::new(HeuristicCheck::default()),
            Self::Llm => Box::new(LlmJudge::new(llm)),
        }
    }
}

/// One-line banner noting the model and whether mock mode is active.
pub fn print_banner(title: &str, settings: &Settings) {
    println!("\n{BOLD}{CYAN}  {title}{RESET}");
    if settings.mock_mode() {
        println!(
            "{DIM}  provider: {} (mock mode: no credential configured){RESET}\n",
            settings.llm_provider
        );
    } else {
        println!(
            "{DIM}  provider: {}  model: {}{RESET}\n",
            settings.llm_provider, settings.model
        );
    }
}
