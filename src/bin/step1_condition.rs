//! Step 1: add a condition that verifies the answer, and re-ask on failure.
//!
//! Exits non-zero when no attempt satisfies the condition.

use anyhow::bail;
use clap::Parser;
use first_agent::cli::{print_banner, CheckerKind, CommonArgs, DIM, GREEN, RED, RESET};
use first_agent::{self_correct, CorrectionError, Llm};

#[derive(Parser, Debug)]
#[command(name = "step1_condition", about = "Step 1: add a simple condition to verify the answer")]
struct Cli {
    /// Prompt/question to ask
    #[arg(long, default_value = "Explain ReAct in 3 bullets")]
    question: String,

    /// Max re-ask attempts
    #[arg(long, default_value_t = 3)]
    max_tries: usize,

    /// How to judge each answer
    #[arg(long, value_enum, default_value = "heuristic")]
    checker: CheckerKind,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.common.bootstrap();
    print_banner("step 1: condition + self-correction", &settings);

    let llm = Llm::new(settings);
    let checker = cli.checker.build(&llm);

    match self_correct(&llm, &cli.question, checker.as_ref(), cli.max_tries).await {
        Ok(outcome) => {
            for (i, attempt) in outcome.attempts.iter().enumerate() {
                print_attempt(i + 1, attempt);
            }
            println!("\n{GREEN}Accepted after {} tries.{RESET}", outcome.tries);
            Ok(())
        }
        Err(CorrectionError::Exhausted { attempts, .. }) => {
            for (i, attempt) in attempts.iter().enumerate() {
                print_attempt(i + 1, attempt);
            }
            println!("\n{RED}No attempt satisfied the condition.{RESET}");
            bail!("Failed to satisfy condition within max tries.")
        }
        Err(e) => Err(e.into()),
    }
}

fn print_attempt(n: usize, attempt: &first_agent::correction::Attempt) {
    println!("\n=== Try {} (mock={}) ===", n, attempt.response.used_mock);
    println!("{DIM}Prompt: {}{RESET}", attempt.prompt);
    println!("{}", attempt.response.text);
    println!("{DIM}Condition: {}{RESET}", attempt.check);
}
