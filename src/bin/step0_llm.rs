//! Step 0: a single LLM call.
//!
//! Run with: COHERE_API_KEY=... cargo run --bin step0_llm -- --question "..."
//! Without a key the call is answered by the offline mock.

use clap::Parser;
use first_agent::cli::{print_banner, CommonArgs, DIM, RESET};
use first_agent::{CompletionOptions, Llm};

#[derive(Parser, Debug)]
#[command(name = "step0_llm", about = "Step 0: a single LLM call")]
struct Cli {
    /// Prompt/question to ask
    #[arg(long, default_value = "What is agentic AI? (give brief response)")]
    question: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.common.bootstrap();
    print_banner("step 0: single call", &settings);

    let llm = Llm::new(settings);
    let resp = llm
        .complete(
            &cli.question,
            Some("You are a helpful assistant."),
            CompletionOptions::default(),
        )
        .await?;

    println!("{DIM}Model: {} (mock={}){RESET}", resp.model, resp.used_mock);
    println!("{}", resp.text);
    Ok(())
}
