//! Step 2: add a web search tool (SerpAPI) via a ReAct-style loop.
//!
//! Web calls only happen with --allow-web and SERPAPI_API_KEY set.

use clap::Parser;
use first_agent::cli::{print_banner, CommonArgs, BOLD, DIM, RESET, YELLOW};
use first_agent::{run_react, Llm, ReactConfig};

#[derive(Parser, Debug)]
#[command(
    name = "step2_tools",
    about = "Step 2: add a web search tool (SerpAPI) via a ReAct-style loop"
)]
struct Cli {
    /// Question
    #[arg(long, default_value = "What is the latest stable release of Python?")]
    question: String,

    /// Actually call SerpAPI. Without this flag, web calls are not performed.
    #[arg(long)]
    allow_web: bool,

    #[arg(long, default_value_t = 4)]
    max_iters: usize,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.common.bootstrap();
    print_banner("step 2: tools", &settings);

    if !cli.allow_web {
        println!("{YELLOW}Web access disabled. Use --allow-web to enable SerpAPI calls.{RESET}");
    }

    let serpapi_key = settings.serpapi_api_key.clone();
    let llm = Llm::new(settings);
    let config = ReactConfig::new(&llm)
        .with_web(cli.allow_web, serpapi_key)
        .with_max_iters(cli.max_iters);

    let outcome = run_react(&cli.question, &config).await?;
    if !outcome.scratchpad.is_empty() {
        println!("{DIM}Scratchpad:{}{RESET}", outcome.scratchpad);
    }

    match outcome.answer {
        Some(answer) => {
            println!("\n{BOLD}Answer:{RESET}");
            println!("{}", answer);
        }
        None => println!("Max iterations reached without FINAL answer."),
    }
    Ok(())
}
