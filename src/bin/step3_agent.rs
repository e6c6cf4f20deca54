//! Step 3: a minimal agent loop (plan + memory + tools).

use clap::Parser;
use first_agent::cli::{print_banner, CheckerKind, CommonArgs, BOLD, DIM, RESET};
use first_agent::{run_agent, AgentLoopConfig, JsonMemory, Llm};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "step3_agent",
    about = "Step 3: a minimal agent loop (plan + memory + tools)"
)]
struct Cli {
    #[arg(
        long,
        default_value = "Find two reputable sources explaining the ReAct agent pattern and summarize them."
    )]
    goal: String,

    /// Allow using SerpAPI (requires SERPAPI_API_KEY)
    #[arg(long)]
    allow_web: bool,

    #[arg(long, default_value_t = 5)]
    max_iters: usize,

    /// JSON file for long-term memory
    #[arg(long, default_value = "./memory.json")]
    memory_path: PathBuf,

    /// How to judge each draft answer
    #[arg(long, value_enum, default_value = "llm")]
    checker: CheckerKind,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.common.bootstrap();
    print_banner("step 3: agent", &settings);

    let serpapi_key = settings.serpapi_api_key.clone();
    let llm = Llm::new(settings);
    let memory = JsonMemory::new(&cli.memory_path)?;
    let checker = cli.checker.build(&llm);

    let config = AgentLoopConfig::new(&llm, &memory, checker.as_ref())
        .with_web(cli.allow_web, serpapi_key)
        .with_max_iters(cli.max_iters);

    let result = run_agent(&cli.goal, &config).await?;

    for step in &result.steps {
        println!("{DIM}  {step}{RESET}");
    }
    println!("\n{BOLD}Final{RESET} {DIM}(used web: {}){RESET}", result.used_web);
    println!("{}", result.answer);
    Ok(())
}
