//! Soccer CLI
//!
//! 헤드리스 실행 / 설정 출력 / 스키마 내보내기
//! Headless runs, default scene dump, scene JSON schema

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use soccer_cli::{PolicyKind, RunOptions, RunSummary};
#[cfg(feature = "cli")]
use soccer_core::{EnvConfig, SceneConfig};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "soccer_cli")]
#[command(about = "Run and inspect the two-team soccer training scenario", long_about = None)]
struct Cli {
    /// Log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Random,
    Chase,
}

#[cfg(feature = "cli")]
impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => PolicyKind::Random,
            PolicyArg::Chase => PolicyKind::Chase,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run episodes headless on the kinematic pitch
    Run {
        /// Scene file (YAML or JSON); defaults to the built-in 2v2 scene
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of episodes to finish
        #[arg(long, default_value_t = 10)]
        episodes: u64,

        /// Environment seed (overrides the scene file)
        #[arg(long)]
        seed: Option<u64>,

        /// Step budget per episode (overrides the scene file)
        #[arg(long)]
        max_steps: Option<u32>,

        /// Fixed step length in seconds
        #[arg(long, default_value_t = 0.02)]
        dt: f32,

        /// Hard cap on total steps
        #[arg(long, default_value_t = 1_000_000)]
        step_limit: u64,

        #[arg(long, value_enum, default_value = "random")]
        policy: PolicyArg,

        /// Write the run summary as JSON to this file
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Print the built-in 2v2 scene as YAML
    Config {
        /// Use short episodes
        #[arg(long, default_value = "false")]
        fast: bool,
    },

    /// Print the scene file JSON schema
    Schema,

    /// Load a scene file and check it
    Validate {
        path: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    soccer_cli::init_tracing(&cli.log)?;

    match cli.command {
        Commands::Run { config, episodes, seed, max_steps, dt, step_limit, policy, summary } => {
            let mut scene = match config {
                Some(path) => soccer_cli::load_scene(&path)?,
                None => SceneConfig::two_vs_two(EnvConfig::default()),
            };
            if seed.is_some() {
                scene.env.seed = seed;
            }
            if let Some(max_steps) = max_steps {
                scene.env.max_environment_steps = max_steps;
            }

            let options = RunOptions {
                episodes,
                dt,
                step_limit,
                policy: policy.into(),
                policy_seed: seed.unwrap_or(0),
            };
            let result = soccer_cli::run_episodes(scene, &options)?;
            print_summary(&result);

            if let Some(path) = summary {
                save_summary(&path, &result)?;
            }
        }

        Commands::Config { fast } => {
            let env = if fast { EnvConfig::fast_episodes() } else { EnvConfig::default() };
            print!("{}", SceneConfig::two_vs_two(env).to_yaml()?);
        }

        Commands::Schema => {
            let schema = soccer_core::engine::config::scene_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }

        Commands::Validate { path } => {
            let scene = soccer_cli::load_scene(&path)?;
            scene.validate()?;
            println!("✅ {}: {} agents, {} goals", path.display(), scene.agents.len(), scene.goals.len());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &RunSummary) {
    println!("\n✅ Run finished");
    println!("   Episodes:      {}", summary.episodes);
    println!("   Blue goals:    {}", summary.goals_blue);
    println!("   Purple goals:  {}", summary.goals_purple);
    println!("   Interrupted:   {}", summary.interrupted);
    println!("   Steps:         {}", summary.total_steps);
    println!("   Blue win rate: {:.1}%", summary.blue_win_rate * 100.0);
    for (name, reward) in &summary.agent_rewards {
        println!("   {:<14} {:+.4}", name, reward);
    }
}

#[cfg(feature = "cli")]
fn save_summary(path: &PathBuf, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    println!("\n📄 Summary saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("soccer_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
