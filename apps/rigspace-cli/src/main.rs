mod demos;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use demos::Scenario;
use rigspace_input::{InputScript, ScriptedInput};
use rigspace_locomotion::{LocomotionConfig, LocomotionController};
use rigspace_tools::RigInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rigspace-cli", about = "Headless driver for the rig locomotion controller")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default configuration
    Info,
    /// Replay a JSON input script through the controller
    Simulate {
        /// Path to the input script
        script: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
        #[command(flatten)]
        output: Output,
    },
    /// Run a built-in scenario
    Demo {
        #[arg(value_enum)]
        scenario: Scenario,
        #[command(flatten)]
        tuning: Tuning,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args)]
struct Tuning {
    /// JSON file with a locomotion config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the fast (trigger held) flight speed
    #[arg(long)]
    fast_speed: Option<f32>,
    /// Override the slow flight speed
    #[arg(long)]
    slow_speed: Option<f32>,
    /// Keep applying crawl drag while the two-hand gesture is active
    #[arg(long)]
    crawl_during_scale: bool,
}

impl Tuning {
    fn resolve(&self) -> anyhow::Result<LocomotionConfig> {
        let mut config = match &self.config {
            Some(path) => LocomotionConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => LocomotionConfig::default(),
        };
        if let Some(speed) = self.fast_speed {
            config.fast_move_speed = speed;
        }
        if let Some(speed) = self.slow_speed {
            config.slow_move_speed = speed;
        }
        if self.crawl_during_scale {
            config.crawl_during_scale = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct Output {
    /// Print a rig summary every N frames (0 prints only the final state)
    #[arg(short, long, default_value = "0")]
    every: u64,
    /// Print the final summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("rigspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", rigspace_common::crate_info());
            println!("input: {}", rigspace_input::crate_info());
            println!("locomotion: {}", rigspace_locomotion::crate_info());
            println!("tools: {}", rigspace_tools::crate_info());
            println!(
                "default config: {}",
                serde_json::to_string(&LocomotionConfig::default())?
            );
        }
        Commands::Simulate {
            script,
            tuning,
            output,
        } => {
            let config = tuning.resolve()?;
            let loaded = InputScript::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;
            run(config, &loaded, &output)?;
        }
        Commands::Demo {
            scenario,
            tuning,
            output,
        } => {
            let config = tuning.resolve()?;
            tracing::info!(?scenario, "running demo");
            run(config, &scenario.script()?, &output)?;
        }
    }

    Ok(())
}

fn run(config: LocomotionConfig, script: &InputScript, output: &Output) -> anyhow::Result<()> {
    let mut controller = LocomotionController::new(config);
    let mut input = ScriptedInput::new(script);
    tracing::info!(frames = script.frame_count(), dt = script.dt, "replaying");

    while !input.is_finished() {
        controller.update(&mut input, script.dt);
        if output.every > 0 && controller.frame() % output.every == 0 {
            println!("{}", RigInspector::summary(&controller));
        }
    }

    let summary = RigInspector::summary(&controller);
    if output.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{summary}");
    if let Some(session) = RigInspector::inspect_session(&controller) {
        println!("{session}");
    }
    println!("Events:");
    for record in controller.events() {
        println!("  {record}");
    }
    Ok(())
}
