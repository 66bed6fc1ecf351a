use clap::{Parser, Subcommand};
use sqitch_runner::commands::*;
use sqitch_runner::core::{error::Result, options::ActionKind, print_error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqitch-runner")]
#[command(about = "Idempotent sqitch deploy and revert for configuration-management runs")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// JSON resource file (defaults to <config dir>/sqitch-runner/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show what would be done without changing the database
    #[arg(long = "why-run", global = true)]
    why_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy changesets (`sqitch deploy --verify`)
    Deploy {
        /// Tag to deploy up to, without the leading '@' (default: everything)
        #[arg(long)]
        to_target: Option<String>,

        #[command(flatten)]
        options: OptionArgs,
    },
    /// Revert changesets down to a tag (`sqitch revert -y`)
    Revert {
        /// Tag to revert to, without the leading '@'
        #[arg(long)]
        to_target: Option<String>,

        #[command(flatten)]
        options: OptionArgs,
    },
    /// Run the action named in the config file (deploy when none is named)
    Converge {
        /// Action to run instead of the configured one (deploy or revert)
        #[arg(long)]
        action: Option<String>,

        /// Tag to deploy or revert to, without the leading '@'
        #[arg(long)]
        to_target: Option<String>,

        #[command(flatten)]
        options: OptionArgs,
    },
    /// Show undeployed changes as reported by `sqitch status`
    Status {
        /// Print the parsed report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: OptionArgs,
    },
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands, settings: &RunSettings) -> Result<()> {
    match command {
        Commands::Deploy { to_target, options } => {
            execute_action(ActionKind::Deploy, options.into_options(to_target), settings)?;
        }
        Commands::Revert { to_target, options } => {
            execute_action(ActionKind::Revert, options.into_options(to_target), settings)?;
        }
        Commands::Converge {
            action,
            to_target,
            options,
        } => {
            execute_converge(action, options.into_options(to_target), settings)?;
        }
        Commands::Status { json, options } => {
            execute_status(options.into_options(None), json, settings)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let settings = RunSettings {
        config_path: cli.config,
        why_run: cli.why_run,
    };

    if let Err(e) = run(cli.command, &settings) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
