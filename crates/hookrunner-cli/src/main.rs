mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hookrunner",
    about = "Validation hook runner — dispatch lifecycle events through configured checks.\n\
             Exit codes: 0 = allowed, 1 = denied by a blocking hook, 2 = config or usage error.",
    version,
    propagate_version = true
)]
struct Cli {
    /// Hooks config path (default: auto-detect hooks.json or .claude/settings.json)
    #[arg(long, global = true, env = "HOOKRUNNER_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one lifecycle event through all matching hooks
    Check {
        /// Event name: PreToolUse, PostToolUse, or PreCommit (kebab/snake case accepted)
        #[arg(long)]
        event: String,

        /// Name of the tool about to act (e.g. Write, Bash)
        #[arg(long)]
        tool: Option<String>,

        /// Absolute path of the file being touched
        #[arg(long)]
        file: Option<String>,

        /// Extra tool_input fields as a JSON object (e.g. '{"command":"ls"}')
        #[arg(long)]
        payload: Option<String>,
    },

    /// Inspect and validate the hooks config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Write a starter hooks.json in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let config_path = root::resolve_config(cli.config.as_deref());

    let result = match cli.command {
        Commands::Check {
            event,
            tool,
            file,
            payload,
        } => cmd::check::run(
            &config_path,
            &event,
            tool.as_deref(),
            file.as_deref(),
            payload.as_deref(),
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(&config_path, subcommand, cli.json),
        Commands::Init => cmd::init::run(&config_path),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            2
        }
    };
    std::process::exit(code);
}
