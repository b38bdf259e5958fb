mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "storycheck",
    about = "Score issue descriptions for user story, acceptance criteria, test cases, and dependencies",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .storycheck/ or .git/)
    #[arg(long, global = true, env = "STORYCHECK_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write .storycheck/config.yaml for the current project
    Init {
        /// Tracker base URL (e.g. https://your-site.atlassian.net)
        #[arg(long)]
        base_url: Option<String>,
        /// Account email used for tracker authentication
        #[arg(long)]
        email: Option<String>,
    },

    /// Analyze a description document (JSON) from a file or stdin
    Analyze {
        /// Path to the document; omit or use '-' for stdin
        file: Option<PathBuf>,
        /// Also print the extracted plain text
        #[arg(long)]
        show_text: bool,
    },

    /// Analyze plain text directly
    Text {
        /// Text to analyze
        text: String,
    },

    /// Fetch an issue from the configured tracker and analyze its description
    Issue {
        /// Issue id or key (e.g. 10042 or PROJ-12)
        id: String,
    },

    /// Inspect and validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run the analysis HTTP server
    Serve {
        /// Port to listen on (default: server.port from config; 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { base_url, email } => {
            cmd::init::run(&root, base_url.as_deref(), email.as_deref())
        }
        Commands::Analyze { file, show_text } => {
            cmd::analyze::run_document(file.as_deref(), show_text, cli.json)
        }
        Commands::Text { text } => cmd::analyze::run_text(&text, cli.json),
        Commands::Issue { id } => cmd::issue::run(&root, &id, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
