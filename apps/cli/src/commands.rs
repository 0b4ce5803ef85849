//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use ticketdoc_core::{PublishOutcome, Publisher, TrackerClient, to_adf};
use ticketdoc_markdown::{ConvertOptions, convert};
use ticketdoc_shared::{AppConfig, init_config, load_config, tracker_credentials};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ticketdoc: render markdown into issue-tracker documents.
#[derive(Parser)]
#[command(
    name = "ticketdoc",
    version,
    about = "Convert markdown reports into rich-text issue tracker documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Shape of the JSON printed by `convert`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Semantic tree (`kind`/`blocks`).
    Tree,
    /// Tracker wire format (`type`/`content`/`attrs`/`marks`).
    Adf,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert markdown and print the resulting document as JSON.
    Convert {
        /// Markdown file to read (stdin when omitted or `-`).
        file: Option<PathBuf>,

        /// Strip backslash escapes before parsing.
        #[arg(long)]
        unescape: bool,

        /// Output shape.
        #[arg(short, long, value_enum, default_value = "tree")]
        format: OutputFormat,

        /// Print JSON on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Post markdown as a comment on an issue.
    Comment {
        /// Issue key, e.g. OPS-123.
        #[arg(short, long)]
        issue: String,

        /// Markdown file to read (stdin when omitted or `-`).
        file: Option<PathBuf>,

        /// Event id used to skip redelivered events.
        #[arg(long)]
        event_id: Option<String>,

        /// Strip backslash escapes before parsing.
        #[arg(long)]
        unescape: bool,
    },

    /// Replace an issue description with markdown.
    Describe {
        /// Issue key, e.g. OPS-123.
        #[arg(short, long)]
        issue: String,

        /// Markdown file to read (stdin when omitted or `-`).
        file: Option<PathBuf>,

        /// Strip backslash escapes before parsing.
        #[arg(long)]
        unescape: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so `convert` output on stdout stays valid JSON.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "ticketdoc=info",
        1 => "ticketdoc=debug",
        _ => "ticketdoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            file,
            unescape,
            format,
            compact,
        } => cmd_convert(file.as_deref(), unescape, format, compact).await,
        Command::Comment {
            issue,
            file,
            event_id,
            unescape,
        } => cmd_comment(&issue, file.as_deref(), event_id.as_deref(), unescape).await,
        Command::Describe {
            issue,
            file,
            unescape,
        } => cmd_describe(&issue, file.as_deref(), unescape).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_convert(
    file: Option<&Path>,
    unescape: bool,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let config = load_config()?;
    let options = convert_options(&config, unescape);
    let markdown = read_input(file)?;

    let doc = convert(&markdown, &options);
    let value = match format {
        OutputFormat::Tree => serde_json::to_value(&doc)?,
        OutputFormat::Adf => to_adf(&doc),
    };

    println!("{}", render_json(&value, compact)?);
    Ok(())
}

async fn cmd_comment(
    issue: &str,
    file: Option<&Path>,
    event_id: Option<&str>,
    unescape: bool,
) -> Result<()> {
    let config = load_config()?;
    let publisher = build_publisher(&config, unescape)?;
    let markdown = read_input(file)?;

    info!(issue, event_id, "posting comment");

    match publisher.publish_comment(event_id, issue, &markdown).await? {
        PublishOutcome::Posted(comment) => {
            println!("Comment {} added to {issue}", comment.id);
        }
        PublishOutcome::Duplicate => {
            println!("Event already handled; nothing posted");
        }
    }

    Ok(())
}

async fn cmd_describe(issue: &str, file: Option<&Path>, unescape: bool) -> Result<()> {
    let config = load_config()?;
    let publisher = build_publisher(&config, unescape)?;
    let markdown = read_input(file)?;

    info!(issue, "replacing description");

    publisher.publish_description(issue, &markdown).await?;
    println!("Description of {issue} updated");
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Config file setting, overridden to `true` by the `--unescape` flag.
fn convert_options(config: &AppConfig, unescape_flag: bool) -> ConvertOptions {
    let mut options = ConvertOptions::from(&config.converter);
    options.unescape |= unescape_flag;
    options
}

fn build_publisher(config: &AppConfig, unescape_flag: bool) -> Result<Publisher> {
    let credentials = tracker_credentials(config)?;
    let tracker = TrackerClient::new(&config.tracker, credentials)?;
    Ok(Publisher::new(
        tracker,
        convert_options(config, unescape_flag),
        config.dedup.capacity,
    ))
}

/// Read markdown from `file`, or stdin when it is absent or `-`.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| eyre!("cannot read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn render_json(value: &serde_json::Value, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}
