//! ticketdoc CLI: render markdown reports into issue tracker documents.
//!
//! Converts assistant replies and investigation reports into the tracker's
//! rich-text format and posts them as comments or descriptions.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
