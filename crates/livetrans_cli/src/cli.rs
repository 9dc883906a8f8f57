use std::path::PathBuf;

use clap::Parser;

/// Translate as you type against a translation backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "livetrans", version, about)]
pub struct Cli {
    /// RON config file (defaults to ./livetrans.ron when present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Backend root URL; requests go to <base-url>/translate.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Initial target language, e.g. "Spanish".
    #[arg(long, short = 'l')]
    pub lang: Option<String>,

    /// Start with real-time translation switched on.
    #[arg(long)]
    pub realtime: bool,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,
}
