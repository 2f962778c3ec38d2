use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Print a directory tree that respects .gitignore and copy it to the clipboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to render.
    pub path: PathBuf,

    /// Additional name patterns to ignore everywhere (repeatable).
    #[arg(short, long, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Do not copy the tree to the clipboard.
    #[arg(long)]
    pub no_clipboard: bool,

    /// Increase log verbosity (can be repeated).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings and status messages.
    #[arg(short, long)]
    pub quiet: bool,
}
