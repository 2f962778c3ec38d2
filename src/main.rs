mod args;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use treecopy::{DefaultIgnores, Outcome, RunConfig, SystemClipboard};

fn main() -> Result<()> {
    let args = args::Args::parse();
    setup_logging(args.verbose, args.quiet);

    let config = RunConfig {
        root: args.path,
        copy_to_clipboard: !args.no_clipboard,
        defaults: DefaultIgnores::with_extra(args.ignore)
            .context("Failed to build ignore patterns")?,
    };

    let stdout = io::stdout();
    let outcome = treecopy::run(&config, &mut stdout.lock(), &mut SystemClipboard)
        .with_context(|| format!("Failed to render tree for {}", config.root.display()))?;

    if outcome == Outcome::Copied && !args.quiet {
        eprintln!("Tree structure copied to clipboard!");
    }
    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
