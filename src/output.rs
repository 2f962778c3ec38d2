use anyhow::Result;
use arboard::Clipboard;
use std::io::{self, Write};
use tracing::{info, warn};

/// Anything that can receive the rendered tree as clipboard text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, opened fresh for every write.
///
/// On X11 and Wayland the selection is owned by this process, so once it
/// exits the text only survives if a clipboard manager has taken it over.
/// `Ok` means the selection was set, not that it outlives the process.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// What happened on the clipboard side of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Copied,
    Skipped,
    Failed(String),
}

/// Writes `text` verbatim to `writer`, then to `clipboard` if one is given.
///
/// Only a failure to write to `writer` is an error.
pub fn dispatch<W: Write, C: ClipboardSink>(
    text: &str,
    writer: &mut W,
    clipboard: Option<&mut C>,
) -> io::Result<Outcome> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;

    let Some(clipboard) = clipboard else {
        return Ok(Outcome::Skipped);
    };

    match clipboard.set_text(text) {
        Ok(()) => {
            info!("copied {} bytes to clipboard", text.len());
            Ok(Outcome::Copied)
        }
        Err(err) => {
            warn!("failed to copy to clipboard: {err:#}");
            Ok(Outcome::Failed(format!("{err:#}")))
        }
    }
}
