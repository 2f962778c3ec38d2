use std::error::Error;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod output;
pub mod render;
pub mod rules;
pub mod walker;

pub use output::{ClipboardSink, Outcome, SystemClipboard};
pub use rules::{DefaultIgnores, IgnoreRules};
pub use walker::{DirectoryNode, EntryKind};

#[derive(Debug)]
pub enum TreeError {
    Io(std::io::Error),
    InvalidRoot { path: PathBuf, reason: String },
    UnreadableRoot { path: PathBuf, source: std::io::Error },
    Pattern(globset::Error),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Io(err) => write!(f, "{err}"),
            TreeError::InvalidRoot { path, reason } => {
                write!(f, "invalid root {}: {reason}", path.display())
            }
            TreeError::UnreadableRoot { path, source } => {
                write!(f, "cannot read root {}: {source}", path.display())
            }
            TreeError::Pattern(err) => write!(f, "invalid ignore pattern: {err}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TreeError::Io(err) => Some(err),
            TreeError::UnreadableRoot { source, .. } => Some(source),
            TreeError::Pattern(err) => Some(err),
            TreeError::InvalidRoot { .. } => None,
        }
    }
}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io(err)
    }
}

impl From<globset::Error> for TreeError {
    fn from(err: globset::Error) -> Self {
        TreeError::Pattern(err)
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// Everything one invocation needs, assembled from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root: PathBuf,
    pub copy_to_clipboard: bool,
    pub defaults: DefaultIgnores,
}

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(err) => {
            return Err(TreeError::InvalidRoot {
                path: root.to_path_buf(),
                reason: err.to_string(),
            });
        }
    };

    if !metadata.is_dir() {
        return Err(TreeError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_owned(),
        });
    }

    Ok(())
}

/// Name printed on the first line of the tree.
///
/// Paths such as `.` or `..` have no final component, so the canonical path is
/// consulted; if that fails too the path is shown as given.
pub fn root_display_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }

    root.canonicalize()
        .ok()
        .and_then(|canonical| {
            canonical
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| root.as_os_str().to_string_lossy().into_owned())
}

/// Walks `root` on the real filesystem and returns the rendered tree text.
pub fn render_tree(root: &Path, rules: &IgnoreRules) -> Result<String> {
    let tree = walker::walk(&fs::RealFileSystem, root, rules)?;
    Ok(render::render(&tree))
}

/// Builds the rule set, renders the tree, writes it to `writer` and, when
/// enabled, to `clipboard`.
///
/// Only an invalid or unreadable root is an error. Clipboard failures are
/// reported through the returned [`Outcome`].
pub fn run<W: Write, C: ClipboardSink>(
    config: &RunConfig,
    writer: &mut W,
    clipboard: &mut C,
) -> Result<Outcome> {
    let rules = IgnoreRules::load(&config.root, &config.defaults)?;
    let text = render_tree(&config.root, &rules)?;
    let sink = if config.copy_to_clipboard {
        Some(clipboard)
    } else {
        None
    };
    let outcome = output::dispatch(&text, writer, sink)?;
    Ok(outcome)
}
