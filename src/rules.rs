use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::Result;

const GITIGNORE: &str = ".gitignore";

/// Names excluded everywhere in the tree, whatever `.gitignore` says.
///
/// Patterns are globs matched against single path components, so `*` never
/// crosses a `/`.
#[derive(Clone, Debug)]
pub struct DefaultIgnores {
    patterns: Vec<String>,
    set: GlobSet,
}

impl DefaultIgnores {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        }
        let set = builder.build()?;
        Ok(Self { patterns, set })
    }

    /// Version-control metadata, editor state, dependency and bytecode
    /// caches, local env files.
    pub fn conventional() -> Result<Self> {
        Self::with_extra(Vec::<String>::new())
    }

    /// The conventional set plus caller-supplied patterns.
    pub fn with_extra<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        const CONVENTIONAL: [&str; 10] = [
            ".git",
            "__pycache__",
            "node_modules",
            ".env",
            ".idea",
            ".vscode",
            "*.pyc",
            "*.pyo",
            "*.pyd",
            ".DS_Store",
        ];
        Self::new(
            CONVENTIONAL
                .iter()
                .map(|pattern| (*pattern).to_owned())
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if any component of `path` is a default-ignored name.
    pub fn matches(&self, path: &Path) -> bool {
        !self.set.is_empty()
            && path
                .components()
                .any(|component| self.set.is_match(component.as_os_str()))
    }
}

/// The root's `.gitignore` combined with a [`DefaultIgnores`] set.
#[derive(Clone, Debug)]
pub struct IgnoreRules {
    root: PathBuf,
    /// Canonical form of `root`; the gitignore matcher is anchored here so it
    /// never mistakes a leading relative component for the root itself.
    anchor: PathBuf,
    defaults: DefaultIgnores,
    gitignore: Gitignore,
}

impl IgnoreRules {
    /// Reads `<root>/.gitignore` if there is one.
    ///
    /// Fails only when `root` is not an existing directory. An unreadable
    /// `.gitignore` or a bad line in it is logged and skipped.
    pub fn load(root: &Path, defaults: &DefaultIgnores) -> Result<Self> {
        crate::validate_root(root)?;
        debug!("always ignoring {:?}", defaults.patterns());
        let anchor = root.canonicalize()?;
        Ok(Self {
            root: root.to_path_buf(),
            gitignore: load_gitignore(&anchor),
            anchor,
            defaults: defaults.clone(),
        })
    }

    /// Whether `relative` (a path below the root) is excluded.
    ///
    /// Absolute paths are accepted when they lie under the root; relative
    /// paths are taken as already relative to it.
    ///
    /// Default names win over everything. Otherwise the path and then its
    /// parents are matched against `.gitignore`; the first pattern that
    /// decides (ignore or `!` whitelist) is final.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        let relative = if relative.is_absolute() {
            match relative
                .strip_prefix(&self.root)
                .or_else(|_| relative.strip_prefix(&self.anchor))
            {
                Ok(stripped) => stripped,
                Err(_) => return false,
            }
        } else {
            relative
        };
        if relative.has_root() {
            return false;
        }
        if self.defaults.matches(relative) {
            return true;
        }
        self.gitignore
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

fn load_gitignore(root: &Path) -> Gitignore {
    let path = root.join(GITIGNORE);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Gitignore::empty(),
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            return Gitignore::empty();
        }
    };

    let contents = String::from_utf8_lossy(&bytes);
    let mut builder = GitignoreBuilder::new(root);
    for (index, line) in contents.lines().enumerate() {
        if let Err(err) = builder.add_line(Some(path.clone()), line) {
            warn!("skipping {} line {}: {err}", path.display(), index + 1);
        }
    }

    match builder.build() {
        Ok(gitignore) => {
            debug!("loaded {} patterns from {}", gitignore.len(), path.display());
            gitignore
        }
        Err(err) => {
            warn!("ignoring {}: {err}", path.display());
            Gitignore::empty()
        }
    }
}
