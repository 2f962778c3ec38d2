use std::fmt;

use crate::walker::DirectoryNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// One line of output: connector prefix, entry name, `/` for directories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderLine {
    pub prefix: String,
    pub name: String,
    pub is_dir: bool,
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.name)?;
        if self.is_dir {
            f.write_str("/")?;
        }
        Ok(())
    }
}

pub fn render_lines(tree: &DirectoryNode) -> Vec<RenderLine> {
    let mut lines = vec![RenderLine {
        prefix: String::new(),
        name: tree.name.clone(),
        is_dir: true,
    }];
    push_children(&mut lines, &tree.children, &mut Vec::new());
    lines
}

fn push_children(
    lines: &mut Vec<RenderLine>,
    children: &[DirectoryNode],
    ancestor_has_more: &mut Vec<bool>,
) {
    for (index, node) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();

        let mut prefix = String::new();
        for &has_more in ancestor_has_more.iter() {
            prefix.push_str(if has_more { PIPE } else { SPACE });
        }
        prefix.push_str(if is_last { LAST_BRANCH } else { BRANCH });

        lines.push(RenderLine {
            prefix,
            name: node.name.clone(),
            is_dir: node.is_dir(),
        });

        if !node.children.is_empty() {
            ancestor_has_more.push(!is_last);
            push_children(lines, &node.children, ancestor_has_more);
            ancestor_has_more.pop();
        }
    }
}

/// Renders the whole tree; every line, including the last, ends in `\n`.
pub fn render(tree: &DirectoryNode) -> String {
    let mut out = String::new();
    for line in render_lines(tree) {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}
