//! A level-by-level drawing of a [`Tree`], meant for eyeballing small trees while debugging.
//!
//! Every level gets one line. Cells halve in width from one level to the next so that a node
//! sits roughly above the space its subtree occupies, and missing children are drawn as blank
//! cells to keep the shape readable.
//!
//! ```
//! use ordered_bst::Tree;
//!
//! let tree: Tree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
//! let drawing = tree.pretty().to_string();
//!
//! assert!(drawing.starts_with("Height = 2\n"));
//! assert!(drawing.contains(" 1a "));
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::tree::{Node, Tree};

/// Trees taller than this are not drawn; the margins grow exponentially with the height.
const MAX_DRAWN_HEIGHT: usize = 10;

/// The placeholder drawn where a level has no node.
const ABSENT: &str = "   ";

/// [`Display`][fmt::Display] adapter returned by [`Tree::pretty`].
pub struct Pretty<'a, K, V> {
    tree: &'a Tree<K, V>,
}

impl<K, V> Tree<K, V> {
    /// Returns a value whose `Display` output draws the tree level by level. Write it to any
    /// sink with `write!` or turn it into a `String` with `to_string`.
    pub fn pretty(&self) -> Pretty<'_, K, V> {
        Pretty { tree: self }
    }

    /// Draws the tree to standard output. Failing to write to stdout is ignored since this is only
    /// a debugging aid.
    pub fn debug_print(&self)
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", self.pretty()).and_then(|()| stdout.flush());
    }
}

impl<K, V> fmt::Display for Pretty<'_, K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.tree.height();
        writeln!(f, "Height = {height}")?;
        if height > MAX_DRAWN_HEIGHT {
            writeln!(f, "(not drawn, taller than {MAX_DRAWN_HEIGHT} levels)")?;
            return writeln!(f);
        }

        let mut level: Vec<Option<&Node<K, V>>> = vec![self.tree.root.as_deref()];
        for depth in 0..height {
            let margin = 1usize << (height - depth + 1);
            let cell = 2 * margin;

            write!(f, "{:margin$}", "")?;
            for slot in &level {
                match slot {
                    Some(node) => {
                        let label = format!(" {}{} ", node.item.key, node.item.value);
                        write!(f, "{label:<cell$}")?;
                    }
                    None => write!(f, "{ABSENT:<cell$}")?,
                }
            }
            writeln!(f)?;

            level = level
                .iter()
                .flat_map(|slot| match slot {
                    Some(node) => [node.left.as_deref(), node.right.as_deref()],
                    None => [None, None],
                })
                .collect();
        }

        writeln!(f)
    }
}
