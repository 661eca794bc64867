//! Nested tree description.

use std::fmt;

/// A node is either a labelled leaf or a branch carrying sub-trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
    Leaf(u32),
    Branch(Vec<Tree>),
}

impl Tree {
    /// `[1, 2, [3, [4, 5]], 6, [7, 8], 9]`
    pub fn sample() -> Vec<Tree> {
        use Tree::{Branch, Leaf};
        vec![
            Leaf(1),
            Leaf(2),
            Branch(vec![Leaf(3), Branch(vec![Leaf(4), Leaf(5)])]),
            Leaf(6),
            Branch(vec![Leaf(7), Leaf(8)]),
            Leaf(9),
        ]
    }

    /// Leaves under this node, this node included.
    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Branch(children) => children.iter().map(Tree::leaf_count).sum(),
        }
    }

    /// Branch levels below this node; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Branch(children) => 1 + children.iter().map(Tree::depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Leaf(v) => write!(f, "{}", v),
            Tree::Branch(children) => {
                write!(f, "[")?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "]")
            }
        }
    }
}
