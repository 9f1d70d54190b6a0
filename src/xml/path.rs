//! Child-index paths addressing nodes inside a [`RawXmlElement`](crate::xml::RawXmlElement) tree

use std::fmt;

/// Position of a node relative to an ancestor element, as the child index at
/// each level. Ordering is document order; an ancestor sorts before its
/// descendants.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The ancestor itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build from explicit indices
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent node, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Index of this node among its siblings, `None` for the root
    pub fn index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", idx)?;
        }
        Ok(())
    }
}
