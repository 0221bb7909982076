//! Typed addresses into a document tree
//!
//! A [`Path`] is a list of field and index steps from the document root,
//! e.g. `sec/0/b/2/i/1`. Paths are only valid for the tree they were
//! computed on: any structural edit (inserting or removing a block) shifts
//! the indices of later siblings, so callers must re-resolve after mutating.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Field name of the section list on a document
pub const SECTIONS: &str = "sec";
/// Field name of the block list on a section
pub const BLOCKS: &str = "b";
/// Field name of the run list on a block
pub const INLINES: &str = "i";

/// A single step in a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Key into an object
    Field(String),
    /// Index into an array
    Index(usize),
}

/// An ordered sequence of steps addressing one node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// The empty path (the document root)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to a block
    pub fn block(section: usize, block: usize) -> Self {
        Self::root()
            .field(SECTIONS)
            .index(section)
            .field(BLOCKS)
            .index(block)
    }

    /// Path to a run
    pub fn run(section: usize, block: usize, run: usize) -> Self {
        Self::block(section, block).field(INLINES).index(run)
    }

    /// Extend with a field step
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathStep::Field(name.into()));
        self
    }

    /// Extend with an index step
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathStep::Index(index));
        self
    }

    /// A new path with one more step
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    /// The steps of this path
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Section and block indices of the block enclosing this path
    ///
    /// Returns `None` for paths that do not start with `sec/<n>/b/<n>`,
    /// such as markers found in document-level properties.
    pub fn block_position(&self) -> Option<(usize, usize)> {
        match self.0.as_slice() {
            [PathStep::Field(sec), PathStep::Index(s), PathStep::Field(b), PathStep::Index(i), ..]
                if sec == SECTIONS && b == BLOCKS =>
            {
                Some((*s, *i))
            }
            _ => None,
        }
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => f.write_str(name),
            PathStep::Index(index) => write!(f, "{}", index),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    /// Parse `sec/0/b/1`; all-digit segments become index steps
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(|seg| match seg.parse::<usize>() {
                Ok(index) => PathStep::Index(index),
                Err(_) => PathStep::Field(seg.to_string()),
            })
            .collect();
        Ok(Self(steps))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Path::run(0, 2, 1).to_string(), "sec/0/b/2/i/1");
        assert_eq!(Path::root().to_string(), "");
    }

    #[test]
    fn test_parse() {
        let path: Path = "sec/1/b/0".parse().unwrap();
        assert_eq!(path, Path::block(1, 0));
    }

    #[test]
    fn test_block_position() {
        assert_eq!(Path::run(3, 4, 0).block_position(), Some((3, 4)));
        assert_eq!(Path::block(0, 7).block_position(), Some((0, 7)));
        assert_eq!(Path::root().field("sty").index(0).block_position(), None);
        assert_eq!(Path::root().field(SECTIONS).index(0).block_position(), None);
    }

    #[test]
    fn test_child_does_not_modify_parent() {
        let parent = Path::block(0, 0);
        let child = parent.child(PathStep::Field("i".to_string()));
        assert_eq!(parent.len(), 4);
        assert_eq!(child.len(), 5);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Path::block(0, 1)).unwrap();
        assert_eq!(json, "\"sec/0/b/1\"");
    }
}
