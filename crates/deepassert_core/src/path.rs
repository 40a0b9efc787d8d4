//! Field paths.
//!
//! A [`FieldPath`] locates a node relative to the root of a traversal. The
//! root itself is the empty path.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Separator between rendered segments.
pub const FIELD_SEPARATOR: &str = ".";

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A named member, rendered as the name.
    Field(String),
    /// A sequence or array position, rendered `[i]`.
    Index(usize),
    /// A map key, rendered `KEY[repr]`.
    MapKey(String),
    /// A map value, rendered `VAL[repr]`.
    MapValue(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::MapKey(repr) => write!(f, "KEY[{}]", repr),
            Segment::MapValue(repr) => write!(f, "VAL[{}]", repr),
        }
    }
}

/// An immutable location in an object graph.
///
/// # Example
///
/// ```rust
/// use deepassert_core::FieldPath;
///
/// let path = FieldPath::root().field("books").array_index(0).field("title");
/// assert_eq!(path.render(), "books.[0].title");
/// assert_eq!(path.rules_path(), "books.title");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Returns the empty path, which designates the traversal root.
    #[inline]
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path of named members from its dotted form.
    ///
    /// The empty string is the root.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self {
            segments: dotted
                .split(FIELD_SEPARATOR)
                .map(|name| Segment::Field(name.to_string()))
                .collect(),
        }
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    pub fn array_index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    pub fn map_key(&self, repr: impl Into<String>) -> Self {
        self.with(Segment::MapKey(repr.into()))
    }

    pub fn map_value(&self, repr: impl Into<String>) -> Self {
        self.with(Segment::MapValue(repr.into()))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the last segment, or `None` for the root.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Renders every segment joined by `.`.
    pub fn render(&self) -> String {
        join(self.segments.iter())
    }

    /// Renders the path that ignore rules are matched against.
    ///
    /// Index segments are dropped: rules address a collection as a whole,
    /// so `children.[2].name` is matched as `children.name`.
    pub fn rules_path(&self) -> String {
        join(
            self.segments
                .iter()
                .filter(|segment| !matches!(segment, Segment::Index(_))),
        )
    }
}

fn join<'a>(segments: impl Iterator<Item = &'a Segment>) -> String {
    segments
        .map(Segment::to_string)
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

impl Ord for FieldPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rules_path()
            .cmp(&other.rules_path())
            .then_with(|| self.segments.cmp(&other.segments))
    }
}

impl PartialOrd for FieldPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.render())
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.render())
    }
}
