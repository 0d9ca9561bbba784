//! Tag sets used for handler selection and hook ownership.

/// An ordered, duplicate-free set of string tags.
///
/// Insertion order is preserved so copies handed back to callers read the
/// same way they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a tag, ignoring duplicates.
    pub fn insert(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    /// Whether the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set contains `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Whether the two sets share at least one tag.
    pub fn intersects(&self, other: &TagSet) -> bool {
        self.0.iter().any(|t| other.contains(t))
    }

    /// Iterates over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns an owned copy of the tags.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Vec<&str>> for TagSet {
    fn from(tags: Vec<&str>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<&[&str]> for TagSet {
    fn from(tags: &[&str]) -> Self {
        tags.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for TagSet {
    fn from(tags: [&str; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl From<&str> for TagSet {
    fn from(tag: &str) -> Self {
        [tag].into()
    }
}

impl From<String> for TagSet {
    fn from(tag: String) -> Self {
        std::iter::once(tag).collect()
    }
}
