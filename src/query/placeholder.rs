use std::fmt;

/// The type half of a `{tag@type}` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    /// Name-keyed container, compiled to a `NamedFilter`
    Name,
    /// Year- or period-keyed container, compiled to a `YearFilter` or `IndexFilter`
    Year,
}

impl PlaceholderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderType::Name => "name",
            PlaceholderType::Year => "year",
        }
    }

    /// Parse the type part of a placeholder; only `name` and `year` are recognized
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(PlaceholderType::Name),
            "year" => Some(PlaceholderType::Year),
            _ => None,
        }
    }
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholders found in a raw query, in order of first appearance
///
/// Tags are unique; the scanner rejects duplicates before building the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, PlaceholderType)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeholder; returns false (and leaves the map unchanged) if the tag exists
    pub(crate) fn insert(&mut self, tag: impl Into<String>, ty: PlaceholderType) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.entries.push((tag, ty));
        true
    }

    pub fn get(&self, tag: &str) -> Option<PlaceholderType> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, ty)| *ty)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PlaceholderType)> {
        self.entries.iter().map(|(t, ty)| (t.as_str(), *ty))
    }

    pub fn tags(&self) -> Vec<&str> {
        self.entries.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitution key for a placeholder: `tag@type`
    pub fn key(tag: &str, ty: PlaceholderType) -> String {
        format!("{}@{}", tag, ty)
    }
}
