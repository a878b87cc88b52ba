/*!
 * Category identifiers and subtype filters.
 */

use std::collections::HashSet;

/// Normalize a table subtype into a lookup category.
///
/// Letters are lower-cased and every whitespace character is removed, so
/// "Custom Table" and "custom  table" both become "customtable".
pub fn normalize_category(subtype: &str) -> String {
    subtype
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip one layer of matching single or double quotes
fn strip_quotes(entry: &str) -> &str {
    let bytes = entry.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            return &entry[1..entry.len() - 1];
        }
    }
    entry
}

/// Set of categories a batch run is limited to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubtypeFilter {
    categories: Option<HashSet<String>>,
}

impl SubtypeFilter {
    /// Filter accepting every category
    pub fn all() -> Self {
        Self { categories: None }
    }

    /// Build a filter from user-supplied subtype names.
    ///
    /// An empty list or any `*` entry accepts everything.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories = HashSet::new();
        for entry in entries {
            let normalized = normalize_category(entry.as_ref());
            if normalized == "*" {
                return Self::all();
            }
            categories.insert(strip_quotes(&normalized).to_string());
        }

        if categories.is_empty() {
            Self::all()
        } else {
            Self {
                categories: Some(categories),
            }
        }
    }

    pub fn accepts_all(&self) -> bool {
        self.categories.is_none()
    }

    /// Whether a normalized category passes the filter
    pub fn matches(&self, category: &str) -> bool {
        match &self.categories {
            None => true,
            Some(categories) => categories.contains(category),
        }
    }
}
