/*!
 * Translation table built from definition sources.
 *
 * Sources are loaded lazily: the global file the first time anything is
 * needed, then the shared local file and the category file when a table
 * category first shows up. Every source is read at most once per store.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use super::ini::SectionFile;
use crate::errors::DefinitionError;
use crate::file_utils::FileManager;

/// File holding the mandatory `GLOBALS` section
pub const GLOBAL_SOURCE: &str = "GLOBALTRANS.ini";

/// Optional file shared by all categories
pub const LOCAL_SOURCE: &str = "LOCALTRANS.ini";

/// Fallback section consulted after the category section
pub const GLOBAL_SECTION: &str = "globals";

/// Reserved key selecting which label grids a category translates
pub const SCOPE_KEY: &str = "TSCOPE";

/// Suffix of the sections holding pattern rules
pub const PATTERN_SUFFIX: &str = "-regexp";

/// Logical names of the definition sources
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceName {
    /// `GLOBALTRANS.ini`
    Global,
    /// `LOCALTRANS.ini`
    Local,
    /// `<category>.ini`
    Category(String),
}

impl SourceName {
    /// File name of this source inside the definitions folder
    pub fn file_name(&self) -> String {
        match self {
            Self::Global => GLOBAL_SOURCE.to_string(),
            Self::Local => LOCAL_SOURCE.to_string(),
            Self::Category(category) => format!("{}.ini", category),
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Which label grids of a table get translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationScope {
    /// Row labels only
    Rows,
    /// Column labels only
    Columns,
    /// Both grids
    #[default]
    All,
}

impl TranslationScope {
    /// Parse a `TSCOPE` value; unknown tokens give `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "rows" => Some(Self::Rows),
            "columns" => Some(Self::Columns),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn includes_rows(self) -> bool {
        matches!(self, Self::Rows | Self::All)
    }

    pub fn includes_columns(self) -> bool {
        matches!(self, Self::Columns | Self::All)
    }
}

/// Entries of one section, declaration order kept for pattern rules
#[derive(Debug, Clone, Default)]
pub struct Section {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Section {
    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    /// Entries in the order they were first declared
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merged translation table plus the record of sources already read
#[derive(Debug)]
pub struct DefinitionStore {
    folder: PathBuf,
    sections: HashMap<String, Section>,
    loaded: HashSet<SourceName>,
    attempted: HashSet<SourceName>,
}

impl DefinitionStore {
    /// Create an empty store reading sources from `folder`
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            sections: HashMap::new(),
            loaded: HashSet::new(),
            attempted: HashSet::new(),
        }
    }

    /// Folder the sources are read from
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Make sure every source relevant to `category` has been read.
    ///
    /// The global source is always requested, the local and category sources
    /// only for a non-empty category. Unreadable sources are skipped and not
    /// retried within this store.
    pub fn ensure_loaded(&mut self, category: &str) {
        self.ensure_source(SourceName::Global);
        if category.is_empty() {
            return;
        }
        self.ensure_source(SourceName::Local);
        self.ensure_source(SourceName::Category(category.to_string()));
    }

    fn ensure_source(&mut self, source: SourceName) {
        if self.attempted.contains(&source) {
            return;
        }
        self.attempted.insert(source.clone());

        let path = self.folder.join(source.file_name());
        let result = FileManager::read_definition_source(&path)
            .and_then(|text| self.merge_text(&text));
        match result {
            Ok(()) => {
                debug!("Loaded definition source {:?}", path);
                self.loaded.insert(source);
            }
            Err(e) => debug!("Skipping definition source {}: {}", source, e),
        }
    }

    /// Parse `text` and merge it into the table.
    ///
    /// Entries override existing ones with the same section and key.
    pub fn merge_text(&mut self, text: &str) -> Result<(), DefinitionError> {
        let file = SectionFile::parse(text)?;
        for parsed in file.sections {
            let section = self.sections.entry(parsed.name).or_default();
            for (key, value) in parsed.entries {
                section.insert(key, value);
            }
        }
        Ok(())
    }

    /// Whether any source was ever read successfully
    pub fn has_loaded_any(&self) -> bool {
        !self.loaded.is_empty()
    }

    /// Whether a particular source has been read successfully
    pub fn is_loaded(&self, source: &SourceName) -> bool {
        self.loaded.contains(source)
    }

    /// Look `text` up in the category section, then in `GLOBALS`
    pub fn lookup(&self, category: &str, text: &str) -> Option<&str> {
        if !category.is_empty() {
            if let Some(found) = self.lookup_in(category, text) {
                return Some(found);
            }
        }
        self.lookup_in(GLOBAL_SECTION, text)
    }

    /// Look `text` up in exactly one section
    pub fn lookup_in(&self, section: &str, text: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(text))
    }

    /// A section by name, ignoring case
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&name.to_lowercase())
    }

    /// The pattern section belonging to `section`
    pub fn pattern_section(&self, section: &str) -> Option<&Section> {
        self.section(&format!("{}{}", section, PATTERN_SUFFIX))
    }

    /// Scope flag for a category, `All` when missing or unrecognised
    pub fn scope(&self, category: &str) -> TranslationScope {
        self.lookup_in(category, SCOPE_KEY)
            .and_then(TranslationScope::parse)
            .unwrap_or_default()
    }

    /// Total number of entries across all sections
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(Section::len).sum()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
