/*!
 * Reader for key/value section files.
 *
 * The format is the classic INI layout: `[section]` headers followed by
 * `key=value` (or `key: value`) entries. Keys keep their exact case and inner
 * whitespace because they are the label texts being looked up. Section names
 * are folded to lower case.
 */

use crate::errors::DefinitionError;

/// Number of leading whitespace characters
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// One `[section]` of a parsed file, entries in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    /// Lower-cased section name
    pub name: String,

    /// Entries as written, later duplicates replacing earlier ones in place
    pub entries: Vec<(String, String)>,
}

impl ParsedSection {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, key: String, value: String) -> usize {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries[pos].1 = value;
            pos
        } else {
            self.entries.push((key, value));
            self.entries.len() - 1
        }
    }
}

/// A whole parsed definition file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionFile {
    /// Sections in order of first appearance
    pub sections: Vec<ParsedSection>,
}

impl SectionFile {
    /// Parse section-file text.
    ///
    /// Any syntax error fails the whole file so that a broken source never
    /// contributes half of its entries.
    pub fn parse(text: &str) -> Result<Self, DefinitionError> {
        let mut file = SectionFile::default();
        let mut current: Option<usize> = None;
        // (section index, entry index, indent width) of the entry a
        // continuation line extends
        let mut last_entry: Option<(usize, usize, usize)> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                last_entry = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = indent_width(raw);
            if let Some((s, e, entry_indent)) = last_entry {
                if indent > entry_indent {
                    let value = &mut file.sections[s].entries[e].1;
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
                let name = trimmed[1..trimmed.len() - 1].trim().to_lowercase();
                current = Some(file.section_index(name));
                last_entry = None;
                continue;
            }

            let Some(section) = current else {
                return Err(DefinitionError::MissingSectionHeader { line: line_no });
            };

            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(DefinitionError::InvalidLine {
                    line: line_no,
                    content: raw.to_string(),
                });
            };

            let key = trimmed[..split].trim_end();
            if key.is_empty() {
                return Err(DefinitionError::InvalidLine {
                    line: line_no,
                    content: raw.to_string(),
                });
            }
            let value = trimmed[split + 1..].trim_start();

            let entry = file.sections[section].insert(key.to_string(), value.to_string());
            last_entry = Some((section, entry, indent));
        }

        Ok(file)
    }

    /// Find a section by name, ignoring case
    pub fn section(&self, name: &str) -> Option<&ParsedSection> {
        let name = name.to_lowercase();
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_index(&mut self, name: String) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(pos) => pos,
            None => {
                self.sections.push(ParsedSection::new(name));
                self.sections.len() - 1
            }
        }
    }
}
