/*!
 * Pattern fallback for labels with no exact entry.
 *
 * `<section>-regexp` sections hold `pattern=replacement` pairs. Rules are
 * compiled the first time a section is needed and tried in declaration
 * order; the first pattern that matches anywhere in the text rewrites it.
 * Replacement templates use backslash group references (`\1`, `\g<name>`)
 * and are converted to the `regex` crate's `${..}` syntax at compile time.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::cache::{PatternCache, RuleSetState};
use crate::definitions::{DefinitionStore, GLOBAL_SECTION};
use crate::errors::PatternError;

/// Backslash escapes inside a replacement template
static TEMPLATE_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\(?:g<([^>]*)>|(0[0-7]{0,2})|([1-9][0-9]?)|(.)|$)")
        .expect("template escape regex is valid")
});

/// A compiled pattern rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    replacement: String,
}

impl PatternRule {
    /// Compile a rule from its section entry
    pub fn compile(pattern: &str, template: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let replacement = convert_template(&regex, template)?;
        Ok(Self {
            pattern: regex,
            replacement,
        })
    }

    /// Source text of the pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Rewrite `text` if the pattern matches anywhere in it
    pub fn apply(&self, text: &str) -> Option<String> {
        if !self.pattern.is_match(text) {
            return None;
        }
        Some(
            self.pattern
                .replace_all(text, self.replacement.as_str())
                .into_owned(),
        )
    }
}

/// Convert a backslash-style template into `regex` replacement syntax
fn convert_template(regex: &Regex, template: &str) -> Result<String, PatternError> {
    let invalid = |reason: String| PatternError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };
    let group_count = regex.captures_len();

    let mut converted = String::with_capacity(template.len());
    let mut last = 0;
    for caps in TEMPLATE_ESCAPE.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        converted.push_str(&template[last..whole.start()].replace('$', "$$"));
        last = whole.end();

        if let Some(name) = caps.get(1) {
            let name = name.as_str();
            let known = match name.parse::<usize>() {
                Ok(number) => number < group_count,
                Err(_) => regex.capture_names().flatten().any(|n| n == name),
            };
            if !known {
                return Err(invalid(format!("unknown group '{}'", name)));
            }
            converted.push_str(&format!("${{{}}}", name));
        } else if let Some(octal) = caps.get(2) {
            // at most three octal digits, so this always fits in a char
            let code = u32::from_str_radix(octal.as_str(), 8)
                .map_err(|_| invalid("bad octal escape".to_string()))?;
            converted.extend(char::from_u32(code));
        } else if let Some(number) = caps.get(3) {
            let number: usize = number
                .as_str()
                .parse()
                .map_err(|_| invalid("bad group number".to_string()))?;
            if number >= group_count {
                return Err(invalid(format!("invalid group reference {}", number)));
            }
            converted.push_str(&format!("${{{}}}", number));
        } else if let Some(escaped) = caps.get(4) {
            match escaped.as_str() {
                "\\" => converted.push('\\'),
                "n" => converted.push('\n'),
                "t" => converted.push('\t'),
                "r" => converted.push('\r'),
                "a" => converted.push('\u{07}'),
                "b" => converted.push('\u{08}'),
                "f" => converted.push('\u{0c}'),
                "v" => converted.push('\u{0b}'),
                "$" => converted.push_str("\\$$"),
                other if other.chars().all(|c| c.is_ascii_alphabetic()) => {
                    return Err(invalid(format!("bad escape \\{}", other)));
                }
                other => {
                    converted.push('\\');
                    converted.push_str(other);
                }
            }
        } else {
            return Err(invalid("dangling backslash at end of template".to_string()));
        }
    }
    converted.push_str(&template[last..].replace('$', "$$"));

    Ok(converted)
}

/// Compile every rule of a section, skipping rules that do not compile
pub fn compile_rules(entries: &[(String, String)]) -> Vec<PatternRule> {
    entries
        .iter()
        .filter_map(|(pattern, template)| match PatternRule::compile(pattern, template) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!("Skipping pattern rule: {}", e);
                None
            }
        })
        .collect()
}

/// Resolves misses through the category's and then the global pattern rules
#[derive(Debug, Default)]
pub struct PatternResolver {
    cache: PatternCache,
}

impl PatternResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate `text` with the first matching rule, category rules first
    pub fn resolve(&mut self, store: &DefinitionStore, category: &str, text: &str) -> Option<String> {
        let category_level = (!category.is_empty()).then_some(category);

        for section in category_level.into_iter().chain(std::iter::once(GLOBAL_SECTION)) {
            let rules = self.cache.get_or_build(section, || {
                store
                    .pattern_section(section)
                    .map(|s| compile_rules(s.entries()))
            });
            for rule in rules {
                if let Some(translated) = rule.apply(text) {
                    debug!("Pattern '{}' rewrote '{}'", rule.pattern(), text);
                    return Some(translated);
                }
            }
        }
        None
    }

    /// Cache state of a section's rule set
    pub fn state(&self, section: &str) -> RuleSetState<'_> {
        self.cache.state(section)
    }
}
