/*!
 * Item translation.
 *
 * `Translator` owns the definition store and the pattern rules for one run
 * and walks the text leaves of report items: every leaf is looked up in the
 * category section, then `GLOBALS`, then the pattern rules, and a hit is
 * written back through the leaf's slot.
 */

use std::path::Path;

use log::debug;

use super::category::normalize_category;
use super::patterns::PatternResolver;
use crate::definitions::DefinitionStore;
use crate::host::{
    CaptionText, DescriptionText, FootnoteText, GridAxis, GridCell, ItemKind, LabelArray,
    LayerName, OutputItem, PivotTable, SpecificItem, TextSlot, TitleContents, TitleText,
};

/// Counters collected over a translator's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Items whose leaves were visited
    pub items_translated: usize,

    /// Text leaves read
    pub leaves_visited: usize,

    /// Leaves resolved by an exact entry
    pub exact_hits: usize,

    /// Leaves resolved by a pattern rule
    pub pattern_hits: usize,

    /// Leaves the host refused to update
    pub write_rejections: usize,

    /// Leaves whose text could not be read
    pub read_failures: usize,
}

impl TranslationStats {
    /// Leaves that received a translation
    pub fn leaves_changed(&self) -> usize {
        (self.exact_hits + self.pattern_hits).saturating_sub(self.write_rejections)
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} item(s), {} label(s) checked, {} translated ({} exact, {} pattern), {} rejected by host",
            self.items_translated,
            self.leaves_visited,
            self.leaves_changed(),
            self.exact_hits,
            self.pattern_hits,
            self.write_rejections
        )
    }
}

/// Translates report items for one run
#[derive(Debug)]
pub struct Translator {
    store: DefinitionStore,
    patterns: PatternResolver,
    stats: TranslationStats,
}

impl Translator {
    /// Create a translator reading definitions from `folder`
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self::with_store(DefinitionStore::new(folder))
    }

    /// Create a translator around an existing store
    pub fn with_store(store: DefinitionStore) -> Self {
        Self {
            store,
            patterns: PatternResolver::new(),
            stats: TranslationStats::default(),
        }
    }

    pub fn store(&self) -> &DefinitionStore {
        &self.store
    }

    pub fn patterns(&self) -> &PatternResolver {
        &self.patterns
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    /// Translation for one text in a category, exact entries before patterns
    pub fn translate_text(&mut self, category: &str, text: &str) -> Option<String> {
        self.resolve(category, text).map(|(translated, _)| translated)
    }

    /// Returns the translation and whether it came from a pattern rule
    fn resolve(&mut self, category: &str, text: &str) -> Option<(String, bool)> {
        if let Some(found) = self.store.lookup(category, text) {
            return Some((found.to_string(), false));
        }
        self.patterns
            .resolve(&self.store, category, text)
            .map(|translated| (translated, true))
    }

    /// Translate a pivot table, title or heading in place.
    ///
    /// Returns `false` when the item was left alone: an unsupported kind, a
    /// table without a subtype, or no definition source at all.
    pub fn translate_item(&mut self, item: &mut dyn OutputItem) -> bool {
        let kind = item.kind();
        if !matches!(kind, ItemKind::PivotTable | ItemKind::Title | ItemKind::Heading) {
            return false;
        }

        let category = match kind {
            ItemKind::PivotTable => normalize_category(&item.subtype()),
            _ => String::new(),
        };

        self.store.ensure_loaded(&category);
        if !self.store.has_loaded_any() {
            debug!("No definition source found in {:?}", self.store.folder());
            return false;
        }

        match kind {
            ItemKind::Heading => {
                self.replace_text(&category, &mut DescriptionText(&mut *item));
            }
            ItemKind::Title => {
                if let SpecificItem::Title(title) = item.specific() {
                    self.replace_text(&category, &mut TitleContents(title));
                }
            }
            ItemKind::PivotTable => {
                if category.is_empty() {
                    return false;
                }
                if let SpecificItem::Pivot(pivot) = item.specific() {
                    self.translate_pivot(&category, pivot);
                }
                self.replace_text(&category, &mut DescriptionText(&mut *item));
            }
            ItemKind::Log | ItemKind::Other => return false,
        }

        self.stats.items_translated += 1;
        true
    }

    fn translate_pivot(&mut self, category: &str, pivot: &mut dyn PivotTable) {
        let scope = self.store.scope(category);

        pivot.set_update_screen(false);

        if scope.includes_rows() {
            self.translate_grid(category, pivot.row_labels(), GridAxis::Rows);
        }
        if scope.includes_columns() {
            self.translate_grid(category, pivot.column_labels(), GridAxis::Columns);
        }

        self.replace_text(category, &mut TitleText(&mut *pivot));
        self.replace_text(category, &mut CaptionText(&mut *pivot));

        let notes = pivot.footnotes();
        for index in 0..notes.count() {
            self.replace_text(
                category,
                &mut FootnoteText {
                    notes: &mut *notes,
                    index,
                },
            );
        }

        for index in 0..pivot.num_layer_dimensions() {
            if let Some(layer) = pivot.layer_dimension(index) {
                self.replace_text(category, &mut LayerName { layer, index });
            }
        }

        pivot.set_update_screen(true);
    }

    fn translate_grid(&mut self, category: &str, grid: &mut dyn LabelArray, axis: GridAxis) {
        let rows = grid.num_rows();
        let columns = grid.num_columns();
        for row in 0..rows {
            for column in 0..columns {
                self.replace_text(
                    category,
                    &mut GridCell {
                        grid: &mut *grid,
                        axis,
                        row,
                        column,
                    },
                );
            }
        }
    }

    /// Look up one leaf and write back any translation.
    ///
    /// Read failures and rejected writes only affect this leaf.
    fn replace_text(&mut self, category: &str, slot: &mut dyn TextSlot) {
        self.stats.leaves_visited += 1;

        let text = match slot.read() {
            Ok(text) => text,
            Err(e) => {
                debug!("Could not read {}: {}", slot.describe(), e);
                self.stats.read_failures += 1;
                return;
            }
        };

        let Some((translated, from_pattern)) = self.resolve(category, &text) else {
            return;
        };
        if from_pattern {
            self.stats.pattern_hits += 1;
        } else {
            self.stats.exact_hits += 1;
        }

        if let Err(rejected) = slot.write(&translated) {
            debug!("{} kept '{}': {}", slot.describe(), text, rejected);
            self.stats.write_rejections += 1;
        }
    }
}
