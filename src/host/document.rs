/*!
 * In-memory output document.
 *
 * A JSON-serializable stand-in for the host's object model. The command-line
 * front end loads one of these, runs the translator over it and writes it
 * back; tests use it to build documents without a live host.
 */

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{
    FootnoteArray, Host, ItemKind, LabelArray, LayerDimension, OutputDocument, OutputItem,
    PivotTable, SpecificItem, TitleItem,
};
use crate::errors::{HostError, WriteRejected};
use crate::file_utils::FileManager;

/// A whole output document, items oldest to newest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub items: Vec<DocumentItem>,
}

impl Document {
    /// Create a document from items
    pub fn new(items: Vec<DocumentItem>) -> Self {
        Self { items }
    }

    /// Load a document from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        FileManager::read_json(path)
    }

    /// Write the document to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_json(path, self)
    }
}

impl OutputDocument for Document {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<&dyn OutputItem> {
        self.items.get(index).map(|item| item as &dyn OutputItem)
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn OutputItem> {
        self.items.get_mut(index).map(|item| item as &mut dyn OutputItem)
    }
}

fn default_tree_level() -> usize {
    2
}

/// One item with its outline properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Outline description
    #[serde(default)]
    pub description: String,

    /// Whether the item is selected in the viewer
    #[serde(default)]
    pub selected: bool,

    /// Outline depth; 1 is the root of a command's output
    #[serde(default = "default_tree_level")]
    pub tree_level: usize,

    #[serde(flatten)]
    pub content: ItemContent,
}

impl DocumentItem {
    /// Pivot table item
    pub fn pivot(description: &str, table: PivotContent) -> Self {
        Self::with_content(description, ItemContent::PivotTable(table))
    }

    /// Title item
    pub fn title(description: &str, text: &str) -> Self {
        Self::with_content(description, ItemContent::Title(TextContent::new(text)))
    }

    /// Heading item
    pub fn heading(description: &str) -> Self {
        Self::with_content(description, ItemContent::Heading)
    }

    /// Log item
    pub fn log(text: &str) -> Self {
        Self::with_content("Log", ItemContent::Log(TextContent::new(text)))
    }

    fn with_content(description: &str, content: ItemContent) -> Self {
        Self {
            description: description.to_string(),
            selected: false,
            tree_level: default_tree_level(),
            content,
        }
    }

    /// Set the outline depth
    pub fn at_level(mut self, tree_level: usize) -> Self {
        self.tree_level = tree_level;
        self
    }

    /// Mark the item selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// The pivot content, if this is a pivot table
    pub fn as_pivot(&self) -> Option<&PivotContent> {
        match &self.content {
            ItemContent::PivotTable(table) => Some(table),
            _ => None,
        }
    }

    /// The title text, if this is a title
    pub fn title_text(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Title(title) => Some(&title.text),
            _ => None,
        }
    }
}

/// Kind-specific part of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemContent {
    PivotTable(PivotContent),
    Title(TextContent),
    Heading,
    Log(TextContent),
    Other,
}

/// Plain text body of a title or log item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
}

impl TextContent {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl TitleItem for TextContent {
    fn text_contents(&self) -> Result<String, HostError> {
        Ok(self.text.clone())
    }

    fn set_text_contents(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.text = text.to_string();
        Ok(())
    }
}

impl OutputItem for DocumentItem {
    fn kind(&self) -> ItemKind {
        match self.content {
            ItemContent::PivotTable(_) => ItemKind::PivotTable,
            ItemContent::Title(_) => ItemKind::Title,
            ItemContent::Heading => ItemKind::Heading,
            ItemContent::Log(_) => ItemKind::Log,
            ItemContent::Other => ItemKind::Other,
        }
    }

    fn subtype(&self) -> String {
        self.as_pivot()
            .map(|table| table.subtype.clone())
            .unwrap_or_default()
    }

    fn description(&self) -> Result<String, HostError> {
        Ok(self.description.clone())
    }

    fn set_description(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.description = text.to_string();
        Ok(())
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn tree_level(&self) -> usize {
        self.tree_level
    }

    fn specific(&mut self) -> SpecificItem<'_> {
        match &mut self.content {
            ItemContent::PivotTable(table) => SpecificItem::Pivot(table),
            ItemContent::Title(title) => SpecificItem::Title(title),
            _ => SpecificItem::None,
        }
    }
}

/// Pivot table body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotContent {
    /// Structural subtype, e.g. "Descriptive Statistics"
    #[serde(default)]
    pub subtype: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub caption: String,

    #[serde(default)]
    pub row_labels: LabelGrid,

    #[serde(default)]
    pub column_labels: LabelGrid,

    #[serde(default)]
    pub footnotes: Footnotes,

    #[serde(default)]
    pub layers: Vec<Layer>,

    /// True while screen refresh is suspended
    #[serde(skip)]
    pub screen_suspended: bool,
}

impl PivotContent {
    /// Empty table of the given subtype
    pub fn new(subtype: &str) -> Self {
        Self {
            subtype: subtype.to_string(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn with_row_labels(mut self, rows: &[&[&str]]) -> Self {
        self.row_labels = LabelGrid::from_rows(rows);
        self
    }

    pub fn with_column_labels(mut self, rows: &[&[&str]]) -> Self {
        self.column_labels = LabelGrid::from_rows(rows);
        self
    }

    pub fn with_footnotes(mut self, notes: &[&str]) -> Self {
        self.footnotes = Footnotes(notes.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_layers(mut self, names: &[&str]) -> Self {
        self.layers = names.iter().map(|n| Layer::new(n)).collect();
        self
    }
}

impl PivotTable for PivotContent {
    fn row_labels(&mut self) -> &mut dyn LabelArray {
        &mut self.row_labels
    }

    fn column_labels(&mut self) -> &mut dyn LabelArray {
        &mut self.column_labels
    }

    fn title_text(&self) -> Result<String, HostError> {
        Ok(self.title.clone())
    }

    fn set_title_text(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.title = text.to_string();
        Ok(())
    }

    fn caption_text(&self) -> Result<String, HostError> {
        Ok(self.caption.clone())
    }

    fn set_caption_text(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.caption = text.to_string();
        Ok(())
    }

    fn footnotes(&mut self) -> &mut dyn FootnoteArray {
        &mut self.footnotes
    }

    fn num_layer_dimensions(&self) -> usize {
        self.layers.len()
    }

    fn layer_dimension(&mut self, index: usize) -> Option<&mut dyn LayerDimension> {
        self.layers
            .get_mut(index)
            .map(|layer| layer as &mut dyn LayerDimension)
    }

    fn set_update_screen(&mut self, update: bool) {
        self.screen_suspended = !update;
    }
}

/// Grid of label cells, stored row-major
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelGrid {
    pub cells: Vec<Vec<String>>,
}

impl LabelGrid {
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    /// Cell text, if present
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.cells.get(row)?.get(column).map(String::as_str)
    }
}

impl LabelArray for LabelGrid {
    fn num_rows(&self) -> usize {
        self.cells.len()
    }

    fn num_columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn value_at(&self, row: usize, column: usize) -> Result<String, HostError> {
        let cells = self.cells.get(row).ok_or(HostError::IndexOutOfRange {
            index: row,
            size: self.cells.len(),
        })?;
        cells
            .get(column)
            .cloned()
            .ok_or(HostError::IndexOutOfRange {
                index: column,
                size: cells.len(),
            })
    }

    fn set_value_at(&mut self, row: usize, column: usize, text: &str) -> Result<(), WriteRejected> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or_else(|| WriteRejected::new(format!("no label cell at ({}, {})", row, column)))?;
        *cell = text.to_string();
        Ok(())
    }
}

/// Footnote texts of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Footnotes(pub Vec<String>);

impl FootnoteArray for Footnotes {
    fn count(&self) -> usize {
        self.0.len()
    }

    fn value_at(&self, index: usize) -> Result<String, HostError> {
        self.0.get(index).cloned().ok_or(HostError::IndexOutOfRange {
            index,
            size: self.0.len(),
        })
    }

    fn set_value_at(&mut self, index: usize, text: &str) -> Result<(), WriteRejected> {
        let note = self
            .0
            .get_mut(index)
            .ok_or_else(|| WriteRejected::new(format!("no footnote {}", index)))?;
        *note = text.to_string();
        Ok(())
    }
}

/// A layer dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl LayerDimension for Layer {
    fn dimension_name(&self) -> Result<String, HostError> {
        Ok(self.name.clone())
    }

    fn set_dimension_name(&mut self, name: &str) -> Result<(), WriteRejected> {
        self.name = name.to_string();
        Ok(())
    }
}

/// Host wrapping an in-memory document
#[derive(Debug, Default)]
pub struct DocumentHost {
    document: Document,
    script_context: Option<usize>,
    install_path: Option<PathBuf>,
    session_active: bool,
    sessions_started: usize,
}

impl DocumentHost {
    /// Host whose designated document is `document`
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Treat item `index` as the item a triggering operation just produced
    pub fn with_script_context(mut self, index: usize) -> Self {
        self.script_context = Some(index);
        self
    }

    pub fn with_installation_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.install_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Whether a client session is currently open
    pub fn session_active(&self) -> bool {
        self.session_active
    }

    /// How many client sessions have been started
    pub fn sessions_started(&self) -> usize {
        self.sessions_started
    }
}

impl Host for DocumentHost {
    fn start_client(&mut self) -> Result<(), HostError> {
        if self.session_active {
            return Err(HostError::SessionUnavailable(
                "a client session is already open".to_string(),
            ));
        }
        self.session_active = true;
        self.sessions_started += 1;
        Ok(())
    }

    fn stop_client(&mut self) {
        self.session_active = false;
    }

    fn script_context(&mut self) -> Option<&mut dyn OutputItem> {
        let index = self.script_context?;
        self.document
            .items
            .get_mut(index)
            .map(|item| item as &mut dyn OutputItem)
    }

    fn designated_document(&mut self) -> Result<&mut dyn OutputDocument, HostError> {
        Ok(&mut self.document)
    }

    fn installation_path(&self) -> Option<PathBuf> {
        self.install_path.clone()
    }
}
