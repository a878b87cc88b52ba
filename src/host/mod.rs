/*!
 * Narrow view of the report-authoring host.
 *
 * The translator never owns report items. It reads and rewrites their text
 * through these traits, and the host decides what a write means (or refuses
 * it). `document` provides an in-memory implementation backed by JSON.
 */

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{HostError, WriteRejected};

pub use self::document::{
    Document, DocumentHost, DocumentItem, Footnotes, ItemContent, LabelGrid, Layer, PivotContent,
    TextContent,
};
pub use self::session::ClientSession;
pub use self::slots::{
    CaptionText, DescriptionText, FootnoteText, GridAxis, GridCell, LayerName, TextSlot,
    TitleContents, TitleText,
};

pub mod document;
pub mod session;
pub mod slots;

/// Kind of an output item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A pivot table with label grids, footnotes and layers
    PivotTable,
    /// A title text item
    Title,
    /// An outline heading
    Heading,
    /// A log entry echoing commands
    Log,
    /// Anything else (charts, notes, warnings, ...)
    Other,
}

/// Row or column labels of a pivot table, addressed by (row, column)
pub trait LabelArray {
    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize;

    fn value_at(&self, row: usize, column: usize) -> Result<String, HostError>;

    fn set_value_at(&mut self, row: usize, column: usize, text: &str) -> Result<(), WriteRejected>;
}

/// Footnotes attached to a pivot table
pub trait FootnoteArray {
    fn count(&self) -> usize;

    fn value_at(&self, index: usize) -> Result<String, HostError>;

    fn set_value_at(&mut self, index: usize, text: &str) -> Result<(), WriteRejected>;
}

/// One layer dimension of a pivot table
pub trait LayerDimension {
    fn dimension_name(&self) -> Result<String, HostError>;

    fn set_dimension_name(&mut self, name: &str) -> Result<(), WriteRejected>;
}

/// Pivot-table specific accessors
pub trait PivotTable {
    fn row_labels(&mut self) -> &mut dyn LabelArray;

    fn column_labels(&mut self) -> &mut dyn LabelArray;

    fn title_text(&self) -> Result<String, HostError>;

    fn set_title_text(&mut self, text: &str) -> Result<(), WriteRejected>;

    fn caption_text(&self) -> Result<String, HostError>;

    fn set_caption_text(&mut self, text: &str) -> Result<(), WriteRejected>;

    fn footnotes(&mut self) -> &mut dyn FootnoteArray;

    fn num_layer_dimensions(&self) -> usize;

    fn layer_dimension(&mut self, index: usize) -> Option<&mut dyn LayerDimension>;

    /// Suspend (`false`) or resume (`true`) screen refresh while labels change
    fn set_update_screen(&mut self, update: bool);
}

/// Title-specific accessors
pub trait TitleItem {
    fn text_contents(&self) -> Result<String, HostError>;

    fn set_text_contents(&mut self, text: &str) -> Result<(), WriteRejected>;
}

/// The typed part of an item, one variant per translatable kind
pub enum SpecificItem<'a> {
    Pivot(&'a mut dyn PivotTable),
    Title(&'a mut dyn TitleItem),
    /// Headings and everything else carry no extra text beyond the description
    None,
}

/// An item in an output document
pub trait OutputItem {
    fn kind(&self) -> ItemKind;

    /// Structural subtype of a pivot table, empty for other kinds
    fn subtype(&self) -> String;

    fn description(&self) -> Result<String, HostError>;

    fn set_description(&mut self, text: &str) -> Result<(), WriteRejected>;

    fn is_selected(&self) -> bool;

    /// Depth in the document outline; 1 marks the start of a command's output
    fn tree_level(&self) -> usize;

    fn specific(&mut self) -> SpecificItem<'_>;
}

/// An output document: items oldest to newest
pub trait OutputDocument {
    fn item_count(&self) -> usize;

    fn item(&self, index: usize) -> Option<&dyn OutputItem>;

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn OutputItem>;
}

/// The host environment a run talks to
pub trait Host {
    /// Begin a client session; the host stops refreshing its own UI
    fn start_client(&mut self) -> Result<(), HostError>;

    /// End the client session
    fn stop_client(&mut self);

    /// The item just produced when running as a post-operation trigger
    fn script_context(&mut self) -> Option<&mut dyn OutputItem>;

    /// The document batch runs scan
    fn designated_document(&mut self) -> Result<&mut dyn OutputDocument, HostError>;

    /// Installation folder of the host, if known
    fn installation_path(&self) -> Option<PathBuf> {
        None
    }
}
