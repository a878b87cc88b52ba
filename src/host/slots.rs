/*!
 * Text slots: one readable/writable text leaf of a report item.
 *
 * The traversal builds a slot per leaf (a grid cell, a footnote, a title...)
 * and hands it to the same lookup-and-write routine, so single values and
 * indexed values go through one code path.
 */

use super::{FootnoteArray, LabelArray, LayerDimension, OutputItem, PivotTable, TitleItem};
use crate::errors::{HostError, WriteRejected};

/// A single translatable text leaf
pub trait TextSlot {
    /// Short description for log messages
    fn describe(&self) -> String;

    /// Text used as the lookup key
    fn read(&self) -> Result<String, HostError>;

    /// Replace the leaf's text
    fn write(&mut self, text: &str) -> Result<(), WriteRejected>;
}

/// Which label grid a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Rows,
    Columns,
}

/// One cell of a row or column label grid
pub struct GridCell<'a> {
    pub grid: &'a mut dyn LabelArray,
    pub axis: GridAxis,
    pub row: usize,
    pub column: usize,
}

impl TextSlot for GridCell<'_> {
    fn describe(&self) -> String {
        let axis = match self.axis {
            GridAxis::Rows => "row label",
            GridAxis::Columns => "column label",
        };
        format!("{} ({}, {})", axis, self.row, self.column)
    }

    fn read(&self) -> Result<String, HostError> {
        self.grid.value_at(self.row, self.column)
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.grid.set_value_at(self.row, self.column, text)
    }
}

/// Title of a pivot table
pub struct TitleText<'a>(pub &'a mut dyn PivotTable);

impl TextSlot for TitleText<'_> {
    fn describe(&self) -> String {
        "table title".to_string()
    }

    fn read(&self) -> Result<String, HostError> {
        self.0.title_text()
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.0.set_title_text(text)
    }
}

/// Caption of a pivot table
pub struct CaptionText<'a>(pub &'a mut dyn PivotTable);

impl TextSlot for CaptionText<'_> {
    fn describe(&self) -> String {
        "table caption".to_string()
    }

    fn read(&self) -> Result<String, HostError> {
        self.0.caption_text()
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.0.set_caption_text(text)
    }
}

/// One footnote of a pivot table.
///
/// The lookup key is the footnote text with surrounding whitespace and line
/// breaks removed; a write replaces the whole footnote.
pub struct FootnoteText<'a> {
    pub notes: &'a mut dyn FootnoteArray,
    pub index: usize,
}

impl TextSlot for FootnoteText<'_> {
    fn describe(&self) -> String {
        format!("footnote {}", self.index)
    }

    fn read(&self) -> Result<String, HostError> {
        self.notes.value_at(self.index).map(|text| text.trim().to_string())
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.notes.set_value_at(self.index, text)
    }
}

/// Name of a layer dimension
pub struct LayerName<'a> {
    pub layer: &'a mut dyn LayerDimension,
    pub index: usize,
}

impl TextSlot for LayerName<'_> {
    fn describe(&self) -> String {
        format!("layer dimension {}", self.index)
    }

    fn read(&self) -> Result<String, HostError> {
        self.layer.dimension_name()
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.layer.set_dimension_name(text)
    }
}

/// Outline description of any item
pub struct DescriptionText<'a>(pub &'a mut dyn OutputItem);

impl TextSlot for DescriptionText<'_> {
    fn describe(&self) -> String {
        "description".to_string()
    }

    fn read(&self) -> Result<String, HostError> {
        self.0.description()
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.0.set_description(text)
    }
}

/// Text of a title item
pub struct TitleContents<'a>(pub &'a mut dyn TitleItem);

impl TextSlot for TitleContents<'_> {
    fn describe(&self) -> String {
        "title contents".to_string()
    }

    fn read(&self) -> Result<String, HostError> {
        self.0.text_contents()
    }

    fn write(&mut self, text: &str) -> Result<(), WriteRejected> {
        self.0.set_text_contents(text)
    }
}
