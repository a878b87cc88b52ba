/*!
 * # pivot-translate - label translation for report output
 *
 * A Rust library for translating the labels of statistical report output
 * (pivot tables, titles, headings) from key/value definition files.
 *
 * ## Features
 *
 * - Layered lookup: table category section, then `GLOBALS`, then
 *   regular-expression rules
 * - Lazy, once-per-run loading of `GLOBALTRANS.ini`, `LOCALTRANS.ini` and
 *   per-category definition files
 * - Row/column scope per category (`TSCOPE`)
 * - Translation of label grids, titles, captions, footnotes, layer names
 *   and outline descriptions
 * - Automatic (post-operation) and batch document runs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and definitions folder lookup
 * - `definitions`: Definition file reader and the merged translation table
 * - `translation`: Pattern rules, item traversal and the document scan driver
 * - `host`: Traits for the report host plus an in-memory JSON document
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod definitions;
pub mod errors;
pub mod file_utils;
pub mod host;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, ProcessScope};
pub use definitions::{DefinitionStore, TranslationScope};
pub use errors::{AppError, DefinitionError, HostError, PatternError, WriteRejected};
pub use host::{Document, DocumentHost, DocumentItem, Host, OutputItem, PivotContent};
pub use translation::{DocumentScanner, ScanOptions, ScanReport, SubtypeFilter, Translator};
