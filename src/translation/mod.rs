/*!
 * Label translation for report output.
 *
 * - `category`: category identifiers and subtype filters
 * - `patterns`: pattern rules used when no exact entry exists
 * - `cache`: per-section cache of compiled pattern rules
 * - `core`: the translator that walks an item's text leaves
 * - `scan`: the driver feeding document items to the translator
 */

// Re-export main types for easier usage
pub use self::category::{normalize_category, SubtypeFilter};
pub use self::core::{TranslationStats, Translator};
pub use self::patterns::{PatternResolver, PatternRule};
pub use self::scan::{DocumentScanner, RunMode, ScanOptions, ScanReport, StopReason};

// Submodules
pub mod cache;
pub mod category;
pub mod core;
pub mod patterns;
pub mod scan;
