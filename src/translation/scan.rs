/*!
 * Document scan driver.
 *
 * Two entry points: `run_triggered` for the automatic pass after a host
 * operation (only the item just produced, and nothing at all when there is
 * no such item), and `run` for the command, which falls back to a batch
 * scan of the designated document, newest item first.
 */

use std::path::PathBuf;

use log::{debug, info};

use super::category::{normalize_category, SubtypeFilter};
use super::core::{TranslationStats, Translator};
use crate::app_config::{definitions_folder_from_env, ProcessScope, ScanConfig};
use crate::errors::HostError;
use crate::host::{ClientSession, Host, ItemKind, OutputDocument};

/// Options of one scan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Definitions folder; resolved from the environment when `None`
    pub folder: Option<PathBuf>,

    /// Preceding command only, or the whole document
    pub process: ProcessScope,

    /// Only selected items, ignoring `process` and `subtypes`
    pub selected_only: bool,

    /// Table categories to translate
    pub subtypes: SubtypeFilter,
}

impl ScanOptions {
    /// Options taken from configuration
    pub fn from_config(config: &ScanConfig, folder: Option<PathBuf>) -> Self {
        Self {
            folder,
            process: config.process,
            selected_only: config.selected_only,
            subtypes: config.subtype_filter(),
        }
    }
}

/// How a run was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Only the host's context item was translated
    Triggered,
    /// Items of the designated document were scanned
    Batch,
}

/// Why a batch scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every candidate item was examined
    Exhausted,
    /// Reached the start of the preceding command's output
    BoundaryReached,
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub mode: RunMode,

    /// Items looked at, including skipped ones
    pub items_examined: usize,

    /// Items handed to the translator and actually translated
    pub items_translated: usize,

    pub stop: StopReason,

    pub stats: TranslationStats,
}

impl ScanReport {
    fn new(mode: RunMode) -> Self {
        Self {
            mode,
            items_examined: 0,
            items_translated: 0,
            stop: StopReason::Exhausted,
            stats: TranslationStats::default(),
        }
    }
}

/// Drives a translator over a host's output
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    options: ScanOptions,
}

impl DocumentScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    fn translator_for<H: Host + ?Sized>(&self, host: &H) -> Translator {
        let install = host.installation_path();
        let folder = definitions_folder_from_env(self.options.folder.as_deref(), install.as_deref());
        debug!("Reading definitions from {:?}", folder);
        Translator::new(folder)
    }

    /// Automatic pass after a host operation.
    ///
    /// Returns `Ok(None)` when the host has no context item, i.e. the call
    /// did not come from a triggering operation.
    pub fn run_triggered<H: Host + ?Sized>(&self, host: &mut H) -> Result<Option<ScanReport>, HostError> {
        let mut session = ClientSession::begin(host)?;
        let mut translator = self.translator_for(&*session);

        let Some(item) = session.script_context() else {
            debug!("No script context; nothing to translate");
            return Ok(None);
        };

        let mut report = ScanReport::new(RunMode::Triggered);
        report.items_examined = 1;
        if translator.translate_item(item) {
            report.items_translated = 1;
        }
        report.stats = *translator.stats();
        Ok(Some(report))
    }

    /// Command entry: the context item if there is one, otherwise a batch scan
    pub fn run<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport, HostError> {
        let mut session = ClientSession::begin(host)?;
        let mut translator = self.translator_for(&*session);

        let mut report = if let Some(item) = session.script_context() {
            let mut report = ScanReport::new(RunMode::Triggered);
            report.items_examined = 1;
            if translator.translate_item(item) {
                report.items_translated = 1;
            }
            report
        } else {
            let document = session.designated_document()?;
            self.scan_document(&mut translator, document)
        };

        report.stats = *translator.stats();
        info!("Translation finished: {}", report.stats.summary());
        Ok(report)
    }

    /// Batch scan over `document`, newest item first
    pub fn scan_document(&self, translator: &mut Translator, document: &mut dyn OutputDocument) -> ScanReport {
        let mut report = ScanReport::new(RunMode::Batch);

        let mut count = document.item_count();
        let last_is_log = count > 0
            && document
                .item(count - 1)
                .is_some_and(|item| item.kind() == ItemKind::Log);
        if last_is_log {
            count -= 1;
        }

        for index in (0..count).rev() {
            let Some(item) = document.item_mut(index) else {
                continue;
            };
            report.items_examined += 1;

            if self.options.selected_only {
                if !item.is_selected() {
                    continue;
                }
            } else {
                if self.options.process == ProcessScope::Preceding && item.tree_level() <= 1 {
                    debug!("Reached command boundary at item {}", index);
                    report.stop = StopReason::BoundaryReached;
                    break;
                }
                if item.kind() == ItemKind::PivotTable
                    && !self.options.subtypes.matches(&normalize_category(&item.subtype()))
                {
                    continue;
                }
            }

            if translator.translate_item(item) {
                report.items_translated += 1;
            }
        }

        report.stats = *translator.stats();
        report
    }
}
