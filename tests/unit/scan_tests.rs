/*!
 * Tests for the document scan driver
 */

use anyhow::Result;
use tempfile::TempDir;

use pivot_translate::app_config::ProcessScope;
use pivot_translate::host::{Document, DocumentHost, DocumentItem, Host, PivotContent};
use pivot_translate::translation::{
    DocumentScanner, RunMode, ScanOptions, StopReason, SubtypeFilter, Translator,
};
use crate::common;

fn scanner(dir: &TempDir, process: ProcessScope) -> DocumentScanner {
    DocumentScanner::new(ScanOptions {
        folder: Some(dir.path().to_path_buf()),
        process,
        ..ScanOptions::default()
    })
}

fn headings(levels: &[usize]) -> Document {
    Document::new(
        levels
            .iter()
            .map(|level| DocumentItem::heading("Statistics").at_level(*level))
            .collect(),
    )
}

fn descriptions(document: &Document) -> Vec<&str> {
    document.items.iter().map(|item| item.description.as_str()).collect()
}

#[test]
fn test_run_withPrecedingScope_shouldStopAtCommandBoundary() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[2, 2, 1, 3, 2]));

    let report = scanner(&dir, ProcessScope::Preceding).run(&mut host)?;

    assert_eq!(report.mode, RunMode::Batch);
    assert_eq!(report.stop, StopReason::BoundaryReached);
    assert_eq!(report.items_translated, 2);
    assert_eq!(report.items_examined, 3);
    assert_eq!(
        descriptions(host.document()),
        vec!["Statistics", "Statistics", "Statistics", "Statistiques", "Statistiques"]
    );
    Ok(())
}

#[test]
fn test_run_withAllScope_shouldTranslateEveryItem() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[1, 2, 1, 2]));

    let report = scanner(&dir, ProcessScope::All).run(&mut host)?;

    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(report.items_translated, 4);
    assert!(descriptions(host.document()).iter().all(|d| *d == "Statistiques"));
    Ok(())
}

#[test]
fn test_run_withTrailingLog_shouldNotExamineIt() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut document = headings(&[2, 2]);
    document.items.push(DocumentItem::log("Statistics").at_level(1));
    let mut host = DocumentHost::new(document);

    let report = scanner(&dir, ProcessScope::Preceding).run(&mut host)?;

    // a level-1 log at the end would otherwise end the scan immediately
    assert_eq!(report.items_examined, 2);
    assert_eq!(report.items_translated, 2);
    assert_eq!(report.stop, StopReason::Exhausted);
    Ok(())
}

#[test]
fn test_run_withSelectedOnly_shouldIgnoreProcessAndSubtypes() -> Result<()> {
    let dir = common::standard_definitions()?;
    let document = Document::new(vec![
        DocumentItem::pivot(
            "Statistics",
            PivotContent::new("ANOVA").with_row_labels(&[&["Total"]]),
        )
        .at_level(1)
        .selected(),
        DocumentItem::heading("Statistics").at_level(1),
        DocumentItem::pivot(
            "Statistics",
            PivotContent::new("Crosstabs").with_row_labels(&[&["Total"]]),
        ),
        DocumentItem::heading("Statistics").selected(),
    ]);
    let mut host = DocumentHost::new(document);
    let scanner = DocumentScanner::new(ScanOptions {
        folder: Some(dir.path().to_path_buf()),
        process: ProcessScope::Preceding,
        selected_only: true,
        subtypes: SubtypeFilter::new(["Crosstabs"]),
    });

    let report = scanner.run(&mut host)?;

    assert_eq!(report.items_examined, 4);
    assert_eq!(report.items_translated, 2);
    let items = &host.document().items;
    assert_eq!(items[0].as_pivot().unwrap().row_labels.get(0, 0), Some("Tot."));
    assert_eq!(items[1].description, "Statistics");
    assert_eq!(items[2].as_pivot().unwrap().row_labels.get(0, 0), Some("Total"));
    assert_eq!(items[3].description, "Statistiques");
    Ok(())
}

#[test]
fn test_run_withSubtypeFilter_shouldSkipOtherTablesOnly() -> Result<()> {
    let dir = common::standard_definitions()?;
    let document = Document::new(vec![
        DocumentItem::title("Title", "Report Title"),
        DocumentItem::pivot(
            "Statistics",
            PivotContent::new("Descriptives").with_row_labels(&[&["Mean"]]),
        ),
        DocumentItem::pivot(
            "Statistics",
            PivotContent::new("ANOVA").with_row_labels(&[&["Mean"]]),
        ),
    ]);
    let mut host = DocumentHost::new(document);
    let scanner = DocumentScanner::new(ScanOptions {
        folder: Some(dir.path().to_path_buf()),
        process: ProcessScope::All,
        selected_only: false,
        subtypes: SubtypeFilter::new(["'Descriptives'"]),
    });

    let report = scanner.run(&mut host)?;

    assert_eq!(report.items_examined, 3);
    assert_eq!(report.items_translated, 2);
    let items = &host.document().items;
    assert_eq!(items[0].title_text(), Some("Titre du rapport"));
    assert_eq!(items[1].as_pivot().unwrap().row_labels.get(0, 0), Some("Moyenne"));
    assert_eq!(items[2].as_pivot().unwrap().row_labels.get(0, 0), Some("Mean"));
    assert_eq!(items[2].description, "Statistics");
    Ok(())
}

#[test]
fn test_runTriggered_withoutContext_shouldReturnNone() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[2]));

    let report = scanner(&dir, ProcessScope::All).run_triggered(&mut host)?;

    assert!(report.is_none());
    assert_eq!(host.document().items[0].description, "Statistics");
    assert!(!host.session_active());
    assert_eq!(host.sessions_started(), 1);
    Ok(())
}

#[test]
fn test_runTriggered_withContext_shouldTranslateThatItemOnly() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[2, 2, 2])).with_script_context(1);

    let report = scanner(&dir, ProcessScope::All)
        .run_triggered(&mut host)?
        .expect("context item should be translated");

    assert_eq!(report.mode, RunMode::Triggered);
    assert_eq!(report.items_translated, 1);
    assert_eq!(
        descriptions(host.document()),
        vec!["Statistics", "Statistiques", "Statistics"]
    );
    assert!(!host.session_active());
    Ok(())
}

#[test]
fn test_run_withContext_shouldSkipBatchScan() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[2, 2])).with_script_context(0);

    let report = scanner(&dir, ProcessScope::All).run(&mut host)?;

    assert_eq!(report.mode, RunMode::Triggered);
    assert_eq!(report.items_examined, 1);
    assert_eq!(descriptions(host.document()), vec!["Statistiques", "Statistics"]);
    Ok(())
}

#[test]
fn test_run_withEmptyDocument_shouldReportNothing() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(Document::default());

    let report = scanner(&dir, ProcessScope::Preceding).run(&mut host)?;

    assert_eq!(report.items_examined, 0);
    assert_eq!(report.items_translated, 0);
    assert_eq!(report.stop, StopReason::Exhausted);
    Ok(())
}

#[test]
fn test_run_withOpenSession_shouldFailToStart() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut host = DocumentHost::new(headings(&[2]));
    host.start_client()?;

    let result = scanner(&dir, ProcessScope::All).run(&mut host);

    assert!(result.is_err());
    assert_eq!(host.document().items[0].description, "Statistics");
    Ok(())
}

#[test]
fn test_scanDocument_shouldAccumulateTranslatorStats() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut translator = Translator::new(dir.path());
    let mut document = headings(&[2, 2]);

    let report = scanner(&dir, ProcessScope::All).scan_document(&mut translator, &mut document);

    assert_eq!(report.stats.exact_hits, 2);
    assert_eq!(report.stats, *translator.stats());
    Ok(())
}
