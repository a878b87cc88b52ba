/*!
 * Tests for definition loading and lookup
 */

use anyhow::Result;

use pivot_translate::definitions::{DefinitionStore, SourceName, TranslationScope};
use crate::common;

#[test]
fn test_ensureLoaded_withEmptyCategory_shouldLoadGlobalOnly() -> Result<()> {
    let dir = common::create_definitions(&[
        ("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS),
        ("LOCALTRANS.ini", "[descriptives]\nMean=Moy.\n"),
    ])?;
    let mut store = DefinitionStore::new(dir.path());

    store.ensure_loaded("");

    assert!(store.is_loaded(&SourceName::Global));
    assert!(!store.is_loaded(&SourceName::Local));
    assert_eq!(store.lookup("", "Total"), Some("Tot."));
    Ok(())
}

#[test]
fn test_ensureLoaded_withMissingFolder_shouldLoadNothing() {
    let mut store = DefinitionStore::new("/definitely/not/a/definitions/folder");
    store.ensure_loaded("descriptives");

    assert!(!store.has_loaded_any());
    assert_eq!(store.lookup("descriptives", "Total"), None);
}

#[test]
fn test_lookup_withCategoryEntry_shouldPreferCategory() -> Result<()> {
    let dir = common::create_definitions(&[
        ("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS),
        ("crosstabs.ini", "[crosstabs]\nTotal=Total général\n"),
    ])?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("crosstabs");

    assert_eq!(store.lookup("crosstabs", "Total"), Some("Total général"));
    assert_eq!(store.lookup("othertable", "Total"), Some("Tot."));
    Ok(())
}

#[test]
fn test_lookup_withGlobalOnlyEntry_shouldFallBack() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("descriptives");

    assert_eq!(store.lookup("descriptives", "N"), Some("Effectif"));
    assert_eq!(store.lookup("descriptives", "Mean"), Some("Moyenne"));
    assert_eq!(store.lookup("descriptives", "Median"), None);
    Ok(())
}

#[test]
fn test_lookup_shouldBeCaseSensitive() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("");

    assert_eq!(store.lookup("", "Total"), Some("Tot."));
    assert_eq!(store.lookup("", "total"), None);
    assert_eq!(store.lookup("", "Total "), None);
    Ok(())
}

#[test]
fn test_ensureLoaded_twice_shouldNotReread() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut store = DefinitionStore::new(dir.path());

    store.ensure_loaded("anova");
    let entries = store.entry_count();
    let sections = store.section_count();

    // a changed file on disk must not leak into the same run
    common::create_test_file(dir.path(), "anova.ini", "[anova]\nSum of Squares=Changed\nExtra=More\n")?;
    store.ensure_loaded("anova");

    assert_eq!(store.entry_count(), entries);
    assert_eq!(store.section_count(), sections);
    assert_eq!(store.lookup("anova", "Sum of Squares"), Some("Somme des carrés"));
    Ok(())
}

#[test]
fn test_merge_withLocalAndCategoryFiles_shouldLetCategoryFileWin() -> Result<()> {
    let dir = common::create_definitions(&[
        ("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS),
        ("LOCALTRANS.ini", "[descriptives]\nMean=Moy. locale\nStd. Deviation=Écart type\n"),
        ("descriptives.ini", "[Descriptives]\nMean=Moyenne catégorie\n"),
    ])?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("descriptives");

    assert!(store.is_loaded(&SourceName::Local));
    assert!(store.is_loaded(&SourceName::Category("descriptives".to_string())));
    assert_eq!(store.lookup("descriptives", "Mean"), Some("Moyenne catégorie"));
    assert_eq!(store.lookup("descriptives", "Std. Deviation"), Some("Écart type"));
    Ok(())
}

#[test]
fn test_malformedSource_shouldBeIgnoredWhole() -> Result<()> {
    let dir = common::create_definitions(&[
        ("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS),
        ("LOCALTRANS.ini", "Orphan=Entry\n[descriptives]\nMean=Never\n"),
    ])?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("descriptives");

    assert!(store.has_loaded_any());
    assert!(!store.is_loaded(&SourceName::Local));
    assert_eq!(store.lookup("descriptives", "Mean"), Some("Moyenne"));
    Ok(())
}

#[test]
fn test_nonUtf8Source_shouldBeIgnored() -> Result<()> {
    let dir = common::create_definitions(&[("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS)])?;
    std::fs::write(dir.path().join("latin.ini"), b"[latin]\nCaf\xe9=Coffee\n")?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("latin");

    assert!(store.is_loaded(&SourceName::Global));
    assert!(!store.is_loaded(&SourceName::Category("latin".to_string())));
    Ok(())
}

#[test]
fn test_globalSourceWithBom_shouldParseFirstSection() -> Result<()> {
    let dir = common::standard_definitions()?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("");

    assert!(store.section("GLOBALS").is_some());
    assert_eq!(store.lookup("", "Valid"), Some(""));
    Ok(())
}

#[test]
fn test_scope_shouldReadTscopeWithAllAsDefault() -> Result<()> {
    let dir = common::create_definitions(&[
        ("GLOBALTRANS.ini", common::GLOBAL_DEFINITIONS),
        (
            "LOCALTRANS.ini",
            "[rowsonly]\nTSCOPE=ROWS\n[colsonly]\nTSCOPE= Columns \n[weird]\nTSCOPE=sideways\n[plain]\nA=B\n",
        ),
    ])?;
    let mut store = DefinitionStore::new(dir.path());
    store.ensure_loaded("rowsonly");

    assert_eq!(store.scope("rowsonly"), TranslationScope::Rows);
    assert_eq!(store.scope("colsonly"), TranslationScope::Columns);
    assert_eq!(store.scope("weird"), TranslationScope::All);
    assert_eq!(store.scope("plain"), TranslationScope::All);
    assert_eq!(store.scope("unknown"), TranslationScope::All);
    Ok(())
}

#[test]
fn test_sourceName_fileNames() {
    assert_eq!(SourceName::Global.file_name(), "GLOBALTRANS.ini");
    assert_eq!(SourceName::Local.file_name(), "LOCALTRANS.ini");
    assert_eq!(SourceName::Category("anova".to_string()).file_name(), "anova.ini");
}
