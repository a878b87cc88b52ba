/*!
 * Tests for file helpers
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use pivot_translate::errors::DefinitionError;
use pivot_translate::file_utils::FileManager;
use crate::common;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    count: usize,
}

#[test]
fn test_readDefinitionSource_withBom_shouldStripIt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "GLOBALTRANS.ini", "\u{feff}[GLOBALS]\n")?;

    let text = FileManager::read_definition_source(&path)?;

    assert_eq!(text, "[GLOBALS]\n");
    Ok(())
}

#[test]
fn test_readDefinitionSource_withInvalidUtf8_shouldReturnDecodeError() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("latin1.ini");
    fs::write(&path, b"[GLOBALS]\nMoyenne=Mittelwert \xe9\n")?;

    let result = FileManager::read_definition_source(&path);

    assert!(matches!(result, Err(DefinitionError::Decode(p)) if p == path));
    Ok(())
}

#[test]
fn test_readDefinitionSource_withMissingFile_shouldReturnIoError() -> Result<()> {
    let dir = common::create_temp_dir()?;

    let result = FileManager::read_definition_source(dir.path().join("missing.ini"));

    assert!(matches!(result, Err(DefinitionError::Io { .. })));
    Ok(())
}

#[test]
fn test_trimFolder_shouldStripTrailingSeparators() {
    assert_eq!(FileManager::trim_folder("/defs/"), PathBuf::from("/defs"));
    assert_eq!(FileManager::trim_folder("C:\\defs\\\\"), PathBuf::from("C:\\defs"));
    assert_eq!(FileManager::trim_folder("defs"), PathBuf::from("defs"));
    assert_eq!(FileManager::trim_folder("/"), PathBuf::from("/"));
}

#[test]
fn test_writeJson_shouldCreateParentAndRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("nested").join("sample.json");
    let sample = Sample {
        name: "descriptives".to_string(),
        count: 3,
    };

    FileManager::write_json(&path, &sample)?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(dir.path().join("nested")));
    let loaded: Sample = FileManager::read_json(&path)?;
    assert_eq!(loaded, sample);
    Ok(())
}

#[test]
fn test_readJson_withMalformedContent_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "broken.json", "{ \"name\": ")?;

    let result: Result<Sample> = FileManager::read_json(&path);

    assert!(result.is_err());
    Ok(())
}
