/*!
 * Common test utilities for the pivot-translate test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;


/// Global definitions, written with a byte-order mark like most editors do
pub const GLOBAL_DEFINITIONS: &str = "\u{feff}[GLOBALS]
Total=Tot.
Mean=Moyenne
Valid=
Notes=Remarques
Descriptive Statistics=Statistiques descriptives
Report Title=Titre du rapport
Statistics=Statistiques
Gender=Sexe

[GLOBALS-regexp]
^(\\d+) cases$=\\1 observations
";

/// Category file restricting translation to row labels
pub const DESCRIPTIVES_DEFINITIONS: &str = "[descriptives]
TSCOPE=ROWS
N=Effectif
Minimum=Min
";

/// Category file with a pattern section
pub const ANOVA_DEFINITIONS: &str = "[anova]
Sum of Squares=Somme des carrés
Layer=Strate

[anova-regexp]
^Model ([0-9]+)$=Modèle \\1
";

/// Routes library log output through the test harness (`RUST_LOG=debug`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a definitions folder holding the given files
pub fn create_definitions(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = create_temp_dir()?;
    for (name, content) in files {
        create_test_file(dir.path(), name, content)?;
    }
    Ok(dir)
}

/// Definitions folder with the global, descriptives and anova files
pub fn standard_definitions() -> Result<TempDir> {
    create_definitions(&[
        ("GLOBALTRANS.ini", GLOBAL_DEFINITIONS),
        ("descriptives.ini", DESCRIPTIVES_DEFINITIONS),
        ("anova.ini", ANOVA_DEFINITIONS),
    ])
}
