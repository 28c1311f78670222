//! Fixture discovery.
//!
//! Inputs live in four category directories under the input root. The category
//! decides whether the tool is expected to write a rewritten artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tooltest::{HarnessError, HarnessResult};

/// Fixture category, named after its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureCategory {
    /// Valid input with nothing to rewrite.
    GoodNoFix,
    /// Valid input the tool can rewrite.
    GoodCanFix,
    /// Problematic input the tool can rewrite.
    BadWithFix,
    /// Problematic input the tool cannot rewrite.
    BadWithoutFix,
}

impl FixtureCategory {
    /// All categories in suite order.
    pub const ALL: [FixtureCategory; 4] = [
        FixtureCategory::GoodNoFix,
        FixtureCategory::GoodCanFix,
        FixtureCategory::BadWithFix,
        FixtureCategory::BadWithoutFix,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            FixtureCategory::GoodNoFix => "good_no_fix",
            FixtureCategory::GoodCanFix => "good_can_fix",
            FixtureCategory::BadWithFix => "bad_with_fix",
            FixtureCategory::BadWithoutFix => "bad_without_fix",
        }
    }

    /// Whether inputs in this category must produce an artifact.
    pub fn expects_artifact(self) -> bool {
        matches!(self, FixtureCategory::GoodCanFix | FixtureCategory::BadWithFix)
    }
}

/// One discovered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub category: FixtureCategory,
    pub path: PathBuf,
}

/// Files directly inside `dir` with the given extension, sorted by path.
///
/// A missing directory yields no files.
pub fn list_files(dir: &Path, extension: &str) -> HarnessResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "fixture directory missing");
            return Ok(Vec::new());
        }
        Err(e) => return Err(HarnessError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| HarnessError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Collect fixtures from every category directory under `root`, in suite order.
pub fn discover(root: &Path, extension: &str) -> HarnessResult<Vec<Fixture>> {
    let mut fixtures = Vec::new();
    for category in FixtureCategory::ALL {
        let files = list_files(&root.join(category.dir_name()), extension)?;
        tracing::debug!(category = category.dir_name(), count = files.len(), "discovered fixtures");
        fixtures.extend(files.into_iter().map(|path| Fixture { category, path }));
    }
    Ok(fixtures)
}
