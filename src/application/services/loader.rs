//! Catalog loading service
//!
//! Reads a comma-delimited course file and feeds each record to a catalog.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Catalog, Course};
use crate::infrastructure::traits::FileSystem;

/// Outcome of loading one file into a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that created a new catalog entry
    pub inserted: usize,
    /// Records whose number was already in the catalog
    pub duplicates: usize,
    /// Lines that did not yield a record (blank, too few fields, empty number)
    pub skipped: usize,
}

impl LoadReport {
    /// Lines that parsed into a course, whether inserted or not.
    pub fn total_records(&self) -> usize {
        self.inserted + self.duplicates
    }
}

/// Service for populating a catalog from a course file.
pub struct CatalogLoader {
    fs: Arc<dyn FileSystem>,
}

impl CatalogLoader {
    /// Create a new loader.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load every record of `path` into `catalog`.
    ///
    /// Courses already in the catalog keep their existing record. Malformed
    /// lines are skipped and only logged. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than rejecting the file. If the file cannot
    /// be read the catalog is left untouched.
    #[instrument(level = "debug", skip(self, catalog))]
    pub fn load(&self, path: &Path, catalog: &mut Catalog) -> ApplicationResult<LoadReport> {
        let bytes = self
            .fs
            .read(path)
            .map_err(|source| ApplicationError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8, invalid bytes replaced", path.display());
        }

        let mut report = LoadReport::default();
        for (line_no, line) in content.lines().enumerate() {
            match Course::from_line(line) {
                Ok(course) => {
                    if catalog.insert(course) {
                        report.inserted += 1;
                    } else {
                        debug!("line {}: duplicate course number ignored", line_no + 1);
                        report.duplicates += 1;
                    }
                }
                Err(reason) => {
                    debug!("line {}: skipped ({})", line_no + 1, reason);
                    report.skipped += 1;
                }
            }
        }

        info!(
            "loaded {}: {} inserted, {} duplicates, {} skipped",
            path.display(),
            report.inserted,
            report.duplicates,
            report.skipped
        );
        Ok(report)
    }

    /// Load `path` into a fresh catalog.
    pub fn load_new(&self, path: &Path) -> ApplicationResult<Catalog> {
        let mut catalog = Catalog::new();
        self.load(path, &mut catalog)?;
        Ok(catalog)
    }
}
