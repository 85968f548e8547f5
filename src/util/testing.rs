//! Test support shared by unit and integration tests: one-time tracing setup
//! and an in-memory [`FileSystem`].

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::FileSystem;

static TEST_SETUP: Once = Once::new();

/// Install a global subscriber once per test binary.
///
/// Honors `RUST_LOG`; otherwise logs everything from this crate at trace level.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coursecat=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// In-memory filesystem double.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileSystem {
    /// A filesystem holding a single file.
    pub fn with_file(path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        let fs = Self::default();
        fs.insert(path, content);
        fs
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        self.files()
            .insert(path.as_ref().to_path_buf(), content.as_ref().to_vec());
    }

    /// Contents of `path` as text, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn files(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.insert(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
