//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Ordered log shared between listeners.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// A listener that appends `name` on every call.
    pub fn listener(&self, name: &str) -> impl Fn() + Send + Sync + 'static {
        let journal = self.clone();
        let name = name.to_string();
        move || journal.record(name.clone())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == name).count()
    }
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    let mut file = std::fs::File::create(&config_path).expect("Failed to create config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config file");
    (temp_dir, config_path)
}
