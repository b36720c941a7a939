//! Test helpers for CLI workspaces, catalogues and stub sources.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use rando_core::test_support::sample_catalogue;
use rando_data::Resource;
use rando_data::test_support::StubTrekSource;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Writes `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents)
        .unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// A temporary directory holding a filter catalogue.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn catalogue_path(&self) -> Utf8PathBuf {
        self.root.join("catalogue.json")
    }

    /// Writes the sample catalogue and returns its path.
    pub(super) fn write_sample_catalogue(&self) -> Utf8PathBuf {
        let path = self.catalogue_path();
        let payload =
            serde_json::to_string_pretty(&sample_catalogue()).expect("serialize catalogue");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

/// Builds stub sources answering with sample payloads plus overrides.
#[derive(Debug, Default)]
pub(super) struct StubSourceBuilder {
    pub(super) payloads: Vec<(Resource, Value)>,
    pub(super) failing: Vec<Resource>,
}

impl SourceBuilder for StubSourceBuilder {
    fn build(&self, _base_url: &str) -> Result<Box<dyn TrekSource>, CliError> {
        let mut source = StubTrekSource::with_samples();
        for (resource, payload) in &self.payloads {
            source = source.with_payload(*resource, payload.clone());
        }
        for resource in &self.failing {
            source = source.failing(*resource);
        }
        Ok(Box::new(source))
    }
}

/// Parses stdout captured from a command as JSON.
pub(super) fn stdout_json(stdout: &[u8]) -> Value {
    let text = std::str::from_utf8(stdout).expect("stdout utf-8");
    serde_json::from_str(text).expect("output should be JSON")
}
