//! Filter catalogue loading for the Rando CLI.

use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use rando_core::{FilterCategory, SearchFilters};

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
fn open_utf8_file(path: &Utf8Path) -> std::io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Loads a JSON array of [`FilterCategory`] values from disk.
pub(crate) fn load_catalogue(path: &Utf8Path) -> Result<Vec<FilterCategory>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCatalogue {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseCatalogue {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the catalogue at `path` into empty search filters.
pub(crate) fn load_filters(path: &Utf8Path) -> Result<SearchFilters, CliError> {
    let catalogue = load_catalogue(path)?;
    SearchFilters::from_catalogue(catalogue).map_err(|source| CliError::InvalidCatalogue {
        path: path.to_path_buf(),
        source,
    })
}
