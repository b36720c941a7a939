//! Error types emitted by the Rando CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rando_core::FilterError;
use rando_data::{AggregateError, SourceBuildError};
use thiserror::Error;

/// Errors emitted by the Rando CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A `--select` value is not of the form `category=value[,value...]`.
    #[error("invalid selection {raw:?}: expected category=value[,value...]")]
    InvalidSelection { raw: String },
    /// A `--view` value names no known view.
    #[error("unknown view {raw:?}: expected one of details, popup, geometry")]
    InvalidView { raw: String },
    /// Opening the filter catalogue failed.
    #[error("failed to open filter catalogue at {path:?}: {source}")]
    OpenCatalogue {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The filter catalogue is not valid JSON.
    #[error("failed to parse filter catalogue JSON at {path:?}: {source}")]
    ParseCatalogue {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The filter catalogue contains duplicate categories or options.
    #[error("filter catalogue in {path:?} is invalid: {source}")]
    InvalidCatalogue {
        path: Utf8PathBuf,
        #[source]
        source: FilterError,
    },
    /// A selection names an unknown category or option.
    #[error("invalid selection: {0}")]
    Selection(#[source] FilterError),
    /// Constructing the HTTP trek source failed.
    #[error("failed to build trek source for {base_url:?}: {source}")]
    BuildSource {
        base_url: String,
        #[source]
        source: SourceBuildError,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Aggregating results failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    /// Serializing the command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
