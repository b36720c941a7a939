//! Command-line interface for querying a Geotrek API through the Rando engine.
#![forbid(unsafe_code)]

use std::future::Future;
use std::io::Write;

use clap::{Parser, Subcommand};
use rando_data::{HttpTrekSource, HttpTrekSourceConfig, TrekSource};
use serde::Serialize;

mod catalogue;
mod details;
mod error;
mod search;

pub use error::CliError;

use details::{DetailsArgs, run_details};
use search::{SearchArgs, run_search};

const ARG_CATALOGUE: &str = "catalogue";
const ARG_SELECT: &str = "select";
const ARG_API_BASE_URL: &str = "api-base-url";
const ARG_LANGUAGE: &str = "language";
const ARG_PAGE_SIZE: &str = "page-size";
const ARG_PAGE: &str = "page";
const ARG_TREK_ID: &str = "trek-id";
const ARG_VIEW: &str = "view";
const ENV_CATALOGUE: &str = "RANDO_CMDS_SEARCH_CATALOGUE";
const ENV_TREK_ID: &str = "RANDO_CMDS_DETAILS_TREK_ID";

/// Run the Rando CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let builder = HttpSourceBuilder;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Search(args) => run_search(args, &builder, &mut stdout),
        Command::Details(args) => run_details(args, &builder, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rando",
    about = "Search treks and inspect trek details on a Geotrek API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search treks matching filter selections.
    Search(SearchArgs),
    /// Show the detail page, popup or path of one trek.
    Details(DetailsArgs),
}

/// Builds the trek source for the current invocation.
pub(crate) trait SourceBuilder {
    fn build(&self, base_url: &str) -> Result<Box<dyn TrekSource>, CliError>;
}

/// Builds an [`HttpTrekSource`] for the configured API root.
pub(crate) struct HttpSourceBuilder;

impl SourceBuilder for HttpSourceBuilder {
    fn build(&self, base_url: &str) -> Result<Box<dyn TrekSource>, CliError> {
        let source = HttpTrekSource::with_config(HttpTrekSourceConfig::new(base_url)).map_err(
            |source| CliError::BuildSource {
                base_url: base_url.to_owned(),
                source,
            },
        )?;
        Ok(Box::new(source))
    }
}

/// Default API root when none is configured.
fn default_api_base_url() -> String {
    HttpTrekSourceConfig::default().base_url
}

/// Drive `future` on a current-thread runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
