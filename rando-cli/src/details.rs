//! Details command implementation for the Rando CLI.

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rando_data::aggregate::DEFAULT_LANGUAGE;
use rando_data::{AggregatorConfig, ResultAggregator};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::{
    ARG_API_BASE_URL, ARG_LANGUAGE, ARG_TREK_ID, ARG_VIEW, CliError, ENV_TREK_ID, SourceBuilder,
    block_on, default_api_base_url, write_json,
};

/// CLI arguments for the `details` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch one trek with every collection it references and \
                 print the normalized detail page. The popup and geometry \
                 views fetch only the map summary or the path.",
    about = "Show one trek"
)]
#[ortho_config(prefix = "RANDO")]
pub(crate) struct DetailsArgs {
    /// Id of the trek to show.
    #[arg(value_name = ARG_TREK_ID)]
    #[serde(default)]
    pub(crate) trek_id: Option<u32>,
    /// API root (e.g. "https://geotrek.example.org/api/v2/").
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Content language.
    #[arg(long = ARG_LANGUAGE, value_name = "code")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// What to show: `details` (default), `popup` or `geometry`.
    #[arg(long = ARG_VIEW, value_name = "view")]
    #[serde(default)]
    pub(crate) view: Option<String>,
}

impl DetailsArgs {
    pub(crate) fn into_config(self) -> Result<DetailsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DetailsConfig::try_from(merged)
    }
}

/// Part of a trek to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DetailsView {
    #[default]
    Details,
    Popup,
    Geometry,
}

impl FromStr for DetailsView {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "details" => Ok(Self::Details),
            "popup" => Ok(Self::Popup),
            "geometry" => Ok(Self::Geometry),
            _ => Err(CliError::InvalidView {
                raw: raw.to_owned(),
            }),
        }
    }
}

/// Resolved `details` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailsConfig {
    pub(crate) trek_id: u32,
    pub(crate) api_base_url: String,
    pub(crate) language: String,
    pub(crate) view: DetailsView,
}

impl TryFrom<DetailsArgs> for DetailsConfig {
    type Error = CliError;

    fn try_from(args: DetailsArgs) -> Result<Self, Self::Error> {
        let trek_id = args.trek_id.ok_or(CliError::MissingArgument {
            field: ARG_TREK_ID,
            env: ENV_TREK_ID,
        })?;
        let view = args
            .view
            .as_deref()
            .map(DetailsView::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            trek_id,
            api_base_url: args.api_base_url.unwrap_or_else(default_api_base_url),
            language: args
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
            view,
        })
    }
}

pub(crate) fn run_details(
    args: DetailsArgs,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_details_config(&config, builder, writer)
}

pub(crate) fn run_details_config(
    config: &DetailsConfig,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let source = builder.build(&config.api_base_url)?;
    let aggregator =
        ResultAggregator::with_config(source, AggregatorConfig::new(config.language.as_str()));
    match config.view {
        DetailsView::Details => {
            let details = block_on(aggregator.get_details(config.trek_id))??;
            write_json(writer, &details)
        }
        DetailsView::Popup => {
            let popup = block_on(aggregator.get_trek_popup(config.trek_id))??;
            write_json(writer, &popup)
        }
        DetailsView::Geometry => {
            let path = block_on(aggregator.get_trek_geometry(config.trek_id))??;
            write_json(writer, &path)
        }
    }
}
