//! Search command implementation for the Rando CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rando_core::{QueryBuilder, SearchFilters};
use rando_data::aggregate::{DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE};
use rando_data::{AggregatorConfig, ResultAggregator, SearchSession, TrekResults};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalogue::load_filters;
use crate::{
    ARG_API_BASE_URL, ARG_CATALOGUE, ARG_LANGUAGE, ARG_PAGE, ARG_PAGE_SIZE, ARG_SELECT,
    CliError, ENV_CATALOGUE, SourceBuilder, block_on, default_api_base_url, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search treks on a Geotrek API. Filter categories and their \
                 options come from a JSON catalogue; selections are given as \
                 category=value[,value...] and sent in the order given.",
    about = "Search treks matching filter selections"
)]
#[ortho_config(prefix = "RANDO")]
pub(crate) struct SearchArgs {
    /// Path to a JSON file listing the filter categories.
    #[arg(long = ARG_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Selection of the form `category=value[,value...]`; repeatable.
    #[arg(long = ARG_SELECT, value_name = "category=values")]
    #[serde(default)]
    pub(crate) select: Vec<String>,
    /// API root (e.g. "https://geotrek.example.org/api/v2/").
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Content language.
    #[arg(long = ARG_LANGUAGE, value_name = "code")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Results per page.
    #[arg(long = ARG_PAGE_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) page_size: Option<u32>,
    /// One-based page number.
    #[arg(long = ARG_PAGE, value_name = "number")]
    #[serde(default)]
    pub(crate) page: Option<u32>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// One `--select` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) category: String,
    pub(crate) values: Vec<String>,
}

impl Selection {
    /// Parses `category=value[,value...]`.
    pub(crate) fn parse(raw: &str) -> Result<Self, CliError> {
        let invalid = || CliError::InvalidSelection {
            raw: raw.to_owned(),
        };
        let (category, values) = raw.split_once('=').ok_or_else(invalid)?;
        let category = category.trim();
        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect();
        if category.is_empty() || values.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            category: category.to_owned(),
            values,
        })
    }

    fn apply(&self, filters: &mut SearchFilters) -> Result<(), CliError> {
        for value in &self.values {
            filters
                .select(&self.category, value)
                .map_err(CliError::Selection)?;
        }
        Ok(())
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    /// Path to the filter catalogue.
    pub(crate) catalogue: Utf8PathBuf,
    /// Selections in command-line order.
    pub(crate) selections: Vec<Selection>,
    /// API root.
    pub(crate) api_base_url: String,
    pub(crate) language: String,
    pub(crate) page_size: u32,
    pub(crate) page: Option<u32>,
}

impl SearchConfig {
    fn query_builder(&self) -> QueryBuilder {
        let builder = QueryBuilder::new(self.language.as_str(), self.page_size);
        match self.page {
            Some(page) => builder.with_page(page),
            None => builder,
        }
    }

    fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig::new(self.language.as_str()).with_page_size(self.page_size)
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let catalogue = args.catalogue.ok_or(CliError::MissingArgument {
            field: ARG_CATALOGUE,
            env: ENV_CATALOGUE,
        })?;
        let selections = args
            .select
            .iter()
            .map(|raw| Selection::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            catalogue,
            selections,
            api_base_url: args.api_base_url.unwrap_or_else(default_api_base_url),
            language: args
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
            page_size: args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            page: args.page,
        })
    }
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    filters: &'a SearchFilters,
    results: Option<&'a TrekResults>,
}

pub(crate) fn run_search(
    args: SearchArgs,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_search_config(&config, builder, writer)
}

pub(crate) fn run_search_config(
    config: &SearchConfig,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut filters = load_filters(&config.catalogue)?;
    for selection in &config.selections {
        selection.apply(&mut filters)?;
    }
    let mut session = SearchSession::new(filters, config.query_builder());
    let source = builder.build(&config.api_base_url)?;
    let aggregator = ResultAggregator::with_config(source, config.aggregator_config());
    block_on(session.refresh(&aggregator))??;
    write_json(
        writer,
        &SearchOutput {
            filters: session.filters(),
            results: session.current(),
        },
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
