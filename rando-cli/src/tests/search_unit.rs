//! Focused unit tests covering search CLI configuration and selections.

use super::helpers::{StubSourceBuilder, Workspace, stdout_json, write_utf8};
use super::*;
use crate::search::{
    SearchArgs, SearchConfig, Selection, config_from_layers_for_test, run_search_config,
};
use rando_data::aggregate::{DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE};
use rstest::rstest;

#[rstest]
fn converting_search_without_catalogue_errors() {
    let err = SearchConfig::try_from(SearchArgs::default()).expect_err("missing catalogue");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CATALOGUE);
            assert_eq!(env, ENV_CATALOGUE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn search_config_applies_defaults() {
    let args = SearchArgs {
        catalogue: Some("catalogue.json".into()),
        ..SearchArgs::default()
    };

    let config = SearchConfig::try_from(args).expect("config should build");
    assert_eq!(config.language, DEFAULT_LANGUAGE);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.api_base_url, "http://localhost:8000/api/v2/");
    assert!(config.selections.is_empty());
    assert!(config.page.is_none());
}

#[rstest]
#[case("themes=7,4", "themes", &["7", "4"])]
#[case(" difficulty = 2 ", "difficulty", &["2"])]
#[case("themes=7,,4,", "themes", &["7", "4"])]
fn selections_parse(#[case] raw: &str, #[case] category: &str, #[case] values: &[&str]) {
    let selection = Selection::parse(raw).expect("valid selection");
    assert_eq!(selection.category, category);
    assert_eq!(selection.values, values);
}

#[rstest]
#[case("themes")]
#[case("=7")]
#[case("themes=")]
#[case("themes= , ")]
fn malformed_selections_are_rejected(#[case] raw: &str) {
    let err = Selection::parse(raw).expect_err("malformed selection");
    match err {
        CliError::InvalidSelection { raw: reported } => assert_eq!(reported, raw),
        other => panic!("expected InvalidSelection, found {other:?}"),
    }
}

#[rstest]
fn unreadable_catalogue_reports_open_error() {
    let workspace = Workspace::new();
    let config = SearchConfig {
        catalogue: workspace.catalogue_path(),
        selections: Vec::new(),
        api_base_url: "http://stub.test/".to_owned(),
        language: "fr".to_owned(),
        page_size: 5,
        page: None,
    };
    let mut stdout = Vec::new();

    let err = run_search_config(&config, &StubSourceBuilder::default(), &mut stdout)
        .expect_err("missing catalogue file");
    match err {
        CliError::OpenCatalogue { path, .. } => assert_eq!(path, workspace.catalogue_path()),
        other => panic!("expected OpenCatalogue, found {other:?}"),
    }
}

#[rstest]
fn duplicate_categories_are_rejected() {
    let workspace = Workspace::new();
    let path = workspace.catalogue_path();
    write_utf8(
        &path,
        br#"[{"id": "themes", "label": "Themes", "options": []},
             {"id": "themes", "label": "Themes", "options": []}]"#,
    );
    let config = SearchConfig {
        catalogue: path,
        selections: Vec::new(),
        api_base_url: "http://stub.test/".to_owned(),
        language: "fr".to_owned(),
        page_size: 5,
        page: None,
    };
    let mut stdout = Vec::new();

    let err = run_search_config(&config, &StubSourceBuilder::default(), &mut stdout)
        .expect_err("duplicate category");
    assert!(matches!(err, CliError::InvalidCatalogue { .. }));
}

#[rstest]
fn search_output_includes_filters_and_results() {
    let workspace = Workspace::new();
    let config = SearchConfig {
        catalogue: workspace.write_sample_catalogue(),
        selections: vec![Selection::parse("themes=7").expect("valid selection")],
        api_base_url: "http://stub.test/".to_owned(),
        language: "fr".to_owned(),
        page_size: 5,
        page: Some(2),
    };
    let mut stdout = Vec::new();

    run_search_config(&config, &StubSourceBuilder::default(), &mut stdout)
        .expect("search should succeed");

    let output = stdout_json(&stdout);
    assert_eq!(output["results"]["count"], 12);
    assert_eq!(
        output["results"]["results"].as_array().map(Vec::len),
        Some(2)
    );
    let themes = output["filters"]
        .as_array()
        .and_then(|states| states.iter().find(|state| state["category_id"] == "themes"))
        .expect("themes state");
    assert_eq!(themes["selected_options"][0]["value"], "7");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "page_size": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "catalogue": "from-file.json",
            "language": "it",
            "api_base_url": "https://from-file.test/api/v2/",
        }),
        None,
    );
    composer.push_environment(json!({
        "catalogue": "from-env.json",
        "language": "de",
    }));
    composer.push_cli(json!({ "language": "en" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.catalogue, "from-env.json");
    assert_eq!(config.language, "en");
    assert_eq!(config.api_base_url, "https://from-file.test/api/v2/");
}
