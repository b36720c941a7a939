//! Behaviour-driven step definitions driving the search CLI scenarios.

use super::helpers::{StubSourceBuilder, Workspace, stdout_json};
use super::*;
use rando_core::FilterError;
use rando_data::{AggregateError, Resource};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct SearchWorld {
    workspace: Workspace,
    include_catalogue: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    builder: RefCell<StubSourceBuilder>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SearchWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            include_catalogue: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            builder: RefCell::new(StubSourceBuilder::default()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["rando".to_owned(), "search".to_owned()];
        if *self.include_catalogue.borrow() {
            argv.extend([
                format!("--{ARG_CATALOGUE}"),
                self.workspace.catalogue_path().into_string(),
            ]);
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> SearchWorld {
    SearchWorld::new()
}

#[given("a filter catalogue exists on disk")]
fn catalogue_exists(#[from(world)] world: &SearchWorld) {
    let path = world.workspace.write_sample_catalogue();
    assert!(path.as_std_path().is_file());
}

#[given("I select \"{raw}\"")]
fn select(#[from(world)] world: &SearchWorld, raw: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_SELECT}"), raw]);
}

#[given("I omit the filter catalogue")]
fn omit_catalogue(#[from(world)] world: &SearchWorld) {
    *world.include_catalogue.borrow_mut() = false;
}

#[given("the upstream trek list fails")]
fn trek_list_fails(#[from(world)] world: &SearchWorld) {
    world.builder.borrow_mut().failing.push(Resource::Treks);
}

#[when("I run the search command")]
fn run_search_command(#[from(world)] world: &SearchWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Search(args) => {
            let builder = world.builder.borrow();
            let mut buffer = world.stdout.borrow_mut();
            run_search(args, &*builder, &mut *buffer)
        }
        Command::Details(_) => panic!("expected search command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints {count} treks")]
fn succeeds_with_treks(#[from(world)] world: &SearchWorld, count: String) {
    let expected: usize = count.parse().expect("numeric count");
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let output = stdout_json(&world.stdout.borrow());
    assert_eq!(
        output["results"]["results"].as_array().map(Vec::len),
        Some(expected)
    );
}

#[then("the printed filters select \"{value}\" in \"{category}\"")]
fn printed_selection(#[from(world)] world: &SearchWorld, value: String, category: String) {
    let output = stdout_json(&world.stdout.borrow());
    let state = output["filters"]
        .as_array()
        .and_then(|states| {
            states
                .iter()
                .find(|state| state["category_id"] == category.as_str())
        })
        .expect("category should be printed");
    assert_eq!(state["selected_options"][0]["value"], value.as_str());
}

#[then("the command fails because the selection names an unknown option")]
fn fails_unknown_option(#[from(world)] world: &SearchWorld) {
    match &*world.error() {
        CliError::Selection(FilterError::UnknownOption(err)) => {
            assert_eq!(err.category_id, "themes");
        }
        other => panic!("expected Selection, found {other:?}"),
    }
}

#[then("the command fails because the selection is malformed")]
fn fails_malformed_selection(#[from(world)] world: &SearchWorld) {
    match &*world.error() {
        CliError::InvalidSelection { raw } => assert_eq!(raw, "themes"),
        other => panic!("expected InvalidSelection, found {other:?}"),
    }
}

#[then("the command reports that the \"catalogue\" flag is missing")]
fn reports_missing_catalogue(#[from(world)] world: &SearchWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_CATALOGUE),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the trek list could not be fetched")]
fn fails_primary_fetch(#[from(world)] world: &SearchWorld) {
    match &*world.error() {
        CliError::Aggregate(AggregateError::PrimaryFetch { resource, .. }) => {
            assert_eq!(*resource, Resource::Treks);
        }
        other => panic!("expected Aggregate, found {other:?}"),
    }
}

macro_rules! register_search_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/search_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SearchWorld) {
            let _ = world;
        }
    };
}

register_search_scenario!(search_with_selection, "searching with a filter selection");
register_search_scenario!(search_unknown_option, "rejecting an unknown option");
register_search_scenario!(search_malformed_selection, "rejecting a malformed selection");
register_search_scenario!(search_missing_catalogue, "rejecting a missing catalogue");
register_search_scenario!(
    search_primary_failure,
    "failing when the trek list cannot be fetched"
);
