//! Behavioural tests for result aggregation and search cycles.

use std::cell::RefCell;

use rando_core::test_support::sample_catalogue;
use rando_core::{QueryBuilder, QueryParams, SearchFilters};
use rando_data::test_support::{StubTrekSource, block_on_for_tests};
use rando_data::{
    AggregateError, AggregationReport, Completion, PendingSearch, Resource, ResultAggregator,
    SearchSession, TrekResults,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct AggregationWorld {
    source: RefCell<StubTrekSource>,
    outcome: RefCell<Option<Result<TrekResults, AggregateError>>>,
    session: RefCell<SearchSession>,
    first: RefCell<Option<PendingSearch>>,
    second: RefCell<Option<PendingSearch>>,
    first_completion: RefCell<Option<Completion>>,
}

#[fixture]
fn world() -> AggregationWorld {
    let filters = SearchFilters::from_catalogue(sample_catalogue()).expect("valid catalogue");
    AggregationWorld {
        source: RefCell::new(StubTrekSource::new()),
        outcome: RefCell::new(None),
        session: RefCell::new(SearchSession::new(filters, QueryBuilder::new("fr", 5))),
        first: RefCell::new(None),
        second: RefCell::new(None),
        first_completion: RefCell::new(None),
    }
}

fn page(count: u64) -> TrekResults {
    TrekResults {
        count,
        page_size: 5,
        next_page: None,
        previous_page: None,
        results: Vec::new(),
        report: AggregationReport::default(),
    }
}

fn with_results<R>(world: &AggregationWorld, check: impl FnOnce(&TrekResults) -> R) -> R {
    let outcome = world.outcome.borrow();
    match outcome.as_ref() {
        Some(Ok(results)) => check(results),
        Some(Err(err)) => panic!("search failed: {err}"),
        None => panic!("no search was run"),
    }
}

#[given("the sample upstream")]
fn given_samples(world: &AggregationWorld) {
    world.source.replace(StubTrekSource::with_samples());
}

#[given("the themes collection fails")]
fn given_themes_fail(world: &AggregationWorld) {
    world
        .source
        .replace_with(|source| std::mem::take(source).failing(Resource::Themes));
}

#[given("the trek list fails")]
fn given_treks_fail(world: &AggregationWorld) {
    world
        .source
        .replace_with(|source| std::mem::take(source).failing(Resource::Treks));
}

#[given("a search session")]
fn given_session(world: &AggregationWorld) {
    assert!(world.session.borrow().current().is_none());
}

#[when("I search for treks")]
fn when_search(world: &AggregationWorld) {
    let aggregator = ResultAggregator::new(world.source.take());
    let outcome = block_on_for_tests(aggregator.fetch_trek_results(&QueryParams::new()));
    world.outcome.replace(Some(outcome));
}

#[when("a first search starts")]
fn when_first_starts(world: &AggregationWorld) {
    let pending = world.session.borrow_mut().begin_search();
    world.first.replace(Some(pending));
}

#[when("a second search starts")]
fn when_second_starts(world: &AggregationWorld) {
    let pending = world.session.borrow_mut().begin_search();
    world.second.replace(Some(pending));
}

#[when("the {which} search completes with count {count}")]
fn when_completes(world: &AggregationWorld, which: String, count: String) {
    let count: u64 = count.parse().expect("numeric count");
    let pending = match which.as_str() {
        "first" => world.first.take(),
        "second" => world.second.take(),
        other => panic!("unknown search {other}"),
    }
    .expect("search should have started");
    let completion = world
        .session
        .borrow_mut()
        .complete(pending, Ok(page(count)))
        .expect("completion succeeds");
    if which == "first" {
        world.first_completion.replace(Some(completion));
    }
}

#[then("{count} treks are returned")]
fn then_count(world: &AggregationWorld, count: String) {
    let expected: usize = count.parse().expect("numeric count");
    with_results(world, |results| assert_eq!(results.results.len(), expected));
}

#[then("trek {id} has difficulty {label}")]
fn then_difficulty(world: &AggregationWorld, id: String, label: String) {
    let id: u32 = id.parse().expect("numeric id");
    with_results(world, |results| {
        let trek = results
            .results
            .iter()
            .find(|trek| trek.id == id)
            .expect("trek should be present");
        assert_eq!(
            trek.informations.difficulty.as_ref().map(|d| d.label.as_str()),
            Some(label.as_str())
        );
    });
}

#[then("trek {id} has tags {tags}")]
fn then_tags(world: &AggregationWorld, id: String, tags: String) {
    let id: u32 = id.parse().expect("numeric id");
    let expected: Vec<&str> = tags.split(',').collect();
    with_results(world, |results| {
        let trek = results
            .results
            .iter()
            .find(|trek| trek.id == id)
            .expect("trek should be present");
        assert_eq!(trek.tags, expected);
    });
}

#[then("no trek has themes")]
fn then_no_themes(world: &AggregationWorld) {
    with_results(world, |results| {
        assert!(results.results.iter().all(|trek| trek.themes.is_empty()));
        assert!(results.results.iter().all(|trek| trek.tags.is_empty()));
    });
}

#[then("the themes collection is reported as degraded")]
fn then_themes_degraded(world: &AggregationWorld) {
    with_results(world, |results| {
        assert!(results.report.degraded(Resource::Themes));
        assert_eq!(results.report.degradations.len(), 1);
    });
}

#[then("the search fails on the trek list")]
fn then_primary_failure(world: &AggregationWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(AggregateError::PrimaryFetch {
            resource: Resource::Treks,
            ..
        }))
    ));
}

#[then("trek {id} is reported as skipped")]
fn then_skipped(world: &AggregationWorld, id: String) {
    let id: u64 = id.parse().expect("numeric id");
    with_results(world, |results| {
        assert!(
            results
                .report
                .skipped
                .iter()
                .any(|item| item.resource == Resource::Treks && item.id == Some(id))
        );
    });
}

#[then("the first search is reported as stale")]
fn then_first_stale(world: &AggregationWorld) {
    assert_eq!(*world.first_completion.borrow(), Some(Completion::Stale));
}

#[then("the session shows {count} treks")]
fn then_session_count(world: &AggregationWorld, count: String) {
    let expected: u64 = count.parse().expect("numeric count");
    let session = world.session.borrow();
    assert_eq!(session.current().map(|results| results.count), Some(expected));
}

#[scenario(path = "tests/features/aggregation.feature", index = 0)]
fn references_resolved(world: AggregationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/aggregation.feature", index = 1)]
fn failed_themes_degrade(world: AggregationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/aggregation.feature", index = 2)]
fn failed_trek_list_aborts(world: AggregationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/aggregation.feature", index = 3)]
fn invalid_treks_skipped(world: AggregationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/aggregation.feature", index = 4)]
fn superseded_search_discarded(world: AggregationWorld) {
    let _ = world;
}
