//! Behavioural tests for filter selection state.

use rando_core::test_support::difficulty_category;
use rando_core::{FilterState, UnknownOptionError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct FilterWorld {
    state: RefCell<FilterState>,
    last_error: RefCell<Option<UnknownOptionError>>,
}

#[fixture]
fn world() -> FilterWorld {
    FilterWorld {
        state: RefCell::new(FilterState::new(difficulty_category())),
        last_error: RefCell::new(None),
    }
}

#[given("an empty difficulty filter")]
fn given_empty_filter(world: &FilterWorld) {
    world.state.borrow_mut().clear();
}

#[when("I select option {value}")]
fn when_select(world: &FilterWorld, value: String) {
    if let Err(err) = world.state.borrow_mut().select_value(&value) {
        world.last_error.replace(Some(err));
    }
}

#[when("I deselect option {value}")]
fn when_deselect(world: &FilterWorld, value: String) {
    if let Err(err) = world.state.borrow_mut().deselect_value(&value) {
        world.last_error.replace(Some(err));
    }
}

#[when("I clear the filter")]
fn when_clear(world: &FilterWorld) {
    world.state.borrow_mut().clear();
}

#[then("the selected values are {values}")]
fn then_selected(world: &FilterWorld, values: String) {
    let expected: Vec<&str> = values.split(',').collect();
    let state = world.state.borrow();
    assert_eq!(state.selected_values().collect::<Vec<_>>(), expected);
    assert!(world.last_error.borrow().is_none());
}

#[then("an unknown option error is reported")]
fn then_unknown(world: &FilterWorld) {
    let error = world.last_error.borrow();
    let error = error.as_ref().expect("an error should be recorded");
    assert_eq!(error.category_id, "difficulty");
}

#[then("no option is selected")]
fn then_empty(world: &FilterWorld) {
    assert!(!world.state.borrow().has_selection());
}

#[scenario(path = "tests/features/filter_state.feature", index = 0)]
fn idempotent_select(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/filter_state.feature", index = 1)]
fn selection_order(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/filter_state.feature", index = 2)]
fn deselect_absent(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/filter_state.feature", index = 3)]
fn unknown_option(world: FilterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/filter_state.feature", index = 4)]
fn clear_selection(world: FilterWorld) {
    let _ = world;
}
