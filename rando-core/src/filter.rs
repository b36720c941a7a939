//! Filter categories and the user's current selections.
//!
//! A [`FilterCategory`] is an immutable catalogue entry supplied by
//! configuration. A [`FilterState`] pairs one category with the options the
//! user has selected, and [`SearchFilters`] keeps one state per configured
//! category in catalogue order.
//!
//! Selections are mutated only through `select`, `deselect` and `clear`.
//! Those operations are idempotent, and they never let a value outside the
//! category's catalogue into the selection.
//!
//! # Examples
//! ```
//! use rando_core::{FilterCategory, FilterOption, FilterState};
//!
//! let category = FilterCategory::new(
//!     "difficulty",
//!     "Difficulty",
//!     vec![FilterOption::new("1", "Easy"), FilterOption::new("2", "Medium")],
//! );
//! let mut state = FilterState::new(category);
//! let easy = FilterOption::new("1", "Easy");
//! state.select_option(&easy)?;
//! state.select_option(&easy)?;
//! assert_eq!(state.selected_values().collect::<Vec<_>>(), vec!["1"]);
//! # Ok::<(), rando_core::UnknownOptionError>(())
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::query::{LANGUAGE_KEY, PAGE_KEY, PAGE_SIZE_KEY};

/// Query keys owned by the query builder; no category may use them.
pub const RESERVED_CATEGORY_IDS: [&str; 3] = [LANGUAGE_KEY, PAGE_SIZE_KEY, PAGE_KEY];

/// A selectable value within a filter category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterOption {
    /// Identifier sent upstream; unique within its category.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Optional pictogram shown next to the label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pictogram_url: Option<String>,
}

impl FilterOption {
    /// Construct an option without a pictogram.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            pictogram_url: None,
        }
    }

    /// Attach a pictogram URL.
    #[must_use]
    pub fn with_pictogram(mut self, url: impl Into<String>) -> Self {
        self.pictogram_url = Some(url.into());
        self
    }
}

/// A named facet with a fixed set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterCategory {
    /// Identifier, also used as the query key.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Options in display order.
    pub options: Vec<FilterOption>,
}

impl FilterCategory {
    /// Construct a category.
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options,
        }
    }

    /// Look up an option by value.
    pub fn option(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// An option value absent from its category's catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("option {value:?} is not part of filter category {category_id:?}")]
pub struct UnknownOptionError {
    /// Category the operation targeted.
    pub category_id: String,
    /// The rejected option value.
    pub value: String,
}

/// Errors raised by [`SearchFilters`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// No configured category has this identifier.
    #[error("unknown filter category {category_id:?}")]
    UnknownCategory {
        /// The rejected category identifier.
        category_id: String,
    },
    /// The option is not part of the category's catalogue.
    #[error(transparent)]
    UnknownOption(#[from] UnknownOptionError),
    /// The catalogue declares the same category twice.
    #[error("filter category {category_id:?} is declared more than once")]
    DuplicateCategory {
        /// The repeated category identifier.
        category_id: String,
    },
    /// A category declares the same option value twice.
    #[error("option {value:?} is declared more than once in category {category_id:?}")]
    DuplicateOption {
        /// Category holding the duplicate.
        category_id: String,
        /// The repeated option value.
        value: String,
    },
    /// A category identifier collides with a fixed query parameter.
    #[error("filter category {category_id:?} uses a reserved query key")]
    ReservedCategory {
        /// The reserved identifier.
        category_id: String,
    },
}

/// Selection state for one filter category.
///
/// Fields are private so that `selected_options` stays a duplicate-free
/// subset of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FilterState {
    category_id: String,
    label: String,
    options: Vec<FilterOption>,
    selected_options: Vec<FilterOption>,
}

impl FilterState {
    /// Start with an empty selection for `category`.
    pub fn new(category: FilterCategory) -> Self {
        Self {
            category_id: category.id,
            label: category.label,
            options: category.options,
            selected_options: Vec::new(),
        }
    }

    /// Identifier of the underlying category.
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// Label of the underlying category.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Every option of the category.
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Selected options in selection order.
    pub fn selected_options(&self) -> &[FilterOption] {
        &self.selected_options
    }

    /// Selected option values in selection order.
    pub fn selected_values(&self) -> impl Iterator<Item = &str> {
        self.selected_options.iter().map(|option| option.value.as_str())
    }

    /// Whether any option is selected.
    pub fn has_selection(&self) -> bool {
        !self.selected_options.is_empty()
    }

    /// Whether the option identified by `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_options.iter().any(|option| option.value == value)
    }

    /// Select `option`, identified by its value.
    ///
    /// Selecting an already-selected option is a no-op. The catalogue's copy
    /// of the option is stored, so labels always match the catalogue.
    pub fn select_option(&mut self, option: &FilterOption) -> Result<(), UnknownOptionError> {
        self.select_value(&option.value)
    }

    /// Deselect `option`, identified by its value.
    ///
    /// Deselecting an option that is not selected is a no-op.
    pub fn deselect_option(&mut self, option: &FilterOption) -> Result<(), UnknownOptionError> {
        self.deselect_value(&option.value)
    }

    /// Select the option whose value is `value`.
    pub fn select_value(&mut self, value: &str) -> Result<(), UnknownOptionError> {
        let option = self.catalogue_option(value)?.clone();
        if !self.is_selected(value) {
            self.selected_options.push(option);
        }
        Ok(())
    }

    /// Deselect the option whose value is `value`.
    pub fn deselect_value(&mut self, value: &str) -> Result<(), UnknownOptionError> {
        self.catalogue_option(value)?;
        self.selected_options.retain(|option| option.value != value);
        Ok(())
    }

    /// Flip the selection of `value`, returning whether it is now selected.
    pub fn toggle_value(&mut self, value: &str) -> Result<bool, UnknownOptionError> {
        if self.is_selected(value) {
            self.deselect_value(value)?;
            Ok(false)
        } else {
            self.select_value(value)?;
            Ok(true)
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected_options.clear();
    }

    fn catalogue_option(&self, value: &str) -> Result<&FilterOption, UnknownOptionError> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .ok_or_else(|| UnknownOptionError {
                category_id: self.category_id.clone(),
                value: value.to_owned(),
            })
    }
}

impl From<FilterCategory> for FilterState {
    fn from(category: FilterCategory) -> Self {
        Self::new(category)
    }
}

/// Filter states for every configured category, in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SearchFilters {
    states: Vec<FilterState>,
}

impl SearchFilters {
    /// Build empty selections for every category of `catalogue`.
    ///
    /// Fails when a category identifier, or an option value within one
    /// category, is declared twice, or when a category identifier is one of
    /// [`RESERVED_CATEGORY_IDS`].
    pub fn from_catalogue<I>(catalogue: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterCategory>,
    {
        let mut seen = HashSet::new();
        let mut states = Vec::new();
        for category in catalogue {
            if RESERVED_CATEGORY_IDS.contains(&category.id.as_str()) {
                return Err(FilterError::ReservedCategory {
                    category_id: category.id,
                });
            }
            if !seen.insert(category.id.clone()) {
                return Err(FilterError::DuplicateCategory {
                    category_id: category.id,
                });
            }
            ensure_unique_options(&category)?;
            states.push(FilterState::new(category));
        }
        Ok(Self { states })
    }

    /// Every state in catalogue order.
    pub fn states(&self) -> &[FilterState] {
        &self.states
    }

    /// The state for `category_id`, if configured.
    pub fn state(&self, category_id: &str) -> Option<&FilterState> {
        self.states
            .iter()
            .find(|state| state.category_id == category_id)
    }

    /// Select `value` within `category_id`.
    pub fn select(&mut self, category_id: &str, value: &str) -> Result<(), FilterError> {
        self.state_mut(category_id)?.select_value(value)?;
        Ok(())
    }

    /// Deselect `value` within `category_id`.
    pub fn deselect(&mut self, category_id: &str, value: &str) -> Result<(), FilterError> {
        self.state_mut(category_id)?.deselect_value(value)?;
        Ok(())
    }

    /// Flip `value` within `category_id`, returning whether it is now selected.
    pub fn toggle(&mut self, category_id: &str, value: &str) -> Result<bool, FilterError> {
        Ok(self.state_mut(category_id)?.toggle_value(value)?)
    }

    /// Clear the selection of one category.
    pub fn clear_category(&mut self, category_id: &str) -> Result<(), FilterError> {
        self.state_mut(category_id)?.clear();
        Ok(())
    }

    /// Clear every selection, as when the search is reset.
    pub fn clear_all(&mut self) {
        self.states.iter_mut().for_each(FilterState::clear);
    }

    /// Total number of selected options across categories.
    pub fn selection_count(&self) -> usize {
        self.states
            .iter()
            .map(|state| state.selected_options.len())
            .sum()
    }

    fn state_mut(&mut self, category_id: &str) -> Result<&mut FilterState, FilterError> {
        self.states
            .iter_mut()
            .find(|state| state.category_id == category_id)
            .ok_or_else(|| FilterError::UnknownCategory {
                category_id: category_id.to_owned(),
            })
    }
}

fn ensure_unique_options(category: &FilterCategory) -> Result<(), FilterError> {
    let mut values = HashSet::new();
    match category
        .options
        .iter()
        .find(|option| !values.insert(option.value.as_str()))
    {
        Some(duplicate) => Err(FilterError::DuplicateOption {
            category_id: category.id.clone(),
            value: duplicate.value.clone(),
        }),
        None => Ok(()),
    }
}
