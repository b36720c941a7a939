//! Translate filter selections into transport-agnostic query parameters.
//!
//! [`QueryBuilder`] maps an ordered slice of [`FilterState`] values, plus the
//! fixed language and pagination parameters, to [`QueryParams`]. The mapping
//! is pure: the same input always yields the same parameters, in the same
//! order, with the same [`QueryParams::canonical_key`].
//!
//! # Examples
//! ```
//! use rando_core::{FilterCategory, FilterOption, FilterState, QueryBuilder, QueryValue};
//!
//! let mut themes = FilterState::new(FilterCategory::new(
//!     "themes",
//!     "Themes",
//!     vec![FilterOption::new("4", "Fauna"), FilterOption::new("7", "Lakes")],
//! ));
//! themes.select_value("7")?;
//! themes.select_value("4")?;
//!
//! let params = QueryBuilder::new("fr", 5).build(&[themes]);
//! assert_eq!(
//!     params.get("themes"),
//!     Some(&QueryValue::List(vec!["7".into(), "4".into()]))
//! );
//! assert_eq!(params.canonical_key(), "language=fr&page_size=5&themes=7,4");
//! # Ok::<(), rando_core::UnknownOptionError>(())
//! ```

use std::fmt;

use crate::FilterState;

/// Key carrying the content language.
pub const LANGUAGE_KEY: &str = "language";
/// Key carrying the number of results per page.
pub const PAGE_SIZE_KEY: &str = "page_size";
/// Key carrying the one-based page number.
pub const PAGE_KEY: &str = "page";

/// A primitive or list value in [`QueryParams`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum QueryValue {
    /// Free text.
    Text(String),
    /// Unsigned number.
    Number(u64),
    /// Ordered list of values.
    List(Vec<String>),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// How list values are laid out when flattened into key/value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListEncoding {
    /// `themes=7,4`
    #[default]
    CommaJoined,
    /// `themes=7&themes=4`
    RepeatedKey,
}

/// Ordered mapping of keys to query values.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Instances are rebuilt on every state change rather than patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `self` with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing any existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no key is present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over keys and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Flatten into string pairs for a transport.
    ///
    /// # Examples
    /// ```
    /// use rando_core::{ListEncoding, QueryParams};
    ///
    /// let params = QueryParams::new().with("themes", vec!["7".to_string(), "4".to_string()]);
    /// assert_eq!(
    ///     params.to_pairs(ListEncoding::RepeatedKey),
    ///     vec![("themes".to_string(), "7".to_string()), ("themes".to_string(), "4".to_string())]
    /// );
    /// ```
    pub fn to_pairs(&self, encoding: ListEncoding) -> Vec<(String, String)> {
        let mut flattened = Vec::new();
        for (key, value) in &self.pairs {
            match (value, encoding) {
                (QueryValue::List(values), ListEncoding::RepeatedKey) => {
                    flattened.extend(values.iter().map(|item| (key.clone(), item.clone())));
                }
                _ => flattened.push((key.clone(), value.to_string())),
            }
        }
        flattened
    }

    /// Stable string form, suitable as a cache key.
    ///
    /// Reserved characters inside keys and values are percent-escaped, so two
    /// parameter sets share a key only when they are equal.
    pub fn canonical_key(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", escape(key), escape_value(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (String, QueryValue);
    type IntoIter = std::slice::Iter<'a, (String, QueryValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

fn escape_value(value: &QueryValue) -> String {
    match value {
        QueryValue::List(values) => values
            .iter()
            .map(|item| escape(item))
            .collect::<Vec<_>>()
            .join(","),
        QueryValue::Text(text) => escape(text),
        QueryValue::Number(number) => number.to_string(),
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '&' => escaped.push_str("%26"),
            ',' => escaped.push_str("%2C"),
            '=' => escaped.push_str("%3D"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Builds [`QueryParams`] from filter state plus fixed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    language: String,
    page_size: u32,
    page: Option<u32>,
}

impl QueryBuilder {
    /// Create a builder for `language` with `page_size` results per page.
    pub fn new(language: impl Into<String>, page_size: u32) -> Self {
        Self {
            language: language.into(),
            page_size,
            page: None,
        }
    }

    /// Request a specific one-based page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Content language sent upstream.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Results per page sent upstream.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build parameters for `states`.
    ///
    /// Fixed parameters come first. Each category with a non-empty selection
    /// then contributes one key, its category id, holding the selected values
    /// in selection order. Categories without a selection contribute nothing.
    pub fn build(&self, states: &[FilterState]) -> QueryParams {
        let mut params = QueryParams::new()
            .with(LANGUAGE_KEY, self.language.as_str())
            .with(PAGE_SIZE_KEY, self.page_size);
        if let Some(page) = self.page {
            params.insert(PAGE_KEY, page);
        }
        for state in states.iter().filter(|state| state.has_selection()) {
            let values = state.selected_values().map(str::to_owned).collect::<Vec<_>>();
            params.insert(state.category_id(), values);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterCategory, FilterOption};
    use rstest::{fixture, rstest};

    #[fixture]
    fn states() -> Vec<FilterState> {
        let difficulty = FilterCategory::new(
            "difficulty",
            "Difficulty",
            vec![FilterOption::new("1", "Easy"), FilterOption::new("2", "Medium")],
        );
        let themes = FilterCategory::new(
            "themes",
            "Themes",
            vec![FilterOption::new("4", "Fauna"), FilterOption::new("7", "Lakes")],
        );
        vec![FilterState::new(difficulty), FilterState::new(themes)]
    }

    #[rstest]
    fn empty_categories_contribute_no_key(states: Vec<FilterState>) {
        let params = QueryBuilder::new("en", 10).build(&states);
        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("difficulty"));
        assert!(!params.contains_key("themes"));
    }

    #[rstest]
    fn selected_values_keep_selection_order(mut states: Vec<FilterState>) {
        let themes = states.get_mut(1).expect("themes state");
        themes.select_value("7").expect("known");
        themes.select_value("4").expect("known");
        let params = QueryBuilder::new("en", 10).build(&states);
        assert_eq!(
            params.get("themes"),
            Some(&QueryValue::List(vec!["7".into(), "4".into()]))
        );
    }

    #[rstest]
    fn page_is_included_when_requested(states: Vec<FilterState>) {
        let params = QueryBuilder::new("fr", 5).with_page(3).build(&states);
        assert_eq!(params.canonical_key(), "language=fr&page_size=5&page=3");
    }

    #[rstest]
    fn repeated_builds_are_identical(mut states: Vec<FilterState>) {
        states
            .first_mut()
            .expect("difficulty state")
            .select_value("2")
            .expect("known");
        let builder = QueryBuilder::new("fr", 5);
        let first = builder.build(&states);
        let second = builder.build(&states.clone());
        assert_eq!(first, second);
        assert_eq!(first.canonical_key(), second.canonical_key());
    }

    #[rstest]
    fn insert_replaces_in_place() {
        let params = QueryParams::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");
        assert_eq!(params.canonical_key(), "a=3&b=2");
    }

    #[rstest]
    fn canonical_key_escapes_reserved_characters() {
        let joined = QueryParams::new().with("q", vec!["a,b".to_string()]);
        let split = QueryParams::new().with("q", vec!["a".to_string(), "b".to_string()]);
        assert_ne!(joined.canonical_key(), split.canonical_key());
        assert_eq!(joined.canonical_key(), "q=a%2Cb");
    }

    #[rstest]
    #[case(ListEncoding::CommaJoined, vec![("ids", "1,2")])]
    #[case(ListEncoding::RepeatedKey, vec![("ids", "1"), ("ids", "2")])]
    fn lists_flatten_per_encoding(
        #[case] encoding: ListEncoding,
        #[case] expected: Vec<(&str, &str)>,
    ) {
        let params = QueryParams::new().with("ids", vec!["1".to_string(), "2".to_string()]);
        let expected: Vec<(String, String)> = expected
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        assert_eq!(params.to_pairs(encoding), expected);
    }
}
