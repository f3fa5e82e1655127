use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::engine::accessor::Value;

/// Sentinel selection meaning "no restriction on this dimension".
pub const ALL: &str = "ALL";

/// Selected value per recognised dimension plus the free-text search term.
///
/// Every recognised dimension always holds a value; a dimension that was
/// never touched holds [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    selections: BTreeMap<String, String>,
    search: String,
}

impl FilterState {
    pub fn new(dimensions: &[&str]) -> Self {
        Self {
            selections: dimensions
                .iter()
                .map(|dimension| (dimension.to_string(), ALL.to_string()))
                .collect(),
            search: String::new(),
        }
    }

    pub fn selected(&self, dimension: &str) -> &str {
        self.selections
            .get(dimension)
            .map(String::as_str)
            .unwrap_or(ALL)
    }

    /// Returns `false` and leaves the state untouched when the dimension is
    /// not recognised.
    pub fn select(&mut self, dimension: &str, value: &str) -> bool {
        match self.selections.get_mut(dimension) {
            Some(current) => {
                *current = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(dimension, value)| (dimension.as_str(), value.as_str()))
    }

    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.selections.values().all(|value| value == ALL)
    }

    pub fn reset(&mut self) {
        for value in self.selections.values_mut() {
            *value = ALL.to_string();
        }
        self.search.clear();
    }
}

/// Keeps rows whose `dimension` resolves exactly to `selected`.
///
/// Selecting [`ALL`] hands the input back without copying.
pub fn filter_by_dimension<'a, T, F>(
    data: &'a [T],
    dimension: &str,
    selected: &str,
    resolve: F,
) -> Cow<'a, [T]>
where
    T: Clone,
    F: Fn(&T, &str) -> Value,
{
    if selected == ALL {
        return Cow::Borrowed(data);
    }
    Cow::Owned(
        data.iter()
            .filter(|row| resolve(*row, dimension).matches(selected))
            .cloned()
            .collect(),
    )
}

/// Unions a dataset that arrives split into parallel per-variant arrays.
///
/// `variants` must be in enumeration order. [`ALL`] concatenates every
/// variant in that order; a single key returns that variant untouched and an
/// unknown key yields nothing.
pub fn union_variants<'a, T: Clone>(
    variants: &[(&str, &'a [T])],
    selected: &str,
) -> Cow<'a, [T]> {
    if selected == ALL {
        return Cow::Owned(
            variants
                .iter()
                .flat_map(|(_, rows)| rows.iter().cloned())
                .collect(),
        );
    }
    variants
        .iter()
        .find(|(key, _)| *key == selected)
        .map(|(_, rows)| Cow::Borrowed(*rows))
        .unwrap_or(Cow::Owned(Vec::new()))
}

/// Case-insensitive substring search across the fields `fields_of` exposes.
pub fn filter_by_search<'a, T, F>(data: &'a [T], term: &str, fields_of: F) -> Cow<'a, [T]>
where
    T: Clone,
    F: for<'r> Fn(&'r T) -> Vec<Option<&'r str>>,
{
    if term.is_empty() {
        return Cow::Borrowed(data);
    }
    let needle = term.to_lowercase();
    Cow::Owned(
        data.iter()
            .filter(|row| {
                fields_of(*row)
                    .into_iter()
                    .flatten()
                    .filter(|field| !field.is_empty())
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect(),
    )
}

/// Categorical dimensions first, free-text search last; all predicates AND.
pub fn apply_filters<'a, T, R, S>(
    dataset: &'a [T],
    state: &FilterState,
    resolve: R,
    fields_of: S,
) -> Cow<'a, [T]>
where
    T: Clone,
    R: Fn(&T, &str) -> Value,
    S: for<'r> Fn(&'r T) -> Vec<Option<&'r str>>,
{
    let mut current = Cow::Borrowed(dataset);
    for (dimension, selected) in state.selections() {
        if selected == ALL {
            continue;
        }
        current = match current {
            Cow::Borrowed(rows) => filter_by_dimension(rows, dimension, selected, &resolve),
            Cow::Owned(rows) => Cow::Owned(
                filter_by_dimension(&rows, dimension, selected, &resolve).into_owned(),
            ),
        };
    }

    if state.search().is_empty() {
        return current;
    }
    match current {
        Cow::Borrowed(rows) => filter_by_search(rows, state.search(), fields_of),
        Cow::Owned(rows) => {
            Cow::Owned(filter_by_search(&rows, state.search(), fields_of).into_owned())
        }
    }
}
