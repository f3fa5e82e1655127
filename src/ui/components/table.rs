//! Glue between a `ViewController` held in a signal and the table widgets.

use dioxus::prelude::*;

use crate::engine::{SortDirection, TableRow, TableView, ViewController, ALL};
use crate::ui::components::controls::{FilterSelect, PageAction, Pager, SearchBox, SortableHeader};
use crate::ui::style::toolbar_style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub numeric: bool,
}

impl Column {
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: false,
        }
    }

    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: true,
        }
    }
}

/// A filterable dimension and the values offered for it.
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    pub key: &'static str,
    pub label: &'static str,
    pub values: &'static [&'static str],
}

/// `ALL`, the dimension's known values, then any other labels found in `rows`.
pub fn dimension_options<T: TableRow>(values: &[&str], rows: &[T], key: &str) -> Vec<String> {
    let mut unlisted: Vec<String> = rows
        .iter()
        .filter_map(|row| row.value(key).key())
        .filter(|label| !values.contains(&label.as_str()))
        .collect();
    unlisted.sort();
    unlisted.dedup();

    std::iter::once(ALL)
        .chain(values.iter().copied())
        .map(str::to_string)
        .chain(unlisted)
        .collect()
}

pub fn use_table_view<T: TableRow + 'static>(
    init: impl FnOnce() -> ViewController<T>,
) -> Signal<ViewController<T>> {
    use_signal(init)
}

pub fn filter_bar<T: TableRow + 'static>(
    mut view: Signal<ViewController<T>>,
    dimensions: &'static [Dimension],
    search_placeholder: Option<&'static str>,
) -> Element {
    let filters = view.read().filters().clone();
    let search = filters.search().to_string();
    let is_default = filters.is_default()
        && view.read().sort_state().is_default()
        && view.read().page_state().current_page() == 1;
    let searchable = search_placeholder.is_some();
    let placeholder = search_placeholder.unwrap_or_default();
    let options: Vec<Vec<String>> = dimensions
        .iter()
        .map(|dimension| dimension_options(dimension.values, view.read().dataset(), dimension.key))
        .collect();

    rsx! {
        div {
            style: toolbar_style(),
            for (dimension, options) in dimensions.iter().zip(options) {
                FilterSelect {
                    key: "{dimension.key}",
                    label: dimension.label,
                    options: options,
                    selected: filters.selected(dimension.key).to_string(),
                    on_select: move |value: String| view.write().set_filter(dimension.key, &value),
                }
            }
            if searchable {
                SearchBox {
                    value: search.clone(),
                    placeholder: placeholder,
                    on_input: move |term: String| view.write().set_search(&term),
                }
            }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px;",
                disabled: is_default,
                onclick: move |_| view.write().reset_view(),
                "Reset"
            }
        }
    }
}

pub fn header_row<T: TableRow + 'static>(
    mut view: Signal<ViewController<T>>,
    columns: &'static [Column],
) -> Element {
    let arrows: Vec<String> = columns
        .iter()
        .map(|column| {
            view.read()
                .sort_direction(column.key)
                .map(SortDirection::arrow)
                .unwrap_or("")
                .to_string()
        })
        .collect();

    rsx! {
        tr {
            for (column, arrow) in columns.iter().zip(arrows) {
                SortableHeader {
                    key: "{column.key}",
                    label: column.label,
                    arrow,
                    numeric: column.numeric,
                    on_sort: move |_| view.write().set_sort_column(column.key),
                }
            }
        }
    }
}

pub fn pager<T: TableRow + 'static>(
    mut view: Signal<ViewController<T>>,
    rendered: &TableView<T>,
) -> Element {
    let items_per_page = view.read().page_state().items_per_page();

    rsx! {
        Pager {
            current_page: rendered.current_page,
            total_pages: rendered.total_pages,
            start_index: rendered.start_index,
            end_index: rendered.end_index,
            total_items: rendered.total_items,
            items_per_page,
            on_action: move |action: PageAction| {
                let mut controller = view.write();
                match action {
                    PageAction::First => controller.first_page(),
                    PageAction::Previous => controller.previous_page(),
                    PageAction::Next => controller.next_page(),
                    PageAction::Last => controller.last_page(),
                    PageAction::GoTo(page) => controller.set_page(page),
                }
            },
            on_page_size: move |size: usize| view.write().set_items_per_page(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::engine::Value;

    #[derive(Clone)]
    struct Row(Option<&'static str>);

    impl TableRow for Row {
        fn dimensions() -> &'static [&'static str] {
            &["region"]
        }

        fn value(&self, column: &str) -> Value {
            match column {
                "region" => self.0.into(),
                _ => Value::Null,
            }
        }

        fn search_fields(&self) -> Vec<Option<&str>> {
            Vec::new()
        }
    }

    #[test]
    fn dimension_options_lead_with_all() {
        assert_eq!(
            dimension_options::<Row>(&["AMER", "EMEA"], &[], "region"),
            vec!["ALL".to_string(), "AMER".to_string(), "EMEA".to_string()]
        );
    }

    #[test]
    fn dimension_options_append_unlisted_labels_once() {
        let rows = [
            Row(Some("LATAM")),
            Row(Some("AMER")),
            Row(None),
            Row(Some("LATAM")),
            Row(Some("ANZ")),
        ];

        assert_eq!(
            dimension_options(&["AMER", "EMEA"], &rows, "region"),
            vec!["ALL", "AMER", "EMEA", "ANZ", "LATAM"]
        );
    }
}
