use dioxus::prelude::*;

use crate::ui::style::{table_header_cell_style, toolbar_style};

const CONTROL_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px;";

#[component]
pub fn FilterSelect(
    label: &'static str,
    options: Vec<String>,
    selected: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            style: "display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            select {
                style: CONTROL_STYLE,
                value: "{selected}",
                onchange: move |event| on_select.call(event.value()),
                for option in options.iter() {
                    option {
                        key: "{option}",
                        value: "{option}",
                        selected: *option == selected,
                        "{option}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SearchBox(value: String, placeholder: &'static str, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            style: "{CONTROL_STYLE} min-width: 220px;",
            r#type: "search",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |event| on_input.call(event.value()),
        }
    }
}

#[component]
pub fn SortableHeader(
    label: &'static str,
    arrow: String,
    numeric: bool,
    on_sort: EventHandler<()>,
) -> Element {
    let align = if numeric { "right" } else { "left" };
    let style = format!("{} text-align: {align};", table_header_cell_style());
    rsx! {
        th {
            style: "{style}",
            onclick: move |_| on_sort.call(()),
            "{label}{arrow}"
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAction {
    First,
    Previous,
    Next,
    Last,
    GoTo(usize),
}

pub const PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

pub fn pager_summary(start_index: usize, end_index: usize, total_items: usize) -> String {
    if total_items == 0 {
        "No matching rows".to_string()
    } else {
        format!("Showing {start_index}-{end_index} of {total_items}")
    }
}

#[component]
pub fn Pager(
    current_page: usize,
    total_pages: usize,
    start_index: usize,
    end_index: usize,
    total_items: usize,
    items_per_page: usize,
    on_action: EventHandler<PageAction>,
    on_page_size: EventHandler<usize>,
) -> Element {
    let summary = pager_summary(start_index, end_index, total_items);
    let at_start = current_page <= 1;
    let at_end = current_page >= total_pages;

    rsx! {
        div {
            style: toolbar_style(),
            span { "{summary}" }
            button {
                style: CONTROL_STYLE,
                disabled: at_start,
                onclick: move |_| on_action.call(PageAction::First),
                "« First"
            }
            button {
                style: CONTROL_STYLE,
                disabled: at_start,
                onclick: move |_| on_action.call(PageAction::Previous),
                "‹ Prev"
            }
            span {
                "Page "
                input {
                    style: "{CONTROL_STYLE} width: 56px;",
                    r#type: "number",
                    min: "1",
                    max: "{total_pages}",
                    value: "{current_page}",
                    onchange: move |event| {
                        if let Ok(page) = event.value().trim().parse::<usize>() {
                            on_action.call(PageAction::GoTo(page));
                        }
                    },
                }
                " / {total_pages}"
            }
            button {
                style: CONTROL_STYLE,
                disabled: at_end,
                onclick: move |_| on_action.call(PageAction::Next),
                "Next ›"
            }
            button {
                style: CONTROL_STYLE,
                disabled: at_end,
                onclick: move |_| on_action.call(PageAction::Last),
                "Last »"
            }
            select {
                style: CONTROL_STYLE,
                value: "{items_per_page}",
                onchange: move |event| {
                    if let Ok(size) = event.value().parse::<usize>() {
                        on_page_size.call(size);
                    }
                },
                for size in PAGE_SIZES.iter().copied() {
                    option {
                        key: "{size}",
                        value: "{size}",
                        selected: size == items_per_page,
                        "{size} / page"
                    }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub color: &'static str,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: "#222",
        }
    }

    pub fn colored(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }
}

#[component]
pub fn StatsBar(stats: Vec<Stat>) -> Element {
    rsx! {
        div {
            style: "display: flex; gap: 12px; flex-wrap: wrap; padding: 8px 0;",
            for stat in stats.iter() {
                div {
                    key: "{stat.label}",
                    style: "border: 1px solid #ddd; border-radius: 8px; padding: 8px 12px; min-width: 120px;",
                    div { style: "font-size: 12px; color: #666;", "{stat.label}" }
                    div { style: "font-size: 18px; font-weight: 600; color: {stat.color};", "{stat.value}" }
                }
            }
        }
    }
}
