use std::borrow::Cow;
use std::cmp::Ordering;

use tracing::trace;

use crate::engine::accessor::TableRow;
use crate::engine::filter::{apply_filters, FilterState};
use crate::engine::paginate::{paginate, PageState};
use crate::engine::sort::{apply_sort, SortDirection, SortState};

/// Ordering shown while no sort column is active.
pub type DefaultOrder<T> = fn(&T, &T) -> Ordering;

/// Everything a table needs to draw the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<T> {
    pub rows: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// Owns one table's dataset and view state and runs filter -> sort ->
/// paginate on demand.
#[derive(Debug, Clone)]
pub struct ViewController<T: TableRow> {
    dataset: Vec<T>,
    default_order: Option<DefaultOrder<T>>,
    filters: FilterState,
    sort: SortState,
    page: PageState,
}

impl<T: TableRow> ViewController<T> {
    pub fn new(dataset: Vec<T>) -> Self {
        Self {
            dataset,
            default_order: None,
            filters: FilterState::new(T::dimensions()),
            sort: SortState::Default,
            page: PageState::default(),
        }
    }

    pub fn with_default_order(mut self, order: DefaultOrder<T>) -> Self {
        self.default_order = Some(order);
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.page = PageState::new(items_per_page);
        self
    }

    pub fn dataset(&self) -> &[T] {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_direction(&self, column: &str) -> Option<SortDirection> {
        self.sort.direction_for(column)
    }

    pub fn page_state(&self) -> PageState {
        self.page.clamped(self.filtered_len())
    }

    /// Replaces the rows; filters and sort survive and the page snaps back
    /// into range.
    pub fn set_dataset(&mut self, dataset: Vec<T>) {
        self.dataset = dataset;
        self.page = self.page.clamped(self.filtered_len());
        trace!(
            rows = self.dataset.len(),
            page = self.page.current_page(),
            "dataset replaced"
        );
    }

    pub fn set_filter(&mut self, dimension: &str, value: &str) {
        if !self.filters.select(dimension, value) {
            trace!(dimension, "ignoring unknown filter dimension");
            return;
        }
        self.page.reset();
        trace!(dimension, value, "filter changed");
    }

    pub fn set_search(&mut self, term: &str) {
        self.filters.set_search(term);
        self.page.reset();
        trace!(term, "search changed");
    }

    /// Cycles the sort on `column`. Only a change of active column resets
    /// the page; flipping direction on the same column keeps it.
    pub fn set_sort_column(&mut self, column: &str) {
        let next = self.sort.toggled(column);
        if next.column() != self.sort.column() {
            self.page.reset();
        }
        self.sort = next;
        trace!(column, direction = ?self.sort.direction(), "sort changed");
    }

    pub fn set_page(&mut self, page: usize) {
        let total = self.filtered_len();
        self.page.go_to(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.filtered_len();
        self.page.next(total);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.clamped(self.filtered_len());
        self.page.previous();
    }

    pub fn first_page(&mut self) {
        self.page.first();
    }

    pub fn last_page(&mut self) {
        let total = self.filtered_len();
        self.page.last(total);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.page.set_items_per_page(items_per_page);
    }

    pub fn reset_view(&mut self) {
        self.filters.reset();
        self.sort = SortState::Default;
        self.page.reset();
        trace!("view reset");
    }

    /// Rows that pass every active filter, in dataset order.
    pub fn filtered_rows(&self) -> Cow<'_, [T]> {
        apply_filters(&self.dataset, &self.filters, T::value, T::search_fields)
    }

    pub fn sorted_rows(&self) -> Vec<T> {
        let filtered = self.filtered_rows();
        let default_ordered = self.default_ordered(&filtered);
        apply_sort(&filtered, &default_ordered, &self.sort, T::value).into_owned()
    }

    pub fn render(&self) -> TableView<T> {
        let sorted = self.sorted_rows();
        let page = paginate(&sorted, self.page);
        TableView {
            rows: page.rows.to_vec(),
            current_page: page.state.current_page(),
            total_pages: page.total_pages,
            total_items: page.total_items,
            start_index: page.start_index,
            end_index: page.end_index,
        }
    }

    fn default_ordered<'a>(&self, filtered: &'a [T]) -> Cow<'a, [T]> {
        match self.default_order {
            Some(order) => {
                let mut rows = filtered.to_vec();
                rows.sort_by(order);
                Cow::Owned(rows)
            }
            None => Cow::Borrowed(filtered),
        }
    }

    fn filtered_len(&self) -> usize {
        self.filtered_rows().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::accessor::Value;
    use crate::engine::filter::ALL;

    #[derive(Debug, Clone, PartialEq)]
    struct Deal {
        id: usize,
        region: &'static str,
        acv: Option<f64>,
        account: String,
    }

    impl TableRow for Deal {
        fn dimensions() -> &'static [&'static str] {
            &["region"]
        }

        fn value(&self, column: &str) -> Value {
            match column {
                "id" => Value::from(self.id as i64),
                "region" => Value::from(self.region),
                "acv" => Value::from(self.acv),
                "account" => Value::from(self.account.as_str()),
                _ => Value::Null,
            }
        }

        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(self.account.as_str())]
        }
    }

    fn deals(n: usize) -> Vec<Deal> {
        (0..n)
            .map(|id| Deal {
                id,
                region: if id % 3 == 0 { "EMEA" } else { "AMER" },
                acv: if id % 7 == 0 { None } else { Some((id * 37 % 101) as f64) },
                account: format!("Account {id}"),
            })
            .collect()
    }

    fn by_acv_desc(a: &Deal, b: &Deal) -> Ordering {
        b.acv.unwrap_or(0.0).total_cmp(&a.acv.unwrap_or(0.0))
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut view = ViewController::new(deals(120)).with_items_per_page(10);
        view.set_filter("region", "AMER");
        view.set_page(3);
        assert_eq!(view.render().current_page, 3);

        view.set_filter("region", "EMEA");

        assert_eq!(view.render().current_page, 1);
    }

    #[test]
    fn search_change_resets_to_first_page() {
        let mut view = ViewController::new(deals(60)).with_items_per_page(10);
        view.set_page(4);

        view.set_search("account 1");

        let rendered = view.render();
        assert_eq!(rendered.current_page, 1);
        assert!(rendered
            .rows
            .iter()
            .all(|deal| deal.account.to_lowercase().contains("account 1")));
    }

    #[test]
    fn unknown_dimension_keeps_page() {
        let mut view = ViewController::new(deals(60)).with_items_per_page(10);
        view.set_page(4);

        view.set_filter("territory", "WEST");

        assert_eq!(view.render().current_page, 4);
        assert_eq!(view.filters().selected("region"), ALL);
    }

    #[test]
    fn direction_toggle_keeps_page_but_column_change_resets() {
        let mut view = ViewController::new(deals(60)).with_items_per_page(10);
        view.set_sort_column("acv");
        view.set_page(3);

        view.set_sort_column("acv");
        assert_eq!(view.sort_direction("acv"), Some(SortDirection::Desc));
        assert_eq!(view.render().current_page, 3);

        view.set_sort_column("account");
        assert_eq!(view.render().current_page, 1);
        assert_eq!(view.sort_direction("account"), Some(SortDirection::Asc));
        assert_eq!(view.sort_direction("acv"), None);
    }

    #[test]
    fn returning_to_default_order_resets_page() {
        let mut view = ViewController::new(deals(60)).with_items_per_page(10);
        view.set_sort_column("acv");
        view.set_sort_column("acv");
        view.set_page(5);

        view.set_sort_column("acv");

        assert!(view.sort_state().is_default());
        assert_eq!(view.render().current_page, 1);
    }

    #[test]
    fn default_state_uses_default_order() {
        let view = ViewController::new(deals(30)).with_default_order(by_acv_desc);

        let rows = view.sorted_rows();

        let mut expected = deals(30);
        expected.sort_by(by_acv_desc);
        assert_eq!(rows, expected);
    }

    #[test]
    fn render_is_deterministic() {
        let mut view = ViewController::new(deals(90))
            .with_default_order(by_acv_desc)
            .with_items_per_page(10);
        view.set_filter("region", "AMER");
        view.set_sort_column("acv");
        view.set_page(2);

        let first = view.render();
        let second = view.clone().render();

        assert_eq!(first, second);
        assert_eq!(first.rows.len(), 10);
    }

    #[test]
    fn shrinking_dataset_snaps_to_last_page() {
        let mut view = ViewController::new(deals(57));
        view.set_page(3);

        view.set_dataset(deals(30));

        let rendered = view.render();
        assert_eq!(rendered.current_page, 2);
        assert_eq!(rendered.start_index, 26);
        assert_eq!(rendered.end_index, 30);
    }

    #[test]
    fn reset_view_restores_defaults() {
        let mut view = ViewController::new(deals(60)).with_items_per_page(10);
        view.set_filter("region", "EMEA");
        view.set_search("account");
        view.set_sort_column("id");
        view.set_page(2);

        view.reset_view();

        assert!(view.filters().is_default());
        assert!(view.sort_state().is_default());
        assert_eq!(view.page_state().current_page(), 1);
        assert_eq!(view.render().total_items, 60);
    }

    #[test]
    fn navigation_is_clamped_to_filtered_rows() {
        let mut view = ViewController::new(deals(57));

        view.last_page();
        assert_eq!(view.page_state().current_page(), 3);

        view.next_page();
        assert_eq!(view.page_state().current_page(), 3);

        view.first_page();
        view.previous_page();
        assert_eq!(view.page_state().current_page(), 1);
    }
}
