pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// `max(1, ceil(total / per_page))`; an empty dataset still has one page.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Current page (1-based) and page size.
///
/// Both fields are private so the `current_page >= 1` and
/// `items_per_page > 0` guarantees cannot be broken from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PageState {
    /// A zero page size is coerced to 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.items_per_page)
    }

    /// The same state with `current_page` pulled into `[1, total_pages]`.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            current_page: self.current_page.clamp(1, self.total_pages(total)),
            ..self
        }
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current_page = page.clamp(1, self.total_pages(total));
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.current_page.saturating_add(1), total);
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    pub fn last(&mut self, total: usize) {
        self.current_page = self.total_pages(total);
    }

    pub fn reset(&mut self) {
        self.first();
    }
}

/// One page of rows plus the numbers a pager needs.
///
/// `start_index` is the 1-based position of the first row shown and
/// `end_index` the 1-based position of the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    pub state: PageState,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
}

pub fn paginate<T>(data: &[T], state: PageState) -> Page<'_, T> {
    let total_items = data.len();
    let state = state.clamped(total_items);
    let per_page = state.items_per_page();
    let offset = (state.current_page() - 1) * per_page;
    let end = (offset + per_page).min(total_items);
    let start = offset.min(end);

    Page {
        rows: &data[start..end],
        state,
        total_pages: state.total_pages(total_items),
        total_items,
        start_index: offset + 1,
        end_index: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn fifty_seven_items_make_three_pages() {
        let data = items(57);
        let mut state = PageState::default();

        assert_eq!(state.total_pages(data.len()), 3);

        state.go_to(10, data.len());
        let page = paginate(&data, state);

        assert_eq!(page.state.current_page(), 3);
        assert_eq!(page.rows.len(), 7);
        assert_eq!(page.start_index, 51);
        assert_eq!(page.end_index, 57);
        assert_eq!(page.rows.first(), Some(&51));
        assert_eq!(page.rows.last(), Some(&57));
    }

    #[test]
    fn empty_dataset_has_one_empty_page() {
        let data: Vec<usize> = Vec::new();

        let page = paginate(&data, PageState::default());

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.state.current_page(), 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.end_index, 0);
    }

    #[test]
    fn go_to_clamps_both_ends() {
        let mut state = PageState::new(10);

        state.go_to(0, 35);
        assert_eq!(state.current_page(), 1);

        state.go_to(9999, 35);
        assert_eq!(state.current_page(), 4);
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let total = 30;
        let mut state = PageState::new(10);

        state.previous();
        assert_eq!(state.current_page(), 1);

        state.next(total);
        state.next(total);
        state.next(total);
        assert_eq!(state.current_page(), 3);

        state.first();
        assert_eq!(state.current_page(), 1);

        state.last(total);
        assert_eq!(state.current_page(), 3);

        state.reset();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn shrunk_dataset_snaps_to_last_valid_page() {
        let mut state = PageState::new(25);
        state.go_to(3, 57);

        let data = items(30);
        let page = paginate(&data, state);

        assert_eq!(page.state.current_page(), 2);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.start_index, 26);
    }

    #[test]
    fn zero_items_per_page_is_coerced() {
        let state = PageState::new(0);

        assert_eq!(state.items_per_page(), 1);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn changing_page_size_returns_to_first_page() {
        let mut state = PageState::new(10);
        state.go_to(3, 100);

        state.set_items_per_page(50);

        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(100), 2);
    }
}
