//! Filter -> sort -> paginate pipeline shared by every report table.

pub mod accessor;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use accessor::{TableRow, Value};
pub use filter::ALL;
pub use paginate::DEFAULT_ITEMS_PER_PAGE;
pub use sort::SortDirection;
pub use view::{TableView, ViewController};
