pub mod report;
pub mod totals;
