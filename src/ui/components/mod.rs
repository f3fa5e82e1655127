pub mod controls;
pub mod sections;
pub mod table;
