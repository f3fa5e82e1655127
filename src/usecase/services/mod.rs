pub mod access;
pub mod report_service;
