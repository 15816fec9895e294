pub mod details;
pub mod report;
