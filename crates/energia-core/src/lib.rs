pub mod calculator;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipelines;
pub mod ranking;
pub mod report;
pub mod schema;
pub mod spreadsheet;
pub mod statistics;
pub mod types;
