// Library for tests to access modules

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod units;
pub mod version;
pub mod writer;
