pub mod analyzer;
pub mod batch;
pub mod config;
pub mod marker;
pub mod pdf;

pub use analyzer::{classify, classify_with, Reason, Verdict};
pub use config::Config;
