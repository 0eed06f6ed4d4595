pub mod category;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod review;
pub mod scanner;

pub use error::{CodebuddyError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_REVIEW_ERRORS: i32 = 1;
pub const EXIT_RUNTIME_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
