//! Token counting for source trees and git repositories.
//!
//! The pipeline is: [`tokenize`] turns text into a count, [`count`] handles a
//! single file, [`scan`] walks a directory, [`repo`] clones and scans one
//! repository, and [`batch`] folds many repositories into a meta-index.

pub mod batch;
pub mod cli;
pub mod config;
pub mod count;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod repo;
pub mod scan;
pub mod tokenize;
pub mod utils;
