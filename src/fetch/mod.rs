//! Remote repository fetching.

pub mod git;

pub use git::{clone_repository, repository_name};
