mod error;
pub mod operations;
mod project;
pub mod providers;
pub mod traits;

#[cfg(test)]
mod mocks;

pub use error::{OperationError, Result};
pub use project::Project;
