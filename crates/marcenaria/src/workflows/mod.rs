pub mod budgets;
pub mod projects;
mod store;

pub use store::{OwnerId, RepositoryError};
