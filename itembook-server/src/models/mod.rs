//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod item;
pub mod sort;
pub mod validation;

pub use item::{text_field, Category, NewItem};
pub use sort::{SortColumn, SortDirection, SortKey};
pub use validation::ValidationError;
