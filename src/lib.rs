// Todolist - Single-user task tracker persisted to a local JSON file

pub mod error;
pub mod filter;
pub mod json;
pub mod parse;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use error::{PersistenceSource, Result, StoreError};
pub use filter::{Filter, Keyword};
pub use json::DEFAULT_FILE_NAME;
pub use parse::ParseError;
pub use store::TaskStore;
pub use task::{Priority, Status, Task, TaskPatch, UnknownVariant};
