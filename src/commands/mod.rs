//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the database.

pub mod groups;
pub mod import;
pub mod list;
pub mod renumber;

// Re-export execute functions for convenience
pub use groups::execute as groups;
pub use import::execute as import;
pub use list::execute as list;
pub use renumber::execute as renumber;
