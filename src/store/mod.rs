//! Flat-file persistence: one CSV file per collection.

pub mod records;
pub mod tokens;
pub mod users;
pub mod workspaces;

pub use records::{Record, RecordStore};
pub use tokens::TokenRepo;
pub use users::UserDirectory;
pub use workspaces::WorkspaceRepo;
