pub mod timestamp;
pub mod token;
pub mod user;
pub mod workspace;
