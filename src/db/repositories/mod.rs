pub mod question_repository;
pub mod tally_repository;
pub mod vote_repository;

pub use question_repository::*;
pub use tally_repository::*;
pub use vote_repository::*;
