pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod polls;
pub mod startup;

pub use error::PollError;
pub use startup::{AppState, app};
