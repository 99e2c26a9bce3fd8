pub mod types;

pub use types::RepolensError;
