pub mod connection;
pub mod issues;
pub mod repositories;
pub mod schema;

pub use connection::Database;
pub use issues::IssueFilter;
