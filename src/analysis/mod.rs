pub mod aggregate;
pub mod orchestrator;

pub use aggregate::aggregate;
pub use orchestrator::analyze;
