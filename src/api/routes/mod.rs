pub mod analysis;
pub mod health;
pub mod issues;
pub mod repositories;
