pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod github;
pub mod models;
