pub mod client;
pub mod identity;

pub use client::{GithubClient, RepoMetadata};
pub use identity::{resolve_identity, RepoIdentity};
