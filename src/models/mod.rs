pub mod analysis;
pub mod issue;
pub mod repository;

pub use analysis::*;
pub use issue::*;
pub use repository::*;
