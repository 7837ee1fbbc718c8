pub mod github;
pub mod repositories;
