//! Content module - post models and the loaders that fetch them

pub mod loader;
mod post;

pub use post::{normalize_cursor, ContentSection, PostDetail, PostPagination, PostSummary};
