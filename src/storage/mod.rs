mod repository;

pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// SQL migration for the expense category column
pub const MIGRATION_002_CATEGORY: &str = include_str!("migrations/002_category.sql");
