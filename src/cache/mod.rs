//! Client-side caching: keyed user lookups, paginated queries and the
//! shared retry policy.

pub mod paginated;
pub mod retry;
pub mod user_cache;

// Re-exports for public API convenience
pub use paginated::PaginatedQuery;
pub use retry::with_retries;
pub use user_cache::UserCache;
