//! Business logic handlers
//!
//! These handlers own every store interaction behind the HTTP API. Each one
//! holds an injected `Arc<Database>` and keeps no state between requests.

pub mod buildings;
pub mod interests;

// Re-export commonly used types
pub use buildings::*;
pub use interests::*;
