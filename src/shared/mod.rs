/// Shared kernel - error types and common aliases used by every layer
pub mod error;
pub mod result;

pub use result::Result;
