pub mod operations;
pub mod status;

// Re-export commonly used items
pub use operations::*;
pub use status::*;
