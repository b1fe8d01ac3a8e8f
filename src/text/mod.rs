pub mod position;
pub mod range;

// Re-export main types and functions
pub use position::{LineIndex, compute_line_starts};
pub use range::TextRange;
