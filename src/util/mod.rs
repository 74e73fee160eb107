//! Shared utilities

pub mod diagnostic;
pub mod fs;
pub mod interning;

pub use diagnostic::Diagnostic;
pub use interning::InternedString;
