//! shade_core: Core utilities shared by the shade workspace.
//!
//! Provides interned names, source ranges, line maps, and the hash
//! collection aliases used by the scope tree and the analyzer.

pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use text::{LineAndColumn, LineMap, TextPos, TextRange};
