//! String interning for declaration names.
//!
//! Every binding name in a scope tree is interned so that the ancestor walk
//! compares names as integers instead of strings.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned name. This is a lightweight handle (u32) that can be
/// resolved back to text through the [`StringInterner`] that produced it.
///
/// Comparing two `InternedString` values is an O(1) integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Cloning is cheap (the table is shared behind an `Arc`), which lets a
/// scope tree and the diagnostics rendered from it share one table.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it if absent.
    ///
    /// The analyzer uses this to resolve allow-list entries: a name that was
    /// never interned cannot name any binding in the tree.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("Foo");
        let b = interner.intern("Foo");
        let c = interner.intern("foo");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "Foo");
        assert_eq!(interner.resolve(c), "foo");
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.get("Object").is_none());
        assert!(interner.is_empty());
        let a = interner.intern("Object");
        assert_eq!(interner.get("Object"), Some(a));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_clones_share_table() {
        let interner = StringInterner::new();
        let clone = interner.clone();
        let a = interner.intern("x");
        assert_eq!(clone.get("x"), Some(a));
    }
}
