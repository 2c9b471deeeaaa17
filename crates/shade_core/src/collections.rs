//! Collection aliases used throughout the workspace.
//!
//! Analysis output must be reproducible run to run, so any map that is
//! iterated while producing diagnostics is an [`FxIndexMap`] (insertion
//! ordered). Plain hash maps and sets are only used for membership tests.

use rustc_hash::FxBuildHasher;

/// An insertion-ordered map using FxHash.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// A set that uses FxHash for fast hashing, suitable for analyzer internals
/// where DoS resistance is not needed.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;

/// Re-export FxHashMap for convenience.
pub type FxMap<K, V> = rustc_hash::FxHashMap<K, V>;
