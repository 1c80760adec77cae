//! Activity name interning.
//!
//! Maps activity names to dense integer indices so the timing passes can use
//! plain vectors instead of name-keyed maps.

use rustc_hash::FxHashMap;

/// Dense activity index (position in the input list).
pub type ActivityIdx = u32;

/// Interner that assigns each distinct activity name an index in insertion order.
#[derive(Debug, Clone)]
pub struct NameInterner {
    to_idx: FxHashMap<String, ActivityIdx>,
    from_idx: Vec<String>,
}

impl NameInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name that must not already be present.
    ///
    /// Returns `None` if the name was interned before; the existing mapping
    /// is left untouched.
    pub fn intern_unique(&mut self, name: &str) -> Option<ActivityIdx> {
        if self.to_idx.contains_key(name) {
            return None;
        }
        let idx = self.from_idx.len() as ActivityIdx;
        self.from_idx.push(name.to_string());
        self.to_idx.insert(name.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<ActivityIdx> {
        self.to_idx.get(name).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: ActivityIdx) -> Option<&str> {
        self.from_idx.get(idx as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
