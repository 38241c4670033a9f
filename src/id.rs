//! Deterministic element identity.
//!
//! Identifiers are hashed with a djb2-style hash masked to 31 bits, so ids
//! are stable across runs and never negative. Elements generated from a
//! sequence are index-suffixed (`"{id}#{index}"`) to stay distinct while
//! `base_id` still ties them to their common string.

const HASH_SEED: u32 = 5381;
const HASH_MASK: u32 = 0x7FFF_FFFF;

/// Owned string for debug/display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringId {
    text: String,
}

impl StringId {
    pub fn from_str(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the string content.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementId {
    pub id: u32,
    pub offset: u32,
    pub base_id: u32,
    pub string_id: StringId,
}

impl ElementId {
    /// Creates an element id from the `label`.
    pub fn new(label: &str) -> Self {
        Self {
            id: hash(label),
            offset: 0,
            base_id: hash(label),
            string_id: StringId::from_str(label),
        }
    }

    /// Creates an element id from the `label` and `index`, for elements
    /// generated in a loop. The id hashes `"{label}#{index}"` while
    /// `base_id` remains the hash of `label` alone.
    pub fn new_index(label: &str, index: u32) -> Self {
        Self {
            id: hash(&format!("{label}#{index}")),
            offset: index,
            base_id: hash(label),
            string_id: StringId::from_str(label),
        }
    }
}

impl From<&str> for ElementId {
    fn from(label: &str) -> Self {
        ElementId::new(label)
    }
}

fn hash(key: &str) -> u32 {
    let mut hash: u32 = HASH_SEED;
    for b in key.bytes() {
        hash = (hash << 5)
            .wrapping_add(hash)
            .wrapping_add(b as u32)
            & HASH_MASK;
    }
    hash
}
