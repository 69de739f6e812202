use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::mac_roman;

/// First id handed out to application resources in data files; ids below
/// this are reserved.
pub const ID_OFFSET: u16 = 128;

/// Raw tag bytes of the checksum bookkeeping type ("csüm").
pub const CHECKSUM_TYPE: [u8; 4] = *b"cs\x9fm";
/// Raw tag bytes of the digital signature bookkeeping type ("dsïg").
pub const SIGNATURE_TYPE: [u8; 4] = *b"ds\x95g";

/// One typed, numbered, optionally named payload.
///
/// `data` is always an owned copy; it never borrows from the buffer the
/// fork was decoded from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Resource {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub id:       u16,
    pub name:     String,
    #[serde(with = "hex")]
    pub data:     Vec<u8>,
}

impl Resource {
    /// Zero-based position of this resource among application ids, or
    /// `None` for reserved ids below [`ID_OFFSET`].
    pub fn ordinal(&self) -> Option<u16> {
        self.id.checked_sub(ID_OFFSET)
    }
}

/// Resources keyed by type tag, then by id.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ResourceIndex {
    pub types: BTreeMap<String, BTreeMap<u16, Resource>>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, type_tag: &str, id: u16) -> Option<&Resource> {
        self.types.get(type_tag)?.get(&id)
    }

    pub fn get_type(&self, type_tag: &str) -> Option<&BTreeMap<u16, Resource>> {
        self.types.get(type_tag)
    }

    pub fn contains_type(&self, type_tag: &str) -> bool {
        self.types.contains_key(type_tag)
    }

    /// Insert `res`, returning whatever previously occupied its (type, id).
    pub fn insert(&mut self, res: Resource) -> Option<Resource> {
        self.types
            .entry(res.type_tag.clone())
            .or_default()
            .insert(res.id, res)
    }

    /// Register a whole type table at once.  Used by the decoder so that a
    /// type with zero items is still recorded.
    pub(crate) fn insert_type(&mut self, type_tag: String, items: BTreeMap<u16, Resource>) {
        self.types.insert(type_tag, items);
    }

    /// Remove a whole type table, returning it if present.
    pub fn remove_type(&mut self, type_tag: &str) -> Option<BTreeMap<u16, Resource>> {
        self.types.remove(type_tag)
    }

    /// Fold `other` into `self`; entries of `other` win on (type, id).
    pub fn merge(&mut self, other: ResourceIndex) {
        for res in other.types.into_values().flat_map(BTreeMap::into_values) {
            self.insert(res);
        }
    }

    /// Drop the checksum and digital signature types.
    pub fn remove_bookkeeping(&mut self) {
        for tag in [CHECKSUM_TYPE, SIGNATURE_TYPE] {
            self.remove_type(&mac_roman::decode(&tag));
        }
    }

    /// Total number of resources across all types.
    pub fn len(&self) -> usize {
        self.types.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// All resources, ordered by type tag then id.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.types.values().flat_map(BTreeMap::values)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
