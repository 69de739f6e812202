//! Resource fork decoder.
//!
//! ```text
//! [0x00]        header       data offset, map offset, data length, map length (u32 BE each)
//! [data offset] data region  per resource: u32 length + payload bytes
//! [map offset]  map region
//!   [+24]         u16  type list offset (relative to map)
//!   [+26]         u16  name list offset (relative to map)
//!   [type list]   u16  type count - 1
//!                 per type (8 bytes): tag[4], u16 quantity - 1, u16 item table offset
//!                 per item (12 bytes, item table relative to type list):
//!                   u16 id, u16 name offset (0xFFFF = unnamed), u8 attributes,
//!                   u24 payload offset (relative to data region), u32 reserved
//!   [name list]   per name: u8 length + Mac OS Roman bytes
//! ```
//!
//! Every offset is taken from the file and checked through [`Region`] before
//! use; a malformed fork yields a [`ForkError`], never a panic.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

use crate::error::ForkError;
use crate::header::ForkHeader;
use crate::index::{Resource, ResourceIndex};
use crate::mac_roman;
use crate::region::{Region, RegionKind};

const MAP_TYPE_LIST_OFFSET: usize = 24;
const MAP_NAME_LIST_OFFSET: usize = 26;
const TYPE_COUNT_SIZE:      usize = 2;
const TYPE_ENTRY_SIZE:      usize = 8;
const ITEM_ENTRY_SIZE:      usize = 12;
const PAYLOAD_LENGTH_SIZE:  usize = 4;
/// Name offset marking an unnamed resource.
const NO_NAME: u16 = 0xFFFF;

/// A decoded fork: its header plus every resource it holds.
#[derive(Debug, Clone)]
pub struct ResourceFork {
    pub header:    ForkHeader,
    pub resources: ResourceIndex,
}

impl ResourceFork {
    /// Decode a complete fork held in memory.
    pub fn parse(buf: &[u8]) -> Result<Self, ForkError> {
        let header = ForkHeader::parse(buf)?;
        header.validate(buf)?;

        let fork = Region::new(RegionKind::Fork, buf);
        let data = header.data_region(&fork)?;
        let map  = header.map_region(&fork)?;

        let type_list_offset = map.u16_at(MAP_TYPE_LIST_OFFSET)? as usize;
        let name_list_offset = map.u16_at(MAP_NAME_LIST_OFFSET)? as usize;
        let type_list = map.range(RegionKind::TypeList, type_list_offset, name_list_offset)?;
        let name_list = map.tail(RegionKind::NameList, name_list_offset)?;

        let type_count = type_list.u16_at(0)?.wrapping_add(1);
        debug!(
            data_len = data.len(),
            map_len = map.len(),
            type_count,
            "decoding resource fork"
        );

        let mut resources = ResourceIndex::new();
        for i in 0..type_count as usize {
            let entry = TYPE_COUNT_SIZE + TYPE_ENTRY_SIZE * i;
            let type_tag = mac_roman::decode(type_list.bytes(entry, 4)?);
            if resources.contains_type(&type_tag) {
                return Err(ForkError::DuplicateType(type_tag));
            }

            let quantity   = type_list.u16_at(entry + 4)?.wrapping_add(1);
            let item_table = type_list.u16_at(entry + 6)? as usize;
            debug!(%type_tag, quantity, item_table, "type entry");

            let items = ItemTable { type_list, name_list, data, offset: item_table };
            let mut by_id = BTreeMap::new();
            for j in 0..quantity as usize {
                let res = items.read(&type_tag, j)?;
                if by_id.contains_key(&res.id) {
                    return Err(ForkError::DuplicateId { type_tag, id: res.id });
                }
                by_id.insert(res.id, res);
            }
            resources.insert_type(type_tag, by_id);
        }

        Ok(Self { header, resources })
    }

    /// Read and decode the fork stored in the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ForkError> {
        let buf = std::fs::read(path)?;
        Self::parse(&buf)
    }
}

/// Decode a fork held in memory into its resource index.
pub fn decode(buf: &[u8]) -> Result<ResourceIndex, ForkError> {
    ResourceFork::parse(buf).map(|fork| fork.resources)
}

/// The item table of one type, with the regions its entries point into.
struct ItemTable<'a> {
    type_list: Region<'a>,
    name_list: Region<'a>,
    data:      Region<'a>,
    offset:    usize,
}

impl ItemTable<'_> {
    fn read(&self, type_tag: &str, index: usize) -> Result<Resource, ForkError> {
        // Both terms derive from u16 fields, so this cannot overflow.
        let entry = self.offset + ITEM_ENTRY_SIZE * index;
        let id          = self.type_list.u16_at(entry)?;
        let name_offset = self.type_list.u16_at(entry + 2)?;

        let name = if name_offset == NO_NAME {
            String::new()
        } else {
            let at  = name_offset as usize;
            let len = self.name_list.u8_at(at)? as usize;
            mac_roman::decode(self.name_list.bytes(at + 1, len)?)
        };

        let offset_high = self.type_list.u8_at(entry + 5)? as usize;
        let offset_low  = self.type_list.u16_at(entry + 6)? as usize;
        let payload_offset = (offset_high << 16) | offset_low;

        let payload_len = self.data.u32_at(payload_offset)? as usize;
        let data = self
            .data
            .bytes(payload_offset + PAYLOAD_LENGTH_SIZE, payload_len)?
            .to_vec();

        trace!(type_tag, id, %name, payload_offset, payload_len, "resource");
        Ok(Resource { type_tag: type_tag.to_owned(), id, name, data })
    }
}
