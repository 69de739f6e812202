//! Fixture writer for resource forks.  The library only reads the format;
//! tests need a way to produce well-formed (and then deliberately broken)
//! input.
#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use std::path::Path;

/// Offset of the data region in forks built here; the bytes between the
/// header and the data region are reserved and left zero.
pub const DATA_OFFSET: u32 = 256;
/// Size of the fixed map prologue before the type list.
pub const MAP_PROLOGUE: usize = 28;

pub struct Item {
    pub id:   u16,
    pub name: Option<Vec<u8>>,
    pub data: Vec<u8>,
}

/// Absolute offsets of the structures inside a built fork.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub data_offset: usize,
    pub map_offset:  usize,
    pub type_list:   usize,
    pub name_list:   usize,
}

impl Layout {
    /// Absolute offset of item `item` (counted across all types) in the fork.
    pub fn item_entry(&self, type_count: usize, item: usize) -> usize {
        self.type_list + 2 + 8 * type_count + 12 * item
    }
}

#[derive(Default)]
pub struct ForkBuilder {
    types: Vec<([u8; 4], Vec<Item>)>,
}

impl ForkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, grouping it with earlier resources of the same tag.
    pub fn resource(mut self, tag: &[u8; 4], id: u16, name: Option<&[u8]>, data: &[u8]) -> Self {
        let item = Item { id, name: name.map(<[u8]>::to_vec), data: data.to_vec() };
        match self.types.iter_mut().find(|(t, _)| t == tag) {
            Some((_, items)) => items.push(item),
            None => self.types.push((*tag, vec![item])),
        }
        self
    }

    /// Start a new type entry even if `tag` is already present.
    pub fn raw_type(mut self, tag: &[u8; 4]) -> Self {
        self.types.push((*tag, Vec::new()));
        self
    }

    /// Append a resource to the most recently added type entry.
    pub fn raw_item(mut self, id: u16, data: &[u8]) -> Self {
        if let Some((_, items)) = self.types.last_mut() {
            items.push(Item { id, name: None, data: data.to_vec() });
        }
        self
    }

    pub fn layout(&self) -> Layout {
        let (data, type_list, _) = self.sections();
        let map_offset = DATA_OFFSET as usize + data.len();
        Layout {
            data_offset: DATA_OFFSET as usize,
            map_offset,
            type_list:   map_offset + MAP_PROLOGUE,
            name_list:   map_offset + MAP_PROLOGUE + type_list.len(),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let (data, type_list, names) = self.sections();

        let data_length = data.len() as u32;
        let map_offset  = DATA_OFFSET + data_length;
        let map_length  = (MAP_PROLOGUE + type_list.len() + names.len()) as u32;

        let mut header = Vec::new();
        for w in [DATA_OFFSET, map_offset, data_length, map_length] {
            header.write_u32::<BigEndian>(w).unwrap();
        }

        let mut map = Vec::new();
        map.extend_from_slice(&header);
        map.resize(24, 0);
        map.write_u16::<BigEndian>(MAP_PROLOGUE as u16).unwrap();
        map.write_u16::<BigEndian>((MAP_PROLOGUE + type_list.len()) as u16).unwrap();
        map.extend_from_slice(&type_list);
        map.extend_from_slice(&names);

        let mut fork = header;
        fork.resize(DATA_OFFSET as usize, 0);
        fork.extend_from_slice(&data);
        fork.extend_from_slice(&map);
        fork
    }

    /// Build and write to `path`.
    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }

    /// (data region, type list with item tables, name list)
    fn sections(&self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let mut data  = Vec::new();
        let mut names = Vec::new();
        let mut entries = Vec::new();

        for (_, items) in &self.types {
            for item in items {
                let payload_offset = data.len() as u32;
                data.write_u32::<BigEndian>(item.data.len() as u32).unwrap();
                data.extend_from_slice(&item.data);

                let name_offset = match &item.name {
                    Some(n) => {
                        let at = names.len() as u16;
                        names.push(n.len() as u8);
                        names.extend_from_slice(n);
                        at
                    }
                    None => 0xFFFF,
                };

                entries.write_u16::<BigEndian>(item.id).unwrap();
                entries.write_u16::<BigEndian>(name_offset).unwrap();
                entries.write_u8(0).unwrap();
                entries.write_u8((payload_offset >> 16) as u8).unwrap();
                entries.write_u16::<BigEndian>(payload_offset as u16).unwrap();
                entries.write_u32::<BigEndian>(0).unwrap();
            }
        }

        let mut type_list = Vec::new();
        type_list.write_u16::<BigEndian>((self.types.len() as u16).wrapping_sub(1)).unwrap();
        let mut item_table = 2 + 8 * self.types.len();
        for (tag, items) in &self.types {
            type_list.extend_from_slice(tag);
            type_list.write_u16::<BigEndian>((items.len() as u16).wrapping_sub(1)).unwrap();
            type_list.write_u16::<BigEndian>(item_table as u16).unwrap();
            item_table += 12 * items.len();
        }
        type_list.extend_from_slice(&entries);

        (data, type_list, names)
    }
}
