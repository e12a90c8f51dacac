//! Resource set composition and serialization of the `.rsrc` section.
//! The resource section contains the resource directory and the resource data.
//! See <https://learn.microsoft.com/en-us/windows/win32/debug/pe-format#the-rsrc-section> for more information.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    io::{self, Write},
    string::String,
    vec::Vec,
};

use ahash::RandomState;
use debug_ignore::DebugIgnore;
use indexmap::IndexMap;
use log::trace;
use zerocopy::IntoBytes;

use crate::{constants::*, errors::*, icon::*, manifest::*, object::*, types::*, util::*, version::*};

/// Resource identifier, either a 16 bit ordinal or a unicode name.
///
/// Ordinals start from 1. Names must not be empty and must not contain NUL
/// characters. Name comparison is case-insensitive (ASCII case fold), the
/// original spelling is kept and written to the string pool unchanged.
#[derive(Debug, Clone)]
pub enum Identifier {
    Id(u16),
    Name(String),
}

impl From<u16> for Identifier {
    fn from(id: u16) -> Self { Identifier::Id(id) }
}
impl From<&str> for Identifier {
    fn from(name: &str) -> Self { Identifier::Name(name.into()) }
}
impl From<String> for Identifier {
    fn from(name: String) -> Self { Identifier::Name(name) }
}

/// ASCII uppercase fold of a UTF-16 code unit.
fn fold_unit(unit: u16) -> u16 {
    if (b'a' as u16..=b'z' as u16).contains(&unit) { unit - 32 } else { unit }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::Id(a), Identifier::Id(b)) => a == b,
            (Identifier::Name(a), Identifier::Name(b)) => {
                a.encode_utf16().map(fold_unit).eq(b.encode_utf16().map(fold_unit))
            }
            _ => false,
        }
    }
}
impl Eq for Identifier {}
impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Identifier::Id(id) => {
                state.write_u8(0);
                state.write_u16(*id);
            }
            Identifier::Name(name) => {
                state.write_u8(1);
                for unit in name.encode_utf16() {
                    state.write_u16(fold_unit(unit));
                }
            }
        }
    }
}

impl Identifier {
    fn check(&self) -> Result<(), ResourceError> {
        match self {
            Identifier::Id(0) => Err(ResourceError::ZeroId),
            Identifier::Name(name) if name.is_empty() => Err(ResourceError::EmptyName),
            Identifier::Name(name) if name.contains('\0') => Err(ResourceError::NameContainsNul),
            _ => Ok(()),
        }
    }

    fn is_name(&self) -> bool { matches!(self, Identifier::Name(_)) }

    /// String pool entry for this identifier, empty for ordinals.
    fn string_data(&self) -> Vec<u8> {
        match self {
            Identifier::Id(_) => Vec::new(),
            Identifier::Name(name) => {
                let mut data = Vec::with_capacity(name.len() * 2 + 2);
                data.extend_from_slice(&(utf16_len(name) as u16).to_le_bytes());
                data.extend(name.encode_utf16().flat_map(u16::to_le_bytes));
                data
            }
        }
    }
}

/// Emission order of directory entries: named entries first, in UTF-16 code
/// unit order, then ordinal entries in ascending order.
fn emission_cmp(a: &Identifier, b: &Identifier) -> Ordering {
    match (a, b) {
        (Identifier::Name(a), Identifier::Name(b)) => a.encode_utf16().cmp(b.encode_utf16()),
        (Identifier::Name(_), Identifier::Id(_)) => Ordering::Less,
        (Identifier::Id(_), Identifier::Name(_)) => Ordering::Greater,
        (Identifier::Id(a), Identifier::Id(b)) => a.cmp(b),
    }
}

/// Resource data for a single language.
#[derive(Debug, Default)]
struct DataEntry {
    data: DebugIgnore<Vec<u8>>,
}

/// Translations of a single resource, keyed by language id.
#[derive(Debug, Default)]
struct ResourceEntry {
    data: IndexMap<u16, DataEntry, RandomState>,
}
impl ResourceEntry {
    fn ordered_data(&self) -> Vec<(u16, &DataEntry)> {
        let mut entries: Vec<_> = self.data.iter().map(|(&lang, entry)| (lang, entry)).collect();
        entries.sort_unstable_by_key(|&(lang, _)| lang);
        entries
    }
}

/// Resources of a single type, keyed by resource id.
#[derive(Debug, Default)]
struct TypeEntry {
    resources: IndexMap<Identifier, ResourceEntry, RandomState>,
}
impl TypeEntry {
    fn ordered_resources(&self) -> Vec<(&Identifier, &ResourceEntry)> {
        let mut entries: Vec<_> = self.resources.iter().collect();
        entries.sort_by(|a, b| emission_cmp(a.0, b.0));
        entries
    }
}

/// A set of resources to be compiled into a COFF object file.
///
/// Create an empty set, add resources with [`set`](ResourceSet::set) and the
/// convenience setters, then produce an object file with
/// [`write_object`](ResourceSet::write_object).
///
/// Resources are stored as a three level tree: type, then resource, then
/// language. Emission order is canonical and independent of insertion order.
#[derive(Debug, Default)]
pub struct ResourceSet {
    types:          IndexMap<Identifier, TypeEntry, RandomState>,
    last_icon_id:   u16,
    last_cursor_id: u16,
}

impl ResourceSet {
    /// Add or replace a resource.
    ///
    /// `type_id` is the resource type's identifier. It can be either a
    /// standard type number ([`RT_ICON`], [`RT_VERSION`], ...) or any type
    /// name. `res_id` is the resource's unique identifier for a given type.
    ///
    /// A resource can have different data depending on the user's locale, by
    /// calling `set` several times with the same `res_id` but a different
    /// `lang_id`. `lang_id` can be 0 (neutral) or any LCID from
    /// <https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-lcid>.
    ///
    /// The set takes ownership of `data`.
    ///
    /// # Returns
    /// Returns an error if an identifier is invalid. The set is unchanged in
    /// that case.
    pub fn set(
        &mut self, type_id: impl Into<Identifier>, res_id: impl Into<Identifier>, lang_id: u16,
        data: Vec<u8>,
    ) -> Result<(), ResourceError> {
        let type_id = type_id.into();
        let res_id = res_id.into();
        res_id.check()?;
        type_id.check()?;
        self.insert(type_id, res_id, lang_id, data);
        Ok(())
    }

    /// Get resource data previously added with `set`.
    ///
    /// # Returns
    /// Returns `None` if the resource (translated resource) was not found.
    pub fn get(
        &self, type_id: impl Into<Identifier>, res_id: impl Into<Identifier>, lang_id: u16,
    ) -> Option<&[u8]> {
        self.types
            .get(&type_id.into())?
            .resources
            .get(&res_id.into())?
            .data
            .get(&lang_id)
            .map(|entry| entry.data.as_slice())
    }

    /// Embed an application manifest at the conventional location
    /// (`RT_MANIFEST`, id 1, en-US).
    pub fn set_manifest(&mut self, manifest: &AppManifest) {
        self.insert(
            Identifier::Id(RT_MANIFEST),
            Identifier::Id(1),
            LCID_DEFAULT,
            manifest.to_xml().into_bytes(),
        );
    }

    /// Embed version information, one `VS_VERSIONINFO` resource per
    /// translation, at (`RT_VERSION`, id 1).
    pub fn set_version_info(&mut self, info: &VersionInfo) {
        for (lang_id, data) in info.split_translations() {
            self.insert(Identifier::Id(RT_VERSION), Identifier::Id(1), lang_id, data);
        }
    }

    /// Add an icon group for the neutral language.
    ///
    /// Each image of the icon is stored as a `RT_ICON` resource with an
    /// automatically assigned id, and the group directory referencing them is
    /// stored at (`RT_GROUP_ICON`, `res_id`).
    ///
    /// # Returns
    /// Returns an error if `res_id` is invalid. The set is unchanged in that
    /// case.
    pub fn set_icon(
        &mut self, res_id: impl Into<Identifier>, icon: &Icon,
    ) -> Result<(), ResourceError> {
        self.set_icon_translation(res_id, LCID_NEUTRAL, icon)
    }

    /// Add an icon group for a specific language.
    ///
    /// See [`set_icon`](ResourceSet::set_icon).
    pub fn set_icon_translation(
        &mut self, res_id: impl Into<Identifier>, lang_id: u16, icon: &Icon,
    ) -> Result<(), ResourceError> {
        let res_id = res_id.into();
        res_id.check()?;
        let first_id = self.last_icon_id.wrapping_add(1);
        for image in icon.images() {
            self.last_icon_id = self.last_icon_id.wrapping_add(1);
            self.insert(
                Identifier::Id(RT_ICON),
                Identifier::Id(self.last_icon_id),
                lang_id,
                image.data().to_vec(),
            );
        }
        self.insert(Identifier::Id(RT_GROUP_ICON), res_id, lang_id, icon.group_data(first_id));
        Ok(())
    }

    /// Add a cursor group for the neutral language.
    ///
    /// Each image of the cursor is stored as a `RT_CURSOR` resource with an
    /// automatically assigned id, and the group directory referencing them is
    /// stored at (`RT_GROUP_CURSOR`, `res_id`).
    ///
    /// # Returns
    /// Returns an error if `res_id` is invalid. The set is unchanged in that
    /// case.
    pub fn set_cursor(
        &mut self, res_id: impl Into<Identifier>, cursor: &Cursor,
    ) -> Result<(), ResourceError> {
        self.set_cursor_translation(res_id, LCID_NEUTRAL, cursor)
    }

    /// Add a cursor group for a specific language.
    ///
    /// See [`set_cursor`](ResourceSet::set_cursor).
    pub fn set_cursor_translation(
        &mut self, res_id: impl Into<Identifier>, lang_id: u16, cursor: &Cursor,
    ) -> Result<(), ResourceError> {
        let res_id = res_id.into();
        res_id.check()?;
        let first_id = self.last_cursor_id.wrapping_add(1);
        for image in cursor.images() {
            self.last_cursor_id = self.last_cursor_id.wrapping_add(1);
            self.insert(
                Identifier::Id(RT_CURSOR),
                Identifier::Id(self.last_cursor_id),
                lang_id,
                image.payload(),
            );
        }
        self.insert(Identifier::Id(RT_GROUP_CURSOR), res_id, lang_id, cursor.group_data(first_id));
        Ok(())
    }

    /// Returns the number of resources declared in the resource set.
    pub fn count(&self) -> usize {
        self.types
            .values()
            .flat_map(|entry| entry.resources.values())
            .map(|entry| entry.data.len())
            .sum()
    }

    /// Walk through the resources in the same order as they will be written.
    ///
    /// The callback takes the same parameters as [`set`](ResourceSet::set)
    /// and returns `true` to continue, `false` to stop.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&Identifier, &Identifier, u16, &[u8]) -> bool,
    {
        for type_ in self.ordered_tree().types {
            for resource in type_.resources {
                for (lang_id, entry) in resource.data {
                    if !f(type_.id, resource.id, lang_id, &entry.data) {
                        return;
                    }
                }
            }
        }
    }

    /// Walk through the resources of a certain type, in the same order as
    /// they will be written.
    ///
    /// The callback returns `true` to continue, `false` to stop.
    pub fn walk_type<F>(&self, type_id: impl Into<Identifier>, mut f: F)
    where
        F: FnMut(&Identifier, u16, &[u8]) -> bool,
    {
        let Some(entry) = self.types.get(&type_id.into()) else {
            return;
        };
        for (res_id, resource) in entry.ordered_resources() {
            for (lang_id, entry) in resource.ordered_data() {
                if !f(res_id, lang_id, &entry.data) {
                    return;
                }
            }
        }
    }

    /// Write a full COFF object file containing the resources into `w`.
    ///
    /// # Returns
    /// Returns an error when the sink fails. Output already written to the
    /// sink at that point should be discarded.
    pub fn write_object<W: Write>(&self, w: W, arch: Arch) -> Result<(), ObjectWriteError> {
        write_object(w, self, arch)
    }

    /// Create, or replace, an entry with known-valid identifiers.
    fn insert(&mut self, type_id: Identifier, res_id: Identifier, lang_id: u16, data: Vec<u8>) {
        self.types
            .entry(type_id)
            .or_default()
            .resources
            .entry(res_id)
            .or_default()
            .data
            .insert(lang_id, DataEntry { data: data.into() });
    }

    /// Snapshot of the tree in canonical emission order.
    pub(crate) fn ordered_tree(&self) -> OrderedTree<'_> {
        let mut types = Vec::with_capacity(self.types.len());
        let mut type_entries: Vec<_> = self.types.iter().collect();
        type_entries.sort_by(|a, b| emission_cmp(a.0, b.0));
        for (type_id, entry) in type_entries {
            let resources = entry
                .ordered_resources()
                .into_iter()
                .map(|(res_id, resource)| OrderedResource {
                    id:   res_id,
                    data: resource.ordered_data(),
                })
                .collect();
            types.push(OrderedType { id: type_id, resources });
        }
        OrderedTree { types }
    }
}

struct OrderedResource<'a> {
    id:   &'a Identifier,
    data: Vec<(u16, &'a DataEntry)>,
}

struct OrderedType<'a> {
    id:        &'a Identifier,
    resources: Vec<OrderedResource<'a>>,
}

/// Canonically ordered view of a [`ResourceSet`], the input to section
/// layout planning and serialization.
pub(crate) struct OrderedTree<'a> {
    types: Vec<OrderedType<'a>>,
}

/// Serialization order of the directory forest, interleaving tables and
/// their entries.
enum TableData {
    Table(ResourceDirectoryTable),
    Entry(ResourceDirectoryEntry),
}

/// Fully resolved layout of the `.rsrc` section.
///
/// The section consists of four regions: the directory forest, the data
/// description records, the unicode string pool and the 8 byte aligned raw
/// payload region. All offsets are section-relative.
pub(crate) struct SectionPlan {
    tables:                  Vec<TableData>,
    descriptions:            Vec<ResourceDataEntry>,
    strings:                 Vec<u8>,
    /// Zero padding between the string pool and the payload region.
    alignment:               u32,
    /// Section-relative offsets of the `data_rva` field of every data
    /// description record, in emission order. These become the relocation
    /// table of the object file.
    pub(crate) relocations:  Vec<u32>,
    /// Total section size including the padding of the last payload.
    pub(crate) section_size: u32,
}

fn directory_table<'a>(ids: impl Iterator<Item = &'a Identifier>) -> ResourceDirectoryTable {
    let mut table = ResourceDirectoryTable::default();
    for id in ids {
        if id.is_name() {
            table.number_of_name_entries += 1;
        } else {
            table.number_of_id_entries += 1;
        }
    }
    table
}

impl<'a> OrderedTree<'a> {
    /// Assign offsets to every table, entry, description record, pooled
    /// string and payload of the section.
    pub(crate) fn plan(&self) -> SectionPlan {
        // table offsets: preorder, each type subtree contiguous
        let mut type_offsets = Vec::with_capacity(self.types.len());
        let mut res_offsets: Vec<Vec<u32>> = Vec::with_capacity(self.types.len());
        let mut offset = 16 + 8 * self.types.len() as u32;
        let mut leaves = 0u32;
        for type_ in &self.types {
            type_offsets.push(offset);
            offset += 16 + 8 * type_.resources.len() as u32;
            let mut offsets = Vec::with_capacity(type_.resources.len());
            for resource in &type_.resources {
                offsets.push(offset);
                offset += 16 + 8 * resource.data.len() as u32;
                leaves += resource.data.len() as u32;
            }
            res_offsets.push(offsets);
        }
        let directory_size = offset;
        let descriptions_offset = directory_size;
        let strings_offset = descriptions_offset + 16 * leaves;

        // string pool: names are not deduplicated, every name key gets its
        // own entry
        let mut strings = Vec::new();
        let mut type_names = Vec::with_capacity(self.types.len());
        let mut res_names: Vec<Vec<u32>> = Vec::with_capacity(self.types.len());
        for type_ in &self.types {
            type_names.push(strings_offset + strings.len() as u32);
            strings.extend(type_.id.string_data());
        }
        for type_ in &self.types {
            let mut offsets = Vec::with_capacity(type_.resources.len());
            for resource in &type_.resources {
                offsets.push(strings_offset + strings.len() as u32);
                strings.extend(resource.id.string_data());
            }
            res_names.push(offsets);
        }
        let strings_end = strings_offset + strings.len() as u32;
        let data_offset = align_up(strings_end, 8);
        let alignment = data_offset - strings_end;

        let name_or_id = |id: &Identifier, string_offset: u32| match id {
            Identifier::Name(_) => string_offset | 0x80000000,
            Identifier::Id(id) => *id as u32,
        };

        // directory forest, description records and payload offsets, all in
        // one preorder pass
        let mut tables = Vec::new();
        let mut descriptions = Vec::with_capacity(leaves as usize);
        let mut relocations = Vec::with_capacity(leaves as usize);
        let mut data_offset = data_offset;

        tables.push(TableData::Table(directory_table(self.types.iter().map(|t| t.id))));
        for (index, type_) in self.types.iter().enumerate() {
            tables.push(TableData::Entry(ResourceDirectoryEntry {
                name_offset_or_integer_id:         name_or_id(type_.id, type_names[index]),
                data_entry_or_subdirectory_offset: type_offsets[index] | 0x80000000,
            }));
        }
        for (t, type_) in self.types.iter().enumerate() {
            tables.push(TableData::Table(directory_table(type_.resources.iter().map(|r| r.id))));
            for (r, resource) in type_.resources.iter().enumerate() {
                tables.push(TableData::Entry(ResourceDirectoryEntry {
                    name_offset_or_integer_id:         name_or_id(resource.id, res_names[t][r]),
                    data_entry_or_subdirectory_offset: res_offsets[t][r] | 0x80000000,
                }));
            }
            for resource in &type_.resources {
                tables.push(TableData::Table(ResourceDirectoryTable {
                    number_of_id_entries: resource.data.len() as u16,
                    ..ResourceDirectoryTable::default()
                }));
                for (lang_id, entry) in &resource.data {
                    let description_offset =
                        descriptions_offset + 16 * descriptions.len() as u32;
                    tables.push(TableData::Entry(ResourceDirectoryEntry {
                        name_offset_or_integer_id:         *lang_id as u32,
                        data_entry_or_subdirectory_offset: description_offset,
                    }));
                    relocations.push(description_offset);
                    descriptions.push(ResourceDataEntry {
                        data_rva: data_offset,
                        size:     entry.data.len() as u32,
                        codepage: 0,
                        reserved: 0,
                    });
                    data_offset = align_up(data_offset + entry.data.len() as u32, 8);
                }
            }
        }

        trace!(
            "planned resource section: {} tables and entries, {} data entries, {} string bytes, {} total bytes",
            tables.len(),
            leaves,
            strings.len(),
            data_offset
        );
        SectionPlan {
            tables,
            descriptions,
            strings,
            alignment,
            relocations,
            section_size: data_offset,
        }
    }

    /// Serialize the planned section into `w`, region by region.
    pub(crate) fn write_section<W: Write>(&self, w: &mut W, plan: &SectionPlan) -> io::Result<()> {
        const PADDING: [u8; 8] = [0; 8];
        for data in &plan.tables {
            match data {
                TableData::Table(table) => w.write_all(table.as_bytes())?,
                TableData::Entry(entry) => w.write_all(entry.as_bytes())?,
            }
        }
        for description in &plan.descriptions {
            w.write_all(description.as_bytes())?;
        }
        w.write_all(&plan.strings)?;
        w.write_all(&PADDING[..plan.alignment as usize])?;
        for type_ in &self.types {
            for resource in &type_.resources {
                for (_, entry) in &resource.data {
                    w.write_all(&entry.data)?;
                    let length = entry.data.len() as u32;
                    let padding = (align_up(length, 8) - length) as usize;
                    w.write_all(&PADDING[..padding])?;
                }
            }
        }
        Ok(())
    }
}
