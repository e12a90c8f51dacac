//! COFF object file assembly.
//!
//! Wraps a serialized `.rsrc` section into a relocatable object that a PE
//! linker accepts: file header, one section header, the section body, one
//! relocation per resource data entry, a two-entry symbol table and an empty
//! string table.
//! See <https://learn.microsoft.com/en-us/windows/win32/debug/pe-format> for more information.

use std::{fmt, io::Write, str::FromStr};

use log::debug;
use zerocopy::IntoBytes;

use crate::{constants::*, errors::*, resource::*, types::*};

/// Target architecture of the object file.
///
/// The conventional target tag is available through `Display` and
/// [`FromStr`], e.g. for naming output files `rsrc_windows_amd64.syso`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Arch {
    I386,
    Amd64,
    Arm,
    Arm64,
}

impl Arch {
    /// Machine type field of the COFF file header.
    pub const fn machine(self) -> u16 {
        match self {
            Arch::I386 => IMAGE_FILE_MACHINE_I386,
            Arch::Amd64 => IMAGE_FILE_MACHINE_AMD64,
            Arch::Arm => IMAGE_FILE_MACHINE_ARMNT,
            Arch::Arm64 => IMAGE_FILE_MACHINE_ARM64,
        }
    }

    /// Section-relative 32 bit address relocation type (`DIR32NB` /
    /// `ADDR32NB`).
    pub(crate) const fn relocation_type(self) -> u16 {
        match self {
            Arch::I386 => IMAGE_REL_I386_DIR32NB,
            Arch::Amd64 => IMAGE_REL_AMD64_ADDR32NB,
            Arch::Arm => IMAGE_REL_ARM_ADDR32NB,
            Arch::Arm64 => IMAGE_REL_ARM64_ADDR32NB,
        }
    }

    /// Conventional target tag: `386`, `amd64`, `arm` or `arm64`.
    pub const fn tag(self) -> &'static str {
        match self {
            Arch::I386 => "386",
            Arch::Amd64 => "amd64",
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.tag()) }
}

impl FromStr for Arch {
    type Err = ObjectWriteError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "386" => Ok(Arch::I386),
            "amd64" => Ok(Arch::Amd64),
            "arm" => Ok(Arch::Arm),
            "arm64" => Ok(Arch::Arm64),
            _ => Err(ObjectWriteError::UnknownArch),
        }
    }
}

const SECTION_NAME: [u8; 8] = *b".rsrc\0\0\0";
/// File header plus one section header.
const HEADERS_SIZE: u32 = 20 + 40;

/// Write a full object file containing the resource set into `w`.
pub(crate) fn write_object<W: Write>(
    mut w: W, rs: &ResourceSet, arch: Arch,
) -> Result<(), ObjectWriteError> {
    let tree = rs.ordered_tree();
    let plan = tree.plan();
    let relocation_count = plan.relocations.len() as u32;
    let symbol_table_offset = HEADERS_SIZE + plan.section_size + 10 * relocation_count;
    debug!(
        "writing {} object: section size {:#x?}, {} relocations, symbol table at {:#x?}",
        arch, plan.section_size, relocation_count, symbol_table_offset
    );

    let file_header = CoffHeader {
        machine:                 arch.machine(),
        number_of_sections:      1,
        time_date_stamp:         0,
        pointer_to_symbol_table: symbol_table_offset,
        number_of_symbols:       2,
        size_of_optional_header: 0,
        characteristics:         IMAGE_FILE_LINE_NUMS_STRIPPED
            | IMAGE_FILE_LOCAL_SYMS_STRIPPED
            | IMAGE_FILE_32BIT_MACHINE,
    };
    w.write_all(file_header.as_bytes())?;

    let section_header = SectionHeader {
        name:                   u64::from_le_bytes(SECTION_NAME),
        virtual_size:           plan.section_size,
        virtual_address:        0,
        size_of_raw_data:       plan.section_size,
        pointer_to_raw_data:    HEADERS_SIZE,
        pointer_to_relocations: if relocation_count > 0 {
            HEADERS_SIZE + plan.section_size
        } else {
            0
        },
        pointer_to_linenumbers: 0,
        number_of_relocations:  relocation_count as u16,
        number_of_linenumbers:  0,
        characteristics:        IMAGE_SCN_CNT_INITIALIZED_DATA
            | IMAGE_SCN_MEM_READ
            | IMAGE_SCN_ALIGN_8BYTES,
    };
    w.write_all(section_header.as_bytes())?;

    tree.write_section(&mut w, &plan)?;

    for &offset in &plan.relocations {
        let relocation = CoffRelocation {
            virtual_address:    offset,
            symbol_table_index: 0,
            type_:              arch.relocation_type(),
        };
        w.write_all(relocation.as_bytes())?;
    }

    let symbol = CoffSymbol {
        name:                  SECTION_NAME,
        value:                 0,
        section_number:        1,
        type_:                 0,
        storage_class:         IMAGE_SYM_CLASS_STATIC,
        number_of_aux_symbols: 1,
    };
    w.write_all(symbol.as_bytes())?;
    let aux = CoffAuxSectionSymbol {
        length: plan.section_size,
        number_of_relocations: relocation_count as u16,
        ..CoffAuxSectionSymbol::default()
    };
    w.write_all(aux.as_bytes())?;

    // string table: only its own length field
    w.write_all(&4u32.to_le_bytes())?;

    Ok(())
}
