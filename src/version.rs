//! Version information resource building.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/menurc/vs-versioninfo> for more information.

use std::{mem::size_of, string::String, vec::Vec};

use ahash::RandomState;
use indexmap::IndexMap;
use zerocopy::IntoBytes;

use crate::{constants::*, errors::*, types::*, util::*};

/// File flags of the fixed file info block.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FileFlags {
    pub debug:         bool,
    pub patched:       bool,
    pub prerelease:    bool,
    pub private_build: bool,
    pub special_build: bool,
}

impl FileFlags {
    fn bits(self) -> u32 {
        let mut bits = 0;
        if self.debug {
            bits |= VS_FF_DEBUG;
        }
        if self.patched {
            bits |= VS_FF_PATCHED;
        }
        if self.prerelease {
            bits |= VS_FF_PRERELEASE;
        }
        if self.private_build {
            bits |= VS_FF_PRIVATEBUILD;
        }
        if self.special_build {
            bits |= VS_FF_SPECIALBUILD;
        }
        bits
    }
}

/// Version information of the executable.
///
/// Fill in the version numbers and per-language strings, then embed it with
/// [`set_version_info`](crate::ResourceSet::set_version_info). One
/// `VS_VERSIONINFO` resource is produced per translation.
#[derive(Debug, Clone, Default)]
pub struct VersionInfo {
    pub file_version:    [u16; 4],
    pub product_version: [u16; 4],
    pub flags:           FileFlags,
    strings:             IndexMap<u16, IndexMap<String, String, RandomState>, RandomState>,
}

impl VersionInfo {
    /// Set a version string for a language.
    ///
    /// `key` is one of the predefined names ([`VS_PRODUCT_NAME`],
    /// [`VS_COMPANY_NAME`], ...) or any custom name.
    ///
    /// # Returns
    /// Returns an error if the key is empty, or the key or value contains a
    /// NUL character.
    pub fn set(
        &mut self, lang_id: u16, key: impl Into<String>, value: impl Into<String>,
    ) -> Result<(), VersionError> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            return Err(VersionError::EmptyKey);
        }
        if key.contains('\0') {
            return Err(VersionError::KeyContainsNul);
        }
        if value.contains('\0') {
            return Err(VersionError::ValueContainsNul);
        }
        self.strings.entry(lang_id).or_default().insert(key, value);
        Ok(())
    }

    /// Get a version string previously added with `set`.
    pub fn get(&self, lang_id: u16, key: &str) -> Option<&str> {
        self.strings.get(&lang_id)?.get(key).map(String::as_str)
    }

    /// Render one `VS_VERSIONINFO` blob per translation, sorted by language
    /// id. A version info without strings yields a single en-US translation.
    pub fn split_translations(&self) -> Vec<(u16, Vec<u8>)> {
        let mut langs: Vec<u16> = self.strings.keys().copied().collect();
        langs.sort_unstable();
        if langs.is_empty() {
            langs.push(LCID_DEFAULT);
        }
        langs.into_iter().map(|lang| (lang, self.build_translation(lang))).collect()
    }

    fn fixed_file_info(&self) -> FixedFileInfo {
        let fv = self.file_version;
        let pv = self.product_version;
        FixedFileInfo {
            file_version:    VersionU32 {
                major: (fv[0] as u32) << 16 | fv[1] as u32,
                minor: (fv[2] as u32) << 16 | fv[3] as u32,
            },
            product_version: VersionU32 {
                major: (pv[0] as u32) << 16 | pv[1] as u32,
                minor: (pv[2] as u32) << 16 | pv[3] as u32,
            },
            file_flags:      self.flags.bits(),
            ..FixedFileInfo::default()
        }
    }

    /// Header `length` of a block: the 32 bit aligned header and key,
    /// followed by `content` bytes of value data.
    fn block_length(key: &str, content: u32) -> u16 {
        (align_up(6 + utf16_len(key) as u32 * 2 + 2, 4) + content) as u16
    }

    /// Build the `VS_VERSIONINFO` structure for a single language.
    fn build_translation(&self, lang_id: u16) -> Vec<u8> {
        let mut keys: Vec<&String> =
            self.strings.get(&lang_id).map(|kv| kv.keys().collect()).unwrap_or_default();
        keys.sort_unstable();

        let mut strings = Vec::new();
        for key in keys {
            let value = &self.strings[&lang_id][key];
            let value_len = utf16_len(value) as u32;
            let mut string = Vec::new();
            string.extend(
                VersionHeader {
                    length:       Self::block_length(key, value_len * 2 + 2),
                    value_length: value_len as u16 + 1,
                    type_:        1,
                }
                .as_bytes(),
            );
            string.extend(utf16_nul_terminated(key));
            pad_to(&mut string, 4);
            string.extend(utf16_nul_terminated(value));
            pad_to(&mut string, 4);
            strings.extend(string);
        }

        let table_key = format!("{:04X}{:04X}", lang_id, CODE_PAGE_UTF16LE);
        let mut string_table = Vec::new();
        string_table.extend(
            VersionHeader {
                length:       Self::block_length(&table_key, strings.len() as u32),
                value_length: 0,
                type_:        1,
            }
            .as_bytes(),
        );
        string_table.extend(utf16_nul_terminated(&table_key));
        pad_to(&mut string_table, 4);
        string_table.extend(strings);

        let mut string_info = Vec::new();
        string_info.extend(
            VersionHeader {
                length:       Self::block_length("StringFileInfo", string_table.len() as u32),
                value_length: 0,
                type_:        1,
            }
            .as_bytes(),
        );
        string_info.extend(utf16_nul_terminated("StringFileInfo"));
        pad_to(&mut string_info, 4);
        string_info.extend(string_table);

        let mut var = Vec::new();
        var.extend(
            VersionHeader {
                length:       Self::block_length("Translation", 4),
                value_length: 4,
                type_:        0,
            }
            .as_bytes(),
        );
        var.extend(utf16_nul_terminated("Translation"));
        pad_to(&mut var, 4);
        var.extend(lang_id.to_le_bytes());
        var.extend(CODE_PAGE_UTF16LE.to_le_bytes());

        let mut var_info = Vec::new();
        var_info.extend(
            VersionHeader {
                length:       Self::block_length("VarFileInfo", var.len() as u32),
                value_length: 0,
                type_:        1,
            }
            .as_bytes(),
        );
        var_info.extend(utf16_nul_terminated("VarFileInfo"));
        pad_to(&mut var_info, 4);
        var_info.extend(var);

        let mut data = Vec::new();
        data.extend(
            VersionHeader {
                length:       (align_up(
                    Self::block_length("VS_VERSION_INFO", 0) as u32
                        + size_of::<FixedFileInfo>() as u32,
                    4,
                ) + string_info.len() as u32
                    + var_info.len() as u32) as u16,
                value_length: size_of::<FixedFileInfo>() as u16,
                type_:        0,
            }
            .as_bytes(),
        );
        data.extend(utf16_nul_terminated("VS_VERSION_INFO"));
        pad_to(&mut data, 4);
        data.extend(self.fixed_file_info().as_bytes());
        pad_to(&mut data, 4);
        data.extend(string_info);
        data.extend(var_info);

        data
    }
}
