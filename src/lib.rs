//! Windows **rsrc** **obj**ect builder.
//!
//! Produces a linkable COFF object file carrying the resource section of a
//! Windows executable: icons, cursors, manifests, version information and
//! arbitrary typed data.
//!
//! Create an empty [`ResourceSet`], add resources with [`ResourceSet::set`]
//! and the convenience setters, then call [`ResourceSet::write_object`] to
//! produce an object file a PE linker will embed into the final image.
//!
//! ```no_run
//! use rsrcobj::{Arch, Identifier, ResourceSet, constants::RT_RCDATA};
//!
//! let mut rs = ResourceSet::default();
//! rs.set(RT_RCDATA, Identifier::Name("MYDATA".into()), 0, b"some data".to_vec())?;
//! rs.write_object(std::fs::File::create("rsrc_windows_amd64.syso")?, Arch::Amd64)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub(crate) mod errors;
pub(crate) mod icon;
pub(crate) mod manifest;
pub(crate) mod object;
pub(crate) mod resource;
pub(crate) mod util;
pub(crate) mod version;

pub mod constants;
pub mod types;

pub use crate::{errors::*, icon::*, manifest::*, object::*, resource::*, version::*};
