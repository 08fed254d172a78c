//! Material library subsystem
//!
//! `mtllib` records are resolved through a [`MaterialSource`] and parsed by
//! [`MtlParser`] into the shared [`MaterialMap`].

pub mod mtl_parser;
pub mod source;

pub use mtl_parser::{Material, MaterialMap, MtlParser};
pub use source::{FileMaterialSource, InMemoryMaterialSource, MaterialSource};
