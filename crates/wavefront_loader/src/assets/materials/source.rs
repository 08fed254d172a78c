//! Where `mtllib` names are read from

use std::collections::HashMap;
use std::io;

use super::mtl_parser::{MaterialMap, MtlParser};
use crate::assets::error::ObjError;

/// Resolves a material library name and parses it into `materials`.
///
/// Called synchronously for each path on an `mtllib` line; any error aborts
/// the enclosing geometry decode unchanged.
pub trait MaterialSource {
    /// Load library `name` into `materials`
    fn load_library(&mut self, name: &str, materials: &mut MaterialMap) -> Result<(), ObjError>;
}

/// Opens library paths as given, relative to the process working directory
#[derive(Debug, Default, Clone, Copy)]
pub struct FileMaterialSource;

impl MaterialSource for FileMaterialSource {
    fn load_library(&mut self, name: &str, materials: &mut MaterialMap) -> Result<(), ObjError> {
        MtlParser::load_mtl(name, materials)
    }
}

/// Serves library text from memory, keyed by the name used on `mtllib`
#[derive(Debug, Default, Clone)]
pub struct InMemoryMaterialSource {
    libraries: HashMap<String, String>,
}

impl InMemoryMaterialSource {
    /// Empty source; every lookup fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Register library text under `name`
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.libraries.insert(name.into(), contents.into());
    }

    /// Builder form of [`Self::insert`]
    #[must_use]
    pub fn with_library(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }
}

impl MaterialSource for InMemoryMaterialSource {
    fn load_library(&mut self, name: &str, materials: &mut MaterialMap) -> Result<(), ObjError> {
        let contents = self.libraries.get(name).ok_or_else(|| {
            ObjError::io(
                name,
                io::Error::new(io::ErrorKind::NotFound, "material library not registered"),
            )
        })?;
        log::debug!("Loading in-memory material library {}", name);
        MtlParser::parse_reader(contents.as_bytes(), name, materials)
    }
}
