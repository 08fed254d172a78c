//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into structured material records. Recognized
//! keywords are `newmtl`, `Ns`, `Ni`, `d`, `illum`, `Ka`, `Kd`, `Ks`, `Ke`
//! and `Ki`; anything else is skipped silently.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::assets::error::{LineRef, ObjError};
use crate::assets::numeric::{expect_arity, parse_scalar, parse_vec3};
use crate::assets::text::for_each_line;
use crate::foundation::math::Vec3;

/// Materials keyed by `newmtl` name; a later definition replaces an earlier one
pub type MaterialMap = BTreeMap<String, Material>;

/// Parsed MTL material (Wavefront Phong model).
///
/// Properties missing from the file stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Specular exponent (Ns)
    pub specular_exponent: f32,
    /// Optical density / index of refraction (Ni)
    pub optical_density: f32,
    /// Dissolve/opacity (d)
    pub dissolve: f32,
    /// Illumination model (illum)
    pub illumination_model: i32,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Emission color (Ke)
    pub emission: Vec3,
    /// Transmission filter (Ki)
    pub transmission_filter: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            specular_exponent: 0.0,
            optical_density: 0.0,
            dissolve: 0.0,
            illumination_model: 0,
            ambient: Vec3::zeros(),
            diffuse: Vec3::zeros(),
            specular: Vec3::zeros(),
            emission: Vec3::zeros(),
            transmission_filter: Vec3::zeros(),
        }
    }
}

impl Material {
    /// Zeroed material with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text into a fresh map
    pub fn parse(contents: &str) -> Result<MaterialMap, ObjError> {
        let mut materials = MaterialMap::new();
        Self::parse_reader(contents.as_bytes(), "<memory>", &mut materials)?;
        Ok(materials)
    }

    /// Open `path` (relative to the working directory) and parse it into `materials`
    pub fn load_mtl(path: impl AsRef<Path>, materials: &mut MaterialMap) -> Result<(), ObjError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ObjError::io(path, e))?;
        log::debug!("Loading material library {:?}", path);
        Self::parse_reader(BufReader::new(file), &path.to_string_lossy(), materials)
    }

    /// Parse MTL records from `reader` into `materials`.
    ///
    /// `origin` names the source in error locations. A `newmtl` registers its
    /// record immediately, so a later failure still leaves it in `materials`.
    pub fn parse_reader<R: BufRead>(
        reader: R,
        origin: &str,
        materials: &mut MaterialMap,
    ) -> Result<(), ObjError> {
        let mut current: Option<String> = None;

        for_each_line(reader, origin, |line, text| {
            let at = LineRef { file: origin, line };

            let fields: Vec<&str> = text.split_whitespace().collect();
            let Some((&keyword, fields)) = fields.split_first() else {
                return Ok(());
            };

            match keyword {
                "newmtl" => {
                    expect_arity(keyword, fields, 1, at)?;
                    let name = fields[0].to_string();
                    materials.insert(name.clone(), Material::named(name.clone()));
                    current = Some(name);
                }
                "Ns" | "Ni" | "d" | "illum" | "Ka" | "Kd" | "Ks" | "Ke" | "Ki" => {
                    let material = current
                        .as_deref()
                        .and_then(|name| materials.get_mut(name))
                        .ok_or_else(|| ObjError::NoActiveMaterial {
                            at: at.locate(),
                            keyword: keyword.to_string(),
                        })?;
                    Self::apply_property(material, keyword, fields, at)?;
                }
                // Comments and unknown commands are ignored silently
                _ => {}
            }
            Ok(())
        })
    }

    fn apply_property(
        material: &mut Material,
        keyword: &str,
        fields: &[&str],
        at: LineRef<'_>,
    ) -> Result<(), ObjError> {
        match keyword {
            "Ns" => material.specular_exponent = parse_scalar(keyword, fields, at)?,
            "Ni" => material.optical_density = parse_scalar(keyword, fields, at)?,
            "d" => material.dissolve = parse_scalar(keyword, fields, at)?,
            "illum" => material.illumination_model = parse_scalar(keyword, fields, at)?,
            "Ka" => material.ambient = parse_vec3(keyword, fields, at)?,
            "Kd" => material.diffuse = parse_vec3(keyword, fields, at)?,
            "Ks" => material.specular = parse_vec3(keyword, fields, at)?,
            "Ke" => material.emission = parse_vec3(keyword, fields, at)?,
            "Ki" => material.transmission_filter = parse_vec3(keyword, fields, at)?,
            _ => {}
        }
        Ok(())
    }
}
