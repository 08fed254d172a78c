//! OBJ file loader for 3D models
//!
//! Decodes `v`, `vn`, `vt`, `f`, `usemtl` and `mtllib` records into mesh
//! buckets of interleaved triangle data. Faces must be triangles; every other
//! keyword is skipped with a single warning per decode.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::attributes::AttributeArrays;
use super::error::{LineRef, ObjError};
use super::face::{trim_token, FaceFormat, FaceVertex};
use super::materials::{FileMaterialSource, MaterialMap, MaterialSource};
use super::mesh::{interleave, Corner, MeshBucket, MeshMap, DEFAULT_MATERIAL};
use super::numeric::{parse_vec2, parse_vec3};
use super::text::for_each_line;
use crate::config::LoadOptions;
use crate::foundation::math::{flat_normal, Vec2, Vec3};

/// Counters gathered while decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, blank lines included
    pub lines: usize,
    /// Face records accepted
    pub faces: usize,
    /// `v` records read
    pub positions: usize,
    /// `vn` records read
    pub normals: usize,
    /// `vt` records read
    pub tex_coords: usize,
}

/// Everything decoded from one OBJ file and the libraries it references
#[derive(Debug, Clone, Default)]
pub struct ObjScene {
    /// Mesh buckets keyed by [`MeshBucket::id`]
    pub meshes: MeshMap,
    /// Materials from every `mtllib`
    pub materials: MaterialMap,
    /// Decode counters
    pub stats: LoadStats,
}

/// OBJ decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader {
    options: LoadOptions,
}

impl ObjLoader {
    /// Create a loader with the given options
    pub const fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub const fn options(&self) -> LoadOptions {
        self.options
    }

    /// Load an OBJ file. `mtllib` paths are opened relative to the working
    /// directory.
    pub fn load_obj<P: AsRef<Path>>(&self, path: P) -> Result<ObjScene, ObjError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ObjError::io(path, e))?;
        self.load_from_reader(
            BufReader::new(file),
            &path.to_string_lossy(),
            &mut FileMaterialSource,
        )
    }

    /// Decode OBJ text held in memory
    pub fn parse_str<S>(&self, contents: &str, materials: &mut S) -> Result<ObjScene, ObjError>
    where
        S: MaterialSource + ?Sized,
    {
        self.load_from_reader(contents.as_bytes(), "<memory>", materials)
    }

    /// Decode OBJ records from `reader`.
    ///
    /// `origin` names the source in error locations; `materials` resolves
    /// `mtllib` records.
    pub fn load_from_reader<R, S>(
        &self,
        reader: R,
        origin: &str,
        materials: &mut S,
    ) -> Result<ObjScene, ObjError>
    where
        R: BufRead,
        S: MaterialSource + ?Sized,
    {
        log::debug!("Decoding OBJ {} with {:?}", origin, self.options());
        let mut context = DecodeContext::new(origin, self.options, materials);

        for_each_line(reader, origin, |_, line| context.process_line(line))?;

        let scene = context.finish();
        log::debug!(
            "Decoded {}: {} lines, {} faces, {} meshes, {} materials",
            origin,
            scene.stats.lines,
            scene.stats.faces,
            scene.meshes.len(),
            scene.materials.len()
        );
        Ok(scene)
    }
}

/// Per-call decode state
struct DecodeContext<'a, S: ?Sized> {
    origin: &'a str,
    options: LoadOptions,
    source: &'a mut S,
    attributes: AttributeArrays,
    meshes: MeshMap,
    materials: MaterialMap,
    current_material: String,
    stats: LoadStats,
    warned: HashSet<String>,
}

impl<'a, S: MaterialSource + ?Sized> DecodeContext<'a, S> {
    fn new(origin: &'a str, options: LoadOptions, source: &'a mut S) -> Self {
        Self {
            origin,
            options,
            source,
            attributes: AttributeArrays::new(),
            meshes: MeshMap::new(),
            materials: MaterialMap::new(),
            current_material: DEFAULT_MATERIAL.to_string(),
            stats: LoadStats::default(),
            warned: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str) -> Result<(), ObjError> {
        self.stats.lines += 1;
        let at = LineRef { file: self.origin, line: self.stats.lines };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, fields)) = fields.split_first() else {
            return Ok(());
        };

        match keyword {
            // Only a bare `#` opens a comment; `#foo` is an unknown keyword
            "#" => {}
            "v" => self.attributes.push_position(parse_vec3(keyword, fields, at)?),
            "vn" => self.attributes.push_normal(parse_vec3(keyword, fields, at)?),
            "vt" => self.attributes.push_tex_coord(parse_vec2(keyword, fields, at)?),
            "f" => self.face(fields, at)?,
            "usemtl" => self.use_material(fields),
            "mtllib" => {
                for path in fields {
                    self.source.load_library(path, &mut self.materials)?;
                }
            }
            _ => {
                self.warn_unsupported(keyword, at);
            }
        }
        Ok(())
    }

    fn use_material(&mut self, fields: &[&str]) {
        self.current_material = match fields {
            [name] if !name.is_empty() => (*name).to_string(),
            _ => DEFAULT_MATERIAL.to_string(),
        };
    }

    /// Log the first occurrence of an unsupported keyword. Returns whether a
    /// warning was emitted.
    fn warn_unsupported(&mut self, keyword: &str, at: LineRef<'_>) -> bool {
        if self.warned.contains(keyword) {
            return false;
        }
        log::warn!("{}: keyword '{}' is not supported, ignoring", at.locate(), keyword);
        self.warned.insert(keyword.to_string());
        true
    }

    fn face(&mut self, tokens: &[&str], at: LineRef<'_>) -> Result<(), ObjError> {
        match tokens.len() {
            count if count < 3 => {
                return Err(ObjError::FaceTooShort { at: at.locate(), count });
            }
            3 => {}
            count => {
                return Err(ObjError::UnsupportedFacePolygon { at: at.locate(), count });
            }
        }

        let format = FaceFormat::classify(trim_token(tokens[0])).ok_or_else(|| {
            ObjError::UndefinedFaceFormat {
                at: at.locate(),
                token: tokens[0].to_string(),
            }
        })?;

        let refs = tokens
            .iter()
            .map(|raw| {
                let token = trim_token(raw);
                if FaceFormat::classify(token) != Some(format) {
                    return Err(ObjError::InconsistentFaceFormat {
                        at: at.locate(),
                        expected: format,
                        token: (*raw).to_string(),
                    });
                }
                format.decode(token, at)
            })
            .collect::<Result<Vec<FaceVertex>, _>>()?;

        let corners = self.resolve_triangle(format, &refs, at)?;
        let vertices = interleave(&corners, format.layout(self.options.emit_normals));

        if !vertices.is_empty() {
            let emit_normals = self.options.emit_normals;
            self.meshes
                .entry(MeshBucket::id_for(format, &self.current_material))
                .or_insert_with(|| MeshBucket::new(format, self.current_material.clone(), emit_normals))
                .extend(&vertices);
        }
        self.stats.faces += 1;
        Ok(())
    }

    /// Look up every attribute of the triangle before anything is written
    fn resolve_triangle(
        &self,
        format: FaceFormat,
        refs: &[FaceVertex],
        at: LineRef<'_>,
    ) -> Result<Vec<Corner>, ObjError> {
        let positions = refs
            .iter()
            .map(|r| self.attributes.position(r.position, at))
            .collect::<Result<Vec<Vec3>, _>>()?;

        let normals: Vec<Option<Vec3>> = if format.has_normal() {
            // Referenced normals are validated even when they are not emitted
            let resolved = refs
                .iter()
                .map(|r| r.normal.map(|i| self.attributes.normal(i, at)).transpose())
                .collect::<Result<Vec<_>, _>>()?;
            if self.options.emit_normals {
                resolved
            } else {
                vec![None; resolved.len()]
            }
        } else if self.options.emit_normals {
            let n = flat_normal(&positions[0], &positions[1], &positions[2]);
            vec![Some(n); positions.len()]
        } else {
            vec![None; positions.len()]
        };

        let tex_coords = refs
            .iter()
            .map(|r| r.uv.map(|i| self.attributes.tex_coord(i, at)).transpose())
            .collect::<Result<Vec<Option<Vec2>>, _>>()?;

        Ok(positions
            .into_iter()
            .zip(tex_coords)
            .zip(normals)
            .map(|((position, tex_coord), normal)| Corner { position, tex_coord, normal })
            .collect())
    }

    fn finish(self) -> ObjScene {
        ObjScene {
            meshes: self.meshes,
            materials: self.materials,
            stats: LoadStats {
                positions: self.attributes.position_count(),
                normals: self.attributes.normal_count(),
                tex_coords: self.attributes.tex_coord_count(),
                ..self.stats
            },
        }
    }
}
