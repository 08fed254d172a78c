//! # Wavefront Loader
//!
//! Decodes Wavefront OBJ geometry and its MTL material libraries into
//! interleaved, upload-ready vertex buffers and material records.
//!
//! ## Features
//!
//! - **Triangle faces** in all four index layouts (`v`, `v/vt`, `v/vt/vn`, `v//vn`)
//! - **Flat normal synthesis** for faces without normal references
//! - **Mesh buckets** grouped by face layout and active material
//! - **MTL parsing** of Phong scalar and color properties
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavefront_loader::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = ObjLoader::new(LoadOptions::with_normals());
//!     let scene = loader.load_obj("models/teapot.obj")?;
//!     for (id, mesh) in &scene.meshes {
//!         println!("{id}: {} triangles", mesh.triangle_count());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;

#[cfg(test)]
mod tests;

pub use assets::{ObjError, ObjLoader, ObjScene};
pub use config::LoadOptions;

/// Common imports for loader users
pub mod prelude {
    pub use crate::{
        assets::{
            FaceFormat, Material, MaterialMap, MaterialSource, FileMaterialSource,
            InMemoryMaterialSource, MeshBucket, MeshMap, MtlParser, ObjError, ObjLoader,
            ObjScene, VertexLayout,
        },
        config::{Config, LoadOptions},
        foundation::math::{Vec2, Vec3},
    };
}
