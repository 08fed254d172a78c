//! Asset decoding: OBJ geometry and MTL material libraries

pub mod attributes;
pub mod error;
pub mod face;
pub mod materials;
pub mod mesh;
pub mod obj_loader;
mod numeric;
mod text;

pub use attributes::{AttributeArrays, AttributeKind};
pub use error::{Location, ObjError};
pub use face::{FaceFormat, FaceVertex, VertexLayout};
pub use materials::{
    FileMaterialSource, InMemoryMaterialSource, Material, MaterialMap, MaterialSource, MtlParser,
};
pub use mesh::{MeshBucket, MeshMap, DEFAULT_MATERIAL};
pub use obj_loader::{LoadStats, ObjLoader, ObjScene};
