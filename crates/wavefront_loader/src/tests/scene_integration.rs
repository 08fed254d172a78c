//! Decoding OBJ and MTL files from disk

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;

use crate::assets::{FaceFormat, ObjError};
use crate::foundation::math::Vec3;
use crate::{LoadOptions, ObjLoader};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

fn cube_mtl() -> NamedTempFile {
    write_temp(
        r#"
# Two materials for the test scene
newmtl Red
Ka 0.1 0.0 0.0
Kd 0.8 0.0 0.0
Ks 0.5 0.5 0.5
Ns 96.0
Ni 1.0
d 1.0
illum 2

newmtl Glass
Kd 0.9 0.9 1.0
Ki 0.7 0.8 0.9
d 0.25
map_Kd glass.png
"#,
    )
}

#[test]
fn test_load_scene_with_materials() {
    let mtl = cube_mtl();
    let obj = write_temp(&format!(
        r#"
# quad split into two triangles plus a textured one
mtllib {}
o Quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0
usemtl Red
f 1//1 2//1 3//1
f 1//1 3//1 4//1
usemtl Glass
f 1/1/1 2/2/1 3/3/1
s 1
"#,
        mtl.path().display()
    ));

    let scene = ObjLoader::new(LoadOptions::default()).load_obj(obj.path()).unwrap();

    assert_eq!(scene.stats.faces, 3);
    assert_eq!(scene.materials.len(), 2);
    assert_eq!(scene.materials["Red"].illumination_model, 2);
    assert_eq!(scene.materials["Glass"].transmission_filter, Vec3::new(0.7, 0.8, 0.9));
    assert_eq!(scene.materials["Glass"].dissolve, 0.25);

    assert_eq!(scene.stats.positions, 4);
    assert_eq!(scene.stats.tex_coords, 3);
    assert_eq!(scene.stats.normals, 1);

    // Source normals are only written out when asked for
    let red = &scene.meshes["mesh-vtype3-materialRed"];
    assert_eq!(red.format(), FaceFormat::PositionNormal);
    assert_eq!(red.triangle_count(), 2);
    assert_eq!(red.layout().stride, 3);

    let glass = &scene.meshes["mesh-vtype2-materialGlass"];
    assert_eq!(glass.triangle_count(), 1);
    assert_eq!(glass.layout().stride, 5);
    assert_eq!(&glass.vertices()[5..10], &[1.0, 0.0, 0.0, 1.0, 0.0]);

    let scene = ObjLoader::new(LoadOptions::with_normals()).load_obj(obj.path()).unwrap();
    assert_eq!(scene.meshes["mesh-vtype3-materialRed"].layout().stride, 6);
    let glass = &scene.meshes["mesh-vtype2-materialGlass"];
    assert_eq!(glass.layout().stride, 8);
    assert_eq!(&glass.vertices()[8..16], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_normals_synthesized_per_triangle() {
    let obj = write_temp(
        "v 0 0 0\nv 2 0 0\nv 0 2 0\nv 0 0 2\nf 1 2 3\nf 1 3 4\n",
    );
    let scene = ObjLoader::new(LoadOptions::with_normals()).load_obj(obj.path()).unwrap();
    let mesh = &scene.meshes["mesh-vtype0-materialdefault"];
    let vertices = mesh.vertices();
    assert_eq!(mesh.vertex_count(), 6);

    // (2,0,0) x (0,2,0)
    for vertex in vertices[..18].chunks(6) {
        assert_relative_eq!(Vec3::new(vertex[3], vertex[4], vertex[5]), Vec3::new(0.0, 0.0, 4.0));
    }
    // (0,2,0) x (0,0,2)
    for vertex in vertices[18..].chunks(6) {
        assert_relative_eq!(Vec3::new(vertex[3], vertex[4], vertex[5]), Vec3::new(4.0, 0.0, 0.0));
    }
}

#[test]
fn test_usemtl_without_library_keeps_name() {
    let obj = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Phantom\nf 1 2 3\n");
    let scene = ObjLoader::default().load_obj(obj.path()).unwrap();
    assert!(scene.materials.is_empty());
    assert_eq!(scene.meshes["mesh-vtype0-materialPhantom"].material(), "Phantom");
}

#[test]
fn test_missing_obj_file() {
    let err = ObjLoader::default().load_obj("no/such/model.obj").unwrap_err();
    assert!(matches!(err, ObjError::Io { .. }));
}

#[test]
fn test_missing_mtllib_aborts() {
    let obj = write_temp("mtllib no/such/library.mtl\nv 0 0 0\n");
    let err = ObjLoader::default().load_obj(obj.path()).unwrap_err();
    match err {
        ObjError::Io { path, .. } => assert!(path.ends_with("library.mtl")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_error_location_names_file() {
    let obj = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 3 1\n");
    let err = ObjLoader::default().load_obj(obj.path()).unwrap_err();
    let at = err.location().unwrap();
    assert_eq!(at.line, 5);
    assert_eq!(at.file, obj.path().to_string_lossy());
}

#[test]
fn test_repeated_loads_are_identical() {
    let mtl = cube_mtl();
    let obj = write_temp(&format!(
        "mtllib {}\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Glass\nf 1 2 3\nusemtl Red\nf 1 2 3\n",
        mtl.path().display()
    ));
    let loader = ObjLoader::new(LoadOptions::with_normals());
    let first = loader.load_obj(obj.path()).unwrap();
    let second = loader.load_obj(obj.path()).unwrap();

    assert_eq!(first.meshes, second.meshes);
    assert_eq!(first.materials, second.materials);
    assert_eq!(first.stats, second.stats);
    assert_eq!(
        first.meshes.keys().collect::<Vec<_>>(),
        vec!["mesh-vtype0-materialGlass", "mesh-vtype0-materialRed"]
    );
}
