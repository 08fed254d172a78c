use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use wavefront_loader::config::{Config, LoadOptions};
use wavefront_loader::foundation::logging;
use wavefront_loader::ObjLoader;

#[derive(Debug)]
struct InspectConfig {
    input: PathBuf,
    options: LoadOptions,
    dump_materials: bool,
}

fn main() -> Result<()> {
    let matches = Command::new("obj_inspect")
        .about("Decodes a Wavefront OBJ file and prints its mesh buckets and materials")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .help("OBJ file to decode")
                .required(true),
        )
        .arg(
            Arg::new("normals")
                .short('n')
                .long("normals")
                .help("Emit normals, synthesizing flat ones for faces without normal references")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load options from a .toml or .ron file"),
        )
        .arg(
            Arg::new("materials")
                .short('m')
                .long("materials")
                .help("Print the decoded materials as RON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    logging::init_with_level(if matches.get_flag("verbose") {
        logging::LevelFilter::Debug
    } else {
        logging::LevelFilter::Warn
    });

    let mut options = match matches.get_one::<String>("config") {
        Some(path) => LoadOptions::load_from_file(path)
            .with_context(|| format!("Failed to load options from {}", path))?,
        None => LoadOptions::default(),
    };
    if matches.get_flag("normals") {
        options.emit_normals = true;
    }

    let config = InspectConfig {
        input: matches
            .get_one::<String>("input")
            .map(PathBuf::from)
            .context("missing input file")?,
        options,
        dump_materials: matches.get_flag("materials"),
    };

    inspect(&config)
}

fn inspect(config: &InspectConfig) -> Result<()> {
    log::debug!("Inspecting with {:?}", config);

    let scene = ObjLoader::new(config.options)
        .load_obj(&config.input)
        .with_context(|| format!("Failed to decode {}", config.input.display()))?;

    println!("{}", config.input.display());
    println!(
        "   {} lines, {} faces, {} meshes, {} materials",
        scene.stats.lines,
        scene.stats.faces,
        scene.meshes.len(),
        scene.materials.len()
    );
    println!(
        "   {} positions, {} normals, {} texture coordinates",
        scene.stats.positions, scene.stats.normals, scene.stats.tex_coords
    );

    for (id, mesh) in &scene.meshes {
        let known = if scene.materials.contains_key(mesh.material()) { "" } else { " (undefined)" };
        println!(
            "   {id}: format {}, material {}{known}, {} vertices, stride {}, {} bytes",
            mesh.format(),
            mesh.material(),
            mesh.vertex_count(),
            mesh.layout().stride,
            mesh.as_bytes().len()
        );
    }

    if config.dump_materials {
        let dump = ron::ser::to_string_pretty(&scene.materials, ron::ser::PrettyConfig::default())
            .context("Failed to serialize materials")?;
        println!("{dump}");
    }

    Ok(())
}
