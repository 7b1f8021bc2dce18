//! Inspect a legacy `.mdl` model.
//!
//! Prints the header and frame names, optionally writes every skin as a PNG,
//! and optionally prints the emitted corners of one frame as JSON.
//!
//! Run: `cargo run -p revolt --features tools --bin mdl_dump -- <file.mdl> [--frame N] [--skins <dir>] [--json]`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use revolt::{Error, LegacyModel, Result};
use revolt_mdl::{Model, RgbaSkins};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Inspect a legacy .mdl model")]
struct Args {
    /// Model file to read.
    model: PathBuf,

    /// Frame to emit with --json.
    #[arg(long, default_value_t = 0)]
    frame: i32,

    /// Directory to write skins into as PNG files.
    #[arg(long)]
    skins: Option<PathBuf>,

    /// Print the corners of --frame as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let model: LegacyModel = Model::open(&args.model, &mut RgbaSkins)?;

    if args.json {
        print_corners(&model, args.frame)?;
    } else {
        print_summary(&model);
    }

    if let Some(dir) = &args.skins {
        write_skins(&model, &args.model, dir)?;
    }

    Ok(())
}

fn print_summary(model: &LegacyModel) {
    let header = model.header();
    println!("scale:        {}", header.scale);
    println!("translate:    {}", header.translate);
    println!("radius:       {}", header.bounding_radius);
    println!("eye:          {}", header.eye_position);
    println!(
        "skins:        {} ({}x{})",
        header.num_skins, header.skin_width, header.skin_height
    );
    println!("vertices:     {}", header.num_verts);
    println!("triangles:    {}", header.num_tris);
    println!("frames:       {}", header.num_frames);
    println!("sync type:    {:?}", header.sync_type);
    println!("flags:        {:#x}", header.flags);

    for (index, frame) in model.frames().iter().enumerate() {
        let (min, max) = frame.bounds(header);
        println!("  [{index:3}] {:<16} {min} .. {max}", frame.name);
    }
}

fn print_corners(model: &LegacyModel, frame: i32) -> Result<()> {
    let corners: Vec<_> = model
        .frame_corners(frame)
        .iter()
        .map(|corner| {
            json!({
                "position": corner.position.to_array(),
                "normal": corner.normal.to_array(),
                "texCoord": corner.tex_coord.to_array(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&corners)?);
    Ok(())
}

fn write_skins(model: &LegacyModel, source: &Path, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let stem = source
        .file_stem()
        .map_or_else(|| "skin".into(), |s| s.to_string_lossy());
    for (index, skin) in model.skins().iter().enumerate() {
        let path = dir.join(format!("{stem}_{index}.png"));
        skin.save(&path).map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
