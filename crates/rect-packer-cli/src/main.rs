use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use image::{ImageReader, RgbaImage};
use rect_packer_core::{
    Bin, FitChoice, PackError, PackerConfig, Rect, ShelfPolicy, SplitRule, Strategy,
};
use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "rect-packer",
    about = "Pack images into a fixed-size atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas PNG plus placement metadata
    Pack(PackArgs),
    /// Layout-only: compute placements and export metadata (no PNG)
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Atlas width
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    width: u32,
    /// Atlas height
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    height: u32,
    /// Sort order: area_desc|max_side_desc|height_desc|width_desc|name_asc|none
    #[arg(long, default_value = "area_desc", help_heading = "Layout")]
    sort_order: String,
    /// Skip images that do not fit instead of failing
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    skip_unfit: bool,

    // Algorithms/Heuristics
    /// Strategy: guillotine | shelf
    #[arg(long, value_parser = ["guillotine", "shelf"], default_value = "guillotine", help_heading = "Algorithms")]
    strategy: String,
    /// Guillotine choice: baf|bssf|blsf|waf|wssf|wlsf
    #[arg(long, default_value = "baf", help_heading = "Heuristics")]
    choice: String,
    /// Guillotine split: squarer|slas|llas|minas|maxas|sas|las
    #[arg(long, default_value = "squarer", help_heading = "Heuristics")]
    split: String,
    /// Shelf policy: ff|nf
    #[arg(long, default_value = "ff", help_heading = "Heuristics")]
    shelf_policy: String,

    // Export
    /// Also write a plain-text table: one `name x y w h` line per image
    #[arg(long, help_heading = "Export")]
    table: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, false),
        Commands::Layout(args) => run_pack(args, true),
    }
}

struct InputImage {
    key: String,
    rgba: RgbaImage,
}

struct PlacedImage {
    key: String,
    rect: Rect,
    rgba: RgbaImage,
}

fn run_pack(cli: &PackArgs, layout_only: bool) -> anyhow::Result<()> {
    let cfg = PackerConfig {
        width: cli.width,
        height: cli.height,
        strategy: parse_policy::<Strategy>("strategy", &cli.strategy)?,
        choice: parse_policy::<FitChoice>("choice", &cli.choice)?,
        split: parse_policy::<SplitRule>("split", &cli.split)?,
        shelf_policy: parse_policy::<ShelfPolicy>("shelf policy", &cli.shelf_policy)?,
    };

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    if paths.is_empty() {
        anyhow::bail!("no images found under {}", cli.input.display());
    }
    let mut inputs = load_images(&paths)?;
    info!(count = inputs.len(), "loaded input images");
    sort_inputs(&mut inputs, parse_sort_order(&cli.sort_order)?);

    let mut bin = Bin::new(cfg)?;
    let mut placed: Vec<PlacedImage> = Vec::new();
    for input in inputs {
        let (w, h) = input.rgba.dimensions();
        match bin.insert(w, h) {
            Ok(rect) => placed.push(PlacedImage {
                key: input.key,
                rect,
                rgba: input.rgba,
            }),
            Err(PackError::OutOfSpace) if cli.skip_unfit => {
                warn!(key = %input.key, w, h, "does not fit, skipped");
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("packing {} ({}x{}) into {}x{}", input.key, w, h, cli.width, cli.height)
                });
            }
        }
    }
    info!("{}", bin.stats().summary());

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;

    let json_path = cli.out_dir.join(format!("{}.json", cli.name));
    write_metadata(&json_path, &bin, &placed)?;
    info!(path = %json_path.display(), "wrote metadata");

    if let Some(table) = &cli.table {
        write_table(table, &placed)?;
        info!(path = %table.display(), "wrote table");
    }

    if !layout_only {
        let png_path = cli.out_dir.join(format!("{}.png", cli.name));
        let canvas = compose_atlas(bin.width(), bin.height(), &placed);
        canvas
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(path = %png_path.display(), "wrote atlas");
    }

    Ok(())
}

fn parse_policy<T: std::str::FromStr>(what: &str, s: &str) -> anyhow::Result<T> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown {what}: {s}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    AreaDesc,
    MaxSideDesc,
    HeightDesc,
    WidthDesc,
    NameAsc,
    None,
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    match s.to_ascii_lowercase().as_str() {
        "area_desc" => Ok(SortOrder::AreaDesc),
        "max_side_desc" => Ok(SortOrder::MaxSideDesc),
        "height_desc" => Ok(SortOrder::HeightDesc),
        "width_desc" => Ok(SortOrder::WidthDesc),
        "name_asc" => Ok(SortOrder::NameAsc),
        "none" => Ok(SortOrder::None),
        other => anyhow::bail!("unknown sort order: {other}"),
    }
}

/// Presorting is purely a quality lever for the CLI; the engine itself packs
/// the stream in whatever order it arrives. Sorts are stable, so equal keys
/// keep their walk order and runs stay reproducible.
fn sort_inputs(inputs: &mut [InputImage], order: SortOrder) {
    match order {
        SortOrder::AreaDesc => inputs.sort_by_key(|i| {
            let (w, h) = i.rgba.dimensions();
            std::cmp::Reverse(w as u64 * h as u64)
        }),
        SortOrder::MaxSideDesc => inputs.sort_by_key(|i| {
            let (w, h) = i.rgba.dimensions();
            std::cmp::Reverse(w.max(h))
        }),
        SortOrder::HeightDesc => {
            inputs.sort_by_key(|i| std::cmp::Reverse(i.rgba.dimensions().1))
        }
        SortOrder::WidthDesc => {
            inputs.sort_by_key(|i| std::cmp::Reverse(i.rgba.dimensions().0))
        }
        SortOrder::NameAsc => inputs.sort_by(|a, b| a.key.cmp(&b.key)),
        SortOrder::None => {}
    }
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    list.sort();
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    if let Some(inc) = include {
        if !inc.is_match(p) {
            return true;
        }
    }
    if let Some(exc) = exclude {
        if exc.is_match(p) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("png" | "jpg" | "jpeg")
    )
}

fn load_images(paths: &[PathBuf]) -> anyhow::Result<Vec<InputImage>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let img = ImageReader::open(path)
            .with_context(|| format!("open {}", path.display()))?
            .decode()
            .with_context(|| format!("decode {}", path.display()))?;
        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
        inputs.push(InputImage {
            key,
            rgba: img.to_rgba8(),
        });
    }
    Ok(inputs)
}

#[derive(Serialize)]
struct AtlasFrame<'a> {
    name: &'a str,
    #[serde(flatten)]
    rect: Rect,
}

#[derive(Serialize)]
struct AtlasDoc<'a> {
    width: u32,
    height: u32,
    frames: Vec<AtlasFrame<'a>>,
}

fn write_metadata(path: &Path, bin: &Bin, placed: &[PlacedImage]) -> anyhow::Result<()> {
    let doc = AtlasDoc {
        width: bin.width(),
        height: bin.height(),
        frames: placed
            .iter()
            .map(|p| AtlasFrame {
                name: &p.key,
                rect: p.rect,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// One `name x y w h` line per placement, for tooling that wants a flat
/// mapping table instead of JSON.
fn write_table(path: &Path, placed: &[PlacedImage]) -> anyhow::Result<()> {
    let mut out = String::new();
    for p in placed {
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            p.key, p.rect.x, p.rect.y, p.rect.w, p.rect.h
        ));
    }
    fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn compose_atlas(width: u32, height: u32, placed: &[PlacedImage]) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for p in placed {
        blit_rgba(&p.rgba, &mut canvas, p.rect.x, p.rect.y);
    }
    canvas
}

/// Copy `src` into `canvas` with its top-left at (dx, dy), clipped to the
/// canvas bounds.
fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        for xx in 0..sw {
            if dx + xx < cw && dy + yy < ch {
                canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
            }
        }
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
