use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tile_splitter_core::{
    SplitConfig, SplitRequest, is_image_path, plan_with, preview_image, read_dimensions,
    split_image_with_hooks,
};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "tile-splitter",
    about = "Split an image into a grid of PNG tiles",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split an image into rows x cols tiles and write an info.txt manifest
    Split(SplitArgs),
    /// Plan-only: print tile rectangles without writing files (forces --dry-run)
    Plan(SplitArgs),
    /// Show size, format, color mode and file size of an image
    Info(InfoArgs),
    /// List image files in a directory
    List(ListArgs),
}

#[derive(Parser, Debug, Clone)]
struct SplitArgs {
    // Input/Output
    /// Input image
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory (default: <input dir>/<name>_split_<rows>x<cols>)
    #[arg(short, long, help_heading = "Input/Output")]
    out_dir: Option<PathBuf>,
    /// YAML config file path (keys present in the file override flags)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Grid
    /// Number of rows (vertical divisions)
    #[arg(short, long, default_value_t = 3, allow_negative_numbers = true, help_heading = "Grid")]
    rows: i64,
    /// Number of columns (horizontal divisions)
    #[arg(short, long, default_value_t = 3, allow_negative_numbers = true, help_heading = "Grid")]
    cols: i64,
    /// Pixels of overlap on each shared tile edge
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help_heading = "Grid")]
    overlap: i64,
    /// Force tile height to the source image's aspect ratio (may leave the bottom uncovered)
    #[arg(long, default_value_t = false, help_heading = "Grid")]
    keep_aspect_ratio: bool,

    // Export
    /// Also write info.json next to info.txt
    #[arg(long, default_value_t = false, help_heading = "Export")]
    manifest_json: bool,
    /// Open the output directory in the file manager when done
    #[arg(long, default_value_t = false, help_heading = "Export")]
    open: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute and print the tile plan but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
    /// Output format for the printed plan: text|json
    #[arg(long, default_value = "text", value_parser = ["text", "json"], help_heading = "Export")]
    plan_format: String,
}

#[derive(Parser, Debug, Clone)]
struct InfoArgs {
    /// Image to inspect
    input: PathBuf,
}

#[derive(Parser, Debug, Clone)]
struct ListArgs {
    /// Directory to scan (not recursive)
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Maximum number of entries to print
    #[arg(long, default_value_t = 10)]
    limit: usize,
    /// Include patterns (glob) matched against file names
    #[arg(long)]
    include: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Split(args) => run_split(args, cli.progress && !cli.quiet),
        Commands::Plan(args) => {
            let mut a = args.clone();
            a.dry_run = true;
            run_split(&a, false)
        }
        Commands::Info(args) => run_info(args),
        Commands::List(args) => run_list(args),
    }
}

fn run_split(args: &SplitArgs, show_progress: bool) -> anyhow::Result<()> {
    let yaml = match &args.config {
        Some(path) => {
            let file = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let y: YamlConfig = serde_yaml::from_str(&file)
                .with_context(|| format!("parse config {}", path.display()))?;
            Some(y)
        }
        None => None,
    };
    let mut out_dir = args.out_dir.clone();
    let mut manifest_json = args.manifest_json;
    let cfg = match yaml {
        Some(y) => {
            if let Some(v) = &y.out_dir {
                out_dir = Some(v.clone());
            }
            if let Some(v) = y.manifest_json {
                manifest_json = v;
            }
            y.into_split_config(split_config_from_args(args))
        }
        None => split_config_from_args(args),
    };

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    if !is_image_path(&args.input) {
        warn!(input = ?args.input, "input does not have an image file extension");
    }
    if args.dry_run {
        return print_plan(&args.input, &cfg, &args.plan_format);
    }

    let mut req = SplitRequest::new(&args.input, cfg).with_json_manifest(manifest_json);
    if let Some(dir) = out_dir {
        req = req.with_output_dir(dir);
    }

    let bar = if show_progress {
        let total = req.config.tile_count().unwrap_or(0);
        let b = ProgressBar::new(total);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} saving {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };

    let result = split_image_with_hooks(
        &req,
        |_, path| {
            if let Some(b) = &bar {
                let msg = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
                b.set_message(msg.to_string());
                b.inc(1);
            }
        },
        |report| {
            if args.open {
                if let Err(e) = reveal_in_file_manager(&report.output_dir) {
                    warn!(dir = ?report.output_dir, error = %e, "cannot open output directory");
                }
            }
        },
    );
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    let report = result.with_context(|| format!("split {}", args.input.display()))?;

    info!(
        count = report.tile_count(),
        tile_width = report.manifest.tile_width,
        tile_height = report.manifest.tile_height,
        "tiles written"
    );
    info!(out_dir = ?report.output_dir, manifest = ?report.manifest_path, "split complete");
    Ok(())
}

fn split_config_from_args(args: &SplitArgs) -> SplitConfig {
    SplitConfig::builder()
        .grid(args.rows, args.cols)
        .overlap(args.overlap)
        .keep_aspect_ratio(args.keep_aspect_ratio)
        .build()
}

fn print_plan(input: &Path, cfg: &SplitConfig, format: &str) -> anyhow::Result<()> {
    let (width, height) = read_dimensions(input)?;
    let plan = plan_with(width, height, cfg)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&plan)?),
        _ => {
            println!(
                "{}x{} px -> {} tiles, nominal {}x{} px",
                width,
                height,
                plan.len(),
                plan.tile_width,
                plan.tile_height
            );
            for t in &plan.tiles {
                println!(
                    "{}  left={} top={} right={} bottom={}",
                    t.file_name(),
                    t.left,
                    t.top,
                    t.right,
                    t.bottom
                );
            }
        }
    }
    Ok(())
}

fn run_info(args: &InfoArgs) -> anyhow::Result<()> {
    let p = preview_image(&args.input).with_context(|| format!("inspect {}", args.input.display()))?;
    println!("path: {}", p.path.display());
    println!("size: {}x{} px", p.image.width, p.image.height);
    println!("format: {}", p.image.format);
    println!("color mode: {}", p.image.color_mode);
    println!("file size: {}", p.file_size_human());
    Ok(())
}

fn run_list(args: &ListArgs) -> anyhow::Result<()> {
    let images = collect_images(&args.dir, &args.include)?;
    if images.is_empty() {
        println!("no image files in {}", args.dir.display());
        return Ok(());
    }
    for (i, p) in images.iter().take(args.limit).enumerate() {
        let name = p.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
        println!("{:>3}. {}", i + 1, name);
    }
    if images.len() > args.limit {
        println!("... and {} more", images.len() - args.limit);
    }
    Ok(())
}

/// Image files directly inside `dir`, sorted by name.
fn collect_images(dir: &Path, include: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let mut list: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if !p.is_file() || !is_image_path(p) {
            continue;
        }
        if let Some(inc) = &inc_set {
            let name = entry.file_name().to_string_lossy();
            if !inc.is_match(&*name) {
                continue;
            }
        }
        list.push(p.to_path_buf());
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob {pat}"))?);
    }
    Ok(Some(b.build()?))
}

fn reveal_in_file_manager(dir: &Path) -> std::io::Result<()> {
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    Command::new(opener).arg(dir).spawn().map(|_| ())
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

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    rows: Option<i64>,
    cols: Option<i64>,
    overlap: Option<i64>,
    keep_aspect_ratio: Option<bool>,
    out_dir: Option<PathBuf>,
    manifest_json: Option<bool>,
}

impl YamlConfig {
    fn into_split_config(self, mut cfg: SplitConfig) -> SplitConfig {
        if let Some(v) = self.rows {
            cfg.rows = v;
        }
        if let Some(v) = self.cols {
            cfg.cols = v;
        }
        if let Some(v) = self.overlap {
            cfg.overlap = v;
        }
        if let Some(v) = self.keep_aspect_ratio {
            cfg.keep_aspect_ratio = v;
        }
        cfg
    }
}
