//! vortex CLI - collar and platform mesh generator
//!
//! Builds the intake collar from a design iteration or a parameter file, and
//! the platform deck and casters, and writes them as STL, OBJ or PLY.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::constants::INCH_TO_MM;
use solid_mesh::io::{export, ExportFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vortex_collar::{
    CollarDimensions, CollarParameters, CollarPipeline, LipParameters, Platform,
    PlatformDimensions, SlotStrategy, PART_NAMES,
};

#[derive(Parser)]
#[command(name = "vortex")]
#[command(about = "Vortex collar and platform mesh generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the intake collar
    Collar(CollarArgs),
    /// Build the platform deck and casters
    Platform(PlatformArgs),
    /// Print collar parameters as JSON
    Params {
        /// Design iteration preset (1-4)
        #[arg(short, long, default_value_t = 3)]
        iteration: u32,
        /// Print derived working-unit dimensions instead
        #[arg(long)]
        derived: bool,
    },
}

#[derive(Args)]
struct CollarArgs {
    /// Design iteration preset (1-4)
    #[arg(short, long, default_value_t = 3)]
    iteration: u32,
    /// JSON parameter file; fields it omits take the defaults
    #[arg(long, value_name = "FILE", conflicts_with = "iteration")]
    params: Option<PathBuf>,
    /// Slot cutter: box-cut, hull-wedge or corner-wedge
    #[arg(long)]
    strategy: Option<SlotStrategy>,
    /// Circumferential segments for the walls
    #[arg(long)]
    segments: Option<u32>,
    /// Multiply every design length (e.g. 0.1 for a 10% model)
    #[arg(long)]
    scale: Option<f64>,
    /// Add the seating lip
    #[arg(long, overrides_with = "no_lip")]
    lip: bool,
    /// Leave the seating lip off
    #[arg(long)]
    no_lip: bool,
    /// Output format, repeatable: stl, stl-ascii, obj, ply
    #[arg(short, long = "format", default_value = "stl")]
    formats: Vec<ExportFormat>,
    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,
    /// Also write the build report as JSON
    #[arg(long)]
    report_json: bool,
}

#[derive(Args)]
struct PlatformArgs {
    /// List the parts and exit
    #[arg(long)]
    list: bool,
    /// Export a single part by name
    #[arg(long)]
    part: Option<String>,
    /// Export every part to its own file
    #[arg(long)]
    split: bool,
    /// JSON dimension file; fields it omits take the defaults
    #[arg(long, value_name = "FILE")]
    dimensions: Option<PathBuf>,
    /// Scale factor (e.g. 0.1 for 10% size)
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Convert inches to millimetres
    #[arg(long)]
    mm: bool,
    /// Output format: stl, stl-ascii, obj, ply
    #[arg(short, long, default_value = "stl")]
    format: ExportFormat,
    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collar(args) => run_collar(args)?,
        Commands::Platform(args) => run_platform(args)?,
        Commands::Params { iteration, derived } => {
            let params = CollarParameters::iteration(iteration)?;
            if derived {
                let dims = CollarDimensions::from(&params);
                println!("{}", serde_json::to_string_pretty(&dims)?);
            } else {
                println!("{}", params.to_json()?);
            }
        }
    }
    Ok(())
}

fn collar_parameters(args: &CollarArgs) -> Result<CollarParameters> {
    let mut params = match &args.params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CollarParameters::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => CollarParameters::iteration(args.iteration)?,
    };

    if let Some(strategy) = args.strategy {
        params.slots.strategy = strategy;
    }
    if let Some(segments) = args.segments {
        params.segments = segments;
    }
    if args.lip {
        params.lip.get_or_insert_with(LipParameters::default);
    } else if args.no_lip {
        params.lip = None;
    }
    if let Some(scale) = args.scale {
        anyhow::ensure!(
            scale.is_finite() && scale > 0.0,
            "scale must be positive, got {scale}"
        );
        params = params.scaled(scale);
    }
    Ok(params)
}

fn run_collar(args: CollarArgs) -> Result<()> {
    let params = collar_parameters(&args)?;
    let stem = match &args.params {
        Some(path) => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("vortex_collar")
            .to_string(),
        None => format!("vortex_collar_v{}", args.iteration),
    };

    let output = CollarPipeline::new(params)?.run()?;
    if !output.report.is_watertight() {
        warn!("collar is not watertight; check the report before printing");
    }
    print!("{}", output.report);

    for &format in &args.formats {
        let path = export_path(&args.output, &stem, format, &args.formats);
        let written = export(&output.solid, &path, format)?;
        println!("Exported: {}", written.display());
    }

    if args.report_json {
        let path = args.output.join(format!("{stem}_report.json"));
        fs::create_dir_all(&args.output)?;
        fs::write(&path, serde_json::to_string_pretty(&output.report)?)?;
        println!("Report: {}", path.display());
    }
    Ok(())
}

/// Binary and ASCII STL share an extension; the ASCII file gets a suffix
/// when both are requested.
fn export_path(dir: &Path, stem: &str, format: ExportFormat, all: &[ExportFormat]) -> PathBuf {
    if format == ExportFormat::StlAscii && all.contains(&ExportFormat::Stl) {
        dir.join(format!("{stem}_ascii"))
    } else {
        dir.join(stem)
    }
}

fn run_platform(args: PlatformArgs) -> Result<()> {
    let dims = match &args.dimensions {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<PlatformDimensions>(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PlatformDimensions::default(),
    };

    if args.list {
        println!("Available parts:");
        for name in PART_NAMES {
            println!("  - {name}");
        }
        println!("\nDimensions (inches):");
        println!("{}", serde_json::to_string_pretty(&dims)?);
        return Ok(());
    }

    let platform = Platform::new(dims)?;
    let scale = if args.mm {
        args.scale * INCH_TO_MM
    } else {
        args.scale
    };
    info!(scale, "generating platform");

    if let Some(name) = &args.part {
        let part = platform.part(name, scale)?;
        let written = export(&part.solid, args.output.join(part.name), args.format)?;
        println!("Exported: {}", written.display());
    } else if args.split {
        for part in platform.parts(scale)? {
            let written = export(&part.solid, args.output.join(part.name), args.format)?;
            println!("Exported: {}", written.display());
        }
    } else {
        let assembly = platform.assembly(scale)?;
        let written = export(&assembly, args.output.join("platform_assembly"), args.format)?;
        println!("Exported: {}", written.display());
    }
    Ok(())
}
