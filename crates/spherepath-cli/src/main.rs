//! spherepath CLI - 5-axis toolpaths over spheres and cylinders
//!
//! Generates G-code for layered spherical and cylindrical prints, reports
//! path statistics, and rescales existing programs.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use spherepath::{generate, PathStats, Toolpath};
use spherepath_gcode::{rescale_gcode, write_gcode, GcodeFlavor, OrientationFormat};
use std::path::{Path, PathBuf};
use tracing::info;

mod config;

use config::{JobArgs, JobConfig};

#[derive(Parser)]
#[command(name = "spherepath")]
#[command(about = "5-axis toolpath generator for spheres and cylinders", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a toolpath and write it as G-code
    Generate {
        #[command(flatten)]
        job: JobArgs,
        /// Output file (default: <pattern>.gcode)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Start/end block dialect
        #[arg(long, value_enum)]
        flavor: Option<FlavorArg>,
        /// Write A/C rotary axes instead of I/J/K tool vectors
        #[arg(long)]
        rotary: bool,
    },
    /// Print statistics for a toolpath without writing it
    Info {
        #[command(flatten)]
        job: JobArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rescale the X/Y/Z words of an existing G-code file
    Scale {
        /// Input G-code file
        input: PathBuf,
        /// Output G-code file
        output: PathBuf,
        /// Scale factor
        #[arg(short, long)]
        factor: f64,
        /// Leading lines copied unchanged
        #[arg(long, default_value_t = 3)]
        header_lines: usize,
        /// Trailing lines copied unchanged
        #[arg(long, default_value_t = 6)]
        footer_lines: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlavorArg {
    Bare,
    Marlin,
    LinuxCnc,
}

impl From<FlavorArg> for GcodeFlavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Bare => GcodeFlavor::Bare,
            FlavorArg::Marlin => GcodeFlavor::Marlin,
            FlavorArg::LinuxCnc => GcodeFlavor::LinuxCnc,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            job,
            output,
            flavor,
            rotary,
        } => {
            let mut job = job.resolve()?;
            if let Some(flavor) = flavor {
                job.gcode.flavor = flavor.into();
            }
            if rotary {
                job.gcode.orientation = OrientationFormat::Rotary;
            }
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("{}.gcode", job.pattern.name())));
            generate_file(&job, &output)?;
        }
        Commands::Info { job, json } => {
            show_info(&job.resolve()?, json)?;
        }
        Commands::Scale {
            input,
            output,
            factor,
            header_lines,
            footer_lines,
        } => {
            scale_file(&input, &output, factor, header_lines, footer_lines)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout is reserved for command output.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn build_path(job: &JobConfig) -> Result<Toolpath> {
    generate(&job.settings, &job.pattern)
        .with_context(|| format!("generating {} toolpath", job.pattern.name()))
}

fn log_stats(stats: &PathStats) {
    info!(
        nodes = stats.node_count,
        rings = stats.ring_count,
        extrusion_length = stats.extrusion_length,
        total_extrusion = stats.total_extrusion,
        "path stats"
    );
}

fn generate_file(job: &JobConfig, output: &Path) -> Result<()> {
    let path = build_path(job)?;
    log_stats(&path.stats());
    write_gcode(output, &path, &job.gcode)?;
    println!("G-code successfully written to {}", output.display());
    Ok(())
}

fn show_info(job: &JobConfig, json: bool) -> Result<()> {
    let path = build_path(job)?;
    let stats = path.stats();
    log_stats(&stats);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Pattern: {}", job.pattern.name());
    println!("Nodes: {}", stats.node_count);
    println!("Rings: {}", stats.ring_count);
    println!("Extruding length: {:.3} mm", stats.extrusion_length);
    println!("Total extrusion: {:.5}", stats.total_extrusion);
    println!(
        "Bounds: [{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
        stats.bounds_min[0],
        stats.bounds_min[1],
        stats.bounds_min[2],
        stats.bounds_max[0],
        stats.bounds_max[1],
        stats.bounds_max[2]
    );
    Ok(())
}

fn scale_file(
    input: &Path,
    output: &Path,
    factor: f64,
    header_lines: usize,
    footer_lines: usize,
) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let scaled = rescale_gcode(&text, factor, header_lines, footer_lines)
        .with_context(|| format!("rescaling {}", input.display()))?;
    std::fs::write(output, scaled).with_context(|| format!("writing {}", output.display()))?;
    println!("Scaled {} by {} into {}", input.display(), factor, output.display());
    Ok(())
}
