use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use holekit::settings::Config;
use holekit::{init_logging, run_placement, PlaceJob, PlacementMode, BUILD_DATE, VERSION};
use std::path::{Path, PathBuf};

/// Places drill and cable holes on a panel outline and writes a DXF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place holes on a DXF or SVG panel drawing
    Place(PlaceArgs),
    /// Show or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Default)]
struct PlaceArgs {
    /// Input drawing (.dxf or .svg)
    input: PathBuf,

    /// Output DXF (defaults to `<input stem>_holes.dxf`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write an SVG preview
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Also write a PNG preview
    #[arg(long)]
    png: Option<PathBuf>,

    /// Drill placement: border, centre_h, centre_v or centre_both
    #[arg(long, value_parser = parse_mode)]
    mode: Option<PlacementMode>,

    /// Distance from the panel edge to the nearest hole edge (mm)
    #[arg(long)]
    edge_clearance: Option<f64>,

    #[arg(long)]
    drill_diameter: Option<f64>,

    #[arg(long)]
    drill_spacing: Option<f64>,

    #[arg(long)]
    cable_diameter: Option<f64>,

    #[arg(long)]
    cable_spacing: Option<f64>,

    /// Drawing units to millimetres (overrides the file's units)
    #[arg(long)]
    unit_scale: Option<f64>,

    /// Layer holding the cable path
    #[arg(long)]
    cable_layer: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn parse_mode(value: &str) -> Result<PlacementMode, String> {
    value.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    tracing::debug!("holekit {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Commands::Place(args) => place(args),
        Commands::Config(command) => config(command),
    }
}

fn place(args: PlaceArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let job = build_job(&args, &config)?;
    let report = run_placement(&job)?;

    println!("{}", report.result.summary());
    for path in &report.written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Merges command-line overrides onto the configuration.
fn build_job(args: &PlaceArgs, config: &Config) -> Result<PlaceJob> {
    let mut config = config.clone();
    let placement = &mut config.placement;
    if let Some(mode) = args.mode {
        placement.placement_mode = mode;
    }
    if let Some(v) = args.edge_clearance {
        placement.edge_clearance = v;
    }
    if let Some(v) = args.drill_diameter {
        placement.drill_diameter = v;
    }
    if let Some(v) = args.drill_spacing {
        placement.drill_spacing = v;
    }
    if let Some(v) = args.cable_diameter {
        placement.cable_diameter = v;
    }
    if let Some(v) = args.cable_spacing {
        placement.cable_spacing = v;
    }
    if args.unit_scale.is_some() {
        config.import.unit_scale = args.unit_scale;
    }
    if let Some(layer) = &args.cable_layer {
        config.import.cable_layer = layer.clone();
    }
    config.validate().context("Invalid options")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.export.output_path_for(&args.input));

    let mut previews: Vec<PathBuf> = args.svg.iter().chain(args.png.iter()).cloned().collect();
    if args.svg.is_none() && config.export.svg_preview {
        previews.push(output.with_extension("svg"));
    }
    if args.png.is_none() && config.export.png_preview {
        previews.push(output.with_extension("png"));
    }

    Ok(PlaceJob {
        input: args.input.clone(),
        output,
        previews,
        params: config.placement_parameters(),
        import: config.import_options(),
        style: config.preview.clone(),
    })
}

fn config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show { path } => {
            let config = Config::load_or_default(path.as_deref())?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => Config::default_config_path()?,
            };
            init_config(&path, force)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default().save_to_file(path)?;
    Ok(())
}
