//! kicad-modgen: footprint generator for KiCad PCBnew legacy libraries
//!
//! Generates one `.emp` module file per invocation from command-line flags
//! or a JSON request file, and converts lengths between mm and mils.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use kicad_modgen::config::{self, Config};
use kicad_modgen::footprint::units::{convert_text, format_length};
use kicad_modgen::footprint::{
    generate, load_request, serializer, FootprintError, FootprintResult, FootprintSpec, Mount,
    Package, PadShape, Parameter, Units,
};

/// Footprint generator for KiCad PCBnew legacy libraries.
#[derive(Parser, Debug)]
#[command(name = "kicad-modgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a module file
    Generate(GenerateArgs),

    /// Convert a length between millimetres and mils
    Convert {
        /// Length to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Units of VALUE; the result is in the other unit
        #[arg(long, default_value = "mm")]
        from: Units,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Read the footprint parameters from a JSON request file
    #[arg(long, value_name = "REQUEST_FILE", conflicts_with_all = ["package", "name"])]
    request: Option<PathBuf>,

    #[command(flatten)]
    spec: SpecArgs,

    /// Directory to write the module to (overrides the configuration)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the module to stdout without writing a file
    #[arg(long)]
    dry_run: bool,

    /// Also print the module to stdout after writing it
    #[arg(long)]
    print: bool,
}

#[derive(Args, Debug)]
struct SpecArgs {
    /// Package topology: SIP, DIP, DRC (dual row connector) or QFN
    #[arg(long, required_unless_present = "request")]
    package: Option<Package>,

    /// Module name; also names the output file
    #[arg(long, required_unless_present = "request")]
    name: Option<String>,

    /// Units of every length flag (defaults to the configured units)
    #[arg(long)]
    units: Option<Units>,

    /// Number of pins
    #[arg(long)]
    pins: Option<u32>,

    /// Pin pitch
    #[arg(long)]
    pitch: Option<f64>,

    /// Pad size in X
    #[arg(long)]
    pad_x: Option<f64>,

    /// Pad size in Y
    #[arg(long)]
    pad_y: Option<f64>,

    /// Drill diameter (through-hole only)
    #[arg(long)]
    drill: Option<f64>,

    /// Pad shape: circle, rectangle or oblong
    #[arg(long)]
    shape: Option<PadShape>,

    /// Mount type: through-hole or smd
    #[arg(long)]
    mount: Option<Mount>,

    /// Make pin 1 a square pad
    #[arg(long)]
    first_pad_square: bool,

    /// Staggered self-locking pads (SIP only)
    #[arg(long)]
    self_locking: bool,

    /// Row spacing in X (all packages except SIP)
    #[arg(long)]
    row_spacing_x: Option<f64>,

    /// Row spacing in Y (QFN only)
    #[arg(long)]
    row_spacing_y: Option<f64>,

    /// Pins on each of the left and right edges (QFN only)
    #[arg(long)]
    pins_per_edge: Option<u32>,

    /// Reference designator text
    #[arg(long)]
    reference: Option<String>,

    /// Library description (defaults to the module name)
    #[arg(long)]
    description: Option<String>,

    /// Library keywords (defaults to the module name)
    #[arg(long)]
    keywords: Option<String>,
}

impl SpecArgs {
    /// Builds a spec from the flags, starting from the generator's defaults.
    fn into_spec(self) -> FootprintResult<FootprintSpec> {
        let package = self
            .package
            .ok_or_else(|| FootprintError::unsupported_package("<none>"))?;
        let name = self.name.ok_or_else(|| {
            FootprintError::invalid_parameter(Parameter::ModuleName, "no module name given")
        })?;
        let mut spec = FootprintSpec::new(name, package);

        spec.units = self.units;
        if let Some(pins) = self.pins {
            spec.pin_count = pins;
        }
        if let Some(pitch) = self.pitch {
            spec.pitch = pitch;
        }
        if let Some(x) = self.pad_x {
            spec.pad_size_x = x;
        }
        if let Some(y) = self.pad_y {
            spec.pad_size_y = y;
        }
        if let Some(drill) = self.drill {
            spec.drill_diameter = drill;
        }
        if let Some(shape) = self.shape {
            spec.pad_shape = shape;
        }
        if let Some(mount) = self.mount {
            spec.mount = mount;
        }
        if let Some(reference) = self.reference {
            spec.reference_designator = reference;
        }
        spec.first_pad_square = self.first_pad_square;
        spec.self_locking = self.self_locking;
        spec.row_spacing_x = self.row_spacing_x;
        spec.row_spacing_y = self.row_spacing_y;
        spec.pins_per_horizontal_edge = self.pins_per_edge;
        spec.description = self.description.unwrap_or_default();
        spec.keywords = self.keywords.unwrap_or_default();

        Ok(spec)
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the `generate` subcommand.
fn run_generate(args: GenerateArgs, cfg: &Config) -> FootprintResult<()> {
    let spec = match args.request {
        Some(ref path) => load_request(path)?,
        None => args.spec.into_spec()?,
    };

    let doc = generate(spec, cfg.default_units)?;
    let text = serializer::render(&doc);

    if args.dry_run {
        print!("{text}");
        return Ok(());
    }

    let dir = args.output_dir.as_deref().unwrap_or_else(|| cfg.output_dir());
    let path = serializer::write_module(&doc, dir)?;

    if args.print {
        print!("{text}");
    }
    println!("Module {} written to {}", doc.name(), path.display());
    Ok(())
}

/// Entry point for kicad-modgen.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(cli.verbose, cli.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting kicad-modgen");

    let result = match cli.command {
        Command::Generate(args) => run_generate(args, &cfg),
        Command::Convert { value, from } => {
            let to = match from {
                Units::Mm => Units::Mil,
                Units::Mil => Units::Mm,
            };
            convert_text(&value, from, to).map(|v| println!("{} {to}", format_length(v)))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.parameter() {
                Some(parameter) if e.is_recoverable() => error!(
                    parameter = %parameter,
                    safe_default = ?parameter.safe_default(),
                    "{e}"
                ),
                _ => error!(error = %e, "Generation failed"),
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
    }

    #[test]
    fn flags_build_a_spec() {
        let cli = Cli::try_parse_from([
            "kicad-modgen",
            "generate",
            "--package",
            "dip",
            "--name",
            "DIP14",
            "--pins",
            "14",
            "--row-spacing-x",
            "300",
            "--first-pad-square",
        ])
        .unwrap();

        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let spec = args.spec.into_spec().unwrap();
        assert_eq!(spec.package, Package::DualInline);
        assert_eq!(spec.pin_count, 14);
        assert_eq!(spec.row_spacing_x, Some(300.0));
        assert!(spec.first_pad_square);
        assert!((spec.pitch - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_package_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from([
            "kicad-modgen",
            "generate",
            "--package",
            "bga",
            "--name",
            "X",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn package_or_request_is_required() {
        let result = Cli::try_parse_from(["kicad-modgen", "generate", "--name", "X"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["kicad-modgen", "generate", "--request", "spec.json"]);
        assert!(result.is_ok());
    }

    #[test]
    fn convert_defaults_to_mm() {
        let cli = Cli::try_parse_from(["kicad-modgen", "convert", "2.54"]).unwrap();
        assert!(matches!(cli.command, Command::Convert { from: Units::Mm, .. }));
    }
}
