use clap::{Parser, Subcommand};
use logofit::raster::RustDecoder;
use logofit::{batch, config, output};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "logofit")]
#[command(about = "Perceptual size normalization for heterogeneous logo sets")]
#[command(long_about = "\
Perceptual size normalization for heterogeneous logo sets

Logos rendered at one fixed pixel size rarely look the same size: wide
wordmarks read larger than square emblems, and dense solid marks read
heavier than airy outlines. logofit measures each logo raster and computes
per-logo display dimensions that even out those differences.

Source layout:

  logos/
  ├── config.toml   # Optional tuning (see 'logofit gen-config')
  ├── acme.png      # Any mix of png, jpg, jpeg, gif, webp
  ├── globex.webp
  └── initech.jpg

'logofit analyze' writes a JSON artifact mapping each file name to its
display geometry:

  { \"acme.png\": { \"width\": 52, \"height\": 26, \"offsetX\": 0.0, \"offsetY\": -1.2 } }

Width and height are display pixel dimensions; the offsets nudge the logo
within its slot so its visual mass sits centered. Files that fail to
decode or contain no detectable content are skipped and reported, never
fatal.

Run 'logofit gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Logo source directory
    #[arg(long, default_value = "logos", global = true)]
    source: PathBuf,

    /// Path of the JSON artifact written by analyze
    #[arg(long, default_value = "logofit.json", global = true)]
    output: PathBuf,

    /// Override the configured base display size, in pixels
    #[arg(long, global = true)]
    base_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Measure every logo in the source directory and write display sizes
    Analyze,
    /// Show the full measurement breakdown for one file
    Inspect {
        /// Logo file to inspect
        file: PathBuf,
    },
    /// List the files analyze would pick up, without decoding anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze => {
            let config = load_run_config(&cli.source, cli.base_size)?;
            init_thread_pool(&config.processing);
            let result = batch::analyze_directory(&cli.source, &config)?;
            let json = serde_json::to_string_pretty(&result.dimensions)?;
            std::fs::write(&cli.output, json)?;
            output::print_analyze_output(&result);
            println!("Wrote {}", cli.output.display());
        }
        Command::Inspect { file } => {
            // Config lives next to the logos, so resolve it from the
            // inspected file's directory rather than --source.
            let source = match file.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let config = load_run_config(&source, cli.base_size)?;
            let decoder = RustDecoder::new();
            let report = batch::inspect_file(&decoder, &file, &config)?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            output::print_inspect_output(&filename, &report);
        }
        Command::Check => {
            // Surfaces config problems before anything decodes, same as
            // analyze would.
            load_run_config(&cli.source, cli.base_size)?;
            let files = batch::collect_logo_files(&cli.source)?;
            output::print_check_output(&files);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the run config from the source directory and apply CLI overrides.
fn load_run_config(
    source: &Path,
    base_size: Option<u32>,
) -> Result<config::BalanceConfig, config::ConfigError> {
    let mut config = config::load_config(source)?;
    if let Some(base) = base_size {
        config.sizing.base_size = base;
        config.validate()?;
    }
    Ok(config)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; users can constrain down,
/// not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
