use clap::{Parser, Subcommand};
use gallery_forge::commands::{self, CommandError};
use gallery_forge::config::{self, DEFAULT_CONFIG_FILE};
use gallery_forge::imaging::RustBackend;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let version = env!("CARGO_PKG_VERSION");
    let describe = env!("GIT_DESCRIBE");
    if describe.is_empty() || describe.strip_prefix('v') == Some(version) {
        version
    } else {
        // Leaked once at startup, called exactly once
        Box::leak(format!("{version}+{describe}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "gallery-forge")]
#[command(about = "Maintenance tools for a static site's photo gallery")]
#[command(long_about = "\
Maintenance tools for a static site's photo gallery

Images in the gallery directory are sorted into categories by keywords in
their filenames, rendered as a filterable HTML block, and spliced into the
site's page between two fixed markers.

Typical layout (all paths configurable):

  site/
  ├── gallery.toml                     # Optional config
  ├── index.html                       # Page holding the gallery block
  └── assets/images/gallery/
      ├── IMG_0042.png                 # Originals for `convert`
      └── converted/
          ├── temple-main-gate.jpg     # → Temple & Premises
          ├── fuji-sunrise.jpg         # → Mount Fuji
          └── IMG_0042.jpg             # → Other Moments (no keyword)

Workflow:
  gallery-forge convert     # originals → converted/*.jpg
  gallery-forge build       # list → generate → update index.html

Run 'gallery-forge gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode source images as JPEG into the converted directory
    Convert,
    /// Count images per format and write the count report
    Count,
    /// Write the JSON list of converted images
    List,
    /// Render the filterable gallery fragment
    Generate,
    /// Render per-category gallery sections from the image list
    Sections,
    /// Splice the gallery fragment into the target page
    Update,
    /// Run list → generate → update
    Build,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gallery_forge=debug"
    } else {
        "gallery_forge=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Flag set by Ctrl-C, polled by the conversion loop between files and by
/// `build` between stages.
fn install_interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
    flag
}

fn run(cli: &Cli, cancel: &AtomicBool) -> Result<(), CommandError> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Convert => {
            commands::convert(&config, &RustBackend::new(), cancel)?;
        }
        Command::Count => {
            commands::count(&config)?;
        }
        Command::List => {
            commands::list(&config)?;
        }
        Command::Generate => {
            commands::generate(&config)?;
        }
        Command::Sections => {
            commands::sections(&config)?;
        }
        Command::Update => {
            commands::update(&config)?;
        }
        Command::Build => {
            commands::build(&config, cancel)?;
        }
        Command::GenConfig => {}
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let cancel = install_interrupt_flag();

    match run(&cli, &cancel) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_cancellation() {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}
