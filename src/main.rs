use clap::{Parser, Subcommand};
use phone_frame::config::{self, AppConfig};
use phone_frame::imaging::{CompositeError, Compositor, GridLayout, HexColor};
use phone_frame::output;
use phone_frame::save::resolve_save_path;
use phone_frame::session::{Session, SessionError};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Grid shape shared by commands that take uploads.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Number of grid rows
    #[arg(long, default_value_t = 1)]
    rows: u32,

    /// Number of grid columns
    #[arg(long, default_value_t = 1)]
    cols: u32,
}

impl LayoutArgs {
    fn layout(&self) -> Result<GridLayout, CompositeError> {
        GridLayout::new(self.rows, self.cols).ok_or(CompositeError::InvalidLayout {
            rows: self.rows,
            cols: self.cols,
        })
    }
}

#[derive(Parser)]
#[command(name = "phone-frame")]
#[command(about = "Composite photos into a phone frame to make wallpaper mockups")]
#[command(long_about = "\
Composite photos into a phone frame to make wallpaper mockups

Each photo is scaled to cover the 393x852 screen area, center-cropped,
given 22px rounded corners, placed on a 471x923 canvas filled with the
background color, and covered by the frame template. With --rows/--cols
several framed photos are tiled into one image, in the order given.

Images: .jpg, .jpeg and .png. The grid needs exactly rows x cols images.

Saving:
  --output PATH      write there (extension picks PNG or JPG)
  silent_save=true   write to output_image_folder with a generated name
                     (wallpaper_20261016_142233.png or wallpaper_004.png)

Run 'phone-frame gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/phone-frame/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Frame template image, 471x923 with a transparent screen area
    #[arg(
        long,
        default_value = "assets/templates/phone-holder.png",
        global = true
    )]
    template: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frame images and save the result
    Frame {
        /// Source images, in grid order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Destination file (required unless silent_save is on)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Canvas background as #RRGGBB (overrides the config)
        #[arg(long)]
        background: Option<String>,
    },
    /// Validate images and count against the layout without processing
    Check {
        images: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Overwrite the config file with the defaults
    ResetConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Frame {
            images,
            layout,
            output: destination,
            background,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let background = match background {
                Some(hex) => HexColor::parse(hex)?,
                None => config.canvas_background_color,
            };

            let mut session = Session::new(layout.layout()?);
            let report = session.add_images(images.iter().cloned());
            for line in output::format_add_report(&report) {
                println!("{}", line);
            }

            let compositor = Compositor::new(&cli.template, background);
            let rendered = session.process(&compositor)?;
            let dimensions = (rendered.width(), rendered.height());

            let mut policy = config.save_policy();
            if destination.is_some() {
                policy.silent = false;
            }
            let spec = resolve_save_path(&policy, destination.as_deref())?;
            session.save(&compositor, &spec)?;
            output::print_saved(&spec, dimensions);
        }
        Command::Check { images, layout } => {
            load_config(cli.config.as_deref())?;
            let mut session = Session::new(layout.layout()?);
            let report = session.add_images(images.iter().cloned());
            output::print_check_output(&session, &report);
            if !session.is_ready() {
                return Err(SessionError::CountMismatch {
                    required: session.required_count(),
                    uploaded: session.uploaded_count(),
                }
                .into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::ResetConfig => {
            let path = config_path(cli.config.as_deref())
                .ok_or("no config directory on this platform; pass --config")?;
            config::save_config(&path, &AppConfig::default())?;
            output::print_config_written(&path);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `gen-config`.
///
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "phone_frame=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(config::default_config_path)
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    match config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            config::load_config(&path)
        }
        None => Ok(AppConfig::default()),
    }
}
