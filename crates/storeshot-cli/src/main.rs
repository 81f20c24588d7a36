use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use storeshot_core::config::LogLevel;
use storeshot_core::{
    logging, BackgroundColor, Config, Error, InputSelection, ResizeMode, RunSummary,
    ScreenshotGenerator,
};

#[derive(Parser, Debug)]
#[command(name = "storeshot")]
#[command(about = "Generate Mac App Store screenshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of screenshots to capture
    #[arg(long, value_name = "N")]
    capture: Option<u32>,

    /// Process existing image files
    #[arg(long, num_args = 1.., value_name = "PATH")]
    process: Vec<PathBuf>,

    /// Capture window only (not full screen)
    #[arg(long)]
    window: bool,

    /// Resize modes to use [default: fit fill]
    #[arg(long, num_args = 1.., value_enum)]
    modes: Vec<ModeArg>,

    /// Output directory [default: macos_screenshots]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Countdown before each capture, in seconds [default: 3]
    #[arg(long)]
    delay: Option<u64>,

    /// Padding colour for fit mode: white, black or #RRGGBB
    #[arg(long)]
    background: Option<BackgroundColor>,

    /// Never enlarge sources in fit mode (shrink-only, thumbnail style)
    #[arg(long)]
    no_upscale: bool,

    /// Skip the marketing copies of the largest outputs
    #[arg(long)]
    no_marketing: bool,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "storeshot.json")]
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Fit,
    Fill,
    Stretch,
}

impl From<ModeArg> for ResizeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fit => ResizeMode::Fit,
            ModeArg::Fill => ResizeMode::Fill,
            ModeArg::Stretch => ResizeMode::Stretch,
        }
    }
}

impl Cli {
    /// Load the config file if given, then apply command line overrides
    fn to_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(config_path) => Config::from_file(config_path)?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if !self.modes.is_empty() {
            config.modes = self.modes.iter().copied().map(ResizeMode::from).collect();
        }
        if let Some(delay) = self.delay {
            config.capture_delay_secs = delay;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        config.window_only |= self.window;
        config.allow_upscale &= !self.no_upscale;
        config.marketing_copies &= !self.no_marketing;
        config.show_progress &= !self.quiet;

        // Set log level based on verbosity
        config.log_level = match self.verbose {
            0 => config.log_level,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };

        Ok(config)
    }

    fn selection(&self) -> InputSelection {
        InputSelection::from_options(self.capture, self.process.clone())
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(50));
    println!("Screenshot generation complete!");
    println!("Output directory: {}", summary.output_dir.display());
    println!("Total images created: {}", summary.artifacts.len());
    if !summary.marketing.is_empty() {
        println!("Marketing versions: {}", summary.marketing.len());
    }
    if !summary.failures.is_empty() {
        println!("Failed: {}", summary.failures.len());
        for failure in &summary.failures {
            println!("  {} ({})", failure.output_name, failure.error);
        }
    }
    println!("\nNext steps:");
    println!("1. Review the generated screenshots");
    println!("2. Choose between 'fit' (shows entire app) or 'fill' (exact dimensions)");
    println!("3. Upload to App Store Connect");
    println!("4. Consider using Fastlane for automated deployment");
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Some(Commands::GenerateConfig { path }) = &cli.command {
        let config = Config::default();
        config.save_to_file(path)?;
        println!("Configuration file generated at: {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.to_config()?;
    logging::init_logger(config.log_level.into(), config.log_file.as_deref())?;

    generate(&cli, config).map(ExitCode::from)
}

/// Resolve inputs, resize and report, returning the process exit status.
/// `NoInputs` exits with 1; failed combinations still exit with 0.
fn generate(cli: &Cli, config: Config) -> anyhow::Result<u8> {
    let generator = ScreenshotGenerator::new(config)?;

    info!("Starting screenshot generation...");
    match generator.run(&cli.selection()) {
        Ok(summary) => {
            print_summary(&summary);
            Ok(0)
        }
        Err(Error::NoInputs(message)) => {
            eprintln!("{}", message);
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
