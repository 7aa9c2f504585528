//! CLI command definitions using Clap.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use expose_layout::config::load_config_or_default;
use expose_layout::{Arrangement, ExposeConfig, LayoutMode, LayoutStrategy, Scene, load_config_from_path};

use crate::error::CliError;
use crate::output;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expose CLI - Computes window overview layouts.
#[derive(Parser, Debug)]
#[command(name = "expose")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Arrange the windows of a scene file.
    ///
    /// Reads a JSON scene (screen, desktops, panels and windows), lays it out
    /// and prints the on-screen frame of every window.
    Arrange(ArrangeArgs),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(expose completions --shell zsh)"
    ///   expose completions --shell fish > ~/.config/fish/completions/expose.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// Arguments of the arrange command.
#[derive(clap::Args, Debug)]
pub struct ArrangeArgs {
    /// Path to the scene JSON file.
    pub scene: PathBuf,

    /// What the overview is opened for: expose, switch or paging.
    #[arg(long, short, default_value_t = LayoutMode::Expose)]
    pub mode: LayoutMode,

    /// Strategy for expose mode: xd, boxy or cosmos. Overrides the
    /// configuration.
    #[arg(long, short)]
    pub strategy: Option<LayoutStrategy>,

    /// Space between windows in pixels. Overrides the configuration.
    #[arg(long, short)]
    pub distance: Option<i32>,

    /// Configuration file to use instead of the default locations.
    #[arg(long, short, env = "EXPOSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the arrangement as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ArrangeArgs {
    /// Loads the configuration and applies the command-line overrides.
    fn config(&self) -> Result<ExposeConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config_from_path(path)?,
            None => load_config_or_default()?,
        };

        if let Some(strategy) = self.strategy {
            config.layout.expose_layout = strategy;
        }
        if let Some(distance) = self.distance {
            config.layout.distance = distance;
        }

        Ok(config)
    }

    /// Reads the scene and arranges it.
    fn arrange(&self) -> Result<Arrangement, CliError> {
        let config = self.config()?;
        let scene = read_scene(&self.scene)?;
        tracing::debug!(
            "arrange: {} windows, mode={}, strategy={}",
            scene.windows.len(),
            self.mode,
            config.layout.expose_layout
        );
        Ok(scene.arrange(&config, self.mode))
    }
}

/// Reads and parses a scene file.
fn read_scene(path: &Path) -> Result<Scene, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::SceneRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::SceneParse {
        path: path.to_path_buf(),
        source,
    })
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(&self) -> Result<(), CliError> {
        match &self.command {
            Commands::Arrange(args) => {
                let arrangement = args.arrange()?;
                if args.json {
                    output::print_highlighted_json(&serde_json::to_value(&arrangement)?);
                } else {
                    println!("{}", output::summary(&arrangement).bold());
                    println!("{}", output::placements_table(&arrangement));
                    if !arrangement.pages.is_empty() {
                        println!("{}", output::pages_table(&arrangement));
                    }
                }
            }
            Commands::Schema => {
                println!("{}", expose_layout::generate_schema_json());
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
            }
        }

        Ok(())
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "expose", &mut io::stdout());
    }
}
