#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting Overgrowth maps: derive paths, place
//! generators, walk a traveler, and move grids between machines as share
//! codes.

mod grid_text;
mod share;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use overgrowth_core::{Facing, Severity};
use overgrowth_map::Map;
use overgrowth_system_generation::{place_generators, Config};
use overgrowth_system_travel::{Step, Traveler};

#[derive(Debug, Parser)]
#[command(name = "overgrowth", about = "Inspect Overgrowth maps and their derived paths")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive and print the traversal paths of a grid file.
    Paths {
        /// Grid file of '0' and '1' rows.
        file: PathBuf,
        /// Include the mirrored right-to-left half.
        #[arg(long)]
        all: bool,
    },
    /// Encode a grid file into a share code, or decode one back into a grid.
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },
    /// Place resource generators on a grid and print their coordinates.
    Generators {
        /// Grid file of '0' and '1' rows.
        file: PathBuf,
        /// Seed for reproducible placement.
        #[arg(long)]
        seed: u64,
        /// Number of generators to place.
        #[arg(long, default_value_t = 4)]
        count: usize,
        /// Minimum straight-line distance from any spawner.
        #[arg(long, default_value_t = 4.0)]
        min_distance: f32,
    },
    /// Spawn a traveler and print every tile it visits.
    Walk {
        /// Grid file of '0' and '1' rows.
        file: PathBuf,
        /// Seed for reproducible spawning and path choice.
        #[arg(long)]
        seed: u64,
        /// Travel right-to-left instead of left-to-right.
        #[arg(long)]
        leftward: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ShareAction {
    /// Print the share code of a grid file.
    Encode {
        /// Grid file of '0' and '1' rows.
        file: PathBuf,
    },
    /// Print the grid encoded in a share code.
    Decode {
        /// A share code previously produced by `share encode`.
        code: String,
    },
}

fn load_layout(file: &Path) -> Result<overgrowth_core::GridLayout> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("could not read grid file {}", file.display()))?;
    grid_text::parse(&text)
}

fn load_map(file: &Path) -> Result<Map> {
    let layout = load_layout(file)?;
    let map = Map::new(&layout).context("grid layout was rejected")?;
    for diagnostic in map.diagnostics() {
        if diagnostic.severity() == Severity::Fatal {
            bail!("map is unusable: {diagnostic:?}");
        }
    }
    Ok(map)
}

/// Entry point for the Overgrowth command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Paths { file, all } => {
            let map = load_map(&file)?;
            print!("{}", map.describe_paths(!all));
        }
        Command::Share { action } => match action {
            ShareAction::Encode { file } => {
                let layout = load_layout(&file)?;
                println!("{}", share::encode(&layout));
            }
            ShareAction::Decode { code } => {
                let layout = share::decode(&code)?;
                print!("{}", grid_text::render(&layout));
            }
        },
        Command::Generators {
            file,
            seed,
            count,
            min_distance,
        } => {
            let map = load_map(&file)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for coord in place_generators(&map, Config::new(count, min_distance), &mut rng) {
                println!("({}, {})", coord.column(), coord.row());
            }
        }
        Command::Walk {
            file,
            seed,
            leftward,
        } => {
            let map = load_map(&file)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let facing = if leftward {
                Facing::Leftward
            } else {
                Facing::Rightward
            };
            let Some(mut traveler) = Traveler::spawn(&map, facing, &mut rng) else {
                bail!("map has no spawners to walk from");
            };

            let start = traveler.position();
            println!("({}, {})", start.column(), start.row());
            while let Step::Moved(next) = traveler.advance() {
                println!("({}, {})", next.column(), next.row());
            }
        }
    }

    Ok(())
}
