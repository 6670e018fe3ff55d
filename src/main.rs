//! Rubik's Cube
//!
//! Plays an interactive N x N x N Rubik's Cube in a 3D window, or runs moves
//! headless and prints the resulting net. In the window, faces turn from the
//! keyboard (F B U D R L, shift for counterclockwise) and the mouse orbits.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rubiks::{grid, moves, Config, RubiksCube};

/// Interactive Rubik's Cube with a headless move runner.
#[derive(Parser)]
#[command(name = "rubiks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pieces per cube edge, overriding the configuration.
    #[arg(long, global = true)]
    size: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D cube.
    Play,
    /// Print a random scramble and the cube it produces.
    Scramble {
        /// Number of moves, defaults to the configured scramble length.
        #[arg(short = 'n', long)]
        moves: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply moves in notation (e.g. R U R' U') and print the cube.
    Apply {
        /// Moves to apply, in order.
        #[arg(required = true)]
        moves: Vec<String>,
        /// Afterwards, replay the inverse of every applied move.
        #[arg(long)]
        solve: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> rubiks::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(size) = cli.size {
        config.cube.size = size;
    }
    config.validate()?;

    match cli.command {
        Some(Command::Scramble { moves, seed }) => run_scramble(&config, moves, seed),
        Some(Command::Apply { moves, solve }) => run_apply(&config, &moves.join(" "), solve),
        Some(Command::Play) | None => {
            println!("Controls: drag with the mouse to orbit the camera");
            println!("Keys: F B U D R L turn (shift reverses), Space scramble, S solve");
            println!("      Backspace reset, V reset view, H toggle hints");
            visualization::display(config)
        }
    }
}

/// Scrambles a fresh cube and prints the moves and the resulting net.
fn run_scramble(config: &Config, count: Option<usize>, seed: Option<u64>) -> rubiks::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut cube = RubiksCube::from_config(&config.cube)?;
    cube.scramble(count.unwrap_or(config.cube.scramble_moves), &mut rng);
    let scramble = cube.planned_moves();
    cube.settle();

    println!("{}", moves::format_sequence(&scramble));
    print!("{}", grid::format_net(&cube));
    Ok(())
}

/// Applies notation to a fresh cube and prints the net and solved state.
fn run_apply(config: &Config, notation: &str, solve: bool) -> rubiks::Result<()> {
    let sequence = moves::parse_sequence(notation)?;
    let mut cube = RubiksCube::from_config(&config.cube)?;
    for mv in &sequence {
        cube.rotate_face(mv.face, mv.direction);
    }
    cube.settle();
    print!("{}", grid::format_net(&cube));

    if solve && cube.solve() {
        let replay = cube.planned_moves();
        cube.settle();
        println!("Solve: {}", moves::format_sequence(&replay));
        print!("{}", grid::format_net(&cube));
    }

    println!("{}", if cube.is_solved() { "solved" } else { "not solved" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_apply() {
        let cli = Cli::try_parse_from(["rubiks", "--size", "4", "apply", "R", "U'", "--solve"]).unwrap();
        assert_eq!(cli.size, Some(4));
        match cli.command {
            Some(Command::Apply { moves, solve }) => {
                assert_eq!(moves, vec!["R", "U'"]);
                assert!(solve);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_cli_defaults_to_play() {
        let cli = Cli::try_parse_from(["rubiks"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_seeded_scramble_is_reproducible() {
        let config = Config::default();
        let scramble = |seed| {
            let mut cube = RubiksCube::from_config(&config.cube).unwrap();
            cube.scramble(25, &mut StdRng::seed_from_u64(seed));
            cube.planned_moves()
        };
        assert_eq!(scramble(3), scramble(3));
        assert_ne!(scramble(3), scramble(4));
    }

    #[test]
    fn test_oversized_cube_is_rejected_before_running() {
        let cli = Cli::try_parse_from(["rubiks", "--size", "5000", "scramble"]).unwrap();
        assert!(matches!(run(cli), Err(rubiks::Error::InvalidSize(5000))));
    }

    #[test]
    fn test_apply_rejects_bad_notation() {
        assert!(run_apply(&Config::default(), "R X", false).is_err());
    }
}
