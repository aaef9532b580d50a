// CLI entry point for the conquest match referee.
//
// Runs one match between player programs on a given map, announces the
// verdict on stderr, and prints the replay string to stdout. See
// `referee.rs` for the match loop and `session.rs` for the player protocol.
//
// Usage:
//   referee --map <FILE> [OPTIONS] <player_command> <player_command> [...]
//     --map <FILE>            Map in the Point-in-Time format (required)
//     --turn-timeout-ms <N>   Per-player response budget per turn (default: 1000)
//     --max-turns <N>         Turn limit (default: 200)
//     --log-file <PATH>       Append-only match log (optional)
//
// Diagnostics go through `env_logger` (LOG_LEVEL / LOG_STYLE environment
// variables).

use std::path::PathBuf;
use std::time::Duration;

use conquest_engine::types::Outcome;
use conquest_referee::referee::{MatchConfig, run_match};
use env_logger::Env;

fn main() {
    let env = Env::default()
        .filter_or("LOG_LEVEL", "info")
        .write_style_or("LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let config = parse_args();

    match run_match(&config) {
        Ok(result) => {
            match result.outcome {
                Outcome::Winner(seat) => eprintln!("Player {seat} wins!"),
                _ => eprintln!("Draw!"),
            }
            println!("{}", result.playback);
        }
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    }
}

/// Parse command-line arguments into a `MatchConfig`. Uses simple
/// `std::env::args()` matching — no clap dependency.
fn parse_args() -> MatchConfig {
    let mut map_path: Option<PathBuf> = None;
    let mut turn_timeout = Duration::from_millis(1000);
    let mut max_turns = 200;
    let mut log_path = None;
    let mut player_commands = Vec::new();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--map" => {
                i += 1;
                map_path = args.get(i).cloned().map(PathBuf::from).or_else(|| {
                    eprintln!("--map requires a file path");
                    std::process::exit(1);
                });
            }
            "--turn-timeout-ms" => {
                i += 1;
                let ms: u64 = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--turn-timeout-ms requires a number of milliseconds");
                    std::process::exit(1);
                });
                turn_timeout = Duration::from_millis(ms);
            }
            "--max-turns" => {
                i += 1;
                max_turns = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-turns requires a number");
                    std::process::exit(1);
                });
            }
            "--log-file" => {
                i += 1;
                log_path = args.get(i).cloned().map(PathBuf::from).or_else(|| {
                    eprintln!("--log-file requires a path");
                    std::process::exit(1);
                });
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {other}");
                print_usage();
                std::process::exit(1);
            }
            command => {
                player_commands.push(command.to_string());
            }
        }
        i += 1;
    }

    let Some(map_path) = map_path else {
        eprintln!("--map is required");
        print_usage();
        std::process::exit(1);
    };
    if player_commands.len() < 2 {
        eprintln!("at least two player commands are required");
        print_usage();
        std::process::exit(1);
    }

    let map_data = match std::fs::read_to_string(&map_path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("ERROR: failed to read map {}: {err}", map_path.display());
            std::process::exit(1);
        }
    };

    MatchConfig {
        map_data,
        turn_timeout,
        max_turns,
        log_path,
        player_commands,
    }
}

fn print_usage() {
    println!("Usage: referee --map <FILE> [OPTIONS] <player_command> <player_command> [...]");
    println!();
    println!("Options:");
    println!("  --map <FILE>            Map in the Point-in-Time format (required)");
    println!("  --turn-timeout-ms <N>   Per-player response budget per turn (default: 1000)");
    println!("  --max-turns <N>         Turn limit (default: 200)");
    println!("  --log-file <PATH>       Append-only match log (optional)");
    println!("  --help, -h              Show this help");
}
