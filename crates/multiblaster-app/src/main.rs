//! multiblaster-app: headless MULTIBLASTER replica.
//!
//! Usage:
//!   multiblaster-app run                  < events.jsonl
//!   multiblaster-app replay session.json

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use tracing::{error, warn};

use multiblaster_app::config::HostConfig;
use multiblaster_app::host;
use multiblaster_app::logging::init_tracing;
use multiblaster_app::replay;
use multiblaster_app::state::HostState;
use multiblaster_core::commands::SessionEvent;
use multiblaster_core::state::WorldSnapshot;

fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let config = match HostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    let result = match args[1].as_str() {
        "run" => cmd_run(&config),
        "replay" => cmd_replay(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(message) = result {
        error!(error = %message, "command failed");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "multiblaster-app: headless MULTIBLASTER replica\n\
         \n\
         Commands:\n\
         \n\
         run       Start a live session. Reads one JSON session event per line\n\
                   from stdin; prints the final snapshot on EOF.\n\
         \n\
         replay    Replay a recorded session log and print the final snapshot\n\
         \n\
           <path>  session log written by `run` (seed, highscores, end time, events)\n\
         \n\
         Configuration: multiblaster.toml (or $MULTIBLASTER_CONFIG), overridden by\n\
         MULTIBLASTER_SEED, MULTIBLASTER_HIGHSCORES, MULTIBLASTER_EVENT_LOG.\n\
         \n\
         Examples:\n\
         \n\
           echo '{{\"type\":\"Joined\",\"player_id\":1}}' | multiblaster-app run\n\
           multiblaster-app replay session.json\n"
    );
}

fn cmd_run(config: &HostConfig) -> Result<(), String> {
    let state = HostState::new();
    host::start(&state, config).map_err(|e| e.to_string())?;

    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SessionEvent>(&line) {
            Ok(event) => host::send(&state, event).map_err(|e| e.to_string())?,
            Err(e) => warn!(error = %e, "skipping malformed event line"),
        }
    }

    let record = host::stop(&state, config).map_err(|e| e.to_string())?;
    print_snapshot(&record.final_snapshot)
}

fn cmd_replay(args: &[String]) -> Result<(), String> {
    let path = args
        .first()
        .map(PathBuf::from)
        .ok_or("replay requires a log path")?;
    let log = replay::load_log(&path).map_err(|e| e.to_string())?;
    let snapshot = replay::replay(log).map_err(|e| e.to_string())?;
    print_snapshot(&snapshot)
}

fn print_snapshot(snapshot: &WorldSnapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
