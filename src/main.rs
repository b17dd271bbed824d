use std::env;
use std::process;

use piano::{KeyCount, KeyboardConfig, KeyboardLayout};

const USAGE: &str = "Usage: piano [--config <keyboard.yaml>] [--assets] [number-of-keys]";

fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    env_logger::init_from_env(env);

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<&String> = None;
    let mut list_assets = false;
    let mut keys_arg: Option<&String> = None;

    // Parse flags
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path),
                    None => {
                        eprintln!("{}", USAGE);
                        process::exit(1);
                    }
                }
            }
            "--assets" => list_assets = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ if keys_arg.is_none() => keys_arg = Some(&args[i]),
            other => {
                eprintln!("Unexpected argument '{}'", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match KeyboardConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                process::exit(1);
            }
        },
        None => KeyboardConfig::default(),
    };

    if list_assets {
        for note in config.assets.preload_notes() {
            println!("{}", config.assets.path_for(note));
        }
        return;
    }

    let count = match keys_arg {
        Some(arg) => match arg.parse::<u32>().map_err(|e| e.to_string()).and_then(|n| {
            KeyCount::new(n).map_err(|e| e.to_string())
        }) {
            Ok(count) => count,
            Err(e) => {
                eprintln!("Invalid number of keys '{}': {}", arg, e);
                process::exit(1);
            }
        },
        None => config.initial_keys,
    };

    let layout = KeyboardLayout::build(count);
    match serde_json::to_string_pretty(&layout) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing layout: {}", e);
            process::exit(1);
        }
    }
}
