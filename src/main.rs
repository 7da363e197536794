//! bash-safety-hook: PreToolUse hook for Claude Code.
//!
//! Reads the hook payload from stdin, classifies `tool_input.command`, and
//! asks for confirmation when it matches a dangerous pattern. Fails open on
//! anything it cannot read.

use std::io::Read;

use bash_safety_hook::config::Config;
use bash_safety_hook::eval::Classifier;
use bash_safety_hook::{hook, logging};

fn main() {
    let config = Config::load();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump-config" => {
                match toml::to_string_pretty(&config) {
                    Ok(s) => print!("{s}"),
                    Err(e) => eprintln!("bash-safety-hook: cannot serialize config: {e}"),
                }
                return;
            }
            "--version" => {
                println!("bash-safety-hook {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            other => eprintln!("bash-safety-hook: ignoring unknown argument: {other}"),
        }
    }

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        // Fail open
        std::process::exit(0);
    }

    logging::init(&config.settings);
    let classifier = Classifier::from_config(&config);
    let outcome = hook::run(&input, &classifier);

    if let Some(out) = &outcome.stdout {
        println!("{out}");
    }
    if let Some(err) = &outcome.stderr {
        eprintln!("{err}");
    }
    std::process::exit(outcome.exit_code);
}
