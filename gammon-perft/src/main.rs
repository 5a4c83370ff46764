//! Backgammon Play-Tree Counter
//!
//! Counts every roll and every legal play from the starting position down to
//! a fixed depth. Usage:
//!
//! ```text
//! perft [--depth N] [--variant standard|half|mini] [--no-doublet-bonus] [--rules FILE.json]
//! ```

mod perft;
mod stats;

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gammon_core::{RollApplier, Rules, Variant};

use crate::perft::Perft;
use crate::stats::Stats;

const USAGE: &str =
    "Usage: perft [--depth N] [--variant standard|half|mini] [--no-doublet-bonus] [--rules FILE.json]";

/// Command line options. Flags override values from the rules file.
#[derive(Debug, PartialEq)]
struct Options {
    depth: usize,
    variant: Option<Variant>,
    no_doublet_bonus: bool,
    rules_path: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            depth: 2,
            variant: None,
            no_doublet_bonus: false,
            rules_path: None,
        }
    }
}

/// Parse arguments (without the program name). `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--depth" => {
                let value = iter.next().ok_or("--depth needs a value")?;
                options.depth = value
                    .parse()
                    .map_err(|_| format!("invalid depth: {value}"))?;
            }
            "--variant" => {
                let value = iter.next().ok_or("--variant needs a value")?;
                options.variant = Some(value.parse().map_err(|e| format!("{e}"))?);
            }
            "--no-doublet-bonus" => options.no_doublet_bonus = true,
            "--rules" => {
                let value = iter.next().ok_or("--rules needs a file")?;
                options.rules_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(Some(options))
}

/// Base rules from the file (or defaults), then flag overrides.
fn resolve_rules(options: &Options) -> Result<Rules, String> {
    let mut rules = match &options.rules_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid rules in {}: {e}", path.display()))?
        }
        None => Rules::default(),
    };
    if let Some(variant) = options.variant {
        rules.variant = variant;
    }
    if options.no_doublet_bonus {
        rules.doublet_uses = RollApplier::doublet_disabled().doublet_uses();
    }
    Ok(rules)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };
    let rules = match resolve_rules(&options) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    let mut perft = match Perft::new(&rules, options.depth) {
        Ok(perft) => perft,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    println!("Backgammon Play-Tree Counter");
    println!("============================");
    println!("Variant: {}", rules.variant);
    println!("Doublet uses: {}", rules.doublet_uses);
    println!("Depth: {}", options.depth);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, stopping...");
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: cannot set Ctrl-C handler: {e}");
    }

    let log_interval_secs = 5;
    let mut stats = Stats::new();
    let complete = perft.run(rules.starting_board(), &running, |perft, stack_len| {
        if stats.should_log(log_interval_secs) {
            stats.log_progress(perft, stack_len);
        }
    });

    println!("\n============================");
    if complete {
        println!("Walk complete!");
    } else {
        println!("Walk interrupted, partial counts:");
    }
    println!("============================");
    stats.print_summary(&perft);
}
