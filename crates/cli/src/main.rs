//! Virtual-memory simulator CLI.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Generate:** Emit a seeded synthetic workload file.
//! 2. **Run:** Drive the chosen policy and OPT in lock-step over a workload
//!    (from a file or generated on the fly) and report their metrics.

use clap::{Parser, Subcommand};
use std::process;
use std::str::FromStr;

use vmsim_core::config::{SimConfig, WorkloadConfig};
use vmsim_core::policies::AlgorithmName;
use vmsim_core::sim::{load_workload, new_session, write_workload};
use vmsim_core::stats;
use vmsim_core::workload::{generate_workload, serialize_workload, ProcessInstruction};

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    author,
    version,
    about = "Virtual memory page-replacement simulator",
    long_about = "Generate synthetic process workloads and replay them against a chosen \
page-replacement policy running in lock-step with the optimal policy (OPT).\n\nExamples:\n  \
vmsim generate -p 10 -n 500 -s 42 -o workload.txt\n  \
vmsim run -f workload.txt -a LRU -s 42\n  \
vmsim run -p 4 -n 200 -a SC -s demo --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a synthetic workload file.
    Generate {
        /// Number of simulated processes.
        #[arg(short, long, default_value_t = 10)]
        processes: usize,

        /// Number of instructions (terminating kills may be appended).
        #[arg(short = 'n', long, default_value_t = 500)]
        operations: usize,

        /// Seed for deterministic generation.
        #[arg(short, long, default_value = "vmsim")]
        seed: String,

        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run a workload against a policy and OPT, then report metrics.
    Run {
        /// Workload file; generated from -p/-n/-s when omitted.
        #[arg(short, long)]
        file: Option<String>,

        /// Replacement algorithm: FIFO, SC, MRU, LRU, RND, or OPT.
        #[arg(short, long, default_value = "FIFO")]
        algorithm: String,

        /// Seed for policy RNG streams (and generation without -f).
        #[arg(short, long, default_value = "vmsim")]
        seed: String,

        /// Number of processes when generating.
        #[arg(short, long, default_value_t = 10)]
        processes: usize,

        /// Number of instructions when generating.
        #[arg(short = 'n', long, default_value_t = 500)]
        operations: usize,

        /// Emit metrics as JSON instead of the report.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            processes,
            operations,
            seed,
            output,
        }) => cmd_generate(processes, operations, &seed, output),
        Some(Commands::Run {
            file,
            algorithm,
            seed,
            processes,
            operations,
            json,
        }) => cmd_run(file, &algorithm, &seed, processes, operations, json),
        None => {
            eprintln!("vmsim: pass a subcommand");
            eprintln!();
            eprintln!("  vmsim generate -p 10 -n 500 -s 42 -o workload.txt");
            eprintln!("  vmsim run -f workload.txt -a LRU -s 42");
            eprintln!("  vmsim run -p 4 -n 200 -a SC -s demo");
            eprintln!();
            eprintln!("  vmsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Generates a workload and writes it to the output file or stdout.
fn cmd_generate(processes: usize, operations: usize, seed: &str, output: Option<String>) {
    let config = workload_config(processes, operations);
    let (instructions, next_ptr_id) = generate_workload(&config, seed);

    match output {
        Some(path) => {
            if let Err(e) = write_workload(&path, &instructions) {
                eprintln!("[!] FATAL: could not write '{}': {}", path, e);
                process::exit(1);
            }
            println!(
                "[*] Generated {} instructions ({} pointers) into {}",
                instructions.len(),
                next_ptr_id - 1,
                path
            );
        }
        None => print!("{}", serialize_workload(&instructions)),
    }
}

/// Runs the dual-policy simulation to completion and reports.
fn cmd_run(
    file: Option<String>,
    algorithm: &str,
    seed: &str,
    processes: usize,
    operations: usize,
    json: bool,
) {
    let algorithm = AlgorithmName::from_str(algorithm).unwrap_or_else(|e| {
        eprintln!("[!] {}", e);
        eprintln!("    choose one of: FIFO, SC, MRU, LRU, RND, OPT");
        process::exit(1);
    });

    let (instructions, next_ptr_id) = load_or_generate(file, seed, processes, operations);
    let instruction_count = instructions.len();

    let config = SimConfig {
        workload: workload_config(processes, operations),
        ..SimConfig::default()
    };
    let mut session = new_session(config, seed, algorithm, instructions, next_ptr_id);

    if let Err(e) = session.run_to_end() {
        eprintln!("\n[!] FATAL: {}", e);
        process::exit(1);
    }

    let snapshot = session.snapshot();
    if json {
        let report = serde_json::json!({
            "instructions": instruction_count,
            "opt": snapshot.opt.metrics,
            "chosen": {
                "algorithm": algorithm.as_str(),
                "metrics": snapshot.chosen.metrics,
            },
        });
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        stats::print_comparison(
            snapshot.opt.metrics,
            snapshot.chosen.metrics,
            algorithm,
            instruction_count,
        );
    }
}

/// Loads the workload file, or generates one when no file was given.
fn load_or_generate(
    file: Option<String>,
    seed: &str,
    processes: usize,
    operations: usize,
) -> (Vec<ProcessInstruction>, u32) {
    match file {
        Some(path) => {
            let parsed = load_workload(&path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read '{}': {}", path, e);
                process::exit(1);
            });
            for warning in &parsed.warnings {
                eprintln!("[Loader] WARNING: skipped {}", warning);
            }
            println!(
                "[*] Loaded {} instructions from {} ({} lines skipped)",
                parsed.instructions.len(),
                path,
                parsed.warnings.len()
            );
            (parsed.instructions, parsed.next_ptr_id)
        }
        None => {
            let config = workload_config(processes, operations);
            let (instructions, next_ptr_id) = generate_workload(&config, seed);
            println!(
                "[*] Generated {} instructions (seed {:?}, {} processes)",
                instructions.len(),
                seed,
                processes
            );
            (instructions, next_ptr_id)
        }
    }
}

/// Builds generator parameters from the CLI arguments.
fn workload_config(processes: usize, operations: usize) -> WorkloadConfig {
    WorkloadConfig {
        process_count: processes,
        op_count: operations,
        ..WorkloadConfig::default()
    }
}
