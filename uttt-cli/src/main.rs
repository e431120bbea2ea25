//! uttt: Ultimate Tic-Tac-Toe self-play training-data generation.
//!
//! Subcommands:
//! - search    single-threaded random-rollout self-play from one state
//! - generate  batched evaluator-guided self-play from a task list

use std::env;
use std::path::PathBuf;
use std::process;

use uttt_core::{engine, parse_state, GameState};
use uttt_mcts::rollout::RolloutMcts;
use uttt_mcts::{SelectionPolicy, UniformEvaluator};
use uttt_replay::{EvaluationWriter, RolloutDecisionRecord};
use uttt_runtime::{load_config, run_scheduler, RuntimeConfig};

mod task;

fn print_help() {
    eprintln!(
        r#"uttt - Ultimate Tic-Tac-Toe self-play data generation

USAGE:
    uttt <COMMAND> [OPTIONS]

COMMANDS:
    search      Play one game with random-rollout MCTS, recording every decision
    generate    Play a task list with guided MCTS across worker threads

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `uttt <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("uttt {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_search(args: &[String]) {
    let mut state: Option<GameState> = None;
    let mut simulations: u32 = 1000;
    let mut exploration: f64 = 2.0;
    let mut seed: u64 = 0;
    let mut out: Option<String> = None;
    let mut select = SelectionPolicy::Sample;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"uttt search

USAGE:
    uttt search --out PATH [--state DIGITS] [--simulations N] [--exploration C] [--seed S] [--select best|sample|random]

OPTIONS:
    --out PATH          Output NDJSON file (required)
    --state DIGITS      93-digit start state (default: fresh game)
    --simulations N     Simulations per decision (default: 1000)
    --exploration C     UCT exploration strength (default: 2.0)
    --seed S            RNG seed (default: 0)
    --select POLICY     Move selection policy (default: sample)
"#
                );
                return;
            }
            "--state" => {
                let value = args.get(i + 1).cloned().unwrap_or_default();
                state = Some(parse_state(&value).unwrap_or_else(|e| {
                    eprintln!("Invalid --state value: {e}");
                    process::exit(1);
                }));
                i += 2;
            }
            "--simulations" => {
                simulations = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("Invalid --simulations value");
                        process::exit(1);
                    });
                i += 2;
            }
            "--exploration" => {
                exploration = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("Invalid --exploration value");
                        process::exit(1);
                    });
                i += 2;
            }
            "--seed" => {
                seed = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("Invalid --seed value");
                        process::exit(1);
                    });
                i += 2;
            }
            "--select" => {
                select = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("Invalid --select value (best|sample|random)");
                        process::exit(1);
                    });
                i += 2;
            }
            "--out" => {
                out = Some(args.get(i + 1).cloned().unwrap_or_default());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `uttt search`: {}", other);
                eprintln!("Run `uttt search --help` for usage.");
                process::exit(1);
            }
        }
    }

    let out = out.unwrap_or_else(|| {
        eprintln!("Missing --out");
        process::exit(1);
    });
    let mut state = state.unwrap_or_default();
    if state.is_terminal() {
        eprintln!("Start state is already terminal");
        process::exit(1);
    }

    let mut writer = EvaluationWriter::create(PathBuf::from(&out)).unwrap_or_else(|e| {
        eprintln!("Failed to open output file: {e}");
        process::exit(1);
    });
    let mut mcts = RolloutMcts::new(state, simulations, exploration, seed);
    println!("{state}");
    while !state.is_terminal() {
        mcts.run();
        let record = RolloutDecisionRecord::new(&mcts.evaluated_state(), &mcts.evaluated_actions());
        let action = mcts.select_action(select);
        writer.write_record(&record).unwrap_or_else(|e| {
            eprintln!("Failed to write record: {e}");
            process::exit(1);
        });
        state = engine::play(&state, action);
        mcts.synchronize(&state);
        println!("selected {action}");
        println!("{state}");
    }
    writer.flush().unwrap_or_else(|e| {
        eprintln!("Failed to flush output file: {e}");
        process::exit(1);
    });
    println!(
        "result: {} | tree size: {} | tree height: {}",
        state.result(),
        mcts.size(),
        mcts.height()
    );
    println!("evaluations saved to {out}");
}

fn cmd_generate(args: &[String]) {
    let mut tasks_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut workers: Option<usize> = None;
    let mut max_batch: Option<usize> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"uttt generate

USAGE:
    uttt generate --tasks PATH [--config cfg.yaml] [--workers N] [--max-batch N]

OPTIONS:
    --tasks PATH        Task-list file, one task per line (required):
                        <93-digit state> <simulations> <exploration> <seed> <output-path>
    --config PATH       Runtime YAML config (default: built-in defaults)
    --workers N         Override num_workers from the config
    --max-batch N       Override max_batch_size from the config
"#
                );
                return;
            }
            "--tasks" => {
                tasks_path = Some(args.get(i + 1).cloned().unwrap_or_default());
                i += 2;
            }
            "--config" => {
                config_path = Some(args.get(i + 1).cloned().unwrap_or_default());
                i += 2;
            }
            "--workers" => {
                workers = Some(args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or_else(
                    || {
                        eprintln!("Invalid --workers value");
                        process::exit(1);
                    },
                ));
                i += 2;
            }
            "--max-batch" => {
                max_batch = Some(args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or_else(
                    || {
                        eprintln!("Invalid --max-batch value");
                        process::exit(1);
                    },
                ));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `uttt generate`: {}", other);
                eprintln!("Run `uttt generate --help` for usage.");
                process::exit(1);
            }
        }
    }

    let tasks_path = tasks_path.unwrap_or_else(|| {
        eprintln!("Missing --tasks");
        process::exit(1);
    });
    let mut config = match config_path {
        Some(path) => load_config(&path).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }),
        None => RuntimeConfig::default(),
    };
    if let Some(workers) = workers {
        config.num_workers = workers;
    }
    if let Some(max_batch) = max_batch {
        config.max_batch_size = max_batch;
    }
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        process::exit(1);
    }

    let tasks = task::load_tasks(&tasks_path).unwrap_or_else(|e| {
        eprintln!("Failed to load task list: {e}");
        process::exit(1);
    });
    println!(
        "loaded {} tasks | {} workers | max batch {}",
        tasks.len(),
        config.num_workers,
        config.max_batch_size
    );

    let report = run_scheduler(UniformEvaluator, &tasks, &config);
    println!(
        "completed {} tasks ({} failed) | {} batches | {} evaluations",
        report.completed, report.failed, report.batches, report.evaluations
    );
    if report.failed > 0 {
        process::exit(1);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "search" => {
            cmd_search(&args[2..]);
        }
        "generate" => {
            cmd_generate(&args[2..]);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            process::exit(1);
        }
    }
}
