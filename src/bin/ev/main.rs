// Draft EV Runner — seeded Monte Carlo over the built-in draft events
//
// Usage:
//   cargo run --release --bin ev                      # All events, 10 runs each
//   cargo run --release --bin ev -- premier           # Filter by name
//   cargo run --release --bin ev -- --win-rate 55     # Assumed game win rate
//   cargo run --release --bin ev -- --runs 30 --json  # More seeds + JSON report
//   cargo run --release --bin ev -- --seed 42         # Custom base seed

mod report;
mod scenarios;

use draft_ev::{run_trials, summarize, PricingModel, SimulationParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::*;
use rust_decimal::prelude::ToPrimitive;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CliArgs {
    runs: usize,
    seed: u64,
    trials: usize,
    win_rate: u32,
    currency: String,
    verbose: bool,
    json: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    match parse_args_from(std::env::args().skip(1).collect()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn parse_args_from(args: Vec<String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        runs: 10,
        seed: 0,
        trials: draft_ev::DEFAULT_TRIALS,
        win_rate: draft_ev::DEFAULT_WIN_RATE,
        currency: "usd".to_string(),
        verbose: false,
        json: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(10);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--trials" => {
                i += 1;
                if i < args.len() {
                    cli.trials = args[i].parse().unwrap_or(draft_ev::DEFAULT_TRIALS);
                }
            }
            "--win-rate" => {
                i += 1;
                if i < args.len() {
                    cli.win_rate = args[i].parse().unwrap_or(draft_ev::DEFAULT_WIN_RATE);
                }
            }
            "--currency" => {
                i += 1;
                if i < args.len() {
                    cli.currency = args[i].clone();
                }
            }
            "--verbose" => {
                cli.verbose = true;
            }
            "--json" => {
                cli.json = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    if cli.runs == 0 {
        return Err("--runs must be at least 1".to_string());
    }
    if cli.trials == 0 {
        return Err("--trials must be at least 1".to_string());
    }

    Ok(cli)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    let all_events = match scenarios::scenarios() {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Invalid built-in event definition: {e}");
            std::process::exit(1);
        }
    };

    let to_run: Vec<_> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_events
                .into_iter()
                .filter(|e| e.name().to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_events,
    };

    if to_run.is_empty() {
        eprintln!("No events match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let pricing = match PricingModel::with_defaults(&cli.currency) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Cannot price in {:?}: {e}", cli.currency);
            std::process::exit(1);
        }
    };

    let params = SimulationParams {
        trials: cli.trials,
        win_rate_percentage: cli.win_rate,
        verbose: cli.verbose,
    };

    println!("\n  Draft EV Runner");
    println!(
        "  PRNG: ChaCha8Rng | Currency: {} | Win rate: {}% | Trials/run: {} | Runs/event: {} | Base seed: {}",
        pricing.local_currency(),
        cli.win_rate,
        cli.trials,
        cli.runs,
        cli.seed
    );
    println!("  Running {} event(s)...\n", to_run.len());
    println!(
        "  {:<28} {:>8} {:>16} {:>10} {:>7}",
        "Event", "Fee", "EV", "Avg Win", "Time"
    );
    println!("  {}", "-".repeat(74));

    let mut scenario_reports = Vec::new();

    for event in &to_run {
        let start = Instant::now();
        let mut runs = Vec::with_capacity(cli.runs);

        for i in 0..cli.runs {
            let seed = cli.seed + i as u64;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcomes = run_trials(event, &params, &mut rng);
            match summarize(event, &outcomes, &pricing) {
                Ok(summary) => runs.push(RunResult { seed, summary }),
                Err(e) => {
                    eprintln!("Failed to summarize {:?}: {e}", event.name());
                    std::process::exit(1);
                }
            }
        }
        let elapsed_ms = start.elapsed().as_millis();

        let samples = |f: fn(&RunResult) -> f64| -> Vec<f64> { runs.iter().map(f).collect() };
        let ev = Stats::from_samples(&samples(|r| r.summary.ev.0.to_f64().unwrap_or(0.0)));
        let avg_win = Stats::from_samples(&samples(|r| {
            r.summary.avg_winnings_per_buyin.0.to_f64().unwrap_or(0.0)
        }));
        let total_earnings = Stats::from_samples(&samples(|r| {
            r.summary.total_earnings.0.to_f64().unwrap_or(0.0)
        }));
        let entry_fee = runs[0].summary.entry_fee;

        println!(
            "  {:<28} {:>8.2} {:>9.4}±{:<6.4} {:>10.4} {:>5}ms",
            event.name(),
            entry_fee.0.to_f64().unwrap_or(0.0),
            ev.mean,
            ev.ci_half_width(),
            avg_win.mean,
            elapsed_ms,
        );

        scenario_reports.push(ScenarioReport {
            name: event.name().to_string(),
            win_rate_percentage: cli.win_rate,
            trials_per_run: cli.trials,
            n_runs: cli.runs,
            entry_fee,
            ev,
            avg_winnings_per_buyin: avg_win,
            total_earnings,
            elapsed_ms,
            runs,
        });
    }

    println!("  {}\n", "-".repeat(74));

    // Full textual report for the last run of each event
    for scenario in &scenario_reports {
        if let Some(last) = scenario.runs.last() {
            println!("{} (seed {}):", scenario.name, last.seed);
            last.summary.print_report();
            println!();
        }
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    if cli.json {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let report = EvReport {
            timestamp: format!("{ts}"),
            version: env!("CARGO_PKG_VERSION"),
            prng: "ChaCha8Rng",
            local_currency: pricing.local_currency().to_string(),
            trials_per_run: cli.trials,
            n_runs_per_scenario: cli.runs,
            scenarios: scenario_reports,
        };

        let dir = std::path::Path::new("results");
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create results/: {e}");
            std::process::exit(1);
        }
        let path = dir.join(format!("ev-{ts}.json"));
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Failed to write report: {e}");
                    std::process::exit(1);
                }
                println!("  Results saved to: {}\n", path.display());
            }
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
