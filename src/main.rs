use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use env_logger::{Builder, Target};
use log::{info, LevelFilter};

use u_tsp_oracle::models::Instance;
use u_tsp_oracle::report::{estimate_permutations, format_path, result_file_name, save_text_report};
use u_tsp_oracle::search::{Progress, SearchConfig};
use u_tsp_oracle::solver::{Oracle, OracleConfig, OracleResult, Strategy};
use u_tsp_oracle::{OracleError, Result};

/// Smallest point count the command line accepts.
const MIN_POINTS: usize = 3;
/// Above this size the user is asked before searching.
const CONFIRM_ABOVE: usize = 25;

const USAGE: &str = "\
Usage: tsp-oracle [OPTIONS]

Options:
  -n, --points <N>        number of random points (default 10, minimum 3)
  -s, --seed <SEED>       random seed (default 42)
      --strategy <NAME>   adaptive | direct (default adaptive)
      --time-limit <SECS> stop searching after SECS seconds
      --output <PATH>     result file path (default tsp_result_n<N>_seed<SEED>.txt)
      --no-output         do not write a result file
      --log-level <LEVEL> error | warn | info | debug | trace | off
  -y, --yes               skip the confirmation for large instances
  -h, --help              print this help";

#[derive(Debug, Clone)]
struct CliOptions {
    points: usize,
    seed: u64,
    strategy: Strategy,
    time_limit: Option<Duration>,
    output: Option<PathBuf>,
    write_output: bool,
    log_level: Option<LevelFilter>,
    assume_yes: bool,
    help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            points: 10,
            seed: 42,
            strategy: Strategy::Adaptive,
            time_limit: None,
            output: None,
            write_output: true,
            log_level: None,
            assume_yes: false,
            help: false,
        }
    }
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String> {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| OracleError::invalid_config(format!("{name} requires a value")))
            };
            match flag.as_str() {
                "-n" | "--points" => options.points = parse_number(&value(&flag)?, &flag)?,
                "-s" | "--seed" => options.seed = parse_number(&value(&flag)?, &flag)?,
                "--strategy" => options.strategy = Strategy::parse(&value(&flag)?)?,
                "--time-limit" => {
                    let secs: f64 = parse_number(&value(&flag)?, &flag)?;
                    if !secs.is_finite() || secs <= 0.0 {
                        return Err(OracleError::invalid_config(
                            "--time-limit must be a positive number of seconds",
                        ));
                    }
                    options.time_limit = Some(Duration::from_secs_f64(secs));
                }
                "--output" => options.output = Some(PathBuf::from(value(&flag)?)),
                "--no-output" => options.write_output = false,
                "--log-level" => options.log_level = Some(parse_level(&value(&flag)?)?),
                "-y" | "--yes" => options.assume_yes = true,
                "-h" | "--help" => options.help = true,
                other => {
                    return Err(OracleError::invalid_config(format!(
                        "unknown argument '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(result_file_name(self.points, self.seed)))
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| OracleError::invalid_config(format!("invalid value '{raw}' for {flag}")))
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    match raw.to_ascii_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        other => Err(OracleError::invalid_config(format!(
            "unknown log level '{other}'"
        ))),
    }
}

fn init_logger(level: Option<LevelFilter>) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).target(Target::Stderr);
    match level {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            if let Ok(filters) = std::env::var("RUST_LOG") {
                builder.parse_filters(&filters);
            }
        }
    }
    builder.try_init().map_err(|e| OracleError::Io(io::Error::other(e)))
}

fn confirm_large(points: usize) -> Result<bool> {
    print!(
        "{points} points means {} possible tours. Continue? [y/N] ",
        estimate_permutations(points).describe()
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_result(result: &OracleResult) {
    println!();
    println!("Heuristic length: {:.6}", result.heuristic.distance());
    println!("Optimal length:   {:.6}", result.best.distance());
    println!(
        "Improvement:      {:.6} ({:.3}%)",
        result.improvement(),
        result.improvement_percent()
    );
    println!("Heuristic path:   {}", format_path(result.heuristic.order()));
    println!("Optimal path:     {}", format_path(result.best.order()));
    println!("Paths checked:    {}", result.tours_evaluated);
    println!(
        "Total paths:      {}",
        estimate_permutations(result.points.len()).describe()
    );
    println!("Time:             {:.2} seconds", result.elapsed.as_secs_f64());
    if result.cancelled() {
        println!("Search stopped early; the optimal length is the best found so far.");
    }
}

fn main() -> Result<()> {
    let options = CliOptions::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logger(options.log_level)?;

    if options.points < MIN_POINTS {
        return Err(OracleError::invalid_input(format!(
            "need at least {MIN_POINTS} points, got {}",
            options.points
        )));
    }
    if options.points > CONFIRM_ABOVE && !options.assume_yes && !confirm_large(options.points)? {
        println!("Aborted.");
        return Ok(());
    }

    let instance = Instance::random(options.points, options.seed)?;
    println!("TSP oracle: {} points, seed {}", options.points, options.seed);
    for (i, p) in instance.points().iter().enumerate() {
        println!("  {i:>3}: ({:.2}, {:.2})", p.x(), p.y());
    }

    let mut search = SearchConfig::default();
    if let Some(limit) = options.time_limit {
        search = search.with_time_limit(limit);
    }
    let config = OracleConfig::default()
        .with_strategy(options.strategy)
        .with_search(search);

    let mut on_progress = |p: &Progress| {
        eprint!(
            "\rChecked: {} paths | Nodes: {} | Speed: {:.0} paths/s | Time: {:.1}s",
            p.tours_evaluated,
            p.nodes_expanded,
            p.rate(),
            p.elapsed.as_secs_f64()
        );
    };
    let result = Oracle::new(config).solve_with_cancel(&instance, None, &mut on_progress)?;
    eprintln!();
    print_result(&result);

    if options.write_output {
        let path = options.output_path();
        save_text_report(&path, &result)?;
        info!("cli: saved result path={}", path.display());
        println!("Result saved to {}", path.display());
    }
    Ok(())
}
