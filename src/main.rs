use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Instant;
use u_jobshop::config::{SearchConfig, DEFAULT_SEED};
use u_jobshop::dispatching::DispatchRule;
use u_jobshop::io::{read_instance, write_solution, write_solution_json};
use u_jobshop::scheduler::{RuleSearch, ScheduleKpi};

fn cli() -> Command {
    Command::new("u-jobshop")
        .about("Solves job-shop instances with priority dispatching rules")
        .arg_required_else_help(true)
        .arg(arg!(-s --sequential "Evaluate the rules one after another"))
        .arg(arg!(-p --parallel "Evaluate the rules on a worker pool"))
        .group(
            ArgGroup::new("mode")
                .args(["sequential", "parallel"])
                .required(true),
        )
        .arg(
            arg!(-f --file <FILE> "Instance file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-o --output <FILE> "Write the solution to this file")
                .value_parser(clap::value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            arg!(-t --threads [N] "Worker threads in parallel mode (default: available cores)")
                .value_parser(clap::value_parser!(usize))
                .conflicts_with("sequential"),
        )
        .arg(
            arg!(--seed [SEED] "Top-level seed for the RANDOM rule (default: 42)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--rule [RULE] "Only evaluate this rule (SPT, LPT, SRT, MWR, FIFO, MOR, RANDOM)")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(arg!(--json "Write the solution file as JSON"))
        .arg(
            arg!(-v --verbose "Increase logging (repeat for more detail)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("file")
        .ok_or_else(|| anyhow!("No instance file given"))?;
    let instance =
        read_instance(path).with_context(|| format!("Failed to load {}", path.display()))?;

    let rules = match matches.get_one::<String>("rule") {
        Some(name) => vec![name.parse::<DispatchRule>()?],
        None => DispatchRule::ALL.to_vec(),
    };
    let workers = if matches.get_flag("parallel") {
        match matches.get_one::<usize>("threads") {
            Some(&n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(rules.len()),
        }
    } else {
        1
    };
    let seed = matches.get_one::<u64>("seed").copied().unwrap_or(DEFAULT_SEED);
    let verbosity = matches.get_count("verbose");

    let config = SearchConfig::new()
        .with_rules(rules)
        .with_concurrency_limit(workers)
        .with_seed(seed)
        .with_verbosity(verbosity);

    let start = Instant::now();
    let report = RuleSearch::new(config).run(&instance)?;
    let elapsed = start.elapsed();

    let best = &report.best;
    println!("Solved in:\t {:.6}s", elapsed.as_secs_f64());
    println!("Makespan:\t {}", best.makespan);
    println!("Rule:\t\t {}", best.rule);

    if verbosity > 0 {
        let kpi = ScheduleKpi::calculate(&instance, best);
        eprintln!(
            "Lower bound {} (gap {:.1}%), avg utilization {:.1}%",
            kpi.lower_bound,
            kpi.gap * 100.0,
            kpi.avg_utilization * 100.0
        );
    }

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        if matches.get_flag("json") {
            write_solution_json(output, best)
        } else {
            write_solution(output, best)
        }
        .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(())
}
