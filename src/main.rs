use clap::{App, Arg, ArgMatches};
use foldsat::brute_force::{count_models, truth_table};
use foldsat::formula::dimacs::{parse, parse_file, DimacsParseError};
use foldsat::formula::random::random_3sat;
use foldsat::*;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let matches = App::new("foldsat")
        .about("Decides 3-CNF formulas by clause-at-a-time constraint propagation")
        .arg(Arg::with_name("INPUT").help("input file (in 3-CNF DIMACS)").index(1))
        .arg(
            Arg::with_name("random")
                .long("random")
                .value_name("SIZE")
                .help("solve a random formula with SIZE variables and SIZE clauses")
                .conflicts_with("INPUT"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .help("seed for --random")
                .requires("random"),
        )
        .arg(
            Arg::with_name("max-frontier")
                .long("max-frontier")
                .value_name("N")
                .help("give up once more than N constraint sets are live"),
        )
        .arg(
            Arg::with_name("truth-table")
                .long("truth-table")
                .help("print every assignment with the formula's value instead of solving")
                .conflicts_with_all(&["count", "check"]),
        )
        .arg(
            Arg::with_name("count")
                .long("count")
                .help("count satisfying assignments instead of solving")
                .conflicts_with("check"),
        )
        .arg(
            Arg::with_name("check")
                .long("check")
                .value_name("ASSIGNMENT")
                .allow_hyphen_values(true)
                .help("evaluate the formula under ASSIGNMENT, e.g. \"1 -2 3\", instead of solving"),
        )
        .arg(
            Arg::with_name("no-dedup")
                .long("no-dedup")
                .help("keep duplicate constraint sets in the frontier"),
        )
        .get_matches();

    let f = match read_formula(&matches) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(-1);
        }
    };

    if matches.is_present("truth-table") || matches.is_present("count") || matches.is_present("check") {
        match inspect(&f, &matches) {
            Ok(satisfied) => std::process::exit(if satisfied { 0 } else { 1 }),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(-1);
            }
        }
    }

    let config = match config_from(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(-1);
        }
    };

    info!(
        "solving {} clauses over {} variables",
        f.num_clauses(),
        f.num_variables()
    );
    let mut solver = Solver::with_config(f.clone(), config);

    let exit_code = match solver.solve() {
        Ok(SatResult::Satisfiable(witness)) => {
            info!("witness satisfies formula: {}", f.evaluate(&witness));
            println!("s SATISFIABLE");
            println!("{}", witness);
            0
        }
        Ok(SatResult::Unsatisfiable) => {
            println!("s UNSATISFIABLE");
            1
        }
        Err(e) => {
            error!("{}", e);
            println!("s UNKNOWN");
            2
        }
    };
    std::process::exit(exit_code);
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] DimacsParseError),
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error("invalid value for --{0}: '{1}'")]
    BadNumber(&'static str, String),
}

fn number_arg(matches: &ArgMatches, name: &'static str) -> Result<Option<u64>, CliError> {
    matches
        .value_of(name)
        .map(|s| s.parse::<u64>().map_err(|_| CliError::BadNumber(name, s.to_string())))
        .transpose()
}

fn read_formula(matches: &ArgMatches) -> Result<Formula, CliError> {
    if let Some(size) = number_arg(matches, "random")? {
        let size = size as usize;
        let mut rng = match number_arg(matches, "seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let f = random_3sat(&mut rng, size, size)?;
        println!("c {}", f);
        return Ok(f);
    }

    let f = match matches.value_of("INPUT") {
        Some(path) => parse_file(path)?,
        None => parse(std::io::stdin())?,
    };
    Ok(f)
}

/// Runs the enumeration and checking modes. Returns whether the formula
/// came out satisfied.
fn inspect(f: &Formula, matches: &ArgMatches) -> Result<bool, CliError> {
    if let Some(assignment) = matches.value_of("check") {
        let assignment = assignment.parse::<Assignment>()?;
        let satisfied = f.check(&assignment)?;
        println!("formula evaluates to {}", satisfied);
        return Ok(satisfied);
    }

    let mut models = 0u64;
    if matches.is_present("truth-table") {
        let header = f.variables().map(|v| format!("{:>4}", v.to_string())).collect::<String>();
        println!("{} | result", header);
        for row in truth_table(f)? {
            let values = row
                .assignment
                .iter()
                .map(|(_, value)| format!("{:>4}", if *value { "T" } else { "F" }))
                .collect::<String>();
            println!("{} | {}", values, if row.satisfied { "T" } else { "F" });
            models += row.satisfied as u64;
        }
    } else {
        models = count_models(f)?;
    }
    println!("c satisfying assignments: {}", models);
    Ok(models > 0)
}

fn config_from(matches: &ArgMatches) -> Result<SolverConfig, CliError> {
    Ok(SolverConfig {
        max_frontier: number_arg(matches, "max-frontier")?.map(|n| n as usize),
        dedup: !matches.is_present("no-dedup"),
    })
}
