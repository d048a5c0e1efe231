use clap::{App, Arg};
use dpllsat::elimination::eliminate;
use dpllsat::formula::text::{parse, parse_file, ParseError};
use dpllsat::formula::Formula;
use dpllsat::resolution::{saturate, Outcome};
use dpllsat::*;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .about("Decides satisfiability of a CNF formula given one clause per line")
        .arg(Arg::with_name("INPUT").help("input file (one clause per line)").index(1))
        .arg(
            Arg::with_name("procedure")
                .long("procedure")
                .short("p")
                .takes_value(true)
                .possible_values(&["dpll", "dp", "resolution"])
                .default_value("dpll")
                .help("decision procedure"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["static", "dynamic", "first"])
                .default_value("static")
                .help("branching heuristic for dpll"),
        )
        .get_matches();

    let f = match matches.value_of("INPUT") {
        Some(path) => parse_file(path),
        None => parse(std::io::stdin()),
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => exit_with_parse_error(e),
    };

    let exit_code = match matches.value_of("procedure") {
        Some("dp") => run_elimination(&f),
        Some("resolution") => run_resolution(&f),
        _ => {
            // possible_values guarantees this parses
            let heuristic = matches
                .value_of("heuristic")
                .and_then(|h| h.parse().ok())
                .unwrap_or_default();
            run_dpll(f, heuristic)
        }
    };
    std::process::exit(exit_code);
}

fn run_dpll(f: Formula, heuristic: Heuristic) -> i32 {
    let mut solver = Solver::with_heuristic(f, heuristic);
    let result = solver.solve();

    println!("{}", result.verdict());
    if let Some(model) = result.model() {
        println!("Assignment: {}", model);
    }
    println!("{}", solver.stats());

    match result.verdict() {
        Verdict::Satisfiable => 0,
        Verdict::Unsatisfiable => 1,
    }
}

fn run_elimination(f: &Formula) -> i32 {
    let e = eliminate(f);
    println!("{}", e.verdict);
    println!("Solving time: {} s", e.elapsed.as_secs_f64());
    println!("Eliminated Variables: {}", e.eliminated);

    match e.verdict {
        Verdict::Satisfiable => 0,
        Verdict::Unsatisfiable => 1,
    }
}

fn run_resolution(f: &Formula) -> i32 {
    let s = saturate(f);
    println!("{}", s.outcome);
    println!("Solving time: {} s", s.elapsed.as_secs_f64());
    println!("Resolvents Added: {}", s.resolvents);

    match s.outcome {
        Outcome::Saturated => 0,
        Outcome::Refuted => 1,
    }
}

fn exit_with_parse_error(e: ParseError) -> ! {
    eprintln!("parse error: {}", e);
    std::process::exit(2);
}
