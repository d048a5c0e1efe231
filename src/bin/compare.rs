use clap::{App, Arg};
use dpllsat::formula::text::{parse, parse_file};
use dpllsat::*;

// Runs the DPLL search once per branching heuristic on the same formula.
fn main() {
    env_logger::init();

    let matches = App::new("compare")
        .about("Compares the branching heuristics on one formula")
        .arg(Arg::with_name("INPUT").help("input file (one clause per line)").index(1))
        .get_matches();

    let f = match matches.value_of("INPUT") {
        Some(path) => parse_file(path),
        None => parse(std::io::stdin()),
    };
    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(2);
        }
    };

    println!(
        "{:<10} {:<14} {:>10} {:>12} {:>12}",
        "heuristic", "verdict", "decisions", "propagations", "seconds"
    );
    for &heuristic in Heuristic::ALL.iter() {
        let mut solver = Solver::with_heuristic(f.clone(), heuristic);
        let verdict = solver.solve().verdict();
        let stats = solver.stats();
        println!(
            "{:<10} {:<14} {:>10} {:>12} {:>12.6}",
            heuristic.name(),
            verdict.to_string(),
            stats.decisions,
            stats.propagations,
            stats.elapsed.as_secs_f64()
        );
    }
}
