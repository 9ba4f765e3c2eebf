// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

use std::env;
use std::process;

use clap::{App, Arg};

use warehouse_solver::config::{Algorithm, HeuristicKind, SolverConfig};
use warehouse_solver::moves::Plan;
use warehouse_solver::{taboo_cells, LoadWarehouse, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("warehouse-solver")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("macro")
                .short("m")
                .long("macro")
                .help("Print the solution as pushes only"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["manhattan", "lookup", "deadlock"])
                .default_value("manhattan")
                .help("Cost estimate used to guide the search"),
        )
        .arg(
            Arg::with_name("best-first")
                .short("b")
                .long("best-first")
                .help("Order by the heuristic alone instead of A* (faster, not optimal)"),
        )
        .arg(
            Arg::with_name("allow-taboo")
                .long("allow-taboo")
                .help("Allow pushing boxes onto taboo cells"),
        )
        .arg(
            Arg::with_name("check-interval")
                .long("check-interval")
                .takes_value(true)
                .help("Evaluations between deadlock checks of the deadlock heuristic"),
        )
        .arg(
            Arg::with_name("taboo")
                .short("t")
                .long("taboo")
                .help("Print taboo cells"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Don't print search progress"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();

    let mut config = SolverConfig::new()
        .allow_taboo_push(matches.is_present("allow-taboo"))
        .print_status(!matches.is_present("quiet"));
    if matches.is_present("best-first") {
        config = config.algorithm(Algorithm::BestFirst);
    }
    if let Some(heuristic) = matches.value_of("heuristic") {
        let heuristic: HeuristicKind = heuristic.parse().unwrap_or_else(|err| {
            println!("{}", err);
            process::exit(1);
        });
        config = config.heuristic(heuristic);
    }
    if let Some(interval) = matches.value_of("check-interval") {
        let interval: u32 = interval.parse().unwrap_or_else(|err| {
            println!("Invalid check interval {}: {}", interval, err);
            process::exit(1);
        });
        config = config.deadlock_check_interval(interval);
    }

    let warehouse = path.load_warehouse().unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!(
            "Can't load level {} in {}: {}",
            path,
            current_dir.display(),
            err
        );
        process::exit(1);
    });

    println!("{}", warehouse);
    if matches.is_present("taboo") {
        println!("Taboo cells:");
        println!("{}", taboo_cells(&warehouse));
    }

    println!("Solving {}...", path);
    if matches.is_present("macro") {
        let solver_ok = warehouse.solve_macro(&config);
        println!("{}", solver_ok.stats);
        match solver_ok.plan {
            Plan::Solved(ref actions) => {
                println!("Found solution:");
                for action in actions {
                    println!("{}", action);
                }
                println!("Pushes: {}", actions.len());
            }
            Plan::Impossible => println!("Impossible"),
        }
    } else {
        let solver_ok = warehouse.solve_elem(&config);
        println!("{}", solver_ok.stats);
        match solver_ok.plan {
            Plan::Solved(ref moves) => {
                println!("Found solution:");
                print!("{}", warehouse.xsb_solution(moves, false));
                println!("{}", solver_ok.plan.tokens().join(" "));
                println!("{}", moves);
                println!("Moves: {}", moves.move_cnt());
                println!("Pushes: {}", moves.push_cnt());
            }
            Plan::Impossible => println!("Impossible"),
        }
    }
}
