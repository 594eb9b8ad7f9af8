//! Recall Puzzle console host
//!
//! Loads a scenario (edgework + settings) and drives one puzzle from stdin.
//! Usage: `recall-puzzle [scenario.json [settings.json]]`
//!
//! A settings file, when given, replaces the scenario's own settings.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use recall_puzzle::command::{self, Command};
use recall_puzzle::edgework::{Edgework, Indicator, ModuleEntry, Port};
use recall_puzzle::sim::PuzzleEvent;
use recall_puzzle::{Puzzle, PuzzleError, Scenario, Settings};

const HOST_HELP: &str = "commands: activate | solve <n> | press <digits> | submit <digits> | autosolve | status | report | help | quit";

fn main() {
    env_logger::init();
    log::info!("Recall Puzzle (console) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PuzzleError> {
    let mut args = std::env::args().skip(1);
    let mut scenario = match args.next() {
        Some(path) => Scenario::load(path)?,
        None => demo_scenario(),
    };
    if let Some(path) = args.next() {
        scenario.settings = Settings::load(path)?;
    }

    let seed = scenario.settings.seed.unwrap_or_else(clock_seed);
    log::info!("Stage generation seed: {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut puzzle = Puzzle::setup(&scenario.edgework, &scenario.settings, &mut rng)?;
    println!("{HOST_HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            continue;
        };

        match verb.to_ascii_lowercase().as_str() {
            "activate" => print_events(&puzzle.activate()),
            "solve" => match words.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(count) => print_events(&puzzle.observe_progress(count)),
                None => println!("usage: solve <count>"),
            },
            "press" | "submit" => match Command::parse(&line) {
                Ok(cmd) => match command::execute(&mut puzzle, &cmd, &mut rng) {
                    Ok(outcome) => {
                        print_events(&outcome.events);
                        println!(
                            "{:?}: {} pressed, {} entered",
                            outcome.result, outcome.pressed, outcome.entered
                        );
                    }
                    Err(err) => println!("{err}"),
                },
                Err(err) => println!("{err}"),
            },
            "autosolve" => match command::force_solve(&mut puzzle) {
                Ok(Some(events)) => print_events(&events),
                Ok(None) => println!("not accepting digits yet"),
                Err(err) => println!("{err}"),
            },
            "status" => print_frame(&puzzle),
            "report" => match serde_json::to_string_pretty(&puzzle.report()) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("{err}"),
            },
            "help" => println!("{HOST_HELP}\n{}", command::HELP),
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }
        io::stdout().flush()?;
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn print_events(events: &[PuzzleEvent]) {
    for event in events {
        match event {
            PuzzleEvent::Strike(reason) => println!("STRIKE ({reason:?})"),
            PuzzleEvent::Solved => println!("SOLVED"),
            other => println!("{other:?}"),
        }
    }
}

fn print_frame(puzzle: &Puzzle) {
    let frame = puzzle.frame();
    let leds: String = frame
        .leds
        .iter()
        .map(|&lit| if lit { '*' } else { '.' })
        .collect();
    println!("stage [{}]  big [{}]  leds [{}]", frame.stage_label, frame.big, leds);
    if !frame.progress.is_empty() {
        println!("{}", frame.progress);
    }
}

fn demo_scenario() -> Scenario {
    let modules = ["Wires", "The Button", "Keypad", "Simon Says", "Souvenir"]
        .iter()
        .map(|name| ModuleEntry::solvable(name))
        .chain(std::iter::once(ModuleEntry::needy("Venting Gas")))
        .collect();

    Scenario {
        edgework: Edgework {
            serial: "KT4NE8".to_string(),
            batteries: 3,
            indicators: vec![Indicator::new("BOB", true), Indicator::new("FRK", false)],
            port_plates: vec![vec![Port::Parallel, Port::Serial], vec![]],
            modules,
        },
        settings: Settings::default(),
    }
}
