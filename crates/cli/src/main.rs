//! Terminal front end for the card grid puzzle.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pokergrid_core::{
    format_condition, satisfies_with_rules, validate_puzzle, witness_with_rules, Card,
    ConditionKind, EngineConfig, Grid, Line, LineStatus, Pos, Puzzle, PuzzleEvent, RngState,
    GRID_SIZE,
};
use pokergrid_data::{builtin_puzzle, load_engine_config, load_fixture};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokergrid")]
#[command(about = "Card grid puzzle: shuffle, inspect and play a 5x5 condition grid")]
struct Args {
    /// Puzzle file (JSON); the built-in prototype is used when omitted
    #[arg(long, global = true)]
    puzzle: Option<PathBuf>,

    /// Engine config file (JSON) with search settings and an optional seed
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the layout shuffle
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of shuffle trials
    #[arg(long, global = true)]
    trials: Option<usize>,

    /// Print machine-readable JSON instead of a board
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shuffle the puzzle and print the starting board
    Show,
    /// Print the solved board
    Solution,
    /// Evaluate one condition against up to five cards (`-` for an empty cell)
    Eval {
        #[arg(short, long)]
        condition: ConditionKind,
        cards: Vec<String>,
    },
    /// Check that the authored solution is consistent
    Validate,
    /// Interactive play on stdin
    Play,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut engine = match &args.config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(trials) = args.trials {
        engine.search.trials = trials;
    }
    if args.seed.is_some() {
        engine.seed = args.seed;
    }

    let fixture = match &args.puzzle {
        Some(path) => load_fixture(path)?,
        None => builtin_puzzle(),
    };
    debug!(puzzle = %fixture.name, ?engine, "loaded puzzle");

    match args.command {
        Command::Show => {
            let mut rng = make_rng(&engine);
            let puzzle = Puzzle::with_shuffle(fixture, engine.search, &mut rng)?;
            if args.json {
                print_json(&puzzle)?;
            } else {
                println!("seed {}", rng.seed());
                print!("{}", render_board(&puzzle, puzzle.current()));
            }
        }
        Command::Solution => {
            let puzzle = Puzzle::new(fixture)?;
            if args.json {
                print_json(&puzzle)?;
            } else {
                print!("{}", render_board(&puzzle, puzzle.solution()));
            }
        }
        Command::Eval { condition, cards } => {
            let cells = parse_cells(&cards)?;
            let satisfied = satisfies_with_rules(&cells, condition, fixture.rules);
            let witness = witness_with_rules(&cells, condition, fixture.rules);
            if args.json {
                let value = serde_json::json!({
                    "condition": condition,
                    "satisfied": satisfied,
                    "witness": witness,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "{}: {}",
                    format_condition(condition, fixture.rules),
                    if satisfied { "satisfied" } else { "not satisfied" }
                );
                println!("witness: {witness:?}");
            }
        }
        Command::Validate => {
            let report = validate_puzzle(&fixture.layout, &fixture.conditions, fixture.rules);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_valid() {
                println!("{}: ok", fixture.name);
            } else {
                for issue in &report.issues {
                    println!("{}: {issue}", fixture.name);
                }
            }
            if !report.is_valid() {
                std::process::exit(1);
            }
        }
        Command::Play => {
            let mut rng = make_rng(&engine);
            let puzzle = Puzzle::with_shuffle(fixture, engine.search, &mut rng)?;
            run_play(puzzle)?;
        }
    }
    Ok(())
}

fn make_rng(engine: &EngineConfig) -> RngState {
    match engine.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    }
}

fn parse_cells(tokens: &[String]) -> anyhow::Result<Vec<Option<Card>>> {
    if tokens.len() > GRID_SIZE {
        bail!("at most {GRID_SIZE} cards, got {}", tokens.len());
    }
    tokens
        .iter()
        .map(|token| match token.as_str() {
            "-" | "." => Ok(None),
            other => other
                .parse()
                .map(Some)
                .with_context(|| format!("card '{other}'")),
        })
        .collect()
}

fn print_json(puzzle: &Puzzle) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "name": puzzle.name(),
        "grid": puzzle.current(),
        "statuses": puzzle.statuses(),
        "report": puzzle.check_all_conditions(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Board with each row's condition on the right and the column conditions
/// underneath. Satisfied lines get a check mark; witness cells are starred.
fn render_board(puzzle: &Puzzle, grid: &Grid) -> String {
    let statuses: Vec<LineStatus> = Line::ALL
        .into_iter()
        .filter_map(|line| {
            let condition = puzzle.conditions().get(line)?;
            let cells = grid.line(line);
            Some(LineStatus {
                line,
                condition,
                satisfied: puzzle.is_condition_satisfied(&cells, condition),
                witness: puzzle.satisfying_cards(condition, &cells),
            })
        })
        .collect();

    let mut starred = HashSet::new();
    for status in &statuses {
        for idx in &status.witness {
            starred.insert(match status.line {
                Line::Row(row) => Pos::new(row, *idx),
                Line::Column(col) => Pos::new(*idx, col),
            });
        }
    }

    let mut out = String::new();
    out.push_str("     ");
    for col in 0..GRID_SIZE {
        out.push_str(&format!("  {col}   "));
    }
    out.push('\n');
    for row in 0..GRID_SIZE {
        out.push_str(&format!("  {row}  "));
        for col in 0..GRID_SIZE {
            let pos = Pos::new(row, col);
            let label = grid
                .get(pos)
                .map(|card| card.to_string())
                .unwrap_or_else(|| ".".to_string());
            let mark = if starred.contains(&pos) { '*' } else { ' ' };
            out.push_str(&format!("{label:>4}{mark} "));
        }
        if let Some(status) = statuses.iter().find(|s| s.line == Line::Row(row)) {
            out.push_str(&status_label(puzzle, status));
        }
        out.push('\n');
    }
    for status in statuses.iter().filter(|s| matches!(s.line, Line::Column(_))) {
        out.push_str(&format!("  {}: {}\n", status.line, status_label(puzzle, status)));
    }
    out
}

fn status_label(puzzle: &Puzzle, status: &LineStatus) -> String {
    let check = if status.satisfied { "✓" } else { " " };
    format!("{check} {}", puzzle.format_condition(status.condition))
}

const PLAY_HELP: &str = "commands: swap R C R C | reset | check | show | solution | help | quit";

fn run_play(mut puzzle: Puzzle) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{PLAY_HELP}");
    print!("{}", render_board(&puzzle, puzzle.current()));
    report_events(&mut puzzle);

    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] | ["q"] => break,
            ["help"] | ["?"] => println!("{PLAY_HELP}"),
            ["show"] | ["s"] => print!("{}", render_board(&puzzle, puzzle.current())),
            ["solution"] => print!("{}", render_board(&puzzle, puzzle.solution())),
            ["reset"] | ["r"] => {
                puzzle.reset_to_initial_state();
                print!("{}", render_board(&puzzle, puzzle.current()));
            }
            ["check"] | ["c"] => {
                let report = puzzle.check_all_conditions();
                println!(
                    "rows {:?}, columns {:?} ({} of {})",
                    report.rows,
                    report.columns,
                    report.total(),
                    2 * GRID_SIZE
                );
            }
            ["swap", rest @ ..] => match parse_swap(rest) {
                Ok((from, to)) => match puzzle.swap_cells(from, to) {
                    Ok(()) => print!("{}", render_board(&puzzle, puzzle.current())),
                    Err(err) => println!("error: {err}"),
                },
                Err(err) => println!("error: {err}"),
            },
            _ => println!("unknown command; {PLAY_HELP}"),
        }
        if report_events(&mut puzzle) {
            break;
        }
    }
    Ok(())
}

fn parse_swap(words: &[&str]) -> anyhow::Result<(Pos, Pos)> {
    let numbers = words
        .iter()
        .map(|word| word.parse::<usize>().with_context(|| format!("'{word}'")))
        .collect::<anyhow::Result<Vec<usize>>>()?;
    match numbers.as_slice() {
        [r1, c1, r2, c2] => Ok((Pos::new(*r1, *c1), Pos::new(*r2, *c2))),
        _ => bail!("swap takes four numbers: row col row col"),
    }
}

/// Prints pending events; returns true once the puzzle is solved.
fn report_events(puzzle: &mut Puzzle) -> bool {
    let mut solved = false;
    for event in puzzle.drain_events() {
        match event {
            PuzzleEvent::Shuffled {
                satisfied,
                trial,
                seed,
            } => {
                info!(satisfied, trial, seed, "puzzle shuffled");
                println!("shuffled (seed {seed}): {satisfied} conditions already hold");
            }
            PuzzleEvent::Solved => {
                println!("solved!");
                solved = true;
            }
            PuzzleEvent::Reset | PuzzleEvent::CellsSwapped { .. } | PuzzleEvent::GridReplaced => {
                debug!(?event, "puzzle event");
            }
        }
    }
    solved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cells_accepts_gaps() {
        let tokens: Vec<String> = ["Ks", "-", "Qh"].iter().map(|s| s.to_string()).collect();
        let cells = parse_cells(&tokens).expect("cells");
        assert_eq!(cells.len(), 3);
        assert!(cells[1].is_none());
        assert!(parse_cells(&["Zz".to_string()]).is_err());
    }

    #[test]
    fn parse_swap_needs_four_numbers() {
        assert_eq!(
            parse_swap(&["0", "1", "2", "3"]).expect("swap"),
            (Pos::new(0, 1), Pos::new(2, 3))
        );
        assert!(parse_swap(&["0", "1"]).is_err());
        assert!(parse_swap(&["a", "1", "2", "3"]).is_err());
    }

    #[test]
    fn solution_board_marks_every_line() {
        let puzzle = Puzzle::new(builtin_puzzle()).expect("puzzle");
        let board = render_board(&puzzle, puzzle.solution());
        assert_eq!(board.matches('✓').count(), 2 * GRID_SIZE);
        assert!(board.contains("Royal Court"));
    }
}
