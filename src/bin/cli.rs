use milkchess::interaction::{DEFAULT_CELL_SIZE, DropOutcome, Point};
use milkchess::logger::init_logging;
use milkchess::oracle::Offline;
use milkchess::render::TextRenderer;
use milkchess::{Session, Square};
use std::io::{self, BufRead};

type ConsoleSession = Session<Offline, TextRenderer>;

const USAGE: &str = "\
usage: cli [--cell <px>] [--log <path>]

No move oracle is attached to the console, so `best`, `state` and every
drop answer \"move oracle unavailable\". Gestures and the codec still work.

commands:
  reset                 back to the starting position
  load <encoded>        replace the board with a 70-character state
  encode                print the current state string
  d | display           print the board diagram
  flip                  view the board from the other side
  cell <px>             change the cell size
  down <square> [x y]   pick up a piece
  move <x> <y>          drag the held piece
  up                    drop the held piece
  cancel                put the held piece back
  drag <from> <to>      full gesture between two squares
  best | state          ask the oracle
  help                  show this text
  quit
";

#[derive(Debug, PartialEq)]
struct Options {
    cell: f64,
    log_path: String,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options {
        cell: DEFAULT_CELL_SIZE,
        log_path: String::from("logs/milkchess.log"),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--cell" => {
                let value = args.get(i + 1).ok_or("--cell needs a value")?;
                opts.cell = value
                    .parse()
                    .map_err(|_| format!("invalid --cell value: {}", value))?;
                i += 2;
            }
            "--log" => {
                opts.log_path = args.get(i + 1).ok_or("--log needs a path")?.clone();
                i += 2;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(opts)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print!("{}", USAGE);
        return;
    }
    let Options { cell, log_path } = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(&log_path, "info") {
        eprintln!("logging disabled: {}", e);
    }

    let mut session = match Session::new(Offline, TextRenderer::default(), cell) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    println!("milkchess console, offline (no move oracle). Type `help` for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "reset" => session.reset(),
            "load" => match parts.get(1) {
                Some(encoded) => {
                    if let Err(e) = session.load(encoded) {
                        println!("error: {}", e);
                    }
                }
                None => println!("usage: load <encoded>"),
            },
            "encode" => println!("{}", session.encoded()),
            "d" | "display" => print!("{}", session.view().frame()),
            "flip" => {
                let view = session.view_mut();
                view.set_perspective(!view.perspective());
                session.redraw();
                print!("{}", session.view().frame());
            }
            "cell" => match parts.get(1).and_then(|p| p.parse::<f64>().ok()) {
                Some(px) => {
                    if let Err(e) = session.resize(px) {
                        println!("error: {}", e);
                    }
                }
                None => println!("usage: cell <px>"),
            },
            "down" => handle_down(&mut session, &parts),
            "move" => match parse_point(&parts[1..]) {
                Some(p) => {
                    if session.pointer_move(p).is_none() {
                        println!("nothing is being dragged");
                    }
                }
                None => println!("usage: move <x> <y>"),
            },
            "up" => report(session.pointer_up()),
            "cancel" => match session.cancel() {
                Some(sq) => println!("{} back in place", sq),
                None => println!("nothing is being dragged"),
            },
            "drag" => handle_drag(&mut session, &parts),
            "best" => match session.best_move() {
                Ok(reply) => println!("{}", reply),
                Err(e) => println!("error: {}", e),
            },
            "state" => match session.derived_state() {
                Ok(reply) => println!("{}", reply),
                Err(e) => println!("error: {}", e),
            },
            "help" => print!("{}", USAGE),
            "quit" => break,
            other => println!("unknown command: {}", other),
        }
    }
}

fn center_of(sq: Square, cell: f64) -> Point {
    Point::new(
        (sq.file() as f64 + 0.5) * cell,
        (sq.rank() as f64 + 0.5) * cell,
    )
}

fn parse_point(parts: &[&str]) -> Option<Point> {
    match parts {
        [x, y, ..] => Some(Point::new(x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

// down <square> [x y]
fn handle_down(session: &mut ConsoleSession, parts: &[&str]) {
    let Some(sq) = parts.get(1).and_then(|s| s.parse::<Square>().ok()) else {
        println!("usage: down <square> [x y]");
        return;
    };
    let cell = session.controller().cell_size();
    let pointer = parse_point(&parts[2..]).unwrap_or_else(|| center_of(sq, cell));
    match session.pointer_down(sq, pointer) {
        Some(gesture) => println!("gesture {} holding {}", gesture, sq),
        None => println!("nothing picked up on {}", sq),
    }
}

// drag <from> <to>: a full gesture between two square centers
fn handle_drag(session: &mut ConsoleSession, parts: &[&str]) {
    let squares: Option<Vec<Square>> = parts[1..].iter().map(|s| s.parse().ok()).collect();
    let Some([from, to]) = squares
        .as_deref()
        .and_then(|s| <[Square; 2]>::try_from(s).ok())
    else {
        println!("usage: drag <from> <to>");
        return;
    };
    let cell = session.controller().cell_size();
    if session.pointer_down(from, center_of(from, cell)).is_none() {
        println!("nothing picked up on {}", from);
        return;
    }
    session.pointer_move(center_of(to, cell));
    report(session.pointer_up());
}

fn report(outcome: Option<DropOutcome>) {
    let Some(outcome) = outcome else {
        println!("nothing is being dragged");
        return;
    };
    let kind = if outcome.is_noop() { " (no-op)" } else { "" };
    println!(
        "gesture {}: {} -> {}{}",
        outcome.gesture, outcome.from, outcome.to, kind
    );
    println!("encoded {}", outcome.encoded);
    match outcome.reply {
        Ok(reply) => println!("legal {}", reply),
        Err(e) => println!("oracle: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse_args(&[]).unwrap();
        assert_eq!(opts.cell, DEFAULT_CELL_SIZE);
        assert_eq!(opts.log_path, "logs/milkchess.log");
    }

    #[test]
    fn reads_cell_and_log() {
        let opts = parse_args(&args(&["--cell", "72", "--log", "out.log"])).unwrap();
        assert_eq!(opts.cell, 72.0);
        assert_eq!(opts.log_path, "out.log");
    }

    #[test]
    fn bad_cell_is_reported_not_replaced() {
        assert_eq!(
            parse_args(&args(&["--cell", "big"])),
            Err("invalid --cell value: big".to_string())
        );
        assert!(parse_args(&args(&["--cell"])).is_err());
        assert!(parse_args(&args(&["--log"])).is_err());
        assert!(parse_args(&args(&["--colour"])).is_err());
    }

    #[test]
    fn usage_mentions_missing_oracle() {
        assert!(USAGE.contains("move oracle unavailable"));
        assert!(USAGE.contains("--cell <px>"));
    }
}
