use std::error::Error;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use clap::Parser;
use log::{debug, warn};
use minesweep_rs::render::{board_text, status_line};
use minesweep_rs::{Outcome, Session};

#[derive(Debug, Parser)]
#[command(name = "minesweep")]
#[command(about = "Play minesweeper in the terminal")]
struct Cli {
    /// Level preset: 0 = 8x8 with 10 mines, 1 = 16x16 with 40, 2 = 24x24 with 99
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON snapshot after every command instead of drawing the board
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// A line of player input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Reveal(u16, u16),
    Flag(u16, u16),
    New(Option<usize>),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_string())?;
        let args: Vec<&str> = words.collect();

        let coords = |args: &[&str]| -> Result<(u16, u16), String> {
            match args {
                [x, y] => Ok((
                    x.parse().map_err(|_| format!("bad x coordinate [{}]", x))?,
                    y.parse().map_err(|_| format!("bad y coordinate [{}]", y))?,
                )),
                _ => Err("expected two coordinates: x y".to_string()),
            }
        };

        match verb {
            "r" | "reveal" => coords(&args).map(|(x, y)| Command::Reveal(x, y)),
            "f" | "flag" => coords(&args).map(|(x, y)| Command::Flag(x, y)),
            "n" | "new" => match args.as_slice() {
                [] => Ok(Command::New(None)),
                [level] => level
                    .parse()
                    .map(|level| Command::New(Some(level)))
                    .map_err(|_| format!("bad level [{}]", level)),
                _ => Err("expected at most one level".to_string()),
            },
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" => Ok(Command::Quit),
            other => Err(format!("unknown command [{}]", other)),
        }
    }
}

const HELP: &str = "\
commands:
  r X Y    reveal the cell at column X, row Y
  f X Y    flag or unflag the cell at column X, row Y
  n [L]    new round, optionally on level L (0, 1 or 2)
  h        this help
  q        quit";

fn draw(session: &Session, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string(&session.snapshot())?);
    } else {
        println!("{}", status_line(session));
        print!("{}", board_text(session));
    }
    Ok(())
}

fn run(session: &mut Session, command: Command) -> minesweep_rs::Result<Option<Outcome>> {
    let outcome = match command {
        Command::Reveal(x, y) => session.reveal(x, y)?,
        Command::Flag(x, y) => session.toggle_flag(x, y)?,
        Command::New(level) => {
            let level = level.or(session.level()).unwrap_or(0);
            session.reset(level)?
        }
        Command::Help => {
            println!("{}", HELP);
            return Ok(None);
        }
        Command::Quit => return Ok(None),
    };
    Ok(Some(outcome))
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();

    let cli = Cli::parse();
    let mut session = match cli.seed {
        Some(seed) => Session::with_seed(cli.level, seed)?,
        None => Session::new(cli.level)?,
    };

    draw(&session, cli.json)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        // the terminal has no timer of its own, so the clock advances on input
        session.tick();

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match run(&mut session, command) {
            Ok(Some(outcome)) => {
                debug!("{:?}, {} cells changed", outcome.status, outcome.changed.len());
                draw(&session, cli.json)?;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("command rejected: {}", e);
                eprintln!("{}", e);
            }
        }
        io::stdout().flush()?;
    }

    Ok(())
}
