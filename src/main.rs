use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use minesweeper_page::{tui, Control, Grid, GridState, HtmlRenderer, Page, UiEvent};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "minesweeper-page", about = "Minesweeper grid with reset, cheat and validate controls", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long, conflicts_with = "html")]
    tui: bool,
    /// Print the rendered page markup and exit
    #[arg(long)]
    html: bool,
    /// Grid width
    #[arg(long, default_value_t = 9)]
    width: usize,
    /// Grid height
    #[arg(long, default_value_t = 9)]
    height: usize,
    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: usize,
    /// Seed for a reproducible mine layout
    #[arg(long)]
    seed: Option<u64>,
    /// Log more (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn print_help() {
    println!("Commands:");
    println!("  o x y     - open cell at column x, row y (1-based)");
    println!("  f x y     - toggle flag at x, y (1-based)");
    println!("  reset     - start over with a new layout");
    println!("  cheat     - toggle showing mines");
    println!("  validate  - win if every mine is flagged");
    println!("  html      - print the page markup");
    println!("  q         - quit");
    println!("  h/help    - show this help");
}

fn main() -> ExitCode {
    let args = Args::parse();
    if !args.tui {
        let level = match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();
    }

    let grid = match args.seed {
        Some(seed) => Grid::with_seed(args.width, args.height, args.mines, seed),
        None => Grid::new(args.width, args.height, args.mines),
    };
    let grid = match grid {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut page = Page::new(grid, HtmlRenderer);

    if args.html {
        print!("{}", page.render());
        return ExitCode::SUCCESS;
    }
    if args.tui {
        if let Err(e) = tui::run_tui(page) {
            eprintln!("TUI error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    println!(
        "Minesweeper {}x{} with {} mines{}",
        args.width,
        args.height,
        args.mines,
        args.seed.map(|s| format!(" (seed {})", s)).unwrap_or_default()
    );
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    let mut announced = GridState::Gaming;
    loop {
        let grid = page.grid();
        println!("\n{}", grid);
        if grid.state() != announced {
            announced = grid.state();
            match announced {
                GridState::GameOver => println!("BIG BA-DA-BOOOOM! You stepped on a mine. Type 'reset' to play again."),
                GridState::Won => println!("Congratulations! You cleared the grid! Type 'reset' to play again."),
                GridState::Gaming => {}
            }
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0].to_lowercase();
        let event = match command.as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; }
            "html" => { println!("{}", page.render()); continue; }
            "o" | "open" | "f" | "flag" => {
                let Some((x, y)) = parse_coords(&parts) else { continue; };
                if command.starts_with('o') {
                    UiEvent::Click { x, y }
                } else {
                    UiEvent::ContextMenu { x, y }
                }
            }
            other => match other.parse::<Control>() {
                Ok(control) => UiEvent::Control(control),
                Err(_) => {
                    println!("Unknown command '{}'. Type 'h' for help.", other);
                    continue;
                }
            },
        };

        if !page.handle(event).changed {
            println!("Nothing to do there.");
        }
    }
    ExitCode::SUCCESS
}

/// Reads 1-based `x y` from a command and converts to 0-based coordinates.
fn parse_coords(parts: &[&str]) -> Option<(usize, usize)> {
    if parts.len() < 3 {
        println!("Usage: {} x y", parts[0]);
        return None;
    }
    let x = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid x"); return None; } };
    let y = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid y"); return None; } };
    if x == 0 || y == 0 {
        println!("Use 1-based coordinates");
        return None;
    }
    Some((x - 1, y - 1))
}
