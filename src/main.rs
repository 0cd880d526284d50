use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indoc::indoc;

use board_grid::render::{occupancy_map, positions};
use board_grid::tracing_sub::{init_default, level_for_verbosity};
use board_grid::{GridConfig, GridError, GridItem, GridLayoutService, GridPosition, ItemId};

#[derive(Parser, Debug)]
#[command(
    name = "board-grid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect and rearrange a board grid with merged cells",
    after_help = indoc! {"
        Items are given as ID@ROW,COL[:COLSxROWS][=LABEL], for example
        `--item M@0,0:2x1=Header --item A@1,0`. Without --item the
        reference 3x3 board is used; other --rows/--cols need --item.
    "}
)]
struct Cli {
    /// Grid rows.
    #[arg(long, default_value_t = GridConfig::default().rows)]
    rows: usize,

    /// Grid columns.
    #[arg(long, default_value_t = GridConfig::default().cols)]
    cols: usize,

    /// Replace the seed layout with these items.
    #[arg(long = "item", value_name = "SPEC")]
    items: Vec<GridItem<String>>,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print which item covers each cell.
    Show,
    /// List the top-left cells a merged item fits at.
    Dropzones { id: String },
    /// Dry-run a move and report the displaced items.
    Preview { id: String, row: usize, col: usize },
    /// Move a merged item and print the resulting grid.
    Move { id: String, row: usize, col: usize },
    /// Swap two simple items.
    Swap {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_default(level_for_verbosity(cli.verbose));
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the requested change was refused.
fn run(cli: Cli) -> Result<bool, GridError> {
    let mut grid = build_grid(GridConfig::new(cli.rows, cli.cols), cli.items)?;

    match cli.command {
        Command::Show => {
            print!("{}", occupancy_map(grid.config(), &grid.snapshot()));
            Ok(true)
        }
        Command::Dropzones { id } => {
            let zones = grid.valid_dropzones(&ItemId::new(id))?;
            println!("{}", positions(&zones));
            Ok(true)
        }
        Command::Preview { id, row, col } => {
            let preview = grid.preview(&ItemId::new(id), GridPosition::new(row, col))?;
            let affected: Vec<&str> = preview.affected.iter().map(|i| i.id.as_str()).collect();
            match &preview.rejection {
                None => println!("valid; displaces [{}]", affected.join(", ")),
                Some(reason) => println!("invalid: {reason}"),
            }
            Ok(preview.valid)
        }
        Command::Move { id, row, col } => {
            let outcome = grid.try_move_merged_item(&ItemId::new(id), GridPosition::new(row, col))?;
            if let Some(reason) = &outcome.rejection {
                println!("rejected: {reason}");
            }
            print!("{}", occupancy_map(grid.config(), &grid.snapshot()));
            Ok(outcome.valid)
        }
        Command::Swap {
            from_row,
            from_col,
            to_row,
            to_col,
        } => {
            let swapped = grid.swap_items(
                GridPosition::new(from_row, from_col),
                GridPosition::new(to_row, to_col),
            );
            if !swapped {
                println!("nothing swapped");
            }
            print!("{}", occupancy_map(grid.config(), &grid.snapshot()));
            Ok(swapped)
        }
    }
}

fn build_grid(
    config: GridConfig,
    items: Vec<GridItem<String>>,
) -> Result<GridLayoutService<String>, GridError> {
    if !items.is_empty() {
        return GridLayoutService::new(config, items);
    }
    if config != GridConfig::default() {
        return Err(GridError::MissingLayout {
            rows: config.rows,
            cols: config.cols,
        });
    }
    GridLayoutService::seeded()
}
