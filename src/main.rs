use docopt::Docopt;
use mazegrid::{
    cells::GridPosition,
    display::{DecoratedMaze, MarkersDecorator, PathDecorator},
    scenario::{self, Difficulty, ScenarioConfig},
    units::{CoinCount, Height, Width},
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*
};

const USAGE: &str = "Mazegrid

Usage:
    mazegrid_driver -h | --help
    mazegrid_driver [easy|normal|hard] [--grid-width=<w> --grid-height=<h>] [--seed=<n>] [--coins=<n>] [--show-hint --hint-x=<x> --hint-y=<y>] [--text-out=<path>]

Options:
    -h --help          Show this screen.
    --grid-width=<w>   The grid width in a w*h maze [default: 10].
    --grid-height=<h>  The grid height in a w*h maze [default: 10].
    --seed=<n>         Seed for the maze and coin layout, for reproducible runs.
    --coins=<n>        Number of coins to scatter over the maze.
    --show-hint        Overlay the route from the hint cell to the exit instead of the S/E markers.
    --hint-x=<x>       x coordinate of the hint cell [default: 0].
    --hint-y=<y>       y coordinate of the hint cell [default: 0].
    --text-out=<path>  Output file path for the textual rendering of the maze.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_easy: bool,
    cmd_normal: bool,
    cmd_hard: bool,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_coins: Option<usize>,
    flag_show_hint: bool,
    flag_hint_x: u32,
    flag_hint_y: u32,
    flag_text_out: String,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types, with
    // conversions from the library's error chain and the driver's own
    // foreign error types.
    use error_chain::*;
    error_chain! {

        links {
            Core(::mazegrid::errors::Error, ::mazegrid::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = scenario_config(&args);
    let scene = scenario::assemble(&config)?;

    let rendering = if args.flag_show_hint {
        let hint_from = GridPosition::new(args.flag_hint_x, args.flag_hint_y);
        let hint = scene.hint_path(hint_from)?;
        format!("{}", DecoratedMaze::new(scene.maze(), &PathDecorator::new(&hint)))
    } else {
        let markers = MarkersDecorator::new(scene.entry(), scene.exit());
        format!("{}", DecoratedMaze::new(scene.maze(), &markers))
    };

    if args.flag_text_out.is_empty() {
        print!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn scenario_config(args: &DriverArgs) -> ScenarioConfig {
    let mut config = if args.cmd_easy {
        ScenarioConfig::from_difficulty(Difficulty::Easy)
    } else if args.cmd_normal {
        ScenarioConfig::from_difficulty(Difficulty::Normal)
    } else if args.cmd_hard {
        ScenarioConfig::from_difficulty(Difficulty::Hard)
    } else {
        ScenarioConfig::new(Width(args.flag_grid_width), Height(args.flag_grid_height))
    };

    if let Some(seed) = args.flag_seed {
        config = config.with_seed(seed);
    }
    if let Some(coins) = args.flag_coins {
        config = config.with_coins(CoinCount(coins));
    }

    config
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
