use log::debug;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{GridPosition, WallFlags};
use crate::errors::Result;
use crate::generators;
use crate::maze::Maze;
use crate::pathing;
use crate::units::{CoinCount, Height, Width};

/// The presets behind the level-select menu.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn grid_width(self) -> Width {
        match self {
            Difficulty::Easy => Width(10),
            Difficulty::Normal => Width(20),
            Difficulty::Hard => Width(30),
        }
    }

    pub fn grid_height(self) -> Height {
        match self {
            Difficulty::Easy => Height(10),
            Difficulty::Normal => Height(20),
            Difficulty::Hard => Height(30),
        }
    }

    pub fn coin_count(self) -> CoinCount {
        match self {
            Difficulty::Easy => CoinCount(5),
            Difficulty::Normal => CoinCount(10),
            Difficulty::Hard => CoinCount(15),
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub width: Width,
    pub height: Height,
    pub coins: CoinCount,
    pub seed: Option<u64>,
}

impl ScenarioConfig {
    pub fn new(width: Width, height: Height) -> ScenarioConfig {
        ScenarioConfig {
            width,
            height,
            coins: CoinCount(0),
            seed: None,
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> ScenarioConfig {
        ScenarioConfig {
            width: difficulty.grid_width(),
            height: difficulty.grid_height(),
            coins: difficulty.coin_count(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> ScenarioConfig {
        self.seed = Some(seed);
        self
    }

    pub fn with_coins(mut self, coins: CoinCount) -> ScenarioConfig {
        self.coins = coins;
        self
    }
}

/// One assembled level: the carved maze, the (0, 0) entry, the exit on the
/// farthest reachable boundary cell with its outward wall already opened, and
/// the coin layout. This value is the whole state shape handed to the
/// rendering and save layers; they read it, they never write it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    maze: Maze,
    entry: GridPosition,
    exit: GridPosition,
    exit_wall: WallFlags,
    coins: Vec<GridPosition>,
}

const COIN_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generate a maze for the config and dress it up into a playable scenario:
/// exit carved on the farthest boundary cell from the entry, coins scattered
/// over the remaining cells. Deterministic per seed, including coins.
pub fn assemble(config: &ScenarioConfig) -> Result<Scenario> {
    let mut maze = generators::recursive_backtracker(config.width, config.height, config.seed)?;

    let entry = GridPosition::new(0, 0);
    let exit = pathing::farthest_boundary_cell(&maze);
    let exit_wall = maze.open_exit(exit)?;
    let coins = scatter_coins(&maze, entry, exit, config);

    debug!("assembled {}x{} scenario: exit ({}, {}) through {:?}, {} coins",
           config.width.0,
           config.height.0,
           exit.x,
           exit.y,
           exit_wall,
           coins.len());

    Ok(Scenario {
        maze,
        entry,
        exit,
        exit_wall,
        coins,
    })
}

fn scatter_coins(maze: &Maze,
                 entry: GridPosition,
                 exit: GridPosition,
                 config: &ScenarioConfig)
                 -> Vec<GridPosition> {

    let CoinCount(wanted) = config.coins;
    if wanted == 0 {
        return Vec::new();
    }

    // Separate stream from the carving RNG so asking for a different number
    // of coins never perturbs the maze layout under a fixed seed.
    let mut rng = generators::rng_for_seed(config.seed.map(|seed| seed ^ COIN_STREAM_SALT));
    let mut spots: Vec<GridPosition> = maze.iter()
        .filter(|&pos| pos != entry && pos != exit)
        .collect();
    rng.shuffle(&mut spots);
    spots.truncate(wanted);
    spots
}

impl Scenario {
    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn entry(&self) -> GridPosition {
        self.entry
    }

    #[inline]
    pub fn exit(&self) -> GridPosition {
        self.exit
    }

    /// The outward wall that was opened to create the exit.
    #[inline]
    pub fn exit_wall(&self) -> WallFlags {
        self.exit_wall
    }

    #[inline]
    pub fn coins(&self) -> &[GridPosition] {
        &self.coins
    }

    /// Route from the given cell to the exit, for the hint overlay the
    /// surrounding game shows when the player looks stuck. A bounded,
    /// synchronous query; the scenario is left untouched.
    pub fn hint_path(&self, from: GridPosition) -> Result<Vec<GridPosition>> {
        pathing::shortest_path(&self.maze, from, self.exit)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;
    use crate::errors::{Error, ErrorKind};

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::Easy.grid_width(), Width(10));
        assert_eq!(Difficulty::Normal.grid_height(), Height(20));
        assert_eq!(Difficulty::Hard.coin_count(), CoinCount(15));
    }

    #[test]
    fn assembles_a_playable_scenario() {
        let config = ScenarioConfig::new(Width(10), Height(10))
            .with_seed(404)
            .with_coins(CoinCount(8));
        let scene = assemble(&config).unwrap();

        assert_eq!(scene.entry(), GridPosition::new(0, 0));
        assert!(scene.maze().is_boundary(scene.exit()));

        // The exit wall is genuinely open on the exit cell.
        let exit_state = scene.maze().wall_state(scene.exit()).unwrap();
        assert!(!exit_state.intersects(scene.exit_wall()));
        assert_ne!(scene.exit_wall(), WallFlags::empty());
    }

    #[test]
    fn coins_sit_on_distinct_free_cells() {
        let config = ScenarioConfig::new(Width(10), Height(10))
            .with_seed(11)
            .with_coins(CoinCount(8));
        let scene = assemble(&config).unwrap();

        assert_eq!(scene.coins().len(), 8);
        assert_eq!(scene.coins().iter().unique().count(), 8);
        for &coin in scene.coins() {
            assert!(scene.maze().is_valid_position(coin));
            assert_ne!(coin, scene.entry());
            assert_ne!(coin, scene.exit());
        }
    }

    #[test]
    fn coin_count_is_capped_by_free_cells() {
        let config = ScenarioConfig::new(Width(2), Height(2))
            .with_seed(1)
            .with_coins(CoinCount(10));
        let scene = assemble(&config).unwrap();
        assert_eq!(scene.coins().len(), 2);

        let tiny = ScenarioConfig::new(Width(1), Height(1)).with_coins(CoinCount(3));
        assert!(assemble(&tiny).unwrap().coins().is_empty());
    }

    #[test]
    fn assembly_is_deterministic_per_seed() {
        let config = ScenarioConfig::from_difficulty(Difficulty::Easy).with_seed(0xacce55);
        let first = assemble(&config).unwrap();
        let second = assemble(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hint_path_leads_from_entry_to_exit() {
        let config = ScenarioConfig::new(Width(12), Height(7)).with_seed(31);
        let scene = assemble(&config).unwrap();

        let path = scene.hint_path(scene.entry()).unwrap();
        assert_eq!(*path.first().unwrap(), scene.entry());
        assert_eq!(*path.last().unwrap(), scene.exit());

        // Hints can start anywhere the player might be standing.
        for pos in scene.maze().iter() {
            assert!(scene.hint_path(pos).is_ok());
        }
    }

    #[test]
    fn hint_path_rejects_off_grid_positions() {
        let config = ScenarioConfig::new(Width(4), Height(4)).with_seed(2);
        let scene = assemble(&config).unwrap();
        match scene.hint_path(GridPosition::new(4, 0)) {
            Err(Error(ErrorKind::PositionOutOfBounds(4, 0), _)) => {}
            other => panic!("expected PositionOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn degenerate_config_is_rejected() {
        let config = ScenarioConfig::new(Width(0), Height(4));
        match assemble(&config) {
            Err(Error(ErrorKind::InvalidDimensions(0, 4), _)) => {}
            other => panic!("expected InvalidDimensions, got {:?}", other),
        }
    }
}
