use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Sequences player moves into game-level transitions.
///
/// All board mutation goes through here; the presentation layer only reads
/// cells back after each call.
#[derive(Clone, Debug)]
pub struct GameController<G = RandomMineGenerator> {
    board: Board,
    state: GameState,
    generator: G,
}

impl GameController {
    /// New game with an entropy-seeded layout.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::with_config(GameConfig::new(rows, cols, mines)?)
    }

    pub fn with_config(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }

    /// New game whose layouts, including those after resets, follow from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }
}

impl GameController<FixedMineGenerator> {
    /// New game with mines at exactly `mine_coords`; resets replay the same layout.
    pub fn with_mines(rows: Coord, cols: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let generator = FixedMineGenerator::from_mine_coords((rows, cols), mine_coords)?;
        let config = generator.layout().game_config();
        Self::with_generator(config, generator)
    }
}

impl<G: MineGenerator> GameController<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        let board = Board::generate(config, &mut generator)?;
        log::debug!(
            "New game on {}x{} board with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Ok(Self {
            board,
            state: GameState::default(),
            generator,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.board.cells()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell(coords)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_controller(self)
    }

    /// Reveals `coords`, ending the game on a mine or on the last safe cell.
    ///
    /// Bounds are checked even after the game is over; any other reveal on a
    /// finished game is ignored.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let was_revealed = self.board.cell(coords)?.is_revealed();

        if self.state.is_finished() {
            log::warn!("Ignoring reveal at {:?}, game is over", coords);
            return Ok(RevealOutcome::NoChange);
        }

        if !self.board.reveal_cell(coords)? {
            self.end_game(GameState::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        Ok(if self.board.all_safe_revealed() {
            self.end_game(GameState::Won);
            RevealOutcome::Won
        } else if was_revealed {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.board.cell(coords)?;

        if self.state.is_finished() {
            log::warn!("Ignoring flag at {:?}, game is over", coords);
            return Ok(MarkOutcome::NoChange);
        }
        self.board.toggle_flag(coords)
    }

    /// Starts over on the same board with a fresh layout and every cell hidden.
    ///
    /// If the generator fails the game is left exactly as it was.
    pub fn reset(&mut self) -> Result<()> {
        self.board.generate_mines(&mut self.generator)?;
        self.board.clear_marks();
        self.board.calculate_neighboring_mines();
        self.state = GameState::InProgress;
        log::debug!("Game reset");
        Ok(())
    }

    fn end_game(&mut self, state: GameState) {
        log::debug!(
            "Game over: {:?} with {} cells revealed",
            state,
            self.board.revealed_count()
        );
        self.state = state;
    }
}
