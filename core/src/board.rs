use ndarray::{Array2, ArrayView2};

use crate::*;

/// The cell grid and every position-indexed algorithm over it.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
}

impl Board {
    /// Builds a board and places mines from `generator` in the same step.
    pub fn generate<G: MineGenerator + ?Sized>(
        config: GameConfig,
        generator: &mut G,
    ) -> Result<Self> {
        let mut board = Self::empty(config)?;
        board.generate_mines(generator)?;
        board.calculate_neighboring_mines();
        Ok(board)
    }

    /// Builds a board holding exactly the mines of `layout`.
    pub fn with_layout(layout: &MineLayout) -> Result<Self> {
        let mut board = Self::empty(layout.game_config())?;
        board.place_mines(layout);
        board.calculate_neighboring_mines();
        Ok(board)
    }

    fn empty(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            Cell::new(row as Coord, col as Coord)
        });
        Ok(Self { config, cells })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    /// Read-only view of the whole grid, indexed `[row, col]`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(Cell::is_mine)
    }

    /// Positions adjacent to `coords` that lie on the board, row by row.
    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        surrounding(coords, self.size())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Whether every cell is either a mine or revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.is_revealed())
    }

    /// Replaces the current mines with a fresh layout from `generator`.
    ///
    /// Neighbor counts are stale until [`Board::calculate_neighboring_mines`] runs.
    pub fn generate_mines<G: MineGenerator + ?Sized>(&mut self, generator: &mut G) -> Result<()> {
        let layout = generator.generate(self.config)?;
        if layout.size() != self.size() || layout.mine_count() != self.mine_count() {
            log::warn!(
                "Generator produced a {:?} layout with {} mines for a {:?} board with {}",
                layout.size(),
                layout.mine_count(),
                self.size(),
                self.mine_count()
            );
            return Err(GameError::InvalidConfiguration {
                rows: self.rows(),
                cols: self.cols(),
                mines: self.mine_count(),
                reason: "generated layout does not match the board",
            });
        }
        self.place_mines(&layout);
        Ok(())
    }

    fn place_mines(&mut self, layout: &MineLayout) {
        for cell in self.cells.iter_mut() {
            cell.set_mine(layout.contains_mine(cell.coords()));
        }
        log::debug!(
            "Placed {} mines on {}x{} board",
            layout.mine_count(),
            self.rows(),
            self.cols()
        );
    }

    pub fn calculate_neighboring_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].is_mine() {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
                    .count() as u8;
                self.cells[coords.to_nd_index()].set_neighboring_mines(count);
            }
        }
    }

    /// Reveals the cell at `coords`, cascading through zero-count regions.
    ///
    /// Returns `Ok(false)` when the cell holds a mine; the board is left
    /// untouched in that case.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_mine() {
            log::debug!("Hit mine at {:?}", coords);
            return Ok(false);
        }

        cell.reveal();
        let count = cell.neighboring_mines();
        log::debug!("Revealed cell at {:?}, neighboring mines: {}", coords, count);

        if count == 0 {
            self.flood_reveal(coords);
        }
        Ok(true)
    }

    /// Worklist form of the recursive neighbor reveal. A cell is expanded at
    /// most once since it is marked revealed before its neighbors are queued.
    fn flood_reveal(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];

            // queued more than once
            if cell.is_revealed() {
                continue;
            }

            // a mine answers the reveal with false and stops expansion there
            if cell.is_mine() {
                log::trace!("Flood-fill stopped at mine {:?}", visit_coords);
                continue;
            }

            cell.reveal();
            let count = cell.neighboring_mines();
            log::trace!(
                "Flood revealed cell at {:?}, neighboring mines: {}",
                visit_coords,
                count
            );

            if count == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_neighbors(coords)
            .filter(move |&pos| !self.cells[pos.to_nd_index()].is_revealed())
    }

    /// Toggles the flag marker on an unrevealed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }
        cell.toggle_flag();
        log::debug!("Flag at {:?} set to {}", coords, cell.is_flagged());
        Ok(MarkOutcome::Changed)
    }

    /// Hides every cell and drops every flag, keeping the mines.
    pub fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_marks();
        }
    }
}

/// Up to eight positions around `center`, clipped to a `rows x cols` grid.
fn surrounding(center: Coord2, (rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let row_span = row.saturating_sub(1)..=row.saturating_add(1).min(rows.saturating_sub(1));
    let col_span = col.saturating_sub(1)..=col.saturating_add(1).min(cols.saturating_sub(1));

    row_span
        .flat_map(move |r| col_span.clone().map(move |c| (r, c)))
        .filter(move |&pos| pos != center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_layout(&MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    fn brute_force_count(board: &Board, (row, col): Coord2) -> u8 {
        let mut count = 0;
        for d_row in -1i32..=1 {
            for d_col in -1i32..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                let (r, c) = (i32::from(row) + d_row, i32::from(col) + d_col);
                if r < 0 || c < 0 || r >= i32::from(board.rows()) || c >= i32::from(board.cols())
                {
                    continue;
                }
                if board.cells()[[r as usize, c as usize]].is_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn generated_board_has_exact_mine_count() {
        for seed in 0..16 {
            let mut generator = RandomMineGenerator::new(seed);
            let board = Board::generate(GameConfig::intermediate(), &mut generator).unwrap();

            let mines = board.cells().iter().filter(|cell| cell.is_mine()).count();
            assert_eq!(mines, 40);
        }
    }

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = surrounding((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = surrounding((1, 1), (3, 3)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn far_edges_are_clipped() {
        let neighbors: Vec<_> = surrounding((2, 4), (3, 5)).collect();

        assert_eq!(neighbors, vec![(1, 3), (1, 4), (2, 3)]);
        assert_eq!(surrounding((0, 0), (1, 1)).count(), 0);
        assert_eq!(surrounding((0, 1), (1, 3)).collect::<Vec<_>>(), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn neighbors_outlive_the_board_borrow() {
        let mut board = board((2, 2), &[(1, 1)]);
        let neighbors = board.iter_neighbors((0, 0));

        board.reveal_cell((0, 0)).unwrap();

        assert_eq!(neighbors.collect::<Vec<_>>(), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn neighbor_counts_match_brute_force() {
        let mut generator = RandomMineGenerator::new(42);
        let board = Board::generate(GameConfig::new(12, 17, 60).unwrap(), &mut generator).unwrap();

        for cell in board.cells().iter().filter(|cell| !cell.is_mine()) {
            assert_eq!(
                cell.neighboring_mines(),
                brute_force_count(&board, cell.coords()),
                "at {:?}",
                cell.coords()
            );
        }
    }

    #[test]
    fn cells_know_their_position() {
        let board = board((3, 4), &[]);

        for ((row, col), cell) in board.cells().indexed_iter() {
            assert_eq!(cell.coords(), (row as Coord, col as Coord));
        }
    }

    #[test]
    fn regenerating_replaces_previous_mines() {
        let mut generator = RandomMineGenerator::new(5);
        let mut board = Board::generate(GameConfig::new(6, 6, 12).unwrap(), &mut generator).unwrap();

        for _ in 0..8 {
            board.generate_mines(&mut generator).unwrap();
            board.calculate_neighboring_mines();

            let mines = board.cells().iter().filter(|cell| cell.is_mine()).count();
            assert_eq!(mines, 12);
            for cell in board.cells().iter().filter(|cell| !cell.is_mine()) {
                assert_eq!(cell.neighboring_mines(), brute_force_count(&board, cell.coords()));
            }
        }
    }

    #[test]
    fn mismatched_generator_is_rejected() {
        let mut board = board((3, 3), &[(0, 0)]);
        let mut generator = FixedMineGenerator::from_mine_coords((3, 3), &[(0, 0), (1, 1)]).unwrap();

        assert!(board.generate_mines(&mut generator).is_err());
        assert!(board.is_mine((0, 0)).unwrap());
    }

    #[test]
    fn reveal_mine_returns_false_without_revealing() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal_cell((0, 0)), Ok(false));
        assert!(!board.cells()[[0, 0]].is_revealed());
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn reveal_numbered_cell_does_not_cascade() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal_cell((1, 1)), Ok(true));
        assert_eq!(board.cells()[[1, 1]].state(), CellState::Revealed(1));
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_opens_everything_but_the_mine() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal_cell((2, 2)), Ok(true));

        assert_eq!(board.revealed_count(), 8);
        assert!(!board.cells()[[0, 0]].is_revealed());
        assert_eq!(board.cells()[[0, 1]].state(), CellState::Revealed(1));
        assert_eq!(board.cells()[[2, 2]].state(), CellState::Revealed(0));
        assert!(board.all_safe_revealed());
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // column 2 is a wall of mines splitting the board
        let mines = [(0, 2), (1, 2), (2, 2), (3, 2)];
        let mut board = board((4, 5), &mines);

        board.reveal_cell((0, 0)).unwrap();

        for row in 0..4 {
            assert_eq!(board.cells()[[row, 0]].state(), CellState::Revealed(0));
            assert!(board.cells()[[row, 1]].is_revealed());
            assert!(!board.cells()[[row, 2]].is_revealed());
            assert!(!board.cells()[[row, 3]].is_revealed());
            assert!(!board.cells()[[row, 4]].is_revealed());
        }
        assert!(!board.all_safe_revealed());
    }

    #[test]
    fn flood_fill_reveals_flagged_cells_in_region() {
        let mut board = board((1, 4), &[(0, 3)]);
        board.toggle_flag((0, 0)).unwrap();

        board.reveal_cell((0, 1)).unwrap();

        assert!(board.cells()[[0, 0]].is_revealed());
        assert!(board.cells()[[0, 2]].is_revealed());
        assert!(!board.cells()[[0, 3]].is_revealed());
    }

    #[test]
    fn revealing_twice_changes_nothing() {
        let mut board = board((4, 4), &[(3, 3)]);
        board.reveal_cell((0, 3)).unwrap();
        let before = board.clone();

        assert_eq!(board.reveal_cell((0, 3)), Ok(true));
        assert_eq!(board, before);
    }

    #[test]
    fn single_cell_board() {
        let mut board = board((1, 1), &[]);

        assert_eq!(board.reveal_cell((0, 0)), Ok(true));
        assert_eq!(board.cells()[[0, 0]].neighboring_mines(), 0);
        assert!(board.all_safe_revealed());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut board = board((2, 3), &[]);

        assert_eq!(
            board.reveal_cell((2, 0)),
            Err(GameError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(board.reveal_cell((0, 3)).is_err());
        assert!(board.is_mine((5, 5)).is_err());
        assert!(board.toggle_flag((0, 9)).is_err());
    }

    #[test]
    fn toggle_flag_only_on_hidden_cells() {
        let mut board = board((2, 2), &[(1, 1)]);

        assert_eq!(board.toggle_flag((1, 1)), Ok(MarkOutcome::Changed));
        assert!(board.cells()[[1, 1]].is_flagged());
        assert_eq!(board.flagged_count(), 1);
        assert_eq!(board.toggle_flag((1, 1)), Ok(MarkOutcome::Changed));
        assert_eq!(board.flagged_count(), 0);

        board.reveal_cell((0, 0)).unwrap();
        assert_eq!(board.toggle_flag((0, 0)), Ok(MarkOutcome::NoChange));
        assert!(!board.cells()[[0, 0]].is_flagged());
    }

    #[test]
    fn clear_marks_keeps_mines() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal_cell((2, 2)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        board.clear_marks();

        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.flagged_count(), 0);
        assert!(board.is_mine((0, 0)).unwrap());
    }
}
