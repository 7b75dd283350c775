use super::*;

/// Always hands out the same layout, so resets replay an identical board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        let fixed = self.layout.game_config();
        if fixed.size() != config.size() || fixed.mines != config.mines {
            return Err(GameError::InvalidConfiguration {
                rows: config.rows,
                cols: config.cols,
                mines: config.mines,
                reason: "fixed layout does not match the requested board",
            });
        }
        Ok(self.layout.clone())
    }
}
