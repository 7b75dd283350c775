use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random generation strategy, reproducible from its seed.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let mines = match config.placement {
            Placement::Rejection => place_by_rejection(&mut self.rng, config),
            Placement::Shuffle => place_by_sampling(&mut self.rng, config),
        };
        MineLayout::from_mine_mask(mines)
    }
}

/// Requires `config.mines < config.total_cells()`, otherwise never returns.
fn place_by_rejection<R: Rng + ?Sized>(rng: &mut R, config: GameConfig) -> Array2<bool> {
    let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut placed: CellCount = 0;
    let mut draws: u64 = 0;

    while placed < config.mines {
        let row = rng.random_range(0..config.rows);
        let col = rng.random_range(0..config.cols);
        draws += 1;

        let cell = &mut mines[(row, col).to_nd_index()];
        if !*cell {
            *cell = true;
            placed += 1;
        }
    }

    log::debug!(
        "Placed {} mines on {}x{} by rejection in {} draws",
        placed,
        config.rows,
        config.cols,
        draws
    );
    mines
}

fn place_by_sampling<R: Rng + ?Sized>(rng: &mut R, config: GameConfig) -> Array2<bool> {
    let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
    let cols = usize::from(config.cols);

    let picked = rand::seq::index::sample(
        rng,
        config.total_cells() as usize,
        config.mines as usize,
    );
    for index in picked {
        mines[[index / cols, index % cols]] = true;
    }

    log::debug!(
        "Placed {} mines on {}x{} by index sampling",
        config.mines,
        config.rows,
        config.cols
    );
    mines
}
