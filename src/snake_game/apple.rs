use std::ops::RangeInclusive;
use rand::Rng;
use serde::{Serialize, Deserialize};

use super::grid::Position;
use super::surface::{Graphic, Surface};

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Apple {
    pub location: Position,
}

impl Apple {
    pub const SPAWN: Position = Position::from_cell(5, 5);
    pub const COLUMNS: RangeInclusive<i32> = 0..=16;
    // Row 0 and 1 hold the score, so apples never land there.
    pub const ROWS: RangeInclusive<i32> = 2..=14;

    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { location: Self::SPAWN }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.blit(Graphic::Apple, self.location);
    }

    /// Jump to a uniformly random cell inside [`Apple::COLUMNS`] × [`Apple::ROWS`].
    /// May pick the cell it already occupies.
    pub fn relocate<R: Rng>(&mut self, rng: &mut R) {
        self.location = Position::from_cell(
            rng.gen_range(Self::COLUMNS),
            rng.gen_range(Self::ROWS),
        );
    }

    pub fn can_land_on(pt: Position) -> bool {
        let (column, row) = pt.cell();
        pt.is_grid_aligned() && Self::COLUMNS.contains(&column) && Self::ROWS.contains(&row)
    }
}
