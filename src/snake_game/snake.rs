use serde::{Serialize, Deserialize};

use super::grid::{Direction, Position, SIZE};
use super::surface::{Graphic, Surface};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Snake {
    // Head first. Never empty.
    locations: Vec<Position>,
    direction: Direction,
}

impl Snake {
    pub const SPAWN: Position = Position::new(SIZE, SIZE);

    #[allow(clippy::new_without_default)]
    pub fn new() -> Snake {
        Snake { locations: vec![Self::SPAWN], direction: Direction::Down }
    }

    /// Build a snake from explicit segments, head first.
    #[cfg(test)]
    pub(crate) fn with_segments(locations: Vec<Position>, direction: Direction) -> Snake {
        assert!(!locations.is_empty(), "a snake needs at least a head");
        Snake { locations, direction }
    }

    pub fn length(&self) -> usize {
        self.locations.len()
    }

    pub fn head(&self) -> Position {
        self.locations[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.locations
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adds a tail segment parked on the spawn cell. The next [`Snake::walk`]
    /// copies the real position into it, so for one frame the new tail sits
    /// on top of the spawn cell.
    pub fn increase_length(&mut self) {
        self.locations.push(Self::SPAWN);
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for &pt in &self.locations {
            surface.blit(Graphic::Block, pt);
        }
    }

    pub fn move_up(&mut self)    { self.direction = Direction::Up; }
    pub fn move_down(&mut self)  { self.direction = Direction::Down; }
    pub fn move_left(&mut self)  { self.direction = Direction::Left; }
    pub fn move_right(&mut self) { self.direction = Direction::Right; }

    /// Turning straight back into the neck is allowed; the game catches it as
    /// a self collision.
    pub fn steer(&mut self, direction: Direction) {
        match direction {
            Direction::Up    => self.move_up(),
            Direction::Down  => self.move_down(),
            Direction::Left  => self.move_left(),
            Direction::Right => self.move_right(),
        }
    }

    /// Advance one cell and redraw.
    pub fn walk(&mut self, surface: &mut impl Surface) {
        // Back to front: each segment takes the old place of the one ahead.
        for i in (1..self.locations.len()).rev() {
            self.locations[i] = self.locations[i - 1];
        }
        self.locations[0] = self.locations[0].stepped(self.direction);

        self.draw(surface);
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.locations[1..].iter().any(|&pt| pt == head)
    }
}
