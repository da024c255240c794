//! Level terrain and the predicates everything else queries it through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

/// Level terrain, a dense grid of tiles.
///
/// Owned exclusively by the [`World`]. Mutated by generation once and by
/// terrain-carving effects (digging, explosions) during play.
#[derive(Clone, Serialize, Deserialize)]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Create a map of solid wall.
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Map {
            width,
            height,
            tiles: vec![Tile::Wall; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn idx(&self, p: IVec2) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }

    /// Tile at a position, wall for out-of-bounds positions.
    pub fn tile(&self, p: IVec2) -> Tile {
        self.idx(p).map_or(Tile::Wall, |i| self.tiles[i])
    }

    /// Set a tile, no-op out of bounds.
    pub fn set(&mut self, p: IVec2, t: Tile) {
        if let Some(i) = self.idx(p) {
            self.tiles[i] = t;
        }
    }

    /// Turn a wall cell into floor, no-op out of bounds.
    pub fn carve(&mut self, p: IVec2) {
        self.set(p, Tile::Floor);
    }

    /// Collision predicate, true for out-of-bounds or wall cells.
    pub fn is_wall(&self, p: IVec2) -> bool {
        !self.contains(p) || self.tile(p) == Tile::Wall
    }

    /// Movement predicate for the pathfinding oracle.
    pub fn is_passable(&self, p: IVec2) -> bool {
        self.contains(p) && self.tile(p) == Tile::Floor
    }

    /// Line-of-sight predicate for the visibility oracle.
    ///
    /// Semantically the inverse of [`Map::is_passable`], kept as its own
    /// call site since sight and movement are separate concerns.
    pub fn is_opaque(&self, p: IVec2) -> bool {
        !self.contains(p) || self.tile(p) == Tile::Wall
    }

    /// Iterate all in-bounds positions.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| ivec2(x, y)))
    }

    /// Iterate all floor positions.
    pub fn floor_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells().filter(|&p| self.tile(p) == Tile::Floor)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = match self.tile(ivec2(x, y)) {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_blocked() {
        let map = Map::new(4, 4);
        for p in [ivec2(-1, 0), ivec2(0, -1), ivec2(4, 0), ivec2(0, 4)] {
            assert!(map.is_wall(p));
            assert!(!map.is_passable(p));
            assert!(map.is_opaque(p));
        }
    }

    #[test]
    fn carving() {
        let mut map = Map::new(4, 4);
        map.carve(ivec2(1, 1));
        assert!(map.is_passable(ivec2(1, 1)));
        assert!(!map.is_opaque(ivec2(1, 1)));
        // Carving outside the map does nothing.
        map.carve(ivec2(-1, -1));
        assert!(map.is_wall(ivec2(-1, -1)));
    }
}
