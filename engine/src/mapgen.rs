//! Cellular-automaton cave generation.

use rand::prelude::*;
use util::flood_fill_4;

use crate::prelude::*;

/// Cave level generator.
///
/// Seeds the interior with noise at the given density, runs one
/// birth/survival relaxation generation, forces the border ring to wall and
/// then carves corridors until the floor is a single connected region.
#[derive(Copy, Clone, Debug)]
pub struct Caves {
    width: i32,
    height: i32,
    density: f64,
}

impl Caves {
    pub fn new(width: i32, height: i32) -> Self {
        Caves {
            width,
            height,
            density: 0.5,
        }
    }

    /// Boss-level variant, maximal density biases the automaton toward one
    /// large open chamber.
    pub fn boss(width: i32, height: i32) -> Self {
        Caves {
            width,
            height,
            density: 1.0,
        }
    }
}

impl Distribution<Map> for Caves {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Map {
        let (w, h) = (self.width, self.height);
        let mut noise = vec![false; (w * h) as usize];
        for cell in noise.iter_mut() {
            *cell = rng.gen_bool(self.density);
        }

        let mut map = Map::new(w, h);
        for p in map.cells().collect::<Vec<_>>() {
            if p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1 {
                // Border ring is always wall.
                continue;
            }
            let mut live = 0;
            for n in util::s8::ns(p) {
                if n.x >= 0
                    && n.y >= 0
                    && n.x < w
                    && n.y < h
                    && noise[(n.y * w + n.x) as usize]
                {
                    live += 1;
                }
            }
            // Birth 5..=8, survival 4..=8.
            let alive = if noise[(p.y * w + p.x) as usize] {
                live >= 4
            } else {
                live >= 5
            };
            if alive {
                map.carve(p);
            }
        }

        if map.floor_cells().next().is_none() {
            // Degenerate automaton output, open up the middle so the level
            // is usable.
            map.carve(ivec2(w / 2, h / 2));
        }

        connect(&mut map);
        map
    }
}

/// Carve corridors until every floor cell is reachable from every other.
fn connect(map: &mut Map) {
    loop {
        let mut regions: Vec<Vec<IVec2>> = Vec::new();
        let mut assigned: HashSet<IVec2> = HashSet::default();
        for p in map.floor_cells().collect::<Vec<_>>() {
            if assigned.contains(&p) {
                continue;
            }
            let fill = flood_fill_4(p, |c| map.is_passable(c));
            assigned.extend(fill.iter().copied());
            regions.push(fill.into_iter().collect());
        }

        if regions.len() <= 1 {
            return;
        }
        log::debug!("connecting {} cave regions", regions.len());

        regions.sort_by_key(|r| r.len());
        let (Some(main), Some(other)) = (regions.pop(), regions.pop())
        else {
            return;
        };

        // Join an arbitrary cell of the stray region to the nearest main
        // region cell with an L-shaped corridor. Both endpoints are interior
        // so the corridor never touches the border ring.
        let from = other[0];
        let Some(&to) =
            main.iter().min_by_key(|p| (**p - from).taxi_len())
        else {
            return;
        };

        let mut p = from;
        while p.x != to.x {
            p.x += (to.x - p.x).signum();
            map.carve(p);
        }
        while p.y != to.y {
            p.y += (to.y - p.y).signum();
            map.carve(p);
        }
    }
}
