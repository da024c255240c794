use std::hash::Hash;

use glam::IVec2;

use crate::{s4, HashSet};

/// Find a shortest path from `start` to `end` according to a neighbors
/// function.
///
/// Returns the waypoint list inclusive of both endpoints, so a path between
/// adjacent cells has length 2. Returns `None` when no path exists.
pub fn astar_path<T, I>(
    start: &T,
    end: &T,
    mut neighbors: impl FnMut(&T) -> I,
    mut heuristic: impl FnMut(&T, &T) -> usize,
) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    pathfinding::directed::astar::astar(
        start,
        |a| {
            neighbors(a)
                .into_iter()
                .map(|c| (c, 1))
                .collect::<Vec<_>>()
        },
        |a| heuristic(a, end),
        |a| a == end,
    )
    .map(|(path, _)| path)
}

/// Collect the 4-connected region of open cells around `origin`.
///
/// The origin is included whether or not it tests open, so the result is
/// never empty.
pub fn flood_fill_4(
    origin: IVec2,
    mut is_open: impl FnMut(IVec2) -> bool,
) -> HashSet<IVec2> {
    let mut seen = HashSet::default();
    let mut edge = vec![origin];
    seen.insert(origin);

    while let Some(p) = edge.pop() {
        for n in s4::ns(p) {
            if !seen.contains(&n) && is_open(n) {
                seen.insert(n);
                edge.push(n);
            }
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;
    use crate::VecExt;

    #[test]
    fn direct_neighbors() {
        let path = astar_path(
            &ivec2(0, 0),
            &ivec2(1, 0),
            |&p| crate::s8::ns(p),
            |a, b| (*b - *a).chess_len() as usize,
        )
        .unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn no_path() {
        // Neighbors only along x, goal on another row.
        let path = astar_path(
            &ivec2(0, 0),
            &ivec2(0, 5),
            |&p| [p + ivec2(1, 0), p - ivec2(1, 0)]
                .into_iter()
                .filter(|p| p.x.abs() < 10),
            |a, b| (*b - *a).chess_len() as usize,
        );
        assert!(path.is_none());
    }

    #[test]
    fn fill_is_bounded() {
        let room =
            |p: IVec2| p.x >= 0 && p.y >= 0 && p.x < 3 && p.y < 3;
        let fill = flood_fill_4(ivec2(1, 1), room);
        assert_eq!(fill.len(), 9);
    }
}
