use glam::IVec2;

pub trait VecExt: Sized {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Absolute size of vector in chessboard metric.
    fn chess_len(&self) -> i32;

    /// Euclidean length, for distance gates that use true circles.
    fn euclid_len(&self) -> f32;

    /// Vec points to an adjacent cell in the 4-neighborhood.
    fn is_adjacent(&self) -> bool {
        self.taxi_len() == 1
    }
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    fn chess_len(&self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    fn euclid_len(&self) -> f32 {
        ((self.x * self.x + self.y * self.y) as f32).sqrt()
    }
}

/// Operations for the 4-directional neighborhood.
pub mod s4 {
    use glam::{ivec2, IVec2};

    /// The four cardinal directions, clockwise from north.
    pub const DIR: [IVec2; 4] =
        [ivec2(0, -1), ivec2(1, 0), ivec2(0, 1), ivec2(-1, 0)];

    /// Neighbors of a cell.
    pub fn ns(p: IVec2) -> impl Iterator<Item = IVec2> {
        DIR.iter().map(move |&d| p + d)
    }
}

/// Operations for the 8-directional neighborhood.
pub mod s8 {
    use glam::{ivec2, IVec2};

    /// The eight directions, clockwise from north.
    pub const DIR: [IVec2; 8] = [
        ivec2(0, -1),
        ivec2(1, -1),
        ivec2(1, 0),
        ivec2(1, 1),
        ivec2(0, 1),
        ivec2(-1, 1),
        ivec2(-1, 0),
        ivec2(-1, -1),
    ];

    /// Neighbors of a cell.
    pub fn ns(p: IVec2) -> impl Iterator<Item = IVec2> {
        DIR.iter().map(move |&d| p + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::ivec2;

    #[test]
    fn metrics() {
        assert_eq!(ivec2(3, -4).taxi_len(), 7);
        assert_eq!(ivec2(3, -4).chess_len(), 4);
        assert_eq!(ivec2(3, -4).euclid_len(), 5.0);
        assert!(ivec2(0, 1).is_adjacent());
        assert!(!ivec2(1, 1).is_adjacent());
    }

    #[test]
    fn neighborhoods() {
        assert_eq!(s4::ns(ivec2(0, 0)).count(), 4);
        assert_eq!(s8::ns(ivec2(0, 0)).count(), 8);
        assert!(s8::DIR.iter().all(|d| d.chess_len() == 1));
    }
}
