//! Generic field-of-view computation.
//!
//! Recursive shadowcasting over a square grid, split into eight octants.
//! The caller provides an opacity predicate and receives a callback for
//! every cell visible from the origin within the given radius.

/// Coordinate transforms from the scanning octant to the other seven.
const OCTANTS: [[i32; 4]; 8] = [
    [1, 0, 0, 1],
    [0, 1, 1, 0],
    [0, -1, 1, 0],
    [-1, 0, 0, 1],
    [-1, 0, 0, -1],
    [0, -1, -1, 0],
    [0, 1, -1, 0],
    [1, 0, 0, -1],
];

/// A field-of-view oracle wrapping an opacity predicate.
///
/// Holds no state other than the predicate; results are computed from
/// scratch on every call so the oracle never goes stale when the underlying
/// terrain changes.
pub struct Shadowcaster<F> {
    opaque: F,
}

impl<F: Fn(i32, i32) -> bool> Shadowcaster<F> {
    pub fn new(opaque: F) -> Self {
        Shadowcaster { opaque }
    }

    /// Invoke `visit` for every cell visible from `(ox, oy)`.
    ///
    /// The origin itself is always visible. Cells on octant seams may be
    /// visited more than once, so the callback must be idempotent per cell.
    pub fn compute(
        &self,
        ox: i32,
        oy: i32,
        radius: i32,
        mut visit: impl FnMut(i32, i32),
    ) {
        visit(ox, oy);
        for octant in &OCTANTS {
            self.cast(ox, oy, radius, 1, 1.0, 0.0, octant, &mut visit);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn cast<V: FnMut(i32, i32)>(
        &self,
        ox: i32,
        oy: i32,
        radius: i32,
        row: i32,
        mut start: f32,
        end: f32,
        octant: &[i32; 4],
        visit: &mut V,
    ) {
        if start < end {
            return;
        }

        let r2 = radius * radius;
        let mut next_start = start;
        let mut blocked = false;

        for dist in row..=radius {
            if blocked {
                break;
            }
            let dy = -dist;
            for dx in -dist..=0 {
                let x = ox + dx * octant[0] + dy * octant[1];
                let y = oy + dx * octant[2] + dy * octant[3];

                // Slopes along the left and right edge of the current cell.
                let l_slope = (dx as f32 - 0.5) / (dy as f32 + 0.5);
                let r_slope = (dx as f32 + 0.5) / (dy as f32 - 0.5);

                if start < r_slope {
                    continue;
                }
                if end > l_slope {
                    break;
                }

                if dx * dx + dy * dy <= r2 {
                    visit(x, y);
                }

                if blocked {
                    if (self.opaque)(x, y) {
                        next_start = r_slope;
                    } else {
                        blocked = false;
                        start = next_start;
                    }
                } else if (self.opaque)(x, y) && dist < radius {
                    // Wall starts a shadow, scan the rows behind it in a
                    // narrowed recursive pass.
                    blocked = true;
                    self.cast(
                        ox,
                        oy,
                        radius,
                        dist + 1,
                        start,
                        l_slope,
                        octant,
                        visit,
                    );
                    next_start = r_slope;
                }
            }
        }
    }
}
