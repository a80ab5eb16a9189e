use gridpath_core::Point;

/// Cost of one diagonal move in the octile estimate.
pub const DIAGONAL_COST: f32 = 1.4;

/// Octile distance: `1.4 * min(dx, dy) + (max(dx, dy) - min(dx, dy))`.
///
/// This assumes diagonal moves even though grid adjacency is strictly
/// orthogonal, so it underestimates the true cost whenever `dx != dy`.
/// It is used both as the per-edge step cost and as the goal heuristic.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let (dx, dy) = a.abs_delta(b);
    let min = dx.min(dy);
    let max = dx.max(dy);
    DIAGONAL_COST * min as f32 + (max - min) as f32
}

/// Manhattan (L1) distance: the hop count of a shortest orthogonal path on
/// an obstacle-free grid.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let (dx, dy) = a.abs_delta(b);
    dx + dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn octile_orthogonal_step_is_one() {
        let p = Point::new(3, 3);
        for n in p.cardinal_neighbors() {
            assert_eq!(octile(p, n), 1.0);
        }
    }

    #[test]
    fn octile_mixes_diagonal_and_straight() {
        assert!(close(octile(Point::new(0, 0), Point::new(3, 1)), 3.4));
        assert!(close(octile(Point::new(0, 0), Point::new(4, 4)), 5.6));
        assert!(close(octile(Point::new(5, 2), Point::new(0, 0)), 5.8));
    }

    #[test]
    fn octile_never_exceeds_manhattan() {
        for x in -4..=4 {
            for y in -4..=4 {
                let a = Point::ZERO;
                let b = Point::new(x, y);
                assert!(octile(a, b) <= manhattan(a, b) as f32 + 1e-5);
            }
        }
    }
}
