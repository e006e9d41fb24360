//! Taxicab-distance helpers.

pub fn manhattan_distance(a: (i32, i32), b: (i32, i32)) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Every integer point within Manhattan distance `radius` of `(cx, cy)`,
/// row by row.
pub fn manhattan_disk(cx: i32, cy: i32, radius: u32) -> impl Iterator<Item = (i32, i32)> {
    let r = radius as i32;
    (-r..=r).flat_map(move |dy| {
        let span = r - dy.abs();
        (-span..=span).map(move |dx| (cx + dx, cy + dy))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_sizes() {
        assert_eq!(manhattan_disk(0, 0, 0).count(), 1);
        assert_eq!(manhattan_disk(0, 0, 1).count(), 5);
        // 2r(r+1) + 1
        assert_eq!(manhattan_disk(7, -3, 5).count(), 61);
    }

    #[test]
    fn disk_points_are_within_radius() {
        let points: Vec<_> = manhattan_disk(10, 10, 3).collect();
        assert!(points
            .iter()
            .all(|&p| manhattan_distance(p, (10, 10)) <= 3));
        assert!(points.contains(&(13, 10)));
        assert!(points.contains(&(10, 7)));
        assert!(!points.contains(&(12, 12)));
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(manhattan_distance((10, 10), (10, 16)), 6);
        assert_eq!(manhattan_distance((10, 16), (10, 10)), 6);
        assert_eq!(manhattan_distance((-2, 3), (4, -1)), 10);
    }
}
