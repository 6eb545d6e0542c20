/// Euclidean distance from `(x, y)` to the segment `(x1, y1)-(x2, y2)`,
/// clamped to the segment endpoints. Zero-length segments measure the
/// distance to their single point.
#[must_use]
pub fn point_segment_distance(x: f64, y: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((x - x1) * dx + (y - y1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let nearest_x = x1 + t * dx;
    let nearest_y = y1 + t * dy;
    (x - nearest_x).hypot(y - nearest_y)
}

#[cfg(test)]
mod tests {
    use super::point_segment_distance;

    #[test]
    fn distance_is_perpendicular_inside_the_segment() {
        assert_eq!(point_segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0), 3.0);
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        assert_eq!(point_segment_distance(13.0, 4.0, 0.0, 0.0, 10.0, 0.0), 5.0);
        assert_eq!(point_segment_distance(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);
    }
}
