/// Signed area of one ring stored in the flat coordinate arrays, computed by
/// the shoelace sum over consecutive point pairs.
///
/// The ring is expected to close itself (first point == last point); an open
/// or degenerate ring yields exactly 0.0, which the decoder treats as fatal.
/// Sign convention, fixed for the whole codec: counterclockwise rings are
/// positive (outer), clockwise rings are negative (holes).
pub(crate) fn signed_area(xx: &[f64], yy: &[f64], start: usize, len: usize) -> f64 {
    if len < 3 {
        return 0.0;
    }
    let end = start + len - 1;
    if xx[start] != xx[end] || yy[start] != yy[end] {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in start..end {
        sum += xx[i] * yy[i + 1] - xx[i + 1] * yy[i];
    }
    sum / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
        points.iter().map(|&(x, y)| (x, y)).unzip()
    }

    #[test]
    fn test_clockwise_unit_square_is_negative() {
        let (xx, yy) = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(signed_area(&xx, &yy, 0, 5), -1.0);
    }

    #[test]
    fn test_counterclockwise_unit_square_is_positive() {
        let (xx, yy) = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(signed_area(&xx, &yy, 0, 5), 1.0);
    }

    #[test]
    fn test_open_ring_is_zero() {
        let (xx, yy) = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(signed_area(&xx, &yy, 0, 4), 0.0);
    }

    #[test]
    fn test_degenerate_ring_is_zero() {
        let (xx, yy) = ring(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(signed_area(&xx, &yy, 0, 3), 0.0);
        assert_eq!(signed_area(&xx, &yy, 0, 2), 0.0);
    }

    #[test]
    fn test_offset_into_shared_arrays() {
        // two rings back to back in the same buffers
        let (mut xx, mut yy) = ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 5.0)]);
        let (tail_x, tail_y) = ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        xx.extend(tail_x);
        yy.extend(tail_y);
        assert_eq!(signed_area(&xx, &yy, 0, 4), 0.5);
        assert_eq!(signed_area(&xx, &yy, 4, 5), -4.0);
    }
}
