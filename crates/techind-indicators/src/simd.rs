//! SIMD kernels used by the windowed indicators.
//!
//! These use the `wide` crate for portable SIMD, which pays off on the
//! per-row window reductions in RCI and the stochastic oscillators.

use wide::f64x4;

/// Sum of squared element-wise differences, `Σ (a[i] - b[i])²`.
///
/// Extra elements of the longer slice are ignored.
pub fn sum_squared_diff(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let va = f64x4::new([a[idx], a[idx + 1], a[idx + 2], a[idx + 3]]);
        let vb = f64x4::new([b[idx], b[idx + 1], b[idx + 2], b[idx + 3]]);
        let diff = va - vb;
        simd_sum += diff * diff;
    }

    let mut result = simd_sum.reduce_add();

    for i in (chunks * 4)..len {
        let diff = a[i] - b[i];
        result += diff * diff;
    }

    result
}

/// Minimum and maximum of a slice, `None` when empty.
pub fn minmax_simd(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.len() / 4;
    let mut min_vec = f64x4::splat(f64::INFINITY);
    let mut max_vec = f64x4::splat(f64::NEG_INFINITY);

    for chunk in data.chunks_exact(4) {
        let values = f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]]);
        min_vec = min_vec.min(values);
        max_vec = max_vec.max(values);
    }

    let (mut min, mut max) = min_vec
        .to_array()
        .into_iter()
        .zip(max_vec.to_array())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });

    for &value in &data[(chunks * 4)..] {
        min = min.min(value);
        max = max.max(value);
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_squared_diff() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![5.0, 4.0, 3.0, 2.0, 1.0];

        // 16 + 4 + 0 + 4 + 16
        assert!((sum_squared_diff(&a, &b) - 40.0).abs() < 1e-10);
        assert!(sum_squared_diff(&a, &a).abs() < 1e-10);
    }

    #[test]
    fn test_sum_squared_diff_short() {
        assert!((sum_squared_diff(&[3.0], &[1.0]) - 4.0).abs() < 1e-10);
        assert_eq!(sum_squared_diff(&[], &[]), 0.0);
    }

    #[test]
    fn test_minmax_simd() {
        let data = vec![5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, -1.0];
        let (min, max) = minmax_simd(&data).unwrap();

        assert!((min + 1.0).abs() < 1e-10);
        assert!((max - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_minmax_short() {
        assert_eq!(minmax_simd(&[2.0, 7.0]), Some((2.0, 7.0)));
        assert!(minmax_simd(&[]).is_none());
    }
}
