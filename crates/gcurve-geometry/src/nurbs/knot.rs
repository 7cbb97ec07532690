//! Knot vector construction and B-spline basis evaluation.

/// Build a normalized knot vector for `point_count` control points.
///
/// Non-cyclic splines get a clamped vector (`degree + 1` repeated knots at
/// each end) so the curve starts and ends on the first and last control
/// point. Cyclic splines get a uniform periodic vector `0, 1, .., n + order - 1`.
/// Either way the result is divided by its last value and spans `[0, 1]`.
///
/// The caller guarantees `point_count >= degree + 1`.
pub fn generate_knots(point_count: usize, degree: usize, cyclic: bool) -> Vec<f64> {
    let order = degree + 1;
    let mut knots = Vec::with_capacity(point_count + order);

    if cyclic {
        knots.extend((0..point_count + order).map(|i| i as f64));
    } else {
        let interior = point_count.saturating_sub(order);
        knots.extend(std::iter::repeat(0.0).take(order));
        knots.extend((1..=interior).map(|i| i as f64));
        knots.extend(std::iter::repeat((interior + 1) as f64).take(order));
    }

    let last = knots.last().copied().unwrap_or(1.0);
    if last != 0.0 {
        for k in &mut knots {
            *k /= last;
        }
    }
    knots
}

/// Find the knot span index for parameter `t`.
///
/// Returns `i` with `knots[i] <= t < knots[i+1]`; parameters at or past the
/// upper end of the valid range map to the last span `n`.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector (non-decreasing)
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Non-vanishing basis functions `N[span-degree..=span]` at `t`.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}
