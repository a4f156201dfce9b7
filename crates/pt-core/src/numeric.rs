/// Round half away from zero to `places` decimals.
pub fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (v * scale).round() / scale
}

/// `n` evenly spaced samples over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be ascending. Values outside the sampled range clamp to the end
/// samples.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let (Some(&first), Some(&last)) = (xp.first(), xp.last()) else {
        return f64::NAN;
    };
    if x <= first {
        return fp[0];
    }
    if x >= last {
        return fp[fp.len() - 1];
    }
    // first index with xp[i] > x; guaranteed in 1..len by the clamps above
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span == 0.0 {
        return fp[hi];
    }
    fp[lo] + (fp[hi] - fp[lo]) * (x - xp[lo]) / span
}
