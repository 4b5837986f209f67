//! Column helpers
//!
//! A series is a column of optional samples; `None` marks an undefined
//! value (a ratio with a zero denominator, an incomplete rolling window).
//! Summary functions skip undefined samples.

/// Optional-valued column aligned with the table's timestamps.
pub type Series = Vec<Option<f64>>;

/// Lift a fully defined column into a [`Series`].
pub fn defined(values: &[f64]) -> Series {
    values.iter().copied().map(Some).collect()
}

/// `num / den`, undefined when the denominator is zero or either side is.
pub fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    match (num, den) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let v = present(values);
    if v.is_empty() {
        return None;
    }
    Some(v.iter().sum::<f64>() / v.len() as f64)
}

/// Sample standard deviation (n − 1 denominator).
pub fn std(values: &[Option<f64>]) -> Option<f64> {
    let v = present(values);
    if v.len() < 2 {
        return None;
    }
    let m = v.iter().sum::<f64>() / v.len() as f64;
    let var = v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (v.len() - 1) as f64;
    Some(var.sqrt())
}

pub fn min(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::min)
}

pub fn max(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Quantile `q` in [0, 1] with linear interpolation between closest ranks.
pub fn quantile(values: &[Option<f64>], q: f64) -> Option<f64> {
    let mut v = present(values);
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (v.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(v[lo] + (v[hi] - v[lo]) * (pos - lo as f64))
}

pub fn count(values: &[Option<f64>]) -> usize {
    values.iter().flatten().count()
}
