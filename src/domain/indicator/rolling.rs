//! Rolling-window primitives shared by indicators and detectors.
//!
//! Full-window semantics: a value is produced only once `window` inputs are
//! available, and any undefined input inside the window poisons that output.

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        w.iter().sum::<f64>() / window as f64
    })
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

fn rolling_apply<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let mut buf: Vec<f64> = Vec::with_capacity(window);
    for i in (window - 1)..values.len() {
        buf.clear();
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_some()) {
            buf.extend(slice.iter().map(|v| v.unwrap()));
            out[i] = Some(f(&buf));
        }
    }
    out
}
