pub mod json;
pub mod text;

/// Probability as a percentage with one decimal, e.g. `37.8%`.
pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

pub fn format_score(v: f64) -> String {
    format!("{:.3}", v)
}

/// Fixed-width bar for a score in [0, 1].
pub fn score_bar(v: f64, width: usize) -> String {
    let filled = (v.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut out = String::with_capacity(width);
    for i in 0..width {
        out.push(if i < filled { '#' } else { '.' });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
