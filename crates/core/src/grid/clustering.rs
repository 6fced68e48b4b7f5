//! Clustering helpers shared by the boundary detectors.
//!
//! Tokens are grouped into visual lines by a quantized vertical key, and
//! boundary candidates are folded into a sorted set framed by the region
//! edges.

use std::collections::BTreeMap;

use super::types::{KeyF64, RowKey, Token, key_f64};

/// Tokens sharing one quantized vertical position.
#[derive(Clone, Debug)]
pub struct VisualLine<'a> {
    pub key: f64,
    pub tokens: Vec<&'a Token>,
}

impl VisualLine<'_> {
    /// Lowest edge of the line (largest y).
    pub fn bottom(&self) -> f64 {
        self.tokens
            .iter()
            .map(|t| t.y0.max(t.y1))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest edge of the line (smallest y).
    pub fn top(&self) -> f64 {
        self.tokens
            .iter()
            .map(|t| t.y0.min(t.y1))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn mean_height(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        let total: f64 = self.tokens.iter().map(|t| (t.y1 - t.y0).abs()).sum();
        total / self.tokens.len() as f64
    }
}

/// Quantize a coordinate to the nearest multiple of `resolution`.
///
/// Halfway values round to the even multiple so that clustering does not
/// drift upward for values sitting exactly between two steps.
pub fn quantize(value: f64, resolution: f64) -> f64 {
    (value / resolution).round_ties_even() * resolution
}

/// Group tokens into visual lines ordered top to bottom.
///
/// Tokens inside a line keep their input order.
pub fn cluster_visual_lines<'a>(
    tokens: &'a [Token],
    row_key: RowKey,
    resolution: f64,
) -> Vec<VisualLine<'a>> {
    let mut clusters: BTreeMap<KeyF64, Vec<&'a Token>> = BTreeMap::new();
    for token in tokens {
        let key = quantize(row_key.key(token), resolution);
        if key.is_nan() {
            continue;
        }
        clusters.entry(key_f64(key)).or_default().push(token);
    }
    clusters
        .into_iter()
        .map(|(key, tokens)| VisualLine {
            key: key.into_inner(),
            tokens,
        })
        .collect()
}

/// Sort ascending and drop exact duplicates.
pub(crate) fn sort_dedup(xs: &mut Vec<f64>) {
    xs.sort_by(f64::total_cmp);
    xs.dedup();
}

/// Frame interior boundary candidates with the two region edges.
///
/// Candidates outside the open interval `(lo, hi)` are discarded so the
/// edges stay the extremes. The result always has at least two entries.
pub(crate) fn with_edges(mut inner: Vec<f64>, lo: f64, hi: f64) -> Vec<f64> {
    inner.retain(|&v| lo < v && v < hi);
    sort_dedup(&mut inner);
    let mut out = Vec::with_capacity(inner.len() + 2);
    out.push(lo);
    out.extend(inner);
    out.push(hi);
    out
}
