//! Bilinear grid expansion with null propagation.
//!
//! The sparse probe grid is expanded in two passes, rows first and then
//! columns, each inserting a caller-chosen number of linearly interpolated
//! cells between neighbouring samples. An absent endpoint makes every cell
//! of the segments touching it absent; other segments are unaffected.

use profile_common::error::Axis;
use profile_common::{ProfileError, ProfileResult, SampleGrid};
use rayon::prelude::*;

/// Minimum output cells before the column pass is split across threads
const PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Expand `src` by inserting `d_row[y]` rows after row `y` and `d_col[x]`
/// columns after column `x`.
///
/// `d_row` must have one entry per gap between rows and `d_col` one entry
/// per gap between columns; anything else is a `DimensionMismatch`. An
/// empty grid expands to an empty grid.
pub fn interpolate(
    src: &SampleGrid,
    d_col: &[usize],
    d_row: &[usize],
) -> ProfileResult<SampleGrid> {
    interpolate_from(src, d_col, d_row, 0)
}

/// Like [`interpolate`], but the first `skip_cols` output columns are never
/// built. Cell values are the same as the matching columns of the full
/// expansion.
pub fn interpolate_from(
    src: &SampleGrid,
    d_col: &[usize],
    d_row: &[usize],
    skip_cols: usize,
) -> ProfileResult<SampleGrid> {
    if src.is_empty() {
        return Ok(SampleGrid::empty());
    }

    check_gaps(Axis::Row, src.row_count(), d_row)?;
    check_gaps(Axis::Column, src.col_count(), d_col)?;

    let mid = expand_rows(src.rows(), d_row);

    let out_cols = (src.col_count() + d_col.iter().sum::<usize>()).saturating_sub(skip_cols);
    let rows = if mid.len() * out_cols >= PARALLEL_THRESHOLD {
        mid.par_iter()
            .map(|row| expand_columns(row, d_col, skip_cols))
            .collect()
    } else {
        mid.iter()
            .map(|row| expand_columns(row, d_col, skip_cols))
            .collect()
    };

    SampleGrid::from_rows(rows)
}

fn check_gaps(axis: Axis, len: usize, counts: &[usize]) -> ProfileResult<()> {
    let expected = len.saturating_sub(1);
    if counts.len() != expected {
        return Err(ProfileError::DimensionMismatch {
            axis,
            expected,
            actual: counts.len(),
        });
    }
    Ok(())
}

/// Value `step` of `steps` inserted between `a` and `b`.
#[inline]
fn lerp_step(a: Option<f64>, b: Option<f64>, steps: usize, step: usize) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) / (steps + 1) as f64 * step as f64),
        _ => None,
    }
}

fn expand_rows(rows: &[Vec<Option<f64>>], d_row: &[usize]) -> Vec<Vec<Option<f64>>> {
    let total = rows.len() + d_row.iter().sum::<usize>();
    let mut out = Vec::with_capacity(total);

    for (y, &steps) in d_row.iter().enumerate() {
        let (upper, lower) = (&rows[y], &rows[y + 1]);
        out.push(upper.clone());
        for j in 1..=steps {
            out.push(
                upper
                    .iter()
                    .zip(lower)
                    .map(|(&a, &b)| lerp_step(a, b, steps, j))
                    .collect(),
            );
        }
    }
    if let Some(last) = rows.last() {
        out.push(last.clone());
    }

    out
}

/// Expand one row, dropping the first `skip` output cells without computing
/// them.
fn expand_columns(row: &[Option<f64>], d_col: &[usize], skip: usize) -> Vec<Option<f64>> {
    let total = row.len() + d_col.iter().sum::<usize>();
    let mut out = Vec::with_capacity(total.saturating_sub(skip));

    // Output index of the sample that opens the current segment
    let mut pos = 0;
    for (x, &steps) in d_col.iter().enumerate() {
        let (a, b) = (row[x], row[x + 1]);
        if pos >= skip {
            out.push(a);
        }
        let first = skip.saturating_sub(pos).max(1);
        if first <= steps {
            out.extend((first..=steps).map(|i| lerp_step(a, b, steps, i)));
        }
        pos += steps + 1;
    }
    if let Some(&last) = row.last() {
        if pos >= skip {
            out.push(last);
        }
    }

    out
}
