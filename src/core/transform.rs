//! Pure per-series data pipeline: pair extraction, unplottable-cell filtering, stable sort
//! by x, stride downsampling and per-axis affine transform.
//!
//! The pipeline never mutates the dataset it reads; it sorts a permutation of
//! row indices and copies the selected cells out.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CellValue, Dataset, TransformParams};

/// Renderable coordinate arrays for one trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceData {
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
}

impl TraceData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Affine parameters for one axis after normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisTransform {
    scale: f64,
    offset: f64,
    zero_reference: bool,
}

impl AxisTransform {
    fn apply(self, values: &mut [CellValue]) {
        if self.zero_reference {
            if let Some(first) = values.first().and_then(CellValue::as_number) {
                // `(v - first) * scale` is exactly 0 at the first kept value.
                for value in values.iter_mut() {
                    if let Some(number) = value.as_number() {
                        *value = CellValue::Number(positive_zero((number - first) * self.scale));
                    }
                }
                return;
            }
        }

        let (scale, offset) = (self.scale, self.offset);
        if scale == 1.0 && offset == 0.0 {
            for value in values.iter_mut() {
                if let CellValue::Bool(flag) = value {
                    *value = CellValue::Number(if *flag { 1.0 } else { 0.0 });
                }
            }
            return;
        }
        for value in values.iter_mut() {
            if let Some(number) = value.as_number() {
                *value = CellValue::Number(positive_zero(number * scale + offset));
            }
        }
    }
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Computes the coordinate arrays for one series.
///
/// Returns empty arrays when the dataset, x column or y column is unset, or
/// when a named column does not exist in `dataset`.
#[must_use]
pub fn compute_trace(
    dataset: Option<&Dataset>,
    x_column: Option<&str>,
    y_column: Option<&str>,
    params: &TransformParams,
) -> TraceData {
    let (Some(dataset), Some(x_column), Some(y_column)) = (dataset, x_column, y_column) else {
        return TraceData::empty();
    };
    let (Ok(xs), Ok(ys)) = (dataset.column(x_column), dataset.column(y_column)) else {
        return TraceData::empty();
    };
    let params = params.normalized();

    let rows = xs.len().min(ys.len());
    let mut order: Vec<usize> = (0..rows)
        .filter(|&row| xs[row].is_plottable() && ys[row].is_plottable())
        .collect();
    // `sort_by` is stable, so equal x values keep their row order.
    order.sort_by(|&a, &b| xs[a].sort_cmp(&xs[b]));

    let stride = params.downsample.max(1);
    let mut x: Vec<CellValue> = Vec::with_capacity(order.len().div_ceil(stride));
    let mut y: Vec<CellValue> = Vec::with_capacity(order.len().div_ceil(stride));
    for &row in order.iter().step_by(stride) {
        x.push(xs[row].clone());
        y.push(ys[row].clone());
    }

    AxisTransform {
        scale: params.x_scale,
        offset: params.x_offset,
        zero_reference: params.x_zero,
    }
    .apply(&mut x);
    AxisTransform {
        scale: params.y_scale,
        offset: params.y_offset,
        zero_reference: false,
    }
    .apply(&mut y);

    trace!(
        dataset = dataset.name(),
        x_column,
        y_column,
        rows,
        kept = x.len(),
        stride,
        "computed trace"
    );
    TraceData { x, y }
}
