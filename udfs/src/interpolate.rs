use datafusion::arrow::array::{Float32Array, Float64Array};
use datafusion::arrow::datatypes::DataType;
use datafusion::common::{Result, internal_err, plan_err};
use datafusion::error::DataFusionError;
use datafusion::logical_expr::{
    ColumnarValue, ScalarFunctionArgs, ScalarUDF, ScalarUDFImpl, Signature, Volatility,
};
use log::debug;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::typed_column::{float_rows, string_rows};

/// A scalar UDF that fills missing temperature values by linear interpolation
/// within each id group.
///
/// Rows are partitioned by the first argument, keeping their batch order.
/// An interior gap takes the value on the straight line between its two
/// nearest known neighbors, with the row position as the interpolation axis.
/// A gap at a group's edge takes the nearest known value. A group with no
/// known value at all stays null.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Interpolate {
    signature: Signature,
}

impl Interpolate {
    pub fn new() -> Self {
        Self {
            // a row's result depends on its whole batch, the planner must
            // not constant-fold the call or assume row-local semantics
            signature: Signature::any(2, Volatility::Volatile),
        }
    }
}

impl Default for Interpolate {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills the nulls of one group's value sequence in place.
fn fill_series(values: &mut [Option<f64>]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| value.map(|_| index))
        .collect();
    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        debug!("group has no known value, leaving it null");
        return;
    };
    for index in 0..first {
        values[index] = values[first];
    }
    for index in last + 1..values.len() {
        values[index] = values[last];
    }
    for anchors in known.windows(2) {
        let (low, high) = (anchors[0], anchors[1]);
        if high - low < 2 {
            continue;
        }
        let (Some(start), Some(end)) = (values[low], values[high]) else {
            continue;
        };
        let span = (high - low) as f64;
        for index in low + 1..high {
            let fraction = (index - low) as f64 / span;
            values[index] = Some(start + (end - start) * fraction);
        }
    }
}

/// Stable-partitions the rows by id, fills each group, and scatters the
/// results back to their original row positions.
fn fill_by_group(ids: &[Option<&str>], temperatures: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut groups: HashMap<Option<&str>, Vec<usize>> = HashMap::new();
    for (row, id) in ids.iter().enumerate() {
        groups.entry(*id).or_default().push(row);
    }
    let mut filled = temperatures.to_vec();
    for rows in groups.values() {
        let mut series: Vec<Option<f64>> = rows.iter().map(|&row| temperatures[row]).collect();
        fill_series(&mut series);
        for (&row, value) in rows.iter().zip(series) {
            filled[row] = value;
        }
    }
    filled
}

impl ScalarUDFImpl for Interpolate {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        "interpolate"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, args: &[DataType]) -> Result<DataType> {
        match args {
            [_, temperature @ (DataType::Float32 | DataType::Float64)] => Ok(temperature.clone()),
            _ => plan_err!("interpolate expects (id: string, temperature: float)"),
        }
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        let args = ColumnarValue::values_to_arrays(&args.args)?;
        if args.len() != 2 {
            return internal_err!("wrong number of arguments to interpolate()");
        }

        let ids = string_rows(args[0].as_ref())
            .map_err(|e| DataFusionError::Internal(format!("{e:?}")))?;
        let temperatures = float_rows(args[1].as_ref())
            .map_err(|e| DataFusionError::Internal(format!("{e:?}")))?;
        if ids.len() != temperatures.len() {
            return internal_err!("arrays of different lengths in interpolate()");
        }

        let filled = fill_by_group(&ids, &temperatures);
        match args[1].data_type() {
            DataType::Float64 => Ok(ColumnarValue::Array(Arc::new(Float64Array::from(filled)))),
            DataType::Float32 => {
                let narrowed: Vec<Option<f32>> = filled
                    .iter()
                    .map(|value| value.map(|value| value as f32))
                    .collect();
                Ok(ColumnarValue::Array(Arc::new(Float32Array::from(narrowed))))
            }
            _ => internal_err!(
                "interpolate: unsupported temperature type, expected Float32 or Float64"
            ),
        }
    }
}

/// Creates a user-defined function that fills missing temperatures per id group.
pub fn make_interpolate_udf() -> ScalarUDF {
    ScalarUDF::new_from_impl(Interpolate::new())
}
