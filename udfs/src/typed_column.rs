use anyhow::{Context, Result, bail, ensure};
use datafusion::arrow::array::{Array, DictionaryArray, Float32Array, Float64Array, StringArray};
use datafusion::arrow::datatypes::{DataType, Int32Type};

/// Reads a string argument column into one value per row.
///
/// Accepts both Utf8 and Dictionary<Int32, Utf8> inputs.
pub fn string_rows<'a>(array: &'a dyn Array) -> Result<Vec<Option<&'a str>>> {
    match array.data_type() {
        DataType::Utf8 => {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .with_context(|| "casting to string array")?;
            Ok((0..strings.len())
                .map(|index| (!strings.is_null(index)).then(|| strings.value(index)))
                .collect())
        }
        DataType::Dictionary(_, value_type) if matches!(value_type.as_ref(), DataType::Utf8) => {
            let dict = array
                .as_any()
                .downcast_ref::<DictionaryArray<Int32Type>>()
                .with_context(|| "casting to dictionary array")?;
            let values = dict
                .values()
                .as_any()
                .downcast_ref::<StringArray>()
                .with_context(|| "dictionary values are not a string array")?;
            let mut rows = Vec::with_capacity(dict.len());
            for index in 0..dict.len() {
                if dict.is_null(index) {
                    rows.push(None);
                } else {
                    let key_index = dict.keys().value(index) as usize;
                    ensure!(
                        key_index < values.len(),
                        "dictionary key index out of bounds"
                    );
                    rows.push(Some(values.value(key_index)));
                }
            }
            Ok(rows)
        }
        other => bail!("expected Utf8 or Dictionary<Int32, Utf8>, got {other:?}"),
    }
}

/// Reads a float argument column into one value per row, widened to f64.
pub fn float_rows(array: &dyn Array) -> Result<Vec<Option<f64>>> {
    match array.data_type() {
        DataType::Float64 => {
            let floats = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .with_context(|| "casting to Float64 array")?;
            Ok((0..floats.len())
                .map(|index| (!floats.is_null(index)).then(|| floats.value(index)))
                .collect())
        }
        DataType::Float32 => {
            let floats = array
                .as_any()
                .downcast_ref::<Float32Array>()
                .with_context(|| "casting to Float32 array")?;
            Ok((0..floats.len())
                .map(|index| (!floats.is_null(index)).then(|| f64::from(floats.value(index))))
                .collect())
        }
        other => bail!("expected Float32 or Float64, got {other:?}"),
    }
}
