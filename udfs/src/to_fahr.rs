use datafusion::arrow::array::{Float32Array, Float64Array};
use datafusion::arrow::datatypes::DataType;
use datafusion::common::{Result, internal_err, plan_err};
use datafusion::error::DataFusionError;
use datafusion::logical_expr::{
    ColumnarValue, ScalarFunctionArgs, ScalarUDF, ScalarUDFImpl, Signature, Volatility,
};
use lazy_static::lazy_static;
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use crate::typed_column::{float_rows, string_rows};

lazy_static! {
    static ref US_CITIES: HashSet<&'static str> =
        HashSet::from(["Chicago", "Portland", "Seattle", "New York"]);
}

fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// A scalar UDF that converts Celsius to Fahrenheit for known US cities.
///
/// City matching is exact and case-sensitive; rows whose city is outside the
/// fixed set keep their temperature unchanged.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ToFahr {
    signature: Signature,
}

impl ToFahr {
    pub fn new() -> Self {
        Self {
            signature: Signature::any(2, Volatility::Immutable),
        }
    }
}

impl Default for ToFahr {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarUDFImpl for ToFahr {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        "to_fahr"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, args: &[DataType]) -> Result<DataType> {
        match args {
            [_, temperature @ (DataType::Float32 | DataType::Float64)] => Ok(temperature.clone()),
            _ => plan_err!("to_fahr expects (city: string, temperature: float)"),
        }
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        let args = ColumnarValue::values_to_arrays(&args.args)?;
        if args.len() != 2 {
            return internal_err!("wrong number of arguments to to_fahr()");
        }

        let cities = string_rows(args[0].as_ref())
            .map_err(|e| DataFusionError::Internal(format!("{e:?}")))?;
        let temperatures = float_rows(args[1].as_ref())
            .map_err(|e| DataFusionError::Internal(format!("{e:?}")))?;
        if cities.len() != temperatures.len() {
            return internal_err!("arrays of different lengths in to_fahr()");
        }

        let converted: Vec<Option<f64>> = cities
            .iter()
            .zip(&temperatures)
            .map(|(city, temperature)| {
                temperature.map(|celsius| {
                    if city.is_some_and(|city| US_CITIES.contains(city)) {
                        to_fahrenheit(celsius)
                    } else {
                        celsius
                    }
                })
            })
            .collect();

        match args[1].data_type() {
            DataType::Float64 => Ok(ColumnarValue::Array(Arc::new(Float64Array::from(converted)))),
            DataType::Float32 => {
                let narrowed: Vec<Option<f32>> = converted
                    .iter()
                    .map(|value| value.map(|value| value as f32))
                    .collect();
                Ok(ColumnarValue::Array(Arc::new(Float32Array::from(narrowed))))
            }
            _ => internal_err!(
                "to_fahr: unsupported temperature type, expected Float32 or Float64"
            ),
        }
    }
}

/// Creates a user-defined function that converts Celsius to Fahrenheit for
/// known US cities, passing other rows through unchanged.
pub fn make_to_fahr_udf() -> ScalarUDF {
    ScalarUDF::new_from_impl(ToFahr::new())
}
