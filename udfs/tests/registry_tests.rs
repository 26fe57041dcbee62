use datafusion::arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use std::sync::Arc;
use weather_udfs::registry::register_weather_udfs;

#[tokio::test]
async fn test_register_weather_udfs_installs_both_functions() {
    let ctx = SessionContext::new();
    register_weather_udfs(&ctx);

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("city", DataType::Utf8, false),
        Field::new("temperature", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["a", "a", "a"])) as ArrayRef,
            Arc::new(StringArray::from(vec!["Chicago", "Tokyo", "Chicago"])) as ArrayRef,
            Arc::new(Float64Array::from(vec![Some(0.0), None, Some(10.0)])) as ArrayRef,
        ],
    )
    .expect("Failed to create RecordBatch");
    ctx.register_batch("weather", batch)
        .expect("Failed to register batch");

    let df = ctx
        .sql(
            "SELECT interpolate(id, temperature) AS filled, \
             to_fahr(city, temperature) AS fahr FROM weather",
        )
        .await
        .expect("Failed to execute query");
    let results = df.collect().await.expect("Failed to collect results");

    assert_eq!(results.len(), 1);
    let batch = &results[0];

    let filled = batch
        .column(0)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("Expected Float64Array result");
    assert_eq!(filled.value(0), 0.0);
    assert_eq!(filled.value(1), 5.0);
    assert_eq!(filled.value(2), 10.0);

    let fahr = batch
        .column(1)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("Expected Float64Array result");
    assert_eq!(fahr.value(0), 32.0);
    assert!(fahr.is_null(1));
    assert_eq!(fahr.value(2), 50.0);
}
