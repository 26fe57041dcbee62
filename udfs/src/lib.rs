//! Weather UDFs: DataFusion scalar functions over temperature batches.

// crate-specific lint exceptions:
#![allow(clippy::missing_errors_doc)]

/// Group-wise linear interpolation of missing temperatures
pub mod interpolate;
/// SessionContext registration of all weather UDFs
pub mod registry;
/// Celsius to Fahrenheit conversion for known US cities
pub mod to_fahr;
/// Typed row views over UDF argument arrays
pub mod typed_column;

// Re-export for convenience in tests
pub use interpolate::Interpolate;
pub use to_fahr::ToFahr;
