use datafusion::prelude::*;

use crate::interpolate::make_interpolate_udf;
use crate::to_fahr::make_to_fahr_udf;

/// Registers all weather UDFs with the given session context.
pub fn register_weather_udfs(ctx: &SessionContext) {
    ctx.register_udf(make_interpolate_udf());
    ctx.register_udf(make_to_fahr_udf());
}
