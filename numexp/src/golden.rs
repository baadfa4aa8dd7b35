use tracing::{event, Level};

use numerics::prelude::*;

use super::Fail;

pub(crate) fn run(from: u32, to: u32, digits: u32) -> Result<(), Fail> {
    if from >= to {
        return Err(Fail::InvalidArgument(format!(
            "--from ({from}) must be smaller than --to ({to})"
        )));
    }
    let precision = digits as usize;
    for terms in from..to {
        let (smaller, larger) = fibonacci_pair::<Int256>(terms);
        println!("Using {smaller} {larger}");
        println!(
            "  f32:      {:.precision$}",
            phi_through_fibonacci::<f32>(terms)
        );
        println!(
            "  f64:      {:.precision$}",
            phi_through_fibonacci::<f64>(terms)
        );
        println!(
            "  bfloat32: {:.precision$}",
            phi_through_fibonacci::<BFloat32>(terms)
        );
        let fixed = golden_ratio_digits::<256, 32>(terms, digits).map_err(|e| {
            event!(Level::ERROR, "fixed-point approximation failed: {e}");
            Fail::Arithmetic(e)
        })?;
        println!("  int256:   {fixed}");
    }
    Ok(())
}
