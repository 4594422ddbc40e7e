#[cfg(feature = "parallel-parsing")]
use rayon::prelude::*;

use crate::core::{ParserKernel, TimeInterval};
use crate::error::ParseError;

/// Parses every input with `kernel`, keeping one result per input in order.
///
/// With the `parallel-parsing` feature the inputs are spread over the rayon
/// pool; results are identical either way.
#[must_use]
pub fn parse_all<S>(inputs: &[S], kernel: &ParserKernel) -> Vec<Result<TimeInterval, ParseError>>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel-parsing")]
    {
        inputs
            .par_iter()
            .map(|input| kernel.parse(input.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel-parsing"))]
    {
        inputs
            .iter()
            .map(|input| kernel.parse(input.as_ref()))
            .collect()
    }
}
