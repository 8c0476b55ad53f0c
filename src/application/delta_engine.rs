// Delta engine: pointwise time gap between two resampled traces
use crate::domain::delta::DeltaSeries;
use crate::domain::errors::AnalysisError;
use crate::domain::resampled::ResampledTrace;

/// Compute `dt[i] = t_reference[i] - t_comparison[i]` over the shared grid.
///
/// Negative delta means the reference driver covered the distance in less
/// time (is ahead); positive means the comparison driver is ahead. Both
/// inputs must have been resampled from the same grid; anything else is a
/// caller bug reported as `GridMismatch`.
pub fn compute_delta(
    reference: &ResampledTrace,
    comparison: &ResampledTrace,
) -> Result<DeltaSeries, AnalysisError> {
    if reference.grid != comparison.grid {
        return Err(AnalysisError::GridMismatch);
    }

    let dt_s = reference
        .elapsed_s
        .iter()
        .zip(&comparison.elapsed_s)
        .map(|(t_ref, t_cmp)| t_ref - t_cmp)
        .collect();

    Ok(DeltaSeries::new(reference.grid.clone(), dt_s))
}
