use bevy::prelude::*;
use thiserror::Error;

/// Why a knot selection could not be resolved against its container.
///
/// All of these mean the selection is stale and should be dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("spline index {spline} out of range ({count} splines)")]
    SplineOutOfRange { spline: usize, count: usize },

    #[error("knot index {knot} out of range for spline {spline} ({count} knots)")]
    KnotOutOfRange {
        spline: usize,
        knot: usize,
        count: usize,
    },

    #[error("spline container {0} no longer exists")]
    MissingContainer(Entity),
}
