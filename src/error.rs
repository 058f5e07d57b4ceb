use thiserror::Error;

/// Errors surfaced while realizing a point's backing storage. Realization
/// failure is fatal for the affected point and is propagated, not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RealizeError {
    #[error("state storage has already been realized")]
    AlreadyRealized,
}

/// Contract violations on a point's operational surface. Device failures are
/// never reported here; they are committed as bad-quality snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointError {
    #[error("point has not been realized")]
    Unrealized,
}
