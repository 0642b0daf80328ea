use surveyor_core::error::CoreError;

/// Error returned by multi-step repository operations.
///
/// Single-statement repository methods return [`sqlx::Error`] directly;
/// operations that also check domain rules (a missing target environment,
/// a mismatched filter resolution) can fail with a [`CoreError`] as well.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
