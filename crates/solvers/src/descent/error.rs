/// Errors that can occur during descent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("objective error: {0}")]
    Objective(Box<dyn std::error::Error + Send + Sync>),

    #[error("objective value or gradient is not finite at the starting point")]
    NonFiniteStart,

    #[error("objective value or gradient is not finite after iteration {iter}")]
    NonFinite { iter: usize },
}

impl Error {
    pub(super) fn objective<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Objective(Box::new(error))
    }
}
