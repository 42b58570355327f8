use polars::error::PolarsError;
use rxn_model::ConfigError;
use thiserror::Error;

/// Failures that abort a cleaning run.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid cleaning options: {0}")]
    Config(#[from] ConfigError),

    /// The rarity filter did not reach a fixed point.
    #[error("rare-molecule removal did not converge within {passes} passes")]
    ConvergenceTimeout { passes: usize },

    #[error("table operation failed: {0}")]
    Polars(#[from] PolarsError),
}
