use thiserror::Error;

/// Failures surfaced by the host-facing entry points.
///
/// The matchers themselves never fail: a node that cannot be rewritten is
/// reported without a fix instead.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("failed to parse {filename} at byte {offset}: {message}")]
    Parse {
        filename: String,
        offset: usize,
        message: String,
    },

    #[error("invalid migration config: {0}")]
    Config(#[from] serde_json::Error),
}
