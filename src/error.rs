use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failures surfaced by chart construction, configuration and backends.
///
/// Data conditions met during updates (empty windows, missing hover points,
/// flat domains) degrade the visual instead of producing one of these.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Canvas or plot area has no drawable extent.
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Year range with `min_year > max_year`.
    #[error("invalid view window: min_year={min_year}, max_year={max_year}")]
    InvalidWindow { min_year: i32, max_year: i32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
