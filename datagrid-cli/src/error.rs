use datagrid_lib::error::QueryError;
use thiserror::Error;

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("No cache directory for the log file; pass --log-file")]
    NoLogDir,

    #[error(transparent)]
    Query(#[from] QueryError),
}
