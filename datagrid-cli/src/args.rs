use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use datagrid_lib::controller::ControllerConfig;
use datagrid_lib::dataset::DatasetConfig;
use datagrid_lib::engine::EngineConfig;
use datagrid_lib::error::QueryError;
use datagrid_lib::query::FilterMode;
use simplelog::LevelFilter;

/// Verbosity of the log file
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command-line arguments for datagrid
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Paginated, sortable, filterable table over a generated people dataset"
)]
pub struct Args {
    /// Number of records to generate
    #[arg(long = "rows", default_value_t = 100_000)]
    pub rows: usize,

    /// Nested sub-rows generated under each record
    #[arg(long = "sub-rows", default_value_t = 0)]
    pub sub_rows: usize,

    /// Seed for the dataset generator; random if omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Simulated latency of every query, in milliseconds
    #[arg(long = "latency-ms", default_value_t = 1500)]
    pub latency_ms: u64,

    /// Quiet period before a state change is sent as a query, in milliseconds
    #[arg(long = "debounce-ms", default_value_t = 100)]
    pub debounce_ms: u64,

    /// Initial page size (10, 20, 30, 40 or 50)
    #[arg(long = "page-size", default_value_t = 10)]
    pub page_size: usize,

    /// Fail a query that takes longer than this, in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Match filters fuzzily instead of by exact value
    #[arg(long = "fuzzy", action)]
    pub fuzzy: bool,

    /// Let a superseded query finish instead of cancelling it
    #[arg(long = "no-cancel", action)]
    pub no_cancel: bool,

    /// Write the log here instead of the cache directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    pub fn dataset_config(&self) -> DatasetConfig {
        let config = DatasetConfig::new(self.rows).with_sub_rows(self.sub_rows);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mode = if self.fuzzy {
            FilterMode::Fuzzy
        } else {
            FilterMode::Exact
        };
        EngineConfig::new()
            .with_latency(Duration::from_millis(self.latency_ms))
            .with_filter_mode(mode)
    }

    pub fn controller_config(&self) -> Result<ControllerConfig, QueryError> {
        let mut config = ControllerConfig::new()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_page_size(self.page_size)?
            .with_cancel_superseded(!self.no_cancel);
        if let Some(timeout) = self.timeout_ms {
            config = config.with_query_timeout(Duration::from_millis(timeout));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("datagrid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.rows, 100_000);
        assert_eq!(args.log_level, LogLevel::Info);

        let controller = args.controller_config().unwrap();
        assert_eq!(controller.debounce, Duration::from_millis(100));
        assert_eq!(controller.page_size, 10);
        assert_eq!(controller.query_timeout, None);
        assert!(controller.cancel_superseded);

        let engine = args.engine_config();
        assert_eq!(engine.latency, Duration::from_millis(1500));
        assert_eq!(engine.filter_mode, FilterMode::Exact);
    }

    #[test]
    fn test_flags_map_to_configs() {
        let args = parse(&[
            "--rows",
            "50",
            "--seed",
            "7",
            "--latency-ms",
            "0",
            "--page-size",
            "30",
            "--timeout-ms",
            "250",
            "--fuzzy",
            "--no-cancel",
            "--log-level",
            "debug",
        ]);

        let dataset = args.dataset_config();
        assert_eq!(dataset.rows, 50);
        assert_eq!(dataset.seed, Some(7));

        let controller = args.controller_config().unwrap();
        assert_eq!(controller.page_size, 30);
        assert_eq!(controller.query_timeout, Some(Duration::from_millis(250)));
        assert!(!controller.cancel_superseded);

        assert_eq!(args.engine_config().filter_mode, FilterMode::Fuzzy);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_page_size() {
        let args = parse(&["--page-size", "15"]);
        assert_eq!(
            args.controller_config().unwrap_err(),
            QueryError::InvalidPageRequest { page_size: 15 }
        );
    }
}
