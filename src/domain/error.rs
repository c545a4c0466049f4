//! Domain error types.

/// Top-level error type for reclaimscan.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error for {symbol}: {reason}")]
    Data { symbol: String, reason: String },

    #[error("no usable data for {symbol}")]
    NoData { symbol: String },

    #[error("index series {symbol} unusable: have {bars} bars, need {minimum}")]
    IndexUnusable {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScannerError> for std::process::ExitCode {
    fn from(err: &ScannerError) -> Self {
        let code: u8 = match err {
            ScannerError::Io(_) => 1,
            ScannerError::ConfigParse { .. }
            | ScannerError::ConfigMissing { .. }
            | ScannerError::ConfigInvalid { .. } => 2,
            ScannerError::Data { .. } | ScannerError::NoData { .. } => 3,
            ScannerError::IndexUnusable { .. } => 4,
            ScannerError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
