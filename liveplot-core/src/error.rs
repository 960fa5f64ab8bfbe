use dataset::StoreError;

/// Failures local to a single update cycle. None of these corrupt applet
/// state; the host may keep dispatching notifications afterwards.
#[derive(thiserror::Error, Debug)]
pub enum AppletError {
    #[error("dataset '{0}' missing from update")]
    MissingDataset(String),
    #[error("x/y length mismatch persisted across updates: x has {x_len}, y has {y_len}")]
    SizeMismatch { x_len: usize, y_len: usize },
    #[error("dataset '{key}' has the wrong kind, expected {expected}")]
    WrongKind { key: String, expected: &'static str },
    #[error("publishing fit parameters failed: {0}")]
    Store(#[from] StoreError),
}

/// Configuration problems detected once at construction, never deferred to
/// the first update.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' range override given but no dataset is mapped to that axis")]
    RangeWithoutAxis(&'static str),
    #[error("'{0}' given without its '{1}' companion")]
    UnpairedBound(&'static str, &'static str),
    #[error("histogram mode needs both a 'y2' series and an 'x' boundary key")]
    HistogramKeysMissing,
}
