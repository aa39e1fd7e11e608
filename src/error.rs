use thiserror::Error;

/// Invalid controller or scene setup, reported at construction time
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("game controller has no movement strategy")]
    MissingStrategy,
    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("maze must be at least 5x5, got {rows}x{cols}")]
    InvalidMaze { rows: usize, cols: usize },
}
