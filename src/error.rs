#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid page geometry: non-positive dimensions, margins exceeding
    /// the page, or a footer offset outside the page. Raised before any
    /// drawing begins.
    #[error("invalid render configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
