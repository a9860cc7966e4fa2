use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("upstream {name} handler does not expose a callable entry point (expected {})", .path.display())]
    MissingHandler { name: &'static str, path: PathBuf },

    #[error("expected an SVG string from the handler, got {actual} (status {status})")]
    UnexpectedResponseShape { actual: &'static str, status: u16 },
}
