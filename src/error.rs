use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, running or exporting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected before any step ran.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Model selection string matched no known model.
    #[error("unknown model '{0}' (expected 'smoothlife' or 'conway')")]
    UnknownModel(String),

    /// The animation artifact could not be written.
    #[error("failed to export animation to {path}: {source}")]
    RenderExport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a terminal frame failed.
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}
