//! Error taxonomy for the shell core

use std::path::PathBuf;
use thiserror::Error;

/// Diagnostic reported by a platform collaborator (windowing or rasterizer)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PlatformError {
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures surfaced by the shell core. All of them are fatal to the current operation.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Platform subsystem could not start
    #[error("Platform initialization failed: {0}")]
    Initialization(#[source] PlatformError),

    /// Window, renderer or texture could not be created
    #[error("Failed to create {resource}: {source}")]
    ResourceCreation {
        resource: &'static str,
        #[source]
        source: PlatformError,
    },

    /// Cache miss after one rebuild
    #[error("Could not find font: {name}")]
    FontNotFound { name: String },

    /// Path resolved but the font could not be opened
    #[error("Failed to open font '{name}' from {}: {source}", path.display())]
    FontOpen {
        name: String,
        path: PathBuf,
        #[source]
        source: PlatformError,
    },

    /// Rasterization, texture upload or a draw call failed
    #[error("Render failed during {stage}: {source}")]
    Render {
        stage: &'static str,
        #[source]
        source: PlatformError,
    },
}

pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    pub(crate) fn render(stage: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| Self::Render { stage, source }
    }

    pub(crate) fn creation(resource: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| Self::ResourceCreation { resource, source }
    }
}
