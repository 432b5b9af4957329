use shared::error::ErrorCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{route} request could not reach the product service: {source}")]
    Transport {
        route: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("product service rejected {route} with status {status} ({code})")]
    Service {
        route: &'static str,
        status: u16,
        code: ErrorCode,
    },
    #[error("malformed {route} response from the product service: {source}")]
    Decode {
        route: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build http client: {0}")]
    ClientInit(#[source] reqwest::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure taxonomy shown to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Service,
    Decode,
    Config,
}

impl CatalogError {
    pub fn service(route: &'static str, status: u16) -> Self {
        Self::Service {
            route,
            status,
            code: ErrorCode::from_status(status),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } | Self::ClientInit(_) => FailureKind::Transport,
            Self::Service { .. } => FailureKind::Service,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Config(_) => FailureKind::Config,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
