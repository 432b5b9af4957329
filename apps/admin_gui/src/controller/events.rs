//! UI/backend events and error modeling for the admin GUI.

use client_core::{FailureKind, Notice, Operation};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    CommandFinished(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Sync,
    Create,
    Update,
    Delete,
    General,
}

impl From<Operation> for UiErrorContext {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Sync => Self::Sync,
            Operation::Create => Self::Create,
            Operation::Update => Self::Update,
            Operation::Delete => Self::Delete,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("must use http")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("rejected")
            || message_lower.contains("status")
        {
            UiErrorCategory::Service
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("could not reach")
            || message_lower.contains("disconnect")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Failure notices carry their kind, so no text sniffing is needed.
    pub fn from_notice(notice: &Notice) -> Option<Self> {
        let kind = notice.failure?;
        let category = match kind {
            FailureKind::Transport => UiErrorCategory::Transport,
            FailureKind::Service => UiErrorCategory::Service,
            FailureKind::Decode | FailureKind::Config => UiErrorCategory::Validation,
        };
        Some(Self {
            category,
            context: notice.operation.into(),
            message: notice.message.clone(),
        })
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Product service unreachable; check the URL/network and retry.",
            UiErrorCategory::Service => "The product service refused the request.",
            UiErrorCategory::Validation => "Unexpected data from or for the product service.",
            UiErrorCategory::Unknown => "Unexpected error.",
        }
    }
}
