//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use beaconator_core::{error_kind, CoreError, ErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("{message}")]
    Core { kind: Option<ErrorKind>, message: CoreError },
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: &'static str },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    /// The failure class of an error raised by the position math, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PlanError::Core { kind, .. } => *kind,
            _ => None,
        }
    }
}

impl From<CoreError> for PlanError {
    fn from(message: CoreError) -> Self {
        PlanError::Core {
            kind: error_kind(message),
            message,
        }
    }
}
