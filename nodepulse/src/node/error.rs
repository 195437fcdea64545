//! Descriptor rejection reasons.

use thiserror::Error;

/// Why a raw descriptor line did not yield a node.
///
/// Rejections are per-line and never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line has no scheme prefix")]
    MissingScheme,

    #[error("unsupported scheme '{0}'")]
    UnknownScheme(String),

    #[error("missing credentials before '@'")]
    MissingUserinfo,

    #[error("missing host")]
    MissingHost,

    #[error("missing port")]
    MissingPort,

    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("unexpected character after port")]
    UnterminatedAuthority,

    #[error("invalid vmess payload: {0}")]
    InvalidVmessPayload(String),
}
