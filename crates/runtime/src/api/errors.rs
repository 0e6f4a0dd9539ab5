//! Unified error types surfaced by the runtime API.
//!
//! Wraps grid and configuration failures from `forage-core` together with the
//! worker plumbing so callers can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use forage_core::{ConfigError, WorldError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a world before building")]
    MissingWorld,

    #[error("scenario has no monsters")]
    EmptyRoster,

    #[error("no empty cell left to place {what}")]
    NoRoom { what: &'static str },

    #[error("invalid engine configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
