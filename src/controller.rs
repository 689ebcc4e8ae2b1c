use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::aggregate::LookupOutcome;
use crate::error::{Result, StatsError};
use crate::model::{PlayerStatistics, Username};
use crate::source::{self, PlayerDataSource};

/// Why a lookup ended in [`LookupState::Error`]. `Display` is the
/// user-facing message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    /// The lookup succeeded but no such player exists.
    #[error("No player named {username} was found.")]
    NotFound { username: String },

    /// The submitted text cannot be a Minecraft username.
    #[error("{username:?} is not a valid Minecraft username: {reason}.")]
    InvalidUsername { username: String, reason: String },

    /// The data source failed; `message` is for logs, not for users.
    #[error("Player statistics are unavailable right now. Please try again later.")]
    TransientFetch { message: String },
}

impl LookupError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Lifecycle of a lookup as seen by a presentation layer.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        username: String,
    },
    Success {
        stats: PlayerStatistics,
    },
    Error {
        error: LookupError,
    },
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }

    pub fn stats(&self) -> Option<&PlayerStatistics> {
        match self {
            LookupState::Success { stats } => Some(stats),
            _ => None,
        }
    }
}

/// Drives player lookups against a [`PlayerDataSource`] and publishes the
/// resulting [`LookupState`].
///
/// Only the most recent submission may change the state: when a lookup is
/// superseded by a newer [`submit`](Self::submit) or by
/// [`reset`](Self::reset), its result is dropped when it arrives.
pub struct StatsLookupController<S> {
    source: S,
    state: watch::Sender<LookupState>,
    // Bumped and compared only while holding the watch channel's lock.
    generation: AtomicU64,
}

impl<S: PlayerDataSource> StatsLookupController<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self {
            source,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Look up `username` and publish the outcome.
    ///
    /// Blank input is rejected with [`StatsError::MalformedInput`] and
    /// leaves the state untouched. A non-blank name that is too long or has
    /// bad characters supersedes any pending lookup and publishes
    /// [`LookupError::InvalidUsername`]. Every other outcome, including
    /// fetch failures, is reported through the state and this returns `Ok`.
    #[instrument(skip(self))]
    pub async fn submit(&self, username: &str) -> Result<()> {
        let username = match Username::parse(username) {
            Ok(username) => username,
            Err(StatsError::MalformedInput { input, reason }) if !input.trim().is_empty() => {
                debug!(reason, "rejecting invalid username");
                self.state.send_modify(|state| {
                    self.generation.fetch_add(1, Ordering::Relaxed);
                    *state = LookupState::Error {
                        error: LookupError::InvalidUsername {
                            username: input.trim().to_string(),
                            reason: reason.to_string(),
                        },
                    };
                });
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
            *state = LookupState::Loading {
                username: username.to_string(),
            };
        });
        debug!(generation, "lookup started");

        let next = match source::lookup_player(&self.source, &username).await {
            Ok(LookupOutcome::Found(stats)) => LookupState::Success { stats },
            Ok(LookupOutcome::NotFound) => LookupState::Error {
                error: LookupError::NotFound {
                    username: username.to_string(),
                },
            },
            Err(err) => {
                warn!(error = %err, "player lookup failed");
                LookupState::Error {
                    error: LookupError::TransientFetch {
                        message: err.to_string(),
                    },
                }
            }
        };

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Relaxed) != generation {
                return false;
            }
            *state = next;
            true
        });
        if !published {
            debug!(generation, "discarding superseded lookup result");
        }
        Ok(())
    }

    /// Return to [`LookupState::Idle`], superseding any pending lookup.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::Relaxed);
            *state = LookupState::Idle;
        });
    }
}
