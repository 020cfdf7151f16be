//! Token lifecycle engine
//!
//! Maintains exactly one current credential and its countdown, rotating the
//! credential automatically when the cycle is exhausted or on demand. Time is
//! injected through `tick(elapsed)` so the engine is deterministic and
//! testable without real waits; the periodic driver lives in the service
//! layer.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clock::{ClockSource, SystemClock};
use crate::credential::Credential;
use crate::error::{DayTokenError, Result};
use crate::generator::{self, TokenGenerator};
use crate::{DEFAULT_CYCLE_SECS, TOKEN_WIDTH};

/// Fixed parameters of a lifecycle engine instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Cycle length in seconds after which the credential rotates
    pub cycle_secs: f64,

    /// Number of decimal digits in every generated token
    pub token_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cycle_secs: DEFAULT_CYCLE_SECS,
            token_width: TOKEN_WIDTH,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if !self.cycle_secs.is_finite() || self.cycle_secs <= 0.0 {
            return Err(DayTokenError::InvalidConfig(format!(
                "cycle_secs must be positive and finite, got {}",
                self.cycle_secs
            )));
        }
        if self.token_width == 0 {
            return Err(DayTokenError::InvalidConfig(
                "token_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Immutable state snapshot returned by every mutating engine call.
///
/// The presentation layer reads snapshots; it never observes the engine's
/// internal fields directly.
#[derive(Debug, Clone)]
pub struct TokenSnapshot {
    /// The credential current after the call
    pub credential: Credential,

    /// Seconds left in the current cycle, in `[0, cycle_secs]`
    pub remaining_secs: f64,

    /// `remaining_secs / cycle_secs`, clamped to `[0, 1]`
    pub progress: f64,

    /// Whether this call generated a new credential
    pub rotated: bool,
}

/// Mutable fields serialized behind a single lock: the credential, its
/// countdown, and the generator that replaces it.
struct Inner {
    generator: Box<dyn TokenGenerator>,
    credential: Option<Credential>,
    remaining_secs: f64,
}

/// Owns the current credential and drives its rotation.
///
/// State machine: `Uninitialized -> Active` on [`start`](Self::start), then
/// `Active -> Active` on every [`tick`](Self::tick) or
/// [`manual_refresh`](Self::manual_refresh). There is no terminal state.
pub struct TokenLifecycleEngine {
    config: EngineConfig,
    clock: Box<dyn ClockSource>,
    inner: Mutex<Inner>,
}

impl TokenLifecycleEngine {
    /// Create an engine with the default 60 s cycle, 6-digit tokens, and the
    /// system clock. The engine is uninitialized until [`start`](Self::start).
    pub fn new(generator: impl TokenGenerator + 'static) -> Self {
        Self {
            config: EngineConfig::default(),
            clock: Box::new(SystemClock),
            inner: Mutex::new(Inner {
                generator: Box::new(generator),
                credential: None,
                remaining_secs: 0.0,
            }),
        }
    }

    /// Create an engine with explicit config and clock
    pub fn with_config(
        generator: impl TokenGenerator + 'static,
        clock: impl ClockSource + 'static,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: Box::new(clock),
            inner: Mutex::new(Inner {
                generator: Box::new(generator),
                credential: None,
                remaining_secs: 0.0,
            }),
        })
    }

    /// Generate the initial credential and fill the countdown.
    ///
    /// Calling `start` on an already-active engine behaves exactly like
    /// [`manual_refresh`](Self::manual_refresh); it is not an error.
    pub fn start(&self) -> Result<TokenSnapshot> {
        let mut inner = self.lock();
        self.rotate(&mut inner)
    }

    /// Advance the countdown by `elapsed_secs`.
    ///
    /// If the cycle is exhausted (`remaining - elapsed <= 0`) the engine
    /// rotates and the overshoot is discarded: the new window always starts
    /// at the full cycle length. On generation failure the credential and
    /// countdown keep their pre-tick values so a later tick can retry.
    pub fn tick(&self, elapsed_secs: f64) -> Result<TokenSnapshot> {
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            return Err(DayTokenError::InvalidTick(elapsed_secs));
        }

        let mut inner = self.lock();
        if inner.credential.is_none() {
            return Err(DayTokenError::NotStarted);
        }

        if inner.remaining_secs - elapsed_secs > 0.0 {
            inner.remaining_secs -= elapsed_secs;
            self.snapshot(&inner, false)
        } else {
            self.rotate(&mut inner)
        }
    }

    /// Rotate immediately, regardless of how much time was remaining.
    ///
    /// Runs under the same lock as [`tick`](Self::tick), so a refresh racing
    /// a tick serializes: a single expiry is never rotated twice.
    pub fn manual_refresh(&self) -> Result<TokenSnapshot> {
        let mut inner = self.lock();
        self.rotate(&mut inner)
    }

    /// Current credential, or [`DayTokenError::NotStarted`]
    pub fn current_credential(&self) -> Result<Credential> {
        self.lock()
            .credential
            .clone()
            .ok_or(DayTokenError::NotStarted)
    }

    /// Fraction of the cycle remaining, in `[0, 1]`
    pub fn current_progress(&self) -> Result<f64> {
        let inner = self.lock();
        if inner.credential.is_none() {
            return Err(DayTokenError::NotStarted);
        }
        Ok((inner.remaining_secs / self.config.cycle_secs).clamp(0.0, 1.0))
    }

    /// The engine's fixed parameters
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // State stays consistent across a panic: mutation happens only after
        // successful generation, so a poisoned lock holds valid fields.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate a new credential and reset the countdown. Leaves `inner`
    /// untouched on failure.
    fn rotate(&self, inner: &mut Inner) -> Result<TokenSnapshot> {
        let value = inner.generator.generate(self.config.token_width)?;
        if !generator::is_well_formed(&value, self.config.token_width) {
            return Err(DayTokenError::GenerationUnavailable(format!(
                "generator produced a malformed value of {} chars",
                value.len()
            )));
        }

        // Issuance stamps never move backwards, even if the wall clock does
        let now = self.clock.now_unix();
        let issued_at = match &inner.credential {
            Some(prev) => now.max(prev.issued_at()),
            None => now,
        };

        inner.credential = Some(Credential::new(value, issued_at));
        inner.remaining_secs = self.config.cycle_secs;
        self.snapshot(inner, true)
    }

    fn snapshot(&self, inner: &Inner, rotated: bool) -> Result<TokenSnapshot> {
        let credential = inner.credential.clone().ok_or(DayTokenError::NotStarted)?;
        Ok(TokenSnapshot {
            credential,
            remaining_secs: inner.remaining_secs,
            progress: (inner.remaining_secs / self.config.cycle_secs).clamp(0.0, 1.0),
            rotated,
        })
    }
}

impl core::fmt::Debug for TokenLifecycleEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenLifecycleEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
