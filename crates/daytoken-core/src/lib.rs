//! DayToken Core - Token lifecycle engine and authorization workflow
//!
//! This crate provides the domain logic behind the DayToken banking client:
//! rotating short-lived numeric credentials and gating sensitive operations
//! behind a single terminal authorization decision. Everything here is
//! synchronous and deterministic; timers and rendering live with the callers.

pub mod authorize;
pub mod clock;
pub mod credential;
pub mod engine;
pub mod error;
pub mod generator;
pub mod registry;
pub mod timeline;

pub use authorize::{AuthorizationDecision, AuthorizationWorkflow, DecisionSink, Operation};
pub use clock::{ClockSource, SystemClock};
pub use credential::Credential;
pub use engine::{EngineConfig, TokenLifecycleEngine, TokenSnapshot};
pub use error::{DayTokenError, Result};
pub use generator::{RandTokenGenerator, TokenGenerator};
pub use registry::{CredentialRegistry, IdentifierKind, RegistryEntry};
pub use timeline::{line_direction, parse_color_tag, LineDirection, StatusEntry};

/// Number of decimal digits in a token value
pub const TOKEN_WIDTH: usize = 6;

/// Default credential cycle length in seconds
pub const DEFAULT_CYCLE_SECS: f64 = 60.0;

/// Number of trailing token digits shown when a credential is masked
pub const MASK_SUFFIX_LEN: usize = 4;
