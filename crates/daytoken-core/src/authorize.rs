//! Operation authorization workflow
//!
//! Gates a single pending operation behind exactly one terminal user
//! decision. The workflow never performs I/O itself; it notifies an injected
//! collaborator at most once per terminal transition.

use serde::{Deserialize, Serialize};

use crate::error::{DayTokenError, Result};

/// Immutable display snapshot of a pending sensitive operation.
///
/// All fields are pre-formatted opaque strings; the workflow never interprets
/// their contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Caller-assigned identifier
    pub id: String,

    /// e.g. "TED transfer"
    pub title: String,

    /// e.g. "Branch 0001 Acct 1234567"
    pub debit_account: String,

    /// e.g. "Joao da Silva"
    pub beneficiary: String,

    /// e.g. "Bank 0123 Branch 0001 Acct 1234567"
    pub bank_line: String,

    /// e.g. "R$ 10.000,00"
    pub amount: String,
}

/// Decision state of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthorizationDecision {
    /// Awaiting the user's decision
    #[default]
    Pending,

    /// User approved execution of the operation
    Authorized,

    /// User declined the operation
    Cancelled,

    /// User did not recognize the operation and reported it
    Reported,
}

impl AuthorizationDecision {
    /// Whether this decision is final and immutable
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthorizationDecision::Pending)
    }
}

impl core::fmt::Display for AuthorizationDecision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            AuthorizationDecision::Pending => "pending",
            AuthorizationDecision::Authorized => "authorized",
            AuthorizationDecision::Cancelled => "cancelled",
            AuthorizationDecision::Reported => "reported",
        };
        write!(f, "{}", name)
    }
}

/// Collaborator notified when an operation reaches a terminal decision.
///
/// Each method fires at most once per workflow, and only on a legal
/// transition out of `Pending`. The collaborator owns the actual side effect
/// (network call, fraud report); default bodies are no-ops.
pub trait DecisionSink: Send {
    /// The user approved the operation
    fn on_authorized(&mut self, _operation: &Operation) {}

    /// The user declined the operation
    fn on_cancelled(&mut self, _operation: &Operation) {}

    /// The user reported the operation as unrecognized
    fn on_reported(&mut self, _operation: &Operation) {}
}

/// Sink for flows with no external collaborator
impl DecisionSink for () {}

/// Gates one [`Operation`] behind exactly one terminal decision.
///
/// A new operation requires a new workflow instance; there is no reuse.
#[derive(Debug)]
pub struct AuthorizationWorkflow<S: DecisionSink> {
    operation: Operation,
    decision: AuthorizationDecision,
    sink: S,
}

impl<S: DecisionSink> AuthorizationWorkflow<S> {
    /// Store the operation snapshot with decision `Pending`
    pub fn new(operation: Operation, sink: S) -> Self {
        Self {
            operation,
            decision: AuthorizationDecision::Pending,
            sink,
        }
    }

    /// Transition `Pending -> Authorized` and notify the collaborator
    pub fn authorize(&mut self) -> Result<AuthorizationDecision> {
        self.decide(AuthorizationDecision::Authorized)
    }

    /// Transition `Pending -> Cancelled` and notify the collaborator
    pub fn cancel(&mut self) -> Result<AuthorizationDecision> {
        self.decide(AuthorizationDecision::Cancelled)
    }

    /// Transition `Pending -> Reported` and notify the collaborator
    pub fn report(&mut self) -> Result<AuthorizationDecision> {
        self.decide(AuthorizationDecision::Reported)
    }

    /// Current decision, without side effects
    pub fn current_decision(&self) -> AuthorizationDecision {
        self.decision
    }

    /// The operation this workflow was constructed with
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Guard against duplicate taps: a second decision call fails without
    /// changing state or re-firing the notification.
    fn decide(&mut self, next: AuthorizationDecision) -> Result<AuthorizationDecision> {
        if self.decision.is_terminal() {
            return Err(DayTokenError::AlreadyDecided {
                decision: self.decision,
            });
        }

        self.decision = next;
        match next {
            AuthorizationDecision::Authorized => self.sink.on_authorized(&self.operation),
            AuthorizationDecision::Cancelled => self.sink.on_cancelled(&self.operation),
            AuthorizationDecision::Reported => self.sink.on_reported(&self.operation),
            AuthorizationDecision::Pending => {}
        }
        Ok(next)
    }
}
