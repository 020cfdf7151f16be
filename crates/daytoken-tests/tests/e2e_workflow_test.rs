//! End-to-end workflow tests for the DayToken system
//!
//! These tests verify the complete flow from engine start through countdown,
//! rotation, enrollment, and the authorization decision over an operation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use daytoken_core::{
    AuthorizationDecision, AuthorizationWorkflow, ClockSource, CredentialRegistry,
    DayTokenError, DecisionSink, EngineConfig, IdentifierKind, Operation, RandTokenGenerator,
    SystemClock, TokenGenerator, TokenLifecycleEngine,
};
use daytoken_service::TokenTicker;

/// Deterministic generator emitting "000000", "000001", ...
struct SequenceGenerator {
    next: u64,
    calls: Arc<AtomicUsize>,
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&mut self, width: usize) -> daytoken_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let value = format!("{:0width$}", self.next, width = width);
        self.next += 1;
        Ok(value)
    }
}

struct FrozenClock(u64);

impl ClockSource for FrozenClock {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

#[derive(Default, Clone)]
struct RecordingSink {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl DecisionSink for RecordingSink {
    fn on_authorized(&mut self, _operation: &Operation) {
        self.events.lock().unwrap().push("authorized");
    }

    fn on_cancelled(&mut self, _operation: &Operation) {
        self.events.lock().unwrap().push("cancelled");
    }

    fn on_reported(&mut self, _operation: &Operation) {
        self.events.lock().unwrap().push("reported");
    }
}

fn sample_operation() -> Operation {
    Operation {
        id: "op-e2e-1".to_string(),
        title: "TED transfer".to_string(),
        debit_account: "Branch 0001 Acct 1234567".to_string(),
        beneficiary: "Joao da Silva".to_string(),
        bank_line: "Bank 0123 Branch 0001 Acct 1234567".to_string(),
        amount: "R$ 10.000,00".to_string(),
    }
}

/// Drives a full client session: token display, rotation, refresh,
/// enrollment, and one authorization decision.
#[test]
fn test_full_day_token_session() {
    // ==========================================
    // STEP 1: Start the engine
    // ==========================================
    let rotations = Arc::new(AtomicUsize::new(0));
    let engine = TokenLifecycleEngine::with_config(
        SequenceGenerator {
            next: 0,
            calls: Arc::clone(&rotations),
        },
        FrozenClock(1_700_000_000),
        EngineConfig {
            cycle_secs: 60.0,
            token_width: 6,
        },
    )
    .unwrap();

    let first = engine.start().unwrap();
    assert_eq!(first.credential.value(), "000000");
    assert_eq!(first.remaining_secs, 60.0);
    assert_eq!(first.progress, 1.0);

    // ==========================================
    // STEP 2: Count down and rotate on expiry
    // ==========================================
    let halfway = engine.tick(30.0).unwrap();
    assert!(!halfway.rotated);
    assert_eq!(halfway.credential.value(), "000000");
    assert_eq!(halfway.remaining_secs, 30.0);

    // Overshoot by one second; the new window still starts full
    let rotated = engine.tick(31.0).unwrap();
    assert!(rotated.rotated);
    assert_eq!(rotated.credential.value(), "000001");
    assert_eq!(rotated.remaining_secs, 60.0);

    // ==========================================
    // STEP 3: Manual refresh ahead of expiry
    // ==========================================
    engine.tick(5.0).unwrap();
    let refreshed = engine.manual_refresh().unwrap();
    assert_eq!(refreshed.credential.value(), "000002");
    assert_eq!(refreshed.remaining_secs, 60.0);
    assert_eq!(rotations.load(Ordering::SeqCst), 3);

    // ==========================================
    // STEP 4: Enroll the identifier with the token's mask suffix
    // ==========================================
    let mut registry = CredentialRegistry::new();
    registry
        .enroll(
            "012.345.678-90",
            IdentifierKind::NationalId,
            refreshed.credential.mask_suffix(),
            refreshed.credential.issued_at(),
        )
        .unwrap();

    let entry = registry
        .select("012.345.678-90", IdentifierKind::NationalId)
        .unwrap();
    assert_eq!(entry.token_suffix, "0002");

    // ==========================================
    // STEP 5: Decide the pending operation exactly once
    // ==========================================
    let sink = RecordingSink::default();
    let mut workflow = AuthorizationWorkflow::new(sample_operation(), sink.clone());

    let decision = workflow.cancel().unwrap();
    assert_eq!(decision, AuthorizationDecision::Cancelled);

    let err = workflow.authorize().unwrap_err();
    assert!(matches!(
        err,
        DayTokenError::AlreadyDecided {
            decision: AuthorizationDecision::Cancelled
        }
    ));
    assert_eq!(
        workflow.current_decision(),
        AuthorizationDecision::Cancelled
    );
    assert_eq!(*sink.events.lock().unwrap(), vec!["cancelled"]);
}

/// A generation outage defers rotation without disturbing what the user sees.
#[test]
fn test_generation_outage_keeps_visible_token() {
    struct OutageGenerator {
        healthy_calls: usize,
    }

    impl TokenGenerator for OutageGenerator {
        fn generate(&mut self, width: usize) -> daytoken_core::Result<String> {
            if self.healthy_calls == 0 {
                return Err(DayTokenError::GenerationUnavailable(
                    "derivation backend offline".to_string(),
                ));
            }
            self.healthy_calls -= 1;
            Ok("4".repeat(width))
        }
    }

    let engine = TokenLifecycleEngine::with_config(
        OutageGenerator { healthy_calls: 1 },
        FrozenClock(1_700_000_000),
        EngineConfig {
            cycle_secs: 60.0,
            token_width: 6,
        },
    )
    .unwrap();

    engine.start().unwrap();
    engine.tick(59.0).unwrap();

    // Expiry tick during the outage: error surfaces, state untouched
    let err = engine.tick(2.0).unwrap_err();
    assert!(matches!(err, DayTokenError::GenerationUnavailable(_)));
    assert_eq!(engine.current_credential().unwrap().value(), "444444");
    assert!((engine.current_progress().unwrap() - 1.0 / 60.0).abs() < 1e-9);
}

/// The ticker drives the engine in real time and tears down cleanly.
#[tokio::test]
async fn test_ticker_session_with_refresh_and_teardown() {
    let engine = Arc::new(
        TokenLifecycleEngine::with_config(
            RandTokenGenerator,
            SystemClock,
            EngineConfig {
                cycle_secs: 60.0,
                token_width: 6,
            },
        )
        .unwrap(),
    );

    let ticker = TokenTicker::spawn(Arc::clone(&engine), Duration::from_millis(10)).unwrap();
    let mut rx = ticker.subscribe();

    // The countdown visibly advances
    rx.changed().await.unwrap();
    let observed = rx.borrow_and_update().clone();
    assert!(observed.remaining_secs <= 60.0);
    assert_eq!(observed.credential.value().len(), 6);

    // A refresh fills the window again
    let refreshed = ticker.refresh().unwrap();
    assert_eq!(refreshed.remaining_secs, 60.0);

    // Teardown completes and releases the timer
    ticker.shutdown().await.unwrap();
    assert!(engine.current_credential().is_ok());
}
