//! Unit tests for the in-memory login guard

use std::sync::Arc;

use chrono::Duration;

use crate::clock::ManualClock;
use crate::services::auth::{GuardDecision, InMemoryLoginGuard, LoginGuardConfig, LoginGuardTrait};

fn guard_with_clock() -> (InMemoryLoginGuard, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::start_now());
    let guard = InMemoryLoginGuard::new(LoginGuardConfig::default(), clock.clone());
    (guard, clock)
}

#[tokio::test]
async fn test_fresh_identifier_is_allowed() {
    let (guard, _clock) = guard_with_clock();
    assert!(guard.check("203.0.113.7").await.is_allowed());
}

#[tokio::test]
async fn test_blocks_at_threshold_not_before() {
    let (guard, _clock) = guard_with_clock();

    for _ in 0..9 {
        guard.record_failure("client").await;
    }
    assert!(guard.check("client").await.is_allowed());

    guard.record_failure("client").await;
    assert!(!guard.check("client").await.is_allowed());
}

#[tokio::test]
async fn test_retry_after_shrinks_as_window_elapses() {
    let (guard, clock) = guard_with_clock();

    for _ in 0..10 {
        guard.record_failure("client").await;
    }

    let GuardDecision::Blocked { retry_after } = guard.check("client").await else {
        panic!("expected blocked");
    };
    assert_eq!(retry_after, Duration::hours(1));

    clock.advance(Duration::minutes(40));
    let GuardDecision::Blocked { retry_after } = guard.check("client").await else {
        panic!("expected blocked");
    };
    assert_eq!(retry_after, Duration::minutes(20));
}

#[tokio::test]
async fn test_block_lapses_after_window() {
    let (guard, clock) = guard_with_clock();

    for _ in 0..10 {
        guard.record_failure("client").await;
    }
    assert!(!guard.check("client").await.is_allowed());

    clock.advance(Duration::hours(1) + Duration::seconds(1));
    assert!(guard.check("client").await.is_allowed());

    // The lapsed counter was evicted: one new failure starts from scratch
    guard.record_failure("client").await;
    assert!(guard.check("client").await.is_allowed());
}

#[tokio::test]
async fn test_stale_count_resets_on_next_failure() {
    let (guard, clock) = guard_with_clock();

    for _ in 0..9 {
        guard.record_failure("client").await;
    }

    clock.advance(Duration::hours(2));
    guard.record_failure("client").await;

    // Count restarted at 1, so nine more failures are needed to block
    for _ in 0..8 {
        guard.record_failure("client").await;
    }
    assert!(guard.check("client").await.is_allowed());

    guard.record_failure("client").await;
    assert!(!guard.check("client").await.is_allowed());
}

#[tokio::test]
async fn test_success_clears_failure_state() {
    let (guard, _clock) = guard_with_clock();

    for _ in 0..9 {
        guard.record_failure("client").await;
    }
    guard.record_success("client").await;

    for _ in 0..9 {
        guard.record_failure("client").await;
    }
    assert!(guard.check("client").await.is_allowed());
}

#[tokio::test]
async fn test_identifiers_are_tracked_independently() {
    let (guard, _clock) = guard_with_clock();

    for _ in 0..10 {
        guard.record_failure("198.51.100.1").await;
    }

    assert!(!guard.check("198.51.100.1").await.is_allowed());
    assert!(guard.check("198.51.100.2").await.is_allowed());
}

#[tokio::test]
async fn test_custom_threshold_and_window() {
    let clock = Arc::new(ManualClock::start_now());
    let guard = InMemoryLoginGuard::new(
        LoginGuardConfig {
            max_failures: 3,
            window_seconds: 60,
        },
        clock.clone(),
    );

    for _ in 0..3 {
        guard.record_failure("client").await;
    }
    assert!(!guard.check("client").await.is_allowed());

    clock.advance(Duration::seconds(61));
    assert!(guard.check("client").await.is_allowed());
}
