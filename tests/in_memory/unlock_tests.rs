//! In-memory integration tests for the unlock window.

use crate::in_memory::helpers::{clock, owner, service, start, texts};
use chrono::TimeDelta;
use focuslist::backlog::domain::{OwnerId, TaskListDomainError, UNLOCK_DURATION};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unlock_window_lifts_the_capacity_until_it_closes(owner: OwnerId) {
    let clock = clock(start());
    let service = service(Arc::clone(&clock));
    service
        .provision(&owner)
        .await
        .expect("provision should succeed");
    service.add(&owner, "A").await.expect("add A should succeed");
    service.add(&owner, "B").await.expect("add B should succeed");

    let unlocked = service.unlock(&owner).await.expect("unlock should succeed");
    assert!(unlocked.list.unlocked);
    assert!(!unlocked.list.can_unlock);
    assert_eq!(unlocked.list.unlocked_until, Some(start() + UNLOCK_DURATION));

    clock.advance(TimeDelta::minutes(10));
    let extra = service
        .add(&owner, "C")
        .await
        .expect("add should bypass capacity while unlocked");
    assert_eq!(texts(&extra.list.active), ["C", "B", "A"]);

    let refusal = service
        .displace(&owner, "D")
        .await
        .expect_err("displace should be refused while unlocked");
    assert_eq!(refusal.domain_error(), Some(&TaskListDomainError::NotFull));

    clock.advance(TimeDelta::minutes(20));
    let closed = service
        .add(&owner, "D")
        .await
        .expect_err("capacity should apply once the window closes");
    assert_eq!(
        closed.domain_error(),
        Some(&TaskListDomainError::CapacityExceeded { capacity: 2 })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unlock_is_refused_until_the_previous_window_ends(owner: OwnerId) {
    let clock = clock(start());
    let service = service(Arc::clone(&clock));
    service
        .provision(&owner)
        .await
        .expect("provision should succeed");
    service.unlock(&owner).await.expect("unlock should succeed");

    clock.advance(TimeDelta::minutes(29));
    let refusal = service
        .unlock(&owner)
        .await
        .expect_err("unlock inside the window should be refused");
    assert_eq!(
        refusal.domain_error(),
        Some(&TaskListDomainError::LockTimerNotExpired {
            available_at: start() + UNLOCK_DURATION,
        })
    );

    clock.advance(TimeDelta::minutes(1));
    let view = service.get(&owner).await.expect("get should succeed");
    assert!(!view.unlocked);
    assert!(view.can_unlock);
    service
        .unlock(&owner)
        .await
        .expect("unlock after the window should succeed");
}
