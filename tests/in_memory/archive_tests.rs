//! In-memory integration tests for completing tasks.

use crate::in_memory::helpers::{TestService, clock, owner, service, start, texts};
use chrono::TimeDelta;
use focuslist::backlog::{
    domain::{OwnerId, TaskId, TaskListDomainError},
    services::RefusalCause,
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_are_archived_oldest_first(owner: OwnerId) {
    let clock = clock(start());
    let service = service(Arc::clone(&clock));
    service
        .provision(&owner)
        .await
        .expect("provision should succeed");
    let a = service.add(&owner, "A").await.expect("add A should succeed");
    let b = service
        .add_deferred(&owner, "B")
        .await
        .expect("add_deferred should succeed");

    clock.advance(TimeDelta::minutes(1));
    service
        .complete(&owner, b.value.id())
        .await
        .expect("complete B should succeed");
    clock.advance(TimeDelta::minutes(1));
    let last = service
        .complete(&owner, a.value.id())
        .await
        .expect("complete A should succeed");

    assert!(last.list.active.is_empty());
    assert!(last.list.deferred.is_empty());
    let archived = service
        .completed(&owner)
        .await
        .expect("archive lookup should succeed");
    let archived_texts: Vec<&str> = archived.iter().map(|task| task.text()).collect();
    assert_eq!(archived_texts, ["B", "A"]);
    assert_eq!(
        archived.last().map(|task| task.completed_at()),
        Some(start() + TimeDelta::minutes(2))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_missing_task_archives_nothing(service: TestService, owner: OwnerId) {
    service
        .provision(&owner)
        .await
        .expect("provision should succeed");

    let refusal = service
        .complete(&owner, &TaskId::new("missing"))
        .await
        .expect_err("missing task should be refused");

    assert_eq!(
        refusal.domain_error(),
        Some(&TaskListDomainError::TaskNotFound(TaskId::new("missing")))
    );
    let archived = service
        .completed(&owner)
        .await
        .expect("archive lookup should succeed");
    assert!(archived.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_have_independent_lists(service: TestService, owner: OwnerId) {
    let other = OwnerId::new("someone-else@example.com").expect("valid owner");
    service
        .provision(&owner)
        .await
        .expect("provision should succeed");
    service.add(&owner, "A").await.expect("add should succeed");

    let refusal = service
        .get(&other)
        .await
        .expect_err("unprovisioned owner should be refused");
    assert!(matches!(refusal.cause(), RefusalCause::ListNotFound(_)));

    service
        .provision(&other)
        .await
        .expect("provision should succeed");
    let theirs = service
        .add(&other, "A")
        .await
        .expect("same text for another owner should succeed");
    assert_eq!(texts(&theirs.list.active), ["A"]);
}
