//! In-memory integration tests for ordering, capacity and promotion.

use crate::in_memory::helpers::{
    TestService, clock, owner, positions, service, start, texts,
};
use focuslist::backlog::{
    config::TaskListConfig,
    domain::{OwnerId, TaskId, TaskListDomainError},
};
use rstest::rstest;

async fn provision(service: &TestService, owner: &OwnerId) {
    service
        .provision(owner)
        .await
        .expect("provision should succeed");
}

fn configured(focus_capacity: i64) -> TestService {
    let config = TaskListConfig {
        focus_capacity,
        ..TaskListConfig::default()
    };
    service(clock(start()))
        .with_config(&config)
        .expect("configuration should apply")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn displace_bumps_the_last_active_task(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    service.add(&owner, "A").await.expect("add A should succeed");
    let added = service.add(&owner, "B").await.expect("add B should succeed");
    assert_eq!(texts(&added.list.active), ["B", "A"]);
    assert_eq!(positions(&added.list.active), [1, 2]);
    assert_eq!(added.list.demarcation_index, 2);

    let refusal = service
        .add(&owner, "C")
        .await
        .expect_err("third active task should be refused");
    assert_eq!(
        refusal.domain_error(),
        Some(&TaskListDomainError::CapacityExceeded { capacity: 2 })
    );

    let displaced = service
        .displace(&owner, "C")
        .await
        .expect("displace should succeed");
    assert_eq!(texts(&displaced.list.active), ["C", "B"]);
    assert_eq!(positions(&displaced.list.active), [1, 2]);
    assert_eq!(texts(&displaced.list.deferred), ["A"]);
    assert_eq!(positions(&displaced.list.deferred), [3]);
    assert_eq!(displaced.list.demarcation_index, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pull_fills_the_slot_left_by_a_delete(owner: OwnerId) {
    let service = configured(1);
    provision(&service, &owner).await;
    let first = service.add(&owner, "A").await.expect("add should succeed");
    service
        .add_deferred(&owner, "B")
        .await
        .expect("add_deferred B should succeed");
    let deferred = service
        .add_deferred(&owner, "C")
        .await
        .expect("add_deferred C should succeed");
    assert_eq!(texts(&deferred.list.active), ["A"]);
    assert_eq!(texts(&deferred.list.deferred), ["B", "C"]);

    let idle = service.pull(&owner).await.expect("pull should succeed");
    assert!(idle.value.is_empty());
    assert_eq!(idle.list, deferred.list);

    let deleted = service
        .delete(&owner, first.value.id())
        .await
        .expect("delete should succeed");
    assert!(deleted.list.active.is_empty());
    assert_eq!(deleted.list.demarcation_index, 0);

    let pulled = service.pull(&owner).await.expect("pull should succeed");
    assert_eq!(texts(&pulled.value), ["B"]);
    assert_eq!(texts(&pulled.list.active), ["B"]);
    assert_eq!(texts(&pulled.list.deferred), ["C"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_then_delete_restores_the_list(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    service
        .add_deferred(&owner, "later")
        .await
        .expect("add_deferred should succeed");
    let before = service.get(&owner).await.expect("get should succeed");

    let added = service.add(&owner, "now").await.expect("add should succeed");
    let after = service
        .delete(&owner, added.value.id())
        .await
        .expect("delete should succeed");

    assert_eq!(after.list, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_onto_itself_changes_nothing(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    let added = service.add(&owner, "A").await.expect("add should succeed");

    let moved = service
        .move_task(&owner, added.value.id(), added.value.id())
        .await
        .expect("move should succeed");

    assert!(moved.value.is_empty());
    assert_eq!(moved.list, added.list);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_reorders_within_the_deferred_region(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    for text in ["A", "B", "C"] {
        service
            .add_deferred(&owner, text)
            .await
            .expect("add_deferred should succeed");
    }

    let moved = service
        .move_task(&owner, &TaskId::new("task-3"), &TaskId::new("task-1"))
        .await
        .expect("move should succeed");

    assert_eq!(texts(&moved.list.deferred), ["C", "A", "B"]);
    assert_eq!(positions(&moved.list.deferred), [1, 2, 3]);
    assert_eq!(moved.value.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unbounded_list_never_displaces(owner: OwnerId) {
    let service = configured(-1);
    provision(&service, &owner).await;
    for text in ["A", "B", "C"] {
        service.add(&owner, text).await.expect("add should succeed");
    }

    let refusal = service
        .displace(&owner, "D")
        .await
        .expect_err("displace should be refused");

    assert_eq!(refusal.domain_error(), Some(&TaskListDomainError::NotFull));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn escalate_swaps_focus_with_the_next_deferred_task(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    service.add(&owner, "A").await.expect("add A should succeed");
    service.add(&owner, "B").await.expect("add B should succeed");
    service
        .add_deferred(&owner, "C")
        .await
        .expect("add_deferred should succeed");

    let escalated = service
        .escalate(&owner)
        .await
        .expect("escalate should succeed");

    assert_eq!(texts(&escalated.list.active), ["B", "C"]);
    assert_eq!(texts(&escalated.list.deferred), ["A"]);
    assert_eq!(texts(&escalated.value), ["C", "A"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_text_of_another_task(service: TestService, owner: OwnerId) {
    provision(&service, &owner).await;
    service.add(&owner, "A").await.expect("add A should succeed");
    let b = service.add(&owner, "B").await.expect("add B should succeed");

    let refusal = service
        .update(&owner, b.value.id(), "A")
        .await
        .expect_err("duplicate text should be refused");
    assert!(refusal.message().contains("already exists"));

    let renamed = service
        .update(&owner, b.value.id(), "B, reworded")
        .await
        .expect("update should succeed");
    assert_eq!(texts(&renamed.list.active), ["B, reworded", "A"]);
}
