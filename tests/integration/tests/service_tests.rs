//! End-to-end service tests over the in-memory gateway
//!
//! Exercises the reaction ledger, counter aggregator, optimistic flow,
//! and engagement recorder through the public service operations.

use engage_core::entities::CounterDelta;
use engage_core::traits::CounterRepository;
use engage_core::value_objects::{ReactionKind, TargetRef, UserId};
use engage_service::{EngagementService, ReactionFlow, ReactionService, ServiceError};
use integration_tests::helpers::gateway_and_context;

// ============================================================================
// Reaction ledger semantics
// ============================================================================

#[tokio::test]
async fn toggle_off_is_idempotent_per_press_pair() {
    let (_, ctx) = gateway_and_context();
    let service = ReactionService::new(&ctx);
    let user = UserId::random();
    let target = TargetRef::post(42);

    let first = service
        .toggle_reaction(user, target, ReactionKind::Like)
        .await
        .unwrap();
    assert_eq!(first, Some(ReactionKind::Like));

    let second = service
        .toggle_reaction(user, target, ReactionKind::Like)
        .await
        .unwrap();
    assert_eq!(second, None);
    assert_eq!(service.my_reaction(user, target).await.unwrap(), None);
}

#[tokio::test]
async fn switching_kind_conserves_total_count() {
    let (gateway, ctx) = gateway_and_context();
    let service = ReactionService::new(&ctx);
    let target = TargetRef::post(1);

    // Two other users seed the Like bucket
    for _ in 0..2 {
        service
            .toggle_reaction(UserId::random(), target, ReactionKind::Like)
            .await
            .unwrap();
    }

    let switcher = UserId::random();
    service
        .toggle_reaction(switcher, target, ReactionKind::Like)
        .await
        .unwrap();
    assert_eq!(gateway.counter(target, ReactionKind::Like), 3);

    service
        .toggle_reaction(switcher, target, ReactionKind::Love)
        .await
        .unwrap();

    assert_eq!(gateway.counter(target, ReactionKind::Like), 2);
    assert_eq!(gateway.counter(target, ReactionKind::Love), 1);

    let summary = service.summary(switcher, target).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.my_reaction, Some(ReactionKind::Love));
}

#[tokio::test]
async fn who_reacted_lists_newest_first() {
    let (_, ctx) = gateway_and_context();
    let service = ReactionService::new(&ctx);
    let target = TargetRef::comment(5);

    let early = UserId::random();
    let late = UserId::random();
    service
        .toggle_reaction(early, target, ReactionKind::Like)
        .await
        .unwrap();
    service
        .toggle_reaction(late, target, ReactionKind::Laugh)
        .await
        .unwrap();

    let reactions = service.reactions_for(target).await.unwrap();
    assert_eq!(reactions.len(), 2);
    assert_eq!(reactions[0].user_id, late);
    assert_eq!(reactions[1].user_id, early);
}

// ============================================================================
// Counter aggregator
// ============================================================================

#[tokio::test]
async fn counters_never_go_negative() {
    let (gateway, ctx) = gateway_and_context();
    let target = TargetRef::post(9);

    // Out-of-order arrival: a decrement lands before any increment
    ctx.counter_repo()
        .adjust(target, ReactionKind::Sad, CounterDelta::Decrement)
        .await
        .unwrap();
    assert_eq!(gateway.counter(target, ReactionKind::Sad), 0);

    let deltas = [
        CounterDelta::Increment,
        CounterDelta::Decrement,
        CounterDelta::Decrement,
        CounterDelta::Increment,
        CounterDelta::Increment,
    ];
    for delta in deltas {
        ctx.counter_repo()
            .adjust(target, ReactionKind::Sad, delta)
            .await
            .unwrap();
        assert!(gateway.counter(target, ReactionKind::Sad) >= 0);
    }
    assert_eq!(gateway.counter(target, ReactionKind::Sad), 2);
}

#[tokio::test]
async fn batched_summaries_match_single_reads() {
    let (gateway, ctx) = gateway_and_context();
    let service = ReactionService::new(&ctx);
    let reader = UserId::random();
    let t1 = TargetRef::post(1);
    let t2 = TargetRef::comment(2);

    let reactor = UserId::random();
    gateway.set_display_name(reactor, "Priya Shah");
    service
        .toggle_reaction(reactor, t1, ReactionKind::Love)
        .await
        .unwrap();
    service
        .toggle_reaction(reader, t2, ReactionKind::Like)
        .await
        .unwrap();

    let batched = service.summaries(reader, &[t1, t2]).await.unwrap();
    let single_t1 = service.summary(reader, t1).await.unwrap();
    let single_t2 = service.summary(reader, t2).await.unwrap();

    assert_eq!(batched.len(), 2);
    assert_eq!(batched[&t1].counts, single_t1.counts);
    assert_eq!(batched[&t1].my_reaction, single_t1.my_reaction);
    assert_eq!(batched[&t1].recent_reactors, single_t1.recent_reactors);
    assert_eq!(batched[&t2].counts, single_t2.counts);
    assert_eq!(batched[&t2].my_reaction, Some(ReactionKind::Like));
    assert_eq!(batched[&t1].recent_reactors, vec!["Priya Shah".to_string()]);
}

#[tokio::test]
async fn reactor_preview_is_capped_and_newest_first() {
    let (gateway, ctx) = gateway_and_context();
    let service = ReactionService::new(&ctx);
    let target = TargetRef::post(3);

    for name in ["A", "B", "C", "D"] {
        let user = UserId::random();
        gateway.set_display_name(user, name);
        service
            .toggle_reaction(user, target, ReactionKind::Like)
            .await
            .unwrap();
    }

    let summary = service.summary(UserId::random(), target).await.unwrap();
    // Default preview size is 3, newest reactors first
    assert_eq!(summary.recent_reactors, vec!["D", "C", "B"]);
    assert_eq!(summary.total, 4);
}

// ============================================================================
// Optimistic flow
// ============================================================================

#[tokio::test]
async fn scenario_like_love_love_round_trip() {
    let (_, ctx) = gateway_and_context();
    let flow = ReactionFlow::new(&ctx);
    let user = UserId::random();
    let target = TargetRef::post(42);

    // LIKE: count {LIKE: 1}, my reaction LIKE
    let result = flow.toggle(user, target, ReactionKind::Like).await.unwrap();
    assert_eq!(result, Some(ReactionKind::Like));
    let view = flow.view(user, target).await.unwrap();
    assert_eq!(view.counts.get(ReactionKind::Like), 1);
    assert_eq!(view.my_reaction, Some(ReactionKind::Like));

    // LOVE: count {LIKE: 0, LOVE: 1}, my reaction LOVE
    let result = flow.toggle(user, target, ReactionKind::Love).await.unwrap();
    assert_eq!(result, Some(ReactionKind::Love));
    let view = flow.view(user, target).await.unwrap();
    assert_eq!(view.counts.get(ReactionKind::Like), 0);
    assert_eq!(view.counts.get(ReactionKind::Love), 1);
    assert_eq!(view.my_reaction, Some(ReactionKind::Love));

    // LOVE again: count {LOVE: 0}, my reaction None
    let result = flow.toggle(user, target, ReactionKind::Love).await.unwrap();
    assert_eq!(result, None);
    let view = flow.view(user, target).await.unwrap();
    assert_eq!(view.counts.get(ReactionKind::Love), 0);
    assert_eq!(view.counts.total(), 0);
    assert_eq!(view.my_reaction, None);
}

#[tokio::test]
async fn failed_write_rolls_back_to_exact_prior_view() {
    let (gateway, ctx) = gateway_and_context();
    let flow = ReactionFlow::new(&ctx);
    let user = UserId::random();
    let target = TargetRef::post(7);

    // Seed a settled view: someone else's Love plus our Like
    ReactionService::new(&ctx)
        .toggle_reaction(UserId::random(), target, ReactionKind::Love)
        .await
        .unwrap();
    flow.toggle(user, target, ReactionKind::Like).await.unwrap();
    let before = flow.view(user, target).await.unwrap();

    gateway.fail_next_write();
    let err = flow
        .toggle(user, target, ReactionKind::Angry)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);

    // The refetch on the failure path resettles from the server, which
    // never saw the Angry press; the view equals the pre-press state.
    let after = flow.view(user, target).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(gateway.counter(target, ReactionKind::Angry), 0);
}

#[tokio::test]
async fn second_press_while_pending_is_rejected() {
    let (_, ctx) = gateway_and_context();
    let flow = ReactionFlow::new(&ctx);
    let user = UserId::random();
    let target = TargetRef::post(11);

    // Prime the cache, then wedge the entry into the pending state the
    // way an in-flight press would
    flow.view(user, target).await.unwrap();
    ctx.optimistic().begin(target, ReactionKind::Like).unwrap();

    let err = flow
        .toggle(user, target, ReactionKind::Love)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn successful_toggle_leaves_settled_fresh_view() {
    let (_, ctx) = gateway_and_context();
    let flow = ReactionFlow::new(&ctx);
    let user = UserId::random();
    let target = TargetRef::comment(13);

    flow.toggle(user, target, ReactionKind::Laugh).await.unwrap();

    // Post-mutation refetch already settled the entry
    assert!(!ctx.optimistic().is_stale(target));
    assert!(!ctx.optimistic().is_pending(target));
    let view = ctx.optimistic().view(target).unwrap();
    assert_eq!(view.counts.get(ReactionKind::Laugh), 1);
}

// ============================================================================
// Engagement recorder
// ============================================================================

#[tokio::test]
async fn scenario_distinct_viewers_with_repeat_view() {
    let (_, ctx) = gateway_and_context();
    let service = EngagementService::new(&ctx);
    let lead = 101;
    let c1 = UserId::random();
    let c2 = UserId::random();

    service.record_lead_view(lead, c1).await.unwrap();
    assert_eq!(service.distinct_viewers(lead).await.unwrap(), 1);

    service.record_lead_view(lead, c2).await.unwrap();
    assert_eq!(service.distinct_viewers(lead).await.unwrap(), 2);

    // c1 views again: idempotent, count unchanged
    let repeat = service.record_lead_view(lead, c1).await.unwrap();
    assert_eq!(service.distinct_viewers(lead).await.unwrap(), 2);

    let original = service.engagement(lead, c1).await.unwrap().unwrap();
    assert_eq!(repeat.viewed_at, original.viewed_at);
}

#[tokio::test]
async fn recording_failure_is_surfaced_not_swallowed() {
    let (gateway, ctx) = gateway_and_context();
    let service = EngagementService::new(&ctx);

    gateway.fail_next_write();
    let err = service
        .record_lead_view(55, UserId::random())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);

    // Nothing was recorded
    assert_eq!(service.distinct_viewers(55).await.unwrap(), 0);
}

#[tokio::test]
async fn hide_and_notes_round_trip() {
    let (_, ctx) = gateway_and_context();
    let service = EngagementService::new(&ctx);
    let ca = UserId::random();

    service.record_lead_view(1, ca).await.unwrap();
    service.record_lead_view(2, ca).await.unwrap();

    service.hide_lead(1, ca).await.unwrap();
    let visible = service.engagements_for_ca(ca, false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].lead_id, 2);

    let all = service.engagements_for_ca(ca, true).await.unwrap();
    assert_eq!(all.len(), 2);

    service.unhide_lead(1, ca).await.unwrap();
    assert_eq!(service.engagements_for_ca(ca, false).await.unwrap().len(), 2);

    let updated = service
        .update_notes(2, ca, Some("shared quote over email".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.notes.as_deref(), Some("shared quote over email"));
}

#[tokio::test]
async fn over_long_notes_are_rejected() {
    let (_, ctx) = gateway_and_context();
    let service = EngagementService::new(&ctx);
    let ca = UserId::random();
    service.record_lead_view(1, ca).await.unwrap();

    let err = service
        .update_notes(1, ca, Some("x".repeat(2001)))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.error_code(), "NOTES_TOO_LONG");
}

#[tokio::test]
async fn maintenance_on_unknown_engagement_is_not_found() {
    let (_, ctx) = gateway_and_context();
    let service = EngagementService::new(&ctx);

    let err = service.hide_lead(999, UserId::random()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.error_code(), "UNKNOWN_ENGAGEMENT");
}
