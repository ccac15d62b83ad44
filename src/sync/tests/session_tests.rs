//! State machine tests for [`SaveSession`].

use crate::sync::{SaveSession, SaveStatus, SyncPolicy};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn session() -> SaveSession<String> {
    SaveSession::new(SyncPolicy::default())
}

#[rstest]
fn new_session_is_idle(session: SaveSession<String>) {
    assert_eq!(session.status(), SaveStatus::Idle);
    assert!(!session.has_pending());
    assert!(session.next_wakeup().is_none());
}

#[rstest]
fn trigger_sets_pending_synchronously(mut session: SaveSession<String>) {
    session.trigger("draft one".to_owned(), start());
    assert_eq!(session.status(), SaveStatus::Pending);
    assert!(session.has_pending());
}

#[rstest]
fn save_is_not_due_before_quiet_period(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("draft".to_owned(), t0);

    assert!(session.begin_due_save(t0).is_none());
    assert!(
        session
            .begin_due_save(t0 + Duration::milliseconds(1499))
            .is_none()
    );
    assert_eq!(
        session.begin_due_save(t0 + Duration::milliseconds(1500)),
        Some("draft".to_owned())
    );
    assert_eq!(session.status(), SaveStatus::Saving);
}

#[rstest]
fn each_trigger_resets_the_trailing_edge_deadline(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("a".to_owned(), t0);
    session.trigger("ab".to_owned(), t0 + Duration::milliseconds(1000));

    // The first deadline would have fired here; the second trigger moved it.
    assert!(
        session
            .begin_due_save(t0 + Duration::milliseconds(1600))
            .is_none()
    );
    assert_eq!(
        session.begin_due_save(t0 + Duration::milliseconds(2500)),
        Some("ab".to_owned())
    );
}

#[rstest]
fn rapid_edits_coalesce_into_one_save_with_the_last_snapshot(mut session: SaveSession<String>) {
    let t0 = start();
    for (step, text) in ["o", "ou", "out", "outf", "outfit"].iter().enumerate() {
        let millis = i64::try_from(step).expect("step fits i64") * 50;
        session.trigger((*text).to_owned(), t0 + Duration::milliseconds(millis));
    }

    let due_at = t0 + Duration::milliseconds(200 + 1500);
    assert_eq!(session.begin_due_save(due_at), Some("outfit".to_owned()));
    // Nothing else is queued: intermediate snapshots were dropped.
    assert!(session.finish_save(true, due_at).is_none());
    assert!(session.begin_due_save(due_at + Duration::days(1)).is_none());
}

#[rstest]
fn successful_save_displays_saved_then_reverts_to_idle(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("draft".to_owned(), t0);
    let due_at = t0 + Duration::milliseconds(1500);
    assert!(session.begin_due_save(due_at).is_some());

    assert!(session.finish_save(true, due_at).is_none());
    assert_eq!(session.status(), SaveStatus::Saved);

    session.expire_display(due_at + Duration::milliseconds(1999));
    assert_eq!(session.status(), SaveStatus::Saved);
    session.expire_display(due_at + Duration::milliseconds(2000));
    assert_eq!(session.status(), SaveStatus::Idle);
}

#[rstest]
fn failed_save_displays_error_longer_and_is_not_retried(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("draft".to_owned(), t0);
    let due_at = t0 + Duration::milliseconds(1500);
    assert!(session.begin_due_save(due_at).is_some());

    assert!(session.finish_save(false, due_at).is_none());
    assert_eq!(session.status(), SaveStatus::Error);
    assert!(!session.has_pending());

    session.expire_display(due_at + Duration::milliseconds(2999));
    assert_eq!(session.status(), SaveStatus::Error);
    session.expire_display(due_at + Duration::milliseconds(3000));
    assert_eq!(session.status(), SaveStatus::Idle);

    // The failing snapshot stays dropped; nothing becomes due later.
    assert!(session.begin_due_save(due_at + Duration::days(1)).is_none());
}

#[rstest]
fn edit_during_in_flight_save_is_queued_as_follow_up(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("first".to_owned(), t0);
    let due_at = t0 + Duration::milliseconds(1500);
    assert_eq!(session.begin_due_save(due_at), Some("first".to_owned()));

    // Edits arriving mid-flight replace each other, never stack.
    session.trigger("second".to_owned(), due_at + Duration::milliseconds(10));
    session.trigger("third".to_owned(), due_at + Duration::milliseconds(20));
    assert_eq!(session.status(), SaveStatus::Pending);

    // No second network call starts while one is executing.
    assert!(session.begin_due_save(due_at + Duration::days(1)).is_none());

    let follow_up = session.finish_save(true, due_at + Duration::milliseconds(30));
    assert_eq!(follow_up, Some("third".to_owned()));
    assert_eq!(session.status(), SaveStatus::Saving);

    assert!(
        session
            .finish_save(true, due_at + Duration::milliseconds(40))
            .is_none()
    );
    assert_eq!(session.status(), SaveStatus::Saved);
}

#[rstest]
fn new_pending_supersedes_saved_display(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("draft".to_owned(), t0);
    let due_at = t0 + Duration::milliseconds(1500);
    assert!(session.begin_due_save(due_at).is_some());
    assert!(session.finish_save(true, due_at).is_none());
    assert_eq!(session.status(), SaveStatus::Saved);

    session.trigger("draft two".to_owned(), due_at + Duration::milliseconds(100));
    assert_eq!(session.status(), SaveStatus::Pending);

    // The old saved-display expiry must not drag the status back to idle.
    session.expire_display(due_at + Duration::milliseconds(2500));
    assert_eq!(session.status(), SaveStatus::Pending);
}

#[rstest]
fn close_cancels_pending_timer_but_not_in_flight_save(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("first".to_owned(), t0);
    let due_at = t0 + Duration::milliseconds(1500);
    assert_eq!(session.begin_due_save(due_at), Some("first".to_owned()));

    session.trigger("late edit".to_owned(), due_at + Duration::milliseconds(10));
    session.close();
    assert!(session.is_closed());

    // Completion is fire-and-forget: no follow-up, no status updates.
    let status_before = session.status();
    assert!(
        session
            .finish_save(true, due_at + Duration::milliseconds(50))
            .is_none()
    );
    assert_eq!(session.status(), status_before);
}

#[rstest]
fn triggers_after_close_are_discarded(mut session: SaveSession<String>) {
    let t0 = start();
    session.close();
    session.trigger("stale".to_owned(), t0);

    assert!(!session.has_pending());
    assert_eq!(session.status(), SaveStatus::Idle);
    assert!(session.begin_due_save(t0 + Duration::days(1)).is_none());
}

#[rstest]
fn next_wakeup_reports_the_earliest_deadline(mut session: SaveSession<String>) {
    let t0 = start();
    session.trigger("draft".to_owned(), t0);
    assert_eq!(session.next_wakeup(), Some(t0 + Duration::milliseconds(1500)));

    let due_at = t0 + Duration::milliseconds(1500);
    assert!(session.begin_due_save(due_at).is_some());
    assert!(session.next_wakeup().is_none());

    assert!(session.finish_save(true, due_at).is_none());
    assert_eq!(
        session.next_wakeup(),
        Some(due_at + Duration::milliseconds(2000))
    );
}
