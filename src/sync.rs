//! Background fetch and mutation tasks
//!
//! Every network round trip happens here, off the UI loop. Tasks never hold
//! the state lock across an `.await`: they fetch first, then take the write
//! lock once to commit.
//!
//! Failures end up in two places: the log, and a notice banner. Nothing is
//! retried.

use crate::actions::{apply_action, AppAction};
use crate::api::models::{GradeFilter, NewGrade, NewStudent};
use crate::api::{ApiClient, ApiError};
use crate::state::{AppState, SharedState, Snapshot};
use crate::types::{LoadingState, NoticeKind};
use std::future::Future;
use tracing::{error, info, warn};

/// Run `f` against the state if the lock is usable
fn update(state: &SharedState, f: impl FnOnce(&mut AppState)) {
    match state.write() {
        Ok(mut s) => f(&mut s),
        Err(_) => error!("state lock poisoned, dropping update"),
    }
}

fn notify(state: &SharedState, message: impl Into<String>, kind: NoticeKind) {
    let message = message.into();
    update(state, |s| s.show_notice(message, kind));
}

/// Count the call as in flight while it runs
async fn tracked<F: Future>(state: &SharedState, fut: F) -> F::Output {
    update(state, |s| s.data.in_flight += 1);
    let output = fut.await;
    update(state, |s| s.data.in_flight = s.data.in_flight.saturating_sub(1));
    output
}

/// Fetch students, subjects and grades concurrently
///
/// The first failure rejects the whole load; nothing is returned for the
/// calls that did succeed.
pub async fn load_all(client: &ApiClient) -> Result<Snapshot, ApiError> {
    let unfiltered = GradeFilter::default();
    let (students, subjects, grades) = tokio::try_join!(
        client.students(),
        client.subjects(),
        client.grades(&unfiltered),
    )?;

    Ok(Snapshot {
        students,
        subjects,
        grades,
    })
}

/// Load-all, commit, then refresh the server-side summaries
pub async fn reload(client: &ApiClient, state: &SharedState) -> Result<(), ApiError> {
    let snapshot = tracked(state, load_all(client)).await?;
    info!(
        students = snapshot.students.len(),
        subjects = snapshot.subjects.len(),
        grades = snapshot.grades.len(),
        "snapshot loaded"
    );
    update(state, |s| s.commit_snapshot(snapshot));

    refresh_summaries(client, state).await;
    Ok(())
}

/// Dashboard counters and the three reports
///
/// Each one is independent: a failure is logged and leaves the previous
/// value on screen.
pub async fn refresh_summaries(client: &ApiClient, state: &SharedState) {
    let (dashboard, general, students, subjects) = tracked(state, async {
        tokio::join!(
            client.dashboard(),
            client.general_report(),
            client.student_report(),
            client.subject_report(),
        )
    })
    .await;

    update(state, |s| {
        match dashboard {
            Ok(stats) => s.data.dashboard = stats,
            Err(e) => warn!(error = %e, "failed to refresh dashboard"),
        }
        match general {
            Ok(report) => s.data.general_report = report,
            Err(e) => warn!(error = %e, "failed to refresh general report"),
        }
        match students {
            Ok(report) => s.data.student_report = report,
            Err(e) => warn!(error = %e, "failed to refresh student report"),
        }
        match subjects {
            Ok(report) => s.data.subject_report = report,
            Err(e) => warn!(error = %e, "failed to refresh subject report"),
        }
    });
}

/// Health check, then the first load
///
/// A failed health check halts here: no data is requested.
pub async fn initialize(client: &ApiClient, state: &SharedState) {
    info!(base_url = client.base_url(), "initializing");
    update(state, |s| s.data.loading_state = LoadingState::Checking);

    let healthy = match tracked(state, client.health()).await {
        Ok(health) if health.is_ok() => {
            info!(database = ?health.database, "server healthy");
            true
        }
        Ok(health) => {
            warn!(status = %health.status, message = ?health.message, "server reported unhealthy");
            false
        }
        Err(e) => {
            error!(error = %e, "health check failed");
            false
        }
    };

    if !healthy {
        let message = "Could not connect to the server";
        update(state, |s| {
            s.data.loading_state = LoadingState::Error(message.to_string());
            s.show_notice(message, NoticeKind::Error);
        });
        return;
    }

    update(state, |s| s.data.loading_state = LoadingState::Loading);

    match reload(client, state).await {
        Ok(()) => update(state, |s| {
            s.data.loading_state = LoadingState::Complete;
            s.data.retry_count = 0;
            s.show_notice("System loaded", NoticeKind::Success);
        }),
        Err(e) => {
            error!(error = %e, "initial load failed");
            let message = "Failed to load data";
            update(state, |s| {
                s.data.loading_state = LoadingState::Error(message.to_string());
                s.show_notice(message, NoticeKind::Error);
            });
        }
    }
}

/// Reload on user request, keeping what is on screen if it fails
pub async fn refresh(client: &ApiClient, state: &SharedState) {
    if let Err(e) = reload(client, state).await {
        error!(error = %e, "reload failed");
        notify(state, e.user_message("Failed to load data"), NoticeKind::Error);
    }
}

/// Reload after a successful mutation and report `success`
async fn reload_after(client: &ApiClient, state: &SharedState, success: &str) {
    match reload(client, state).await {
        Ok(()) => notify(state, success, NoticeKind::Success),
        Err(e) => {
            error!(error = %e, "reload after mutation failed");
            notify(state, e.user_message("Failed to load data"), NoticeKind::Error);
        }
    }
}

pub async fn create_student(client: &ApiClient, state: &SharedState, student: NewStudent) {
    info!(name = %student.name, "creating student");
    match tracked(state, client.create_student(&student)).await {
        Ok(body) => {
            info!(id = ?body.id, "student created");
            update(state, |s| apply_action(AppAction::ResetStudentForm, s));
            reload_after(client, state, "Student created").await;
        }
        Err(e) => {
            error!(error = %e, "create student failed");
            notify(state, e.user_message("Failed to create student"), NoticeKind::Error);
        }
    }
}

pub async fn delete_student(client: &ApiClient, state: &SharedState, student_id: i64) {
    info!(student_id, "deleting student");
    match tracked(state, client.delete_student(student_id)).await {
        Ok(_) => reload_after(client, state, "Student deleted").await,
        Err(e) => {
            error!(error = %e, student_id, "delete student failed");
            notify(state, e.user_message("Failed to delete student"), NoticeKind::Error);
        }
    }
}

pub async fn create_grade(client: &ApiClient, state: &SharedState, grade: NewGrade) {
    info!(
        student_id = grade.student_id,
        subject_id = %grade.subject_id,
        period = grade.period,
        "saving grade"
    );
    match tracked(state, client.create_grade(&grade)).await {
        Ok(_) => {
            update(state, |s| apply_action(AppAction::ResetGradeForm, s));
            reload_after(client, state, "Grade saved").await;
        }
        Err(e) => {
            error!(error = %e, "save grade failed");
            notify(state, e.user_message("Failed to save grade"), NoticeKind::Error);
        }
    }
}

/// Refetch only the grades list with the given filter
pub async fn filter_grades(client: &ApiClient, state: &SharedState, filter: GradeFilter) {
    info!(?filter, "filtering grades");
    match tracked(state, client.grades(&filter)).await {
        Ok(grades) => update(state, |s| s.replace_grades(grades, &filter)),
        Err(e) => {
            error!(error = %e, "filter grades failed");
            notify(state, e.user_message("Failed to filter grades"), NoticeKind::Error);
        }
    }
}

/// Reset both selectors and refetch unfiltered grades
pub async fn clear_filters(client: &ApiClient, state: &SharedState) {
    update(state, |s| apply_action(AppAction::ResetFilterSelection, s));

    let unfiltered = GradeFilter::default();
    match tracked(state, client.grades(&unfiltered)).await {
        Ok(grades) => update(state, |s| s.replace_grades(grades, &unfiltered)),
        Err(e) => {
            error!(error = %e, "clear filters failed");
            notify(state, e.user_message("Failed to clear filters"), NoticeKind::Error);
        }
    }
}

// Spawners used by the UI loop. Each takes owned handles so the task can
// outlive the key press that started it.

pub fn spawn_initialize(client: ApiClient, state: SharedState) {
    tokio::spawn(async move { initialize(&client, &state).await });
}

pub fn spawn_refresh(client: ApiClient, state: SharedState) {
    tokio::spawn(async move { refresh(&client, &state).await });
}

pub fn spawn_create_student(client: ApiClient, state: SharedState, student: NewStudent) {
    tokio::spawn(async move { create_student(&client, &state, student).await });
}

pub fn spawn_delete_student(client: ApiClient, state: SharedState, student_id: i64) {
    tokio::spawn(async move { delete_student(&client, &state, student_id).await });
}

pub fn spawn_create_grade(client: ApiClient, state: SharedState, grade: NewGrade) {
    tokio::spawn(async move { create_grade(&client, &state, grade).await });
}

pub fn spawn_filter_grades(client: ApiClient, state: SharedState, filter: GradeFilter) {
    tokio::spawn(async move { filter_grades(&client, &state, filter).await });
}

pub fn spawn_clear_filters(client: ApiClient, state: SharedState) {
    tokio::spawn(async move { clear_filters(&client, &state).await });
}
