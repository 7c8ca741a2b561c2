//! Integration tests for the execution store against a real database:
//! - creation defaults (NOT_STARTED, empty result)
//! - identity-guarded result updates
//! - point lookups, pagination, and search

use cypar_db::models::execution::{CreateExecution, ExecutionStatus};
use cypar_db::models::project::CreateProject;
use cypar_db::models::team::CreateTeam;
use cypar_db::repositories::{ExecutionRepo, ProjectRepo, TeamRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool, name: &str) -> i64 {
    let team = TeamRepo::create(
        pool,
        &CreateTeam {
            name: format!("{name}-team"),
        },
    )
    .await
    .unwrap();
    ProjectRepo::create(
        pool,
        &CreateProject {
            team_id: team.id,
            name: name.to_string(),
            repository: "git@host:org/suite.git".to_string(),
            branch: None,
            spec_filter: None,
            runner_image_tag: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_execution(project_id: i64, run_id: &str, spec: &str) -> CreateExecution {
    CreateExecution {
        project_id,
        run_id: run_id.to_string(),
        branch: "main".to_string(),
        spec: spec.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: creation defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_starts_not_started_with_empty_result(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;

    let execution = ExecutionRepo::create(&pool, &new_execution(project_id, "ab12cd34ef", "a.cy.js"))
        .await
        .unwrap();

    assert_eq!(execution.status, ExecutionStatus::NotStarted);
    assert_eq!(execution.result, serde_json::json!({}));
    assert_eq!(execution.run_id, "ab12cd34ef");
    assert_eq!(execution.branch, "main");
    assert_eq!(execution.spec, "a.cy.js");
}

// ---------------------------------------------------------------------------
// Test: update requires the exact identity triple
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn update_result_matches_exact_triple(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;
    ExecutionRepo::create(&pool, &new_execution(project_id, "ab12cd34ef", "a.cy.js"))
        .await
        .unwrap();

    let payload = serde_json::json!({"k": "v"});
    let updated = ExecutionRepo::update_result(
        &pool,
        "main",
        "a.cy.js",
        "ab12cd34ef",
        ExecutionStatus::Done,
        &payload,
    )
    .await
    .unwrap()
    .expect("matching triple must update");

    assert_eq!(updated.status, ExecutionStatus::Done);
    assert_eq!(updated.result, payload);

    // Read back through the run-id lookup.
    let fetched = ExecutionRepo::find_by_run_id(&pool, "ab12cd34ef")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.status, ExecutionStatus::Done);
    assert_eq!(fetched.result, payload);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_result_with_wrong_triple_is_reported_and_writes_nothing(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;
    ExecutionRepo::create(&pool, &new_execution(project_id, "ab12cd34ef", "a.cy.js"))
        .await
        .unwrap();

    // Same branch and spec, wrong run id: zero rows match.
    let miss = ExecutionRepo::update_result(
        &pool,
        "main",
        "a.cy.js",
        "0000000000",
        ExecutionStatus::Done,
        &serde_json::json!({"k": "v"}),
    )
    .await
    .unwrap();
    assert!(miss.is_none());

    // The existing row is untouched.
    let row = ExecutionRepo::find_by_run_id(&pool, "ab12cd34ef")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, ExecutionStatus::NotStarted);
    assert_eq!(row.result, serde_json::json!({}));
}

// ---------------------------------------------------------------------------
// Test: lookups report not-found as a value, not an error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn lookups_return_none_for_missing_rows(pool: PgPool) {
    assert!(ExecutionRepo::find_by_id(&pool, 424242).await.unwrap().is_none());
    assert!(ExecutionRepo::find_by_run_id(&pool, "ffffffffff")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: listing is most-recent-first with a total count
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn list_pages_most_recent_first_with_total(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;
    for (run_id, spec) in [("aaaaaaaaaa", "a.cy.js"), ("bbbbbbbbbb", "b.cy.js"), ("cccccccccc", "c.cy.js")] {
        ExecutionRepo::create(&pool, &new_execution(project_id, run_id, spec))
            .await
            .unwrap();
    }

    let (page, total) = ExecutionRepo::list(&pool, 0, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert!(page[0].created_at >= page[1].created_at);

    let (rest, total) = ExecutionRepo::list(&pool, 2, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(rest.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: search matches branch, spec, and run id; wildcards are literal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn search_matches_textual_columns(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;
    ExecutionRepo::create(&pool, &new_execution(project_id, "ab12cd34ef", "login.cy.js"))
        .await
        .unwrap();
    ExecutionRepo::create(&pool, &new_execution(project_id, "1234567890", "checkout.cy.js"))
        .await
        .unwrap();

    let by_spec = ExecutionRepo::search(&pool, "login").await.unwrap();
    assert_eq!(by_spec.len(), 1);
    assert_eq!(by_spec[0].spec, "login.cy.js");

    let by_run_id = ExecutionRepo::search(&pool, "1234567890").await.unwrap();
    assert_eq!(by_run_id.len(), 1);

    let by_branch = ExecutionRepo::search(&pool, "main").await.unwrap();
    assert_eq!(by_branch.len(), 2);

    // `%` must not act as a wildcard.
    let literal = ExecutionRepo::search(&pool, "%").await.unwrap();
    assert!(literal.is_empty());
}

// ---------------------------------------------------------------------------
// Test: project deletion cascades to executions (administrative path)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn project_delete_cascades_to_executions(pool: PgPool) {
    let project_id = seed_project(&pool, "demo").await;
    ExecutionRepo::create(&pool, &new_execution(project_id, "ab12cd34ef", "a.cy.js"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, project_id).await.unwrap());

    let (rows, total) = ExecutionRepo::list(&pool, 0, 10).await.unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}
