// [tests/mirror/libs/infra/jobstore/stage_progression.test.rs]
use serde_json::json;
use sentinel_domain_models::{OrgNumber, Stage, Status};
use sentinel_infra_jobstore::{JobRepository, JobStoreClient};

async fn repo(db_name: &str) -> JobRepository {
    let client = JobStoreClient::connect(&format!("file:{db_name}?mode=memory&cache=shared"), None)
        .await
        .unwrap();
    JobRepository::new(client.get_connection().unwrap())
}

const PIPELINE: [Stage; 3] = [Stage::Registry, Stage::Graph, Stage::Scraped];

#[tokio::test]
async fn completing_a_non_final_stage_advances_to_the_next_one_pending() {
    let repo = repo("stage_progression_a").await;
    let orgnr = OrgNumber::parse("5560000060").unwrap();
    repo.add_jobs(&[orgnr.clone()], 0, Stage::Registry).await.unwrap();
    repo.claim_next(Stage::Registry).await.unwrap().unwrap();

    repo.complete_stage(&orgnr, Stage::Registry, json!({"found": true}), &PIPELINE).await.unwrap();

    let job = repo.claim_next(Stage::Graph).await.unwrap().unwrap();
    assert_eq!(job.stage, Stage::Graph);
    assert_eq!(job.payload_for(Stage::Registry).and_then(|v| v.get("found")).and_then(|v| v.as_bool()), Some(true));
}

#[tokio::test]
async fn completing_the_last_enabled_stage_marks_the_job_completed() {
    let repo = repo("stage_progression_b").await;
    let orgnr = OrgNumber::parse("5560000061").unwrap();
    repo.add_jobs(&[orgnr.clone()], 0, Stage::Scraped).await.unwrap();
    repo.claim_next(Stage::Scraped).await.unwrap().unwrap();

    repo.complete_stage(&orgnr, Stage::Scraped, json!({"found": false}), &PIPELINE).await.unwrap();

    let counts = repo.stats().await.unwrap();
    assert_eq!(counts.get(&(Stage::Scraped, Status::Completed)), Some(&1));
}

#[tokio::test]
async fn fail_job_requeues_pending_when_retryable_and_under_the_retry_limit() {
    let repo = repo("stage_progression_c").await;
    let orgnr = OrgNumber::parse("5560000062").unwrap();
    repo.add_jobs(&[orgnr.clone()], 0, Stage::Registry).await.unwrap();
    repo.claim_next(Stage::Registry).await.unwrap().unwrap();

    repo.fail_job(&orgnr, "timed out", true, 1, 3).await.unwrap();

    let counts = repo.stats().await.unwrap();
    assert_eq!(counts.get(&(Stage::Registry, Status::Pending)), Some(&1));
}

#[tokio::test]
async fn fail_job_is_terminal_once_attempts_reach_max_retries() {
    let repo = repo("stage_progression_d").await;
    let orgnr = OrgNumber::parse("5560000063").unwrap();
    repo.add_jobs(&[orgnr.clone()], 0, Stage::Registry).await.unwrap();
    repo.claim_next(Stage::Registry).await.unwrap().unwrap();

    repo.fail_job(&orgnr, "still broken", true, 3, 3).await.unwrap();

    let counts = repo.stats().await.unwrap();
    assert_eq!(counts.get(&(Stage::Registry, Status::Failed)), Some(&1));
}

#[tokio::test]
async fn a_non_retryable_failure_is_always_terminal() {
    let repo = repo("stage_progression_e").await;
    let orgnr = OrgNumber::parse("5560000064").unwrap();
    repo.add_jobs(&[orgnr.clone()], 0, Stage::Registry).await.unwrap();
    repo.claim_next(Stage::Registry).await.unwrap().unwrap();

    repo.fail_job(&orgnr, "corrupt payload", false, 1, 3).await.unwrap();

    let counts = repo.stats().await.unwrap();
    assert_eq!(counts.get(&(Stage::Registry, Status::Failed)), Some(&1));
}
