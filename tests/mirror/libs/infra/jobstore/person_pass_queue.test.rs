// [tests/mirror/libs/infra/jobstore/person_pass_queue.test.rs]
use sentinel_infra_jobstore::{JobRepository, JobStoreClient};

async fn repo(db_name: &str) -> JobRepository {
    let client = JobStoreClient::connect(&format!("file:{db_name}?mode=memory&cache=shared"), None)
        .await
        .unwrap();
    JobRepository::new(client.get_connection().unwrap())
}

#[tokio::test]
async fn enqueueing_the_same_person_twice_is_idempotent() {
    let repo = repo("person_pass_queue_a").await;
    repo.enqueue_person("p-1", "Anna Andersson").await.unwrap();
    repo.enqueue_person("p-1", "Anna Andersson").await.unwrap();

    let claimed = repo.claim_next_person().await.unwrap().unwrap();
    assert_eq!(claimed.person_id, "p-1");
    assert_eq!(claimed.attempts, 1);

    // Only one row exists for p-1, so a second claim finds nothing queued.
    assert!(repo.claim_next_person().await.unwrap().is_none());
}

#[tokio::test]
async fn completing_a_person_job_removes_it_from_the_claimable_set() {
    let repo = repo("person_pass_queue_b").await;
    repo.enqueue_person("p-2", "Bo Bengtsson").await.unwrap();
    let claimed = repo.claim_next_person().await.unwrap().unwrap();

    repo.complete_person(&claimed.person_id).await.unwrap();

    assert!(repo.claim_next_person().await.unwrap().is_none());
}

#[tokio::test]
async fn failing_a_person_job_retryably_requeues_it_for_another_claim() {
    let repo = repo("person_pass_queue_c").await;
    repo.enqueue_person("p-3", "Cecilia Carlsson").await.unwrap();
    let claimed = repo.claim_next_person().await.unwrap().unwrap();

    repo.fail_person(&claimed.person_id, "network blip", true, claimed.attempts, 3).await.unwrap();

    let reclaimed = repo.claim_next_person().await.unwrap().unwrap();
    assert_eq!(reclaimed.person_id, "p-3");
    assert_eq!(reclaimed.attempts, 2);
}

#[tokio::test]
async fn a_person_job_failing_past_max_retries_is_no_longer_claimable() {
    let repo = repo("person_pass_queue_d").await;
    repo.enqueue_person("p-4", "David Dahlgren").await.unwrap();
    let claimed = repo.claim_next_person().await.unwrap().unwrap();

    repo.fail_person(&claimed.person_id, "gone for good", true, 3, 3).await.unwrap();

    assert!(repo.claim_next_person().await.unwrap().is_none());
}
