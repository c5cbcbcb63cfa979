// [tests/mirror/apps/pipeline-cli/registry_stage_scenarios.test.rs]
use chrono::Utc;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_domain_extraction::DocumentExtractor;
use sentinel_domain_models::{Job, OrgNumber, Stage};
use sentinel_infra_adapters::{RegistryAdapter, RegistryCredentials, ScrapedAdapter};
use sentinel_infra_fetch::{PoliteFetcher, PoliteFetcherConfig};
use sentinel_infra_jobstore::JobStoreClient;
use sentinel_pipeline_lib::bootstrap::PipelineContext;
use sentinel_pipeline_lib::graph_sink::LoggingGraphSink;
use sentinel_pipeline_lib::stage_handlers::{run_registry_stage, StageOutcome};
use sentinel_shared_config::PipelineConfig;
use std::sync::Arc;

/// A mocked OAuth2 token endpoint plus a registry whose `base_url` points at
/// the mock server — the Pacing Gate's floor is dropped to near-zero so the
/// three calls a single Registry stage run makes (token, FetchCompany,
/// ListAnnualReports, DownloadDocument) don't stretch the test out.
async fn registry_against(server: &MockServer) -> RegistryAdapter {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;

    let credentials = RegistryCredentials {
        token_url: format!("{}/oauth/token", server.uri()),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
    };
    RegistryAdapter::new(server.uri(), credentials, 0.0).expect("adapter construction cannot fail on a plain URL")
}

async fn test_context(server: &MockServer) -> PipelineContext<LoggingGraphSink> {
    let mut config = PipelineConfig::default();
    config.database_path = ":memory:".into();
    config.store_raw_docs = false;

    let jobstore = JobStoreClient::connect(":memory:", None).await.expect("in-memory Job Store connects");
    let registry = registry_against(server).await;
    let fetcher = PoliteFetcher::new(PoliteFetcherConfig::default()).expect("default fetcher config is valid");
    let scraped = ScrapedAdapter::new(fetcher, "www.allabolag.se".to_string(), "sentinel-pipeline".to_string(), false);
    let extractor = DocumentExtractor::new(config.min_confidence);

    PipelineContext { config, jobstore, registry, scraped, extractor, graph_sink: Arc::new(LoggingGraphSink) }
}

fn job_at(orgnr: &str, stage: Stage) -> Job {
    Job::new(OrgNumber::parse(orgnr).unwrap(), stage, 0, Utc::now())
}

fn outcome_payload(outcome: StageOutcome) -> Value {
    match outcome {
        StageOutcome::Completed(value) => value,
        other => panic!("expected Completed, got {other:?}"),
    }
}

/// S1 — single happy path: FetchCompany succeeds, ListAnnualReports returns
/// one report, DownloadDocument returns its bytes, and the Registry stage
/// folds all three into one `Completed` payload carrying the hex-encoded
/// document body for the Graph stage to pick up next.
#[tokio::test]
async fn s1_single_happy_path_completes_with_company_and_document() {
    let server = MockServer::start().await;
    let orgnr = "5560000100";

    Mock::given(method("GET"))
        .and(path(format!("/organisationer/{orgnr}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Exempel Aktiebolag",
            "legalForm": "Aktiebolag",
            "statusCode": "Aktiv",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/dokumentlista/{orgnr}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "document_id": "doc-1",
                "file_format": "zip",
                "reporting_period_end": "2023-12-31",
                "registration_date": "2024-04-01",
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dokument/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake-annual-report-bytes".to_vec()))
        .mount(&server)
        .await;

    let ctx = test_context(&server).await;
    let job = job_at(orgnr, Stage::Registry);

    let outcome = run_registry_stage(&ctx, &job).await;
    let payload = outcome_payload(outcome);

    assert_eq!(payload["found"], json!(true));
    assert_eq!(payload["company"]["primary_name"], json!("Exempel Aktiebolag"));
    assert_eq!(payload["document_id"], json!("doc-1"));
    assert!(payload["document_hex"].as_str().is_some());
    assert_eq!(hex::decode(payload["document_hex"].as_str().unwrap()).unwrap(), b"fake-annual-report-bytes");
}

/// S2 — a 404 from FetchCompany is terminal *success* for the stage: the job
/// completes with `found: false` rather than retrying or failing.
#[tokio::test]
async fn s2_404_on_fetch_company_completes_with_found_false() {
    let server = MockServer::start().await;
    let orgnr = "5560000101";

    Mock::given(method("GET"))
        .and(path(format!("/organisationer/{orgnr}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = test_context(&server).await;
    let job = job_at(orgnr, Stage::Registry);

    let outcome = run_registry_stage(&ctx, &job).await;
    let payload = outcome_payload(outcome);

    assert_eq!(payload, json!({ "found": false }));
}

/// S3 — a 429 on FetchCompany surfaces as `RateLimited`, not a retryable or
/// fatal error, so the Orchestrator can apply the cool-down policy rather
/// than burning a retry attempt. The adapter sleeps out the cooldown itself
/// before returning, so the clock is paused and auto-advanced rather than
/// spending 30 real seconds on one test.
#[tokio::test(start_paused = true)]
async fn s3_rate_limit_on_fetch_company_surfaces_as_rate_limited() {
    let server = MockServer::start().await;
    let orgnr = "5560000102";

    Mock::given(method("GET"))
        .and(path(format!("/organisationer/{orgnr}")))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let ctx = test_context(&server).await;
    let job = job_at(orgnr, Stage::Registry);

    let outcome = run_registry_stage(&ctx, &job).await;

    match outcome {
        StageOutcome::RateLimited { retry_after_secs } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

/// An orgnr that fails the registry eligibility gate (a `19`/`20` prefix
/// belongs to a personnummer-based Enskild firma) never reaches the mock
/// server at all — the stage completes with `found: false` purely from the
/// prefix table.
#[tokio::test]
async fn ineligible_orgnr_completes_without_ever_calling_the_registry() {
    let server = MockServer::start().await;
    let ctx = test_context(&server).await;
    let job = job_at("1960000103", Stage::Registry);

    let outcome = run_registry_stage(&ctx, &job).await;
    let payload = outcome_payload(outcome);

    assert_eq!(payload, json!({ "found": false }));
}
