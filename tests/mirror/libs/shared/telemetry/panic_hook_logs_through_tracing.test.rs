// [tests/mirror/libs/shared/telemetry/panic_hook_logs_through_tracing.test.rs]
use sentinel_shared_telemetry::init_tracing;
use std::panic;
use tracing::{info, instrument};

#[instrument(name = "test_instrumentation_strata")]
fn simulate_instrumented_operation() {
    info!("📡 executing traced micro-operation");
}

#[tokio::test]
async fn panic_hook_intercepts_without_aborting_the_process() {
    init_tracing("telemetry_integrity_test", false);

    simulate_instrumented_operation();

    let panic_capture_result = panic::catch_unwind(|| {
        panic!("INTENTIONAL_TEST_PANIC");
    });

    assert!(panic_capture_result.is_err(), "panic hook must not abort the process for a caught unwind");
}
