// [tests/mirror/apps/pipeline-cli/active_window_gating.test.rs]
use chrono::{Datelike, Local};
use sentinel_pipeline_lib::orchestrator::in_active_window;
use sentinel_shared_config::PipelineConfig;

#[test]
fn wide_open_window_is_always_active_on_weekdays() {
    let mut config = PipelineConfig::default();
    config.active_hours_start = 0;
    config.active_hours_end = 24;
    config.skip_weekends = false;

    assert!(in_active_window(&config));
}

#[test]
fn empty_window_is_never_active() {
    let mut config = PipelineConfig::default();
    config.active_hours_start = 0;
    config.active_hours_end = 0;
    config.skip_weekends = false;

    assert!(!in_active_window(&config));
}

#[test]
fn weekend_skip_gate_matches_todays_weekday() {
    let mut config = PipelineConfig::default();
    config.active_hours_start = 0;
    config.active_hours_end = 24;
    config.skip_weekends = true;

    let is_weekend = matches!(Local::now().weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
    assert_eq!(in_active_window(&config), !is_weekend);
}
