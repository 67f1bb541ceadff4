//! Sweep pipeline integration tests

mod testutils;

use hostsweep::PipelineConfig;
use std::sync::Arc;
use testutils::{ScriptedQa, SweepFixture};

fn run_sweep(
    fixture: &SweepFixture,
    qa: Arc<ScriptedQa>,
    config: PipelineConfig,
) -> Result<usize, hostsweep::PipelineError> {
    fixture
        .context
        .pipeline(qa, fixture.scan(), config)
        .process_all()
}

#[test]
fn test_sequential_sweep_processes_all_hosts() {
    let fixture = SweepFixture::with_hosts(5);
    let qa = Arc::new(ScriptedQa::new());

    let processed = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(Some(5))
            .with_concurrency(1),
    )
    .unwrap();

    assert_eq!(processed, 5);
    assert_eq!(qa.answered(), 5);
}

#[test]
fn test_parallel_sweep_processes_all_hosts() {
    let fixture = SweepFixture::with_hosts(5);
    let qa = Arc::new(ScriptedQa::new().with_jitter());

    let processed = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(Some(5))
            .with_concurrency(2),
    )
    .unwrap();

    // task completion order may vary; the count may not
    assert_eq!(processed, 5);
    assert_eq!(qa.answered(), 5);
}

#[test]
fn test_empty_key_space_submits_no_tasks() {
    let fixture = SweepFixture::with_hosts(0);
    let qa = Arc::new(ScriptedQa::new());

    let processed = run_sweep(&fixture, Arc::clone(&qa), PipelineConfig::default()).unwrap();

    assert_eq!(processed, 0);
    assert_eq!(qa.answered(), 0);
}

#[test]
fn test_in_flight_tasks_never_exceed_concurrency() {
    let fixture = SweepFixture::with_hosts(30);
    let qa = Arc::new(ScriptedQa::new().with_jitter());

    let processed = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(None)
            .with_concurrency(3),
    )
    .unwrap();

    assert_eq!(processed, 30);
    assert!(
        qa.max_in_flight() <= 3,
        "observed {} concurrent tasks with concurrency 3",
        qa.max_in_flight()
    );
}

#[test]
fn test_unbounded_max_count_sweeps_everything() {
    let fixture = SweepFixture::with_hosts(7);
    let qa = Arc::new(ScriptedQa::new());

    let processed = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(3)
            .with_max_count(None)
            .with_concurrency(2),
    )
    .unwrap();

    assert_eq!(processed, 7);
}

#[test]
fn test_task_failure_aborts_after_draining_siblings() {
    // 4 hosts, pages of 2, concurrency 2: both pages are dispatched before
    // the first failure can surface. Failing the first host of page one
    // means page one answers nothing, while page two still completes during
    // the drain.
    let fixture = SweepFixture::with_hosts(4);
    let first_host = testutils::expected_order(4)[0];
    let qa = Arc::new(ScriptedQa::failing_on(first_host));

    let result = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(None)
            .with_concurrency(2),
    );

    assert!(matches!(result, Err(hostsweep::PipelineError::Qa(_))));
    // page two's hosts were answered even though the sweep failed
    assert_eq!(qa.answered(), 2);
}

#[test]
fn test_task_failure_halts_further_submission() {
    // concurrency 1: the failure is observed while trying to submit page
    // two, so no host beyond page one is ever asked
    let fixture = SweepFixture::with_hosts(10);
    let first_host = testutils::expected_order(10)[0];
    let qa = Arc::new(ScriptedQa::failing_on(first_host));

    let result = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(None)
            .with_concurrency(1),
    );

    assert!(result.is_err());
    assert_eq!(qa.answered(), 0);
}

#[test]
fn test_max_count_bounds_processed_total() {
    let fixture = SweepFixture::with_hosts(20);
    let qa = Arc::new(ScriptedQa::new());

    let processed = run_sweep(
        &fixture,
        Arc::clone(&qa),
        PipelineConfig::new()
            .with_page_size(2)
            .with_max_count(Some(5))
            .with_concurrency(2),
    )
    .unwrap();

    assert_eq!(processed, 5);
}
