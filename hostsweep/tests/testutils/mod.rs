//! Test fixture for hostsweep integration tests
//!
//! Provides a seeded in-memory engine behind a ConnectionContext plus a
//! scripted answering service that instruments concurrency. Tests use only
//! the public hostsweep API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hostsweep::engine::{MemoryEngine, QueryEngine, ScalarValue};
use hostsweep::qa::{Answer, AnswerService, QaError, TrainingItem};
use hostsweep::{ConnectionContext, RuntimeEnv, ScanSpec};

/// Partition date every fixture table is seeded at
pub const TEST_DS: &str = "2026-08-04";

/// Deterministic host rows: `(id_host, m_active_listings)`, ids ascending,
/// metrics descending with ties every third host so the tiebreak order is
/// actually exercised.
pub fn host_rows(count: usize) -> Vec<(i64, i64)> {
    (0..count)
        .map(|i| (1000 + i as i64, (count as i64) - (i as i64 / 3)))
        .collect()
}

/// Expected sweep order of `host_rows(count)` under (metric DESC, id ASC)
pub fn expected_order(count: usize) -> Vec<i64> {
    let mut rows = host_rows(count);
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    rows.into_iter().map(|(id, _)| id).collect()
}

/// Fixture with a seeded host dimension behind a connection context
pub struct SweepFixture {
    pub engine: Arc<MemoryEngine>,
    pub context: ConnectionContext,
}

impl SweepFixture {
    pub fn with_hosts(count: usize) -> Self {
        let engine = Arc::new(MemoryEngine::new());
        let rows = host_rows(count)
            .into_iter()
            .map(|(id, metric)| {
                vec![
                    ScalarValue::Bigint(id),
                    ScalarValue::Bigint(metric),
                    ScalarValue::Varchar(TEST_DS.to_string()),
                ]
            })
            .collect();
        engine.create_table(
            "homes.host__dim_active",
            &[
                ("id_host", "bigint"),
                ("m_active_listings", "bigint"),
                ("ds", "varchar"),
            ],
            rows,
        );

        let context = ConnectionContext::new(
            RuntimeEnv::Interactive,
            Arc::clone(&engine) as Arc<dyn QueryEngine>,
        );
        Self { engine, context }
    }

    /// Scan spec pinned to the fixture partition
    pub fn scan(&self) -> ScanSpec {
        ScanSpec::host_dimension_at(TEST_DS.to_string())
    }
}

/// Scripted answering service with an instrumented in-flight gauge
#[derive(Default)]
pub struct ScriptedQa {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    answered: AtomicUsize,
    fail_on_host: Option<i64>,
    jitter: bool,
}

impl ScriptedQa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any question about this host
    pub fn failing_on(host_id: i64) -> Self {
        Self {
            fail_on_host: Some(host_id),
            ..Self::default()
        }
    }

    /// Sleep a few random milliseconds per answer so task completion order
    /// actually varies
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// Highest number of concurrent `ask` calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Questions answered successfully
    pub fn answered(&self) -> usize {
        self.answered.load(Ordering::SeqCst)
    }

    fn host_id_of(question: &str) -> Option<i64> {
        question
            .split_whitespace()
            .find_map(|token| token.parse::<i64>().ok())
    }
}

impl AnswerService for ScriptedQa {
    fn ask(&self, question: &str) -> Result<Answer, QaError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if self.jitter {
            thread::sleep(Duration::from_millis(fastrand::u64(1..8)));
        }

        let result = match Self::host_id_of(question) {
            Some(host_id) if Some(host_id) == self.fail_on_host => Err(QaError::Service(format!(
                "scripted failure for host {}",
                host_id
            ))),
            Some(host_id) => Ok(Answer::Text(format!(
                "The host {} has some active listings",
                host_id
            ))),
            None => Err(QaError::Service(format!(
                "no host id in question: {}",
                question
            ))),
        };

        if result.is_ok() {
            self.answered.fetch_add(1, Ordering::SeqCst);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn train(&self, _item: TrainingItem) -> Result<(), QaError> {
        Ok(())
    }
}
