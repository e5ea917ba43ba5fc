//! Worker pool concurrency against a slow endpoint

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::*;
use fim_bench::{
    config::BenchmarkConfig,
    engine::{partition, WorkerPool},
    InferenceClient, TimingCollector,
};
use parking_lot::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const RESPONSE_DELAY: Duration = Duration::from_millis(150);

/// Records when each request arrives and answers after a fixed delay
#[derive(Clone)]
struct ArrivalLog {
    arrivals: Arc<Mutex<Vec<Instant>>>,
    delay: Duration,
}

impl Respond for ArrivalLog {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().push(Instant::now());
        ResponseTemplate::new(200)
            .set_body_json(completion_body(&["ok"]))
            .set_delay(self.delay)
    }
}

/// Largest number of arrivals inside any window of one response delay
///
/// A worker sends its next request only after the previous answer, so
/// arrivals of one worker are at least `delay` apart.
fn peak_in_flight(arrivals: &[Instant], delay: Duration) -> usize {
    let mut sorted = arrivals.to_vec();
    sorted.sort();
    sorted
        .iter()
        .enumerate()
        .map(|(i, start)| {
            sorted[i..]
                .iter()
                .take_while(|t| t.duration_since(*start) < delay)
                .count()
        })
        .max()
        .unwrap_or(0)
}

async fn slow_server(log: &ArrivalLog) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(log.clone())
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_pool_never_exceeds_thread_count() {
    let log = ArrivalLog {
        arrivals: Arc::new(Mutex::new(Vec::new())),
        delay: RESPONSE_DELAY,
    };
    let server = slow_server(&log).await;

    let mut settings = settings_for(&server, 4096);
    settings.threads = Some(2);
    let config = Arc::new(BenchmarkConfig::from_settings(settings).unwrap());
    let client = Arc::new(
        InferenceClient::from_config(Arc::clone(&config), Arc::new(TimingCollector::new())).unwrap(),
    );

    let prompts: Vec<_> = (1..=7).map(prompt).collect();
    let batches = partition(prompts, config.threads());
    assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 1]);

    let pool = WorkerPool::new(config.threads(), config.delay());
    let start = Instant::now();
    let summary = pool.run(Arc::clone(&client), batches).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(summary.batches, 3);
    assert_eq!(summary.processed, 7);
    assert_eq!(client.timings().len(), 7);

    let arrivals = log.arrivals.lock().clone();
    assert_eq!(arrivals.len(), 7);
    let peak = peak_in_flight(&arrivals, RESPONSE_DELAY);
    assert!(peak <= pool.threads(), "peak {} exceeds {} workers", peak, pool.threads());
    assert_eq!(peak, 2);

    // the trailing batch starts only after a full batch released its worker
    assert!(elapsed >= RESPONSE_DELAY * 4);
}

#[tokio::test]
async fn test_single_worker_is_sequential() {
    let log = ArrivalLog {
        arrivals: Arc::new(Mutex::new(Vec::new())),
        delay: RESPONSE_DELAY,
    };
    let server = slow_server(&log).await;

    let config = Arc::new(BenchmarkConfig::from_settings(settings_for(&server, 4096)).unwrap());
    let client = Arc::new(
        InferenceClient::from_config(Arc::clone(&config), Arc::new(TimingCollector::new())).unwrap(),
    );

    let batches = partition((1..=4).map(prompt).collect(), config.threads());
    let start = Instant::now();
    WorkerPool::new(config.threads(), config.delay())
        .run(client, batches)
        .await
        .unwrap();

    assert_eq!(peak_in_flight(&log.arrivals.lock(), RESPONSE_DELAY), 1);
    assert!(start.elapsed() >= RESPONSE_DELAY * 4);
}
