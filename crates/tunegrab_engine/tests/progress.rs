use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use tunegrab_engine::{run_progress_channel, ProgressEvent, ProgressSink};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct TestSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn base_for(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).unwrap()
}

#[tokio::test]
async fn channel_decodes_events_and_drops_malformed_frames() {
    let server = MockServer::start().await;
    let body = concat!(
        "data: {'progress': 0, 'status': 'starting'}\n\n",
        "data: not a payload\n\n",
        "data: {'progress': 40, 'status': 'downloading', 'title': 'Song X'}\n\n",
        "data: {'progress': 100, 'status': 'finished', 'title': 'Song X'}\n\n",
    );
    Mock::given(method("GET"))
        .and(path("/progress"))
        .and(query_param("download_id", "job1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    run_progress_channel(
        reqwest::Client::new(),
        base_for(&server),
        "job1".to_string(),
        Box::new(sink.clone()),
        CancellationToken::new(),
    )
    .await;

    let events = sink.take();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].status, "starting");
    assert_eq!(events[1].title, "Song X");
    assert_eq!(events[1].progress, 40.0);
    assert_eq!(events[2].status, "finished");
}

#[tokio::test]
async fn channel_exits_quietly_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/progress"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    run_progress_channel(
        reqwest::Client::new(),
        base_for(&server),
        "job2".to_string(),
        Box::new(sink.clone()),
        CancellationToken::new(),
    )
    .await;

    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn cancellation_closes_the_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/progress"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(30))
                .set_body_raw("data: {'status': 'starting'}\n\n", "text/event-stream"),
        )
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run_progress_channel(
        reqwest::Client::new(),
        base_for(&server),
        "job3".to_string(),
        Box::new(sink.clone()),
        cancel.clone(),
    ));

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("channel closes promptly after cancel")
        .unwrap();
    assert!(sink.take().is_empty());
}
