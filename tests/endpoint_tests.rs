use telemetry_chart::data_types::Sample;
use telemetry_chart::endpoint::{BulkEndpoint, DataRequest, RequestKind, MAX_INITIAL_COUNT};
use telemetry_chart::error::{EndpointError, ProducerError};
use telemetry_chart::producer::{base_value, SampleProducer, SimulatedProducer, CATEGORIES};

const NOW: i64 = 1_000_000;

fn fixed_now() -> i64 {
    NOW
}

fn endpoint() -> BulkEndpoint<SimulatedProducer> {
    BulkEndpoint::new(SimulatedProducer::seeded(7).with_clock(fixed_now))
}

struct FailingProducer;

impl SampleProducer for FailingProducer {
    fn generate_initial_batch(&mut self, _count: usize) -> Result<Vec<Sample>, ProducerError> {
        Err(ProducerError::Failed("sensor offline".into()))
    }

    fn generate_one(&mut self) -> Result<Sample, ProducerError> {
        Err(ProducerError::Exhausted)
    }
}

#[test]
fn test_initial_batch_layout() {
    let response = endpoint().handle_query("type=initial&count=5");
    assert_eq!(response.status, 200);
    assert!(response.is_success());

    let data = response.data().unwrap();
    let timestamps: Vec<i64> = data.iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, [999_500, 999_600, 999_700, 999_800, 999_900]);
    let categories: Vec<&str> = data.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, ["CPU", "API", "Disk", "Network", "Memory"]);

    for sample in &data {
        assert!((0.0..=100.0).contains(&sample.value));
        assert_eq!(sample.metadata["source"], "sensor");
        let quality = sample.metadata["quality"].as_str().unwrap();
        assert!(quality == "good" || quality == "degraded");
    }
}

#[test]
fn test_initial_default_count() {
    let response = endpoint().handle_query("?type=initial");
    assert_eq!(response.data().unwrap().len(), 1000);

    let response = endpoint().handle_query("type=initial&count=");
    assert_eq!(response.data().unwrap().len(), 1000);
}

#[test]
fn test_initial_zero_count_is_empty() {
    let response = endpoint().handle_query("type=initial&count=0");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, serde_json::json!({ "data": [] }));
}

#[test]
fn test_new_returns_single_sample_array() {
    let response = endpoint().handle_query("type=new");
    assert_eq!(response.status, 200);
    assert!(response.body["data"].is_array());

    let data = response.data().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].timestamp, NOW);
    assert!(CATEGORIES.contains(&data[0].category.as_str()));
}

#[test]
fn test_new_ignores_count() {
    let response = endpoint().handle_query("type=new&count=abc");
    assert_eq!(response.status, 200);
    assert_eq!(response.data().unwrap().len(), 1);
}

#[test]
fn test_invalid_type_is_rejected() {
    for query in ["", "type=bogus", "count=5", "type=INITIAL"] {
        let response = endpoint().handle_query(query);
        assert_eq!(response.status, 400, "query {query:?}");
        assert_eq!(response.body["error"], "Invalid type parameter");
        assert!(response.data().is_none());
    }
}

#[test]
fn test_invalid_count_is_rejected() {
    let too_many = format!("type=initial&count={}", MAX_INITIAL_COUNT + 1);
    for query in ["type=initial&count=abc", "type=initial&count=-3", too_many.as_str()] {
        let response = endpoint().handle_query(query);
        assert_eq!(response.status, 400, "query {query:?}");
        assert_eq!(response.body["error"], "Invalid count parameter");
    }
}

#[test]
fn test_producer_failure_maps_to_500() {
    let endpoint = BulkEndpoint::new(FailingProducer);
    let response = endpoint.respond(DataRequest::initial(Some(10)));
    assert_eq!(response.status, 500);
    assert_eq!(response.body, serde_json::json!({ "error": "Failed to generate data" }));

    let err = endpoint.handle(DataRequest::new_sample()).unwrap_err();
    assert_eq!(err, EndpointError::Producer(ProducerError::Exhausted));
    assert_eq!(err.status(), 500);
}

#[test]
fn test_query_parsing() {
    assert_eq!(
        DataRequest::from_query("count=25&type=initial").unwrap(),
        DataRequest::initial(Some(25))
    );
    assert_eq!(DataRequest::from_query("type=new").unwrap().kind, RequestKind::New);
    assert_eq!(
        DataRequest::from_query("type=initial&count=x").unwrap_err(),
        EndpointError::InvalidCount
    );
}

#[test]
fn test_shared_producer_clones() {
    let a = endpoint();
    let b = a.clone();
    assert!(std::sync::Arc::ptr_eq(a.producer(), b.producer()));
    assert_eq!(b.handle(DataRequest::initial(Some(3))).unwrap().len(), 3);
}

#[test]
fn test_seeded_producer_is_deterministic() {
    let mut a = SimulatedProducer::seeded(42).with_clock(fixed_now);
    let mut b = SimulatedProducer::seeded(42).with_clock(fixed_now);
    assert_eq!(
        a.generate_initial_batch(50).unwrap(),
        b.generate_initial_batch(50).unwrap()
    );
    assert_eq!(a.generate_one().unwrap(), b.generate_one().unwrap());
}

#[test]
fn test_sample_value_stays_in_bounds() {
    let mut producer = SimulatedProducer::seeded(3);
    // Base levels near the edges push the raw reading past the clamp.
    for ts in (0..200_000).step_by(997) {
        assert!((0.0..=100.0).contains(&producer.sample_at(ts, "X", 95.0).value));
        assert!((0.0..=100.0).contains(&producer.sample_at(ts, "X", 0.0).value));
    }
}

#[test]
fn test_base_values() {
    assert_eq!(base_value("CPU"), 45.0);
    assert_eq!(base_value("Memory"), 60.0);
    assert_eq!(base_value("Network"), 30.0);
    assert_eq!(base_value("Disk"), 25.0);
    assert_eq!(base_value("API"), 40.0);
    assert_eq!(base_value("GPU"), 50.0);
}
