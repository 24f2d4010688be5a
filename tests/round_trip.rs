use employee_ace_tests::{Directory, SchemaTransport, build_schema};
use platform_api::ApiError;
use products_hr::{Band, EmployeeClient, EmployeeId, MetricValue, PerformanceMetrics, classify};

fn client_with(entries: &[(&str, [f64; 3])]) -> EmployeeClient<SchemaTransport> {
    EmployeeClient::new(SchemaTransport::new(build_schema(Directory::seeded(entries))))
}

#[tokio::test]
async fn created_employee_appears_in_the_next_fetch() {
    let client = client_with(&[("Bob", [10.0, 20.0, 30.0])]);

    let created = client
        .create("Alice", PerformanceMetrics::new(90.0, 100.0, 110.0))
        .await
        .expect("create");
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.name, "Alice");
    assert_eq!(created.performance_score, 100.0);
    assert_eq!(classify(created.performance_score), Band::Full);

    let employees = client.fetch_all().await.expect("fetch");
    let fetched = employees
        .iter()
        .find(|employee| employee.id == created.id)
        .expect("created employee is listed");
    assert_eq!(fetched.performance_metrics.metric2, MetricValue::Number(100.0));
    assert_eq!(employees.len(), 2);
    assert_eq!(client.cached_count().await, 2);
}

#[tokio::test]
async fn update_replaces_metrics_and_keeps_the_name() {
    let directory = Directory::seeded(&[("Malia", [10.0, 10.0, 10.0])]);
    let id = EmployeeId::new(directory.id_of("Malia").await.expect("seeded"));
    let client = EmployeeClient::new(SchemaTransport::new(build_schema(directory)));

    let updated = client
        .update(&id, PerformanceMetrics::new(30.0, 30.0, 30.0))
        .await
        .expect("update");
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Malia");
    assert_eq!(updated.performance_score, 30.0);
    assert_eq!(classify(updated.performance_score), Band::Warning);
    assert_eq!(client.cached(&id).await.map(|e| e.performance_score), Some(30.0));
}

#[tokio::test]
async fn delete_removes_the_employee_and_a_second_delete_is_not_found() {
    let directory = Directory::seeded(&[("Alice", [1.0, 2.0, 3.0]), ("Bob", [4.0, 5.0, 6.0])]);
    let id = EmployeeId::new(directory.id_of("Alice").await.expect("seeded"));
    let client = EmployeeClient::new(SchemaTransport::new(build_schema(directory.clone())));
    client.fetch_all().await.expect("fetch");

    assert!(client.delete(&id).await.expect("delete"));
    assert!(client.cached(&id).await.is_none());
    let remaining = client.fetch_all().await.expect("fetch");
    assert!(remaining.iter().all(|employee| employee.id != id));
    assert_eq!(directory.count().await, 1);

    let err = client.delete(&id).await.expect_err("already deleted");
    assert!(matches!(err, ApiError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn unknown_id_on_update_is_not_found() {
    let client = client_with(&[]);
    let err = client
        .update(&EmployeeId::new("missing"), PerformanceMetrics::new(1.0, 1.0, 1.0))
        .await
        .expect_err("no such employee");
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn rejected_inputs_are_validation_errors() {
    let client = client_with(&[]);

    let blank = client
        .create("   ", PerformanceMetrics::new(1.0, 1.0, 1.0))
        .await
        .expect_err("blank name");
    assert!(matches!(blank, ApiError::Validation(_)), "got {blank:?}");

    let text_metric = client
        .create("Alice", PerformanceMetrics::new(MetricValue::parse("high"), 1.0, 1.0))
        .await
        .expect_err("non-numeric metric");
    assert!(matches!(text_metric, ApiError::Validation(_)), "got {text_metric:?}");

    assert!(client.fetch_all().await.expect("fetch").is_empty());
}
