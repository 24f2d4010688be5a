//! GraphQL client for the employee API.
//!
//! Every call goes to the server. The entity cache is filled from responses and
//! can be read back by id, but it never stands in for a refetch.

use std::collections::HashMap;
use std::future::Future;

use anyhow::anyhow;
use platform_api::{ApiError, ApiResult, GraphqlRequest, decode_response};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::model::{Employee, EmployeeId, MetricsInput};
use crate::operations::{
    CreateEmployee, CreateEmployeeVariables, DeleteEmployee, DeleteEmployeeVariables,
    GetEmployees, NoVariables, Operation, UpdateEmployee, UpdateEmployeeVariables,
};

/// Carries a GraphQL request to a server and returns the raw response body.
pub trait Transport: Send + Sync {
    fn send(&self, request: GraphqlRequest) -> impl Future<Output = ApiResult<Value>> + Send;
}

/// JSON-over-HTTP transport against a single endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: GraphqlRequest) -> impl Future<Output = ApiResult<Value>> + Send {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        async move {
            let response = http
                .post(&endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|err| ApiError::Network(err.to_string()))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|err| ApiError::Network(err.to_string()))?;
            // GraphQL servers report rejected documents with a 4xx and a JSON body.
            match serde_json::from_slice::<Value>(&body) {
                Ok(value) => Ok(value),
                Err(_) if !status.is_success() => Err(ApiError::Network(format!(
                    "{endpoint} answered {status}"
                ))),
                Err(err) => Err(ApiError::internal(anyhow!("response body is not JSON: {err}"))),
            }
        }
    }
}

/// Normalized result cache keyed by employee identity.
#[derive(Debug, Default)]
pub struct EntityCache {
    entries: HashMap<EmployeeId, Employee>,
}

impl EntityCache {
    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write(&mut self, employee: &Employee) {
        self.entries.insert(employee.id.clone(), employee.clone());
    }

    fn replace_all(&mut self, employees: &[Employee]) {
        self.entries.clear();
        for employee in employees {
            self.write(employee);
        }
    }

    fn evict(&mut self, id: &EmployeeId) {
        self.entries.remove(id);
    }
}

pub struct EmployeeClient<T> {
    transport: T,
    cache: RwLock<EntityCache>,
}

impl<T: Transport> EmployeeClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RwLock::new(EntityCache::default()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute<O: Operation>(&self, variables: O::Variables) -> ApiResult<O::Data> {
        let variables = serde_json::to_value(&variables)
            .map_err(|err| ApiError::internal(anyhow!("cannot encode variables: {err}")))?;
        let request = GraphqlRequest::new(O::DOCUMENT, variables).operation_name(O::NAME);
        let body = self.transport.send(request).await?;
        decode_response(body)
    }

    #[instrument(name = "hr.client.fetch_all", skip_all)]
    pub async fn fetch_all(&self) -> ApiResult<Vec<Employee>> {
        let data = self.execute::<GetEmployees>(NoVariables {}).await?;
        let employees = data.get_all_employees;
        self.cache.write().await.replace_all(&employees);
        debug!(count = employees.len(), "employees fetched");
        Ok(employees)
    }

    #[instrument(name = "hr.client.create", skip_all)]
    pub async fn create(&self, name: &str, metrics: MetricsInput) -> ApiResult<Employee> {
        let variables = CreateEmployeeVariables {
            name: name.to_string(),
            performance_metrics: metrics,
        };
        let employee = self.execute::<CreateEmployee>(variables).await?.create_employee;
        self.cache.write().await.write(&employee);
        debug!(id = %employee.id, "employee created");
        Ok(employee)
    }

    #[instrument(name = "hr.client.update", skip_all, fields(id = %id))]
    pub async fn update(&self, id: &EmployeeId, metrics: MetricsInput) -> ApiResult<Employee> {
        let variables = UpdateEmployeeVariables {
            id: id.clone(),
            performance_metrics: metrics,
        };
        let employee = self.execute::<UpdateEmployee>(variables).await?.update_employee;
        self.cache.write().await.write(&employee);
        debug!("employee updated");
        Ok(employee)
    }

    #[instrument(name = "hr.client.delete", skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &EmployeeId) -> ApiResult<bool> {
        let variables = DeleteEmployeeVariables { id: id.clone() };
        let deleted = self
            .execute::<DeleteEmployee>(variables)
            .await?
            .delete_employee
            .unwrap_or(false);
        if deleted {
            self.cache.write().await.evict(id);
        }
        debug!(deleted, "employee delete settled");
        Ok(deleted)
    }

    /// Read an entity from the last responses seen, without a round trip.
    pub async fn cached(&self, id: &EmployeeId) -> Option<Employee> {
        self.cache.read().await.get(id).cloned()
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PerformanceMetrics;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays canned bodies and records the operations it was asked for.
    #[derive(Default)]
    struct Scripted {
        replies: Mutex<Vec<ApiResult<Value>>>,
        seen: Mutex<Vec<GraphqlRequest>>,
    }

    impl Scripted {
        fn replying(replies: Vec<ApiResult<Value>>) -> Self {
            let mut replies = replies;
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::default(),
            }
        }

        fn operations(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .filter_map(|req| req.operation_name.clone())
                .collect()
        }
    }

    impl Transport for Scripted {
        fn send(&self, request: GraphqlRequest) -> impl Future<Output = ApiResult<Value>> + Send {
            self.seen.lock().unwrap().push(request);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())));
            async move { reply }
        }
    }

    fn wire_employee(id: &str, name: &str, score: f64) -> Value {
        json!({
            "id": id,
            "name": name,
            "performanceMetrics": { "metric1": score, "metric2": score, "metric3": score },
            "performanceScore": score
        })
    }

    #[tokio::test]
    async fn fetch_all_fills_the_cache() {
        let transport = Scripted::replying(vec![Ok(json!({
            "data": { "getAllEmployees": [wire_employee("a", "Alice", 80.0), wire_employee("b", "Bob", 20.0)] }
        }))]);
        let client = EmployeeClient::new(transport);
        let employees = client.fetch_all().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(client.cached_count().await, 2);
        let bob = client.cached(&EmployeeId::new("b")).await.unwrap();
        assert_eq!(bob.name, "Bob");
        assert_eq!(client.transport().operations(), ["GetEmployees"]);
    }

    #[tokio::test]
    async fn delete_not_found_is_classified_and_keeps_cache() {
        let transport = Scripted::replying(vec![
            Ok(json!({ "data": { "getAllEmployees": [wire_employee("a", "Alice", 80.0)] } })),
            Ok(json!({
                "data": null,
                "errors": [{ "message": "employee a not found", "extensions": { "code": "NOT_FOUND" } }]
            })),
        ]);
        let client = EmployeeClient::new(transport);
        client.fetch_all().await.unwrap();
        let err = client.delete(&EmployeeId::new("a")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(client.cached(&EmployeeId::new("a")).await.is_some());
    }

    #[tokio::test]
    async fn successful_delete_evicts() {
        let transport = Scripted::replying(vec![
            Ok(json!({ "data": { "getAllEmployees": [wire_employee("a", "Alice", 80.0)] } })),
            Ok(json!({ "data": { "deleteEmployee": true } })),
        ]);
        let client = EmployeeClient::new(transport);
        client.fetch_all().await.unwrap();
        assert!(client.delete(&EmployeeId::new("a")).await.unwrap());
        assert!(client.cached(&EmployeeId::new("a")).await.is_none());
    }

    #[tokio::test]
    async fn create_sends_name_and_metrics_only() {
        let transport = Scripted::replying(vec![Ok(json!({
            "data": { "createEmployee": wire_employee("n", "Nia", 50.0) }
        }))]);
        let client = EmployeeClient::new(transport);
        let created = client
            .create("Nia", PerformanceMetrics::new(50.0, 50.0, 50.0))
            .await
            .unwrap();
        assert_eq!(created.id.as_str(), "n");
        assert!(client.cached(&created.id).await.is_some());

        let seen = client.transport().seen.lock().unwrap();
        let variables = &seen[0].variables;
        assert_eq!(variables["name"], "Nia");
        assert!(variables["performanceMetrics"].get("performanceScore").is_none());
        assert!(variables.get("performanceScore").is_none());
    }

    #[tokio::test]
    async fn transport_failures_surface_as_network_errors() {
        let client = EmployeeClient::new(Scripted::default());
        let err = client.fetch_all().await.unwrap_err();
        assert_eq!(err.code(), "NETWORK");
    }
}
