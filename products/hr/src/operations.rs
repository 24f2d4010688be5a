//! Typed GraphQL operations against the employee API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{Employee, EmployeeId, MetricsInput};

/// A GraphQL document with its variables and response data types.
pub trait Operation {
    const NAME: &'static str;
    const DOCUMENT: &'static str;
    type Variables: Serialize + Send;
    type Data: DeserializeOwned;
}

macro_rules! employee_selection {
    () => {
        "{ id name performanceMetrics { metric1 metric2 metric3 } performanceScore }"
    };
}

pub struct GetEmployees;
pub struct CreateEmployee;
pub struct UpdateEmployee;
pub struct DeleteEmployee;

#[derive(Debug, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeVariables {
    pub name: String,
    pub performance_metrics: MetricsInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeVariables {
    pub id: EmployeeId,
    pub performance_metrics: MetricsInput,
}

#[derive(Debug, Serialize)]
pub struct DeleteEmployeeVariables {
    pub id: EmployeeId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEmployeesData {
    pub get_all_employees: Vec<Employee>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeData {
    pub create_employee: Employee,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeData {
    pub update_employee: Employee,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmployeeData {
    pub delete_employee: Option<bool>,
}

impl Operation for GetEmployees {
    const NAME: &'static str = "GetEmployees";
    const DOCUMENT: &'static str =
        concat!("query GetEmployees { getAllEmployees ", employee_selection!(), " }");
    type Variables = NoVariables;
    type Data = GetEmployeesData;
}

impl Operation for CreateEmployee {
    const NAME: &'static str = "CreateEmployee";
    const DOCUMENT: &'static str = concat!(
        "mutation CreateEmployee($name: String!, $performanceMetrics: PerformanceMetricsInput!) ",
        "{ createEmployee(name: $name, performanceMetrics: $performanceMetrics) ",
        employee_selection!(),
        " }"
    );
    type Variables = CreateEmployeeVariables;
    type Data = CreateEmployeeData;
}

impl Operation for UpdateEmployee {
    const NAME: &'static str = "UpdateEmployee";
    const DOCUMENT: &'static str = concat!(
        "mutation UpdateEmployee($id: ID!, $performanceMetrics: PerformanceMetricsInput!) ",
        "{ updateEmployee(id: $id, performanceMetrics: $performanceMetrics) ",
        employee_selection!(),
        " }"
    );
    type Variables = UpdateEmployeeVariables;
    type Data = UpdateEmployeeData;
}

impl Operation for DeleteEmployee {
    const NAME: &'static str = "DeleteEmployee";
    const DOCUMENT: &'static str = "mutation DeleteEmployee($id: ID!) { deleteEmployee(id: $id) }";
    type Variables = DeleteEmployeeVariables;
    type Data = DeleteEmployeeData;
}
