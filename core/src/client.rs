//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeId};

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self) -> HttpRequest {
        self.get(self.base_url.clone())
    }

    pub fn build_get_by_id(&self, id: EmployeeId) -> HttpRequest {
        self.get(format!("{}/{id}", self.base_url))
    }

    pub fn build_create(&self, employee: &Employee) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Post, self.base_url.clone(), employee)
    }

    pub fn build_update(&self, id: EmployeeId, employee: &Employee) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Put, format!("{}/{id}", self.base_url), employee)
    }

    pub fn build_remove(&self, id: EmployeeId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_search_by_last_name(&self, last_name: &str) -> HttpRequest {
        self.get(format!(
            "{}/search?lastName={}",
            self.base_url,
            encode_query_value(last_name)
        ))
    }

    pub fn build_search_by_salary_floor(&self, min_salary: f64) -> HttpRequest {
        self.get(format!("{}/salary?minSalary={min_salary}", self.base_url))
    }

    pub fn build_search_by_hire_year(&self, year: i32) -> HttpRequest {
        self.get(format!("{}/hired-in-year?year={year}", self.base_url))
    }

    pub fn build_list_by_department(&self, department: &str) -> HttpRequest {
        self.get(format!(
            "{}/department/{}",
            self.base_url,
            encode_path_segment(department)
        ))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    /// Parse any of the search and department endpoints; they all return a
    /// JSON array of employees with status 200.
    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        parse_json(response, 200)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json_body(
        &self,
        method: HttpMethod,
        path: String,
        employee: &Employee,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(employee)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// form encoding writes spaces as '+', which is literal inside a path
fn encode_path_segment(value: &str) -> String {
    encode_query_value(value).replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080/api/employees";

    fn client() -> EmployeeClient {
        EmployeeClient::new(BASE)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_targets_base_url() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, BASE);
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_by_id_appends_id() {
        let req = client().build_get_by_id(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, format!("{BASE}/42"));
    }

    #[test]
    fn build_create_sends_json_body() {
        let mut employee = Employee::new("Ada", "Lovelace", "ada@example.com");
        employee.salary = Some(120000.0);
        let req = client().build_create(&employee).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, BASE);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["firstName"], "Ada");
        assert_eq!(body["salary"], 120000.0);
    }

    #[test]
    fn build_update_is_full_replace_put() {
        let employee = Employee::new("Grace", "Hopper", "grace@example.com");
        let req = client().build_update(7, &employee).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, format!("{BASE}/7"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["lastName"], "Hopper");
    }

    #[test]
    fn build_remove_has_no_body() {
        let req = client().build_remove(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, format!("{BASE}/3"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_search_by_last_name_encodes_query() {
        let req = client().build_search_by_last_name("O'Neil & Sons");
        assert_eq!(req.path, format!("{BASE}/search?lastName=O%27Neil+%26+Sons"));
    }

    #[test]
    fn build_search_by_salary_floor_formats_number() {
        assert_eq!(
            client().build_search_by_salary_floor(50000.0).path,
            format!("{BASE}/salary?minSalary=50000")
        );
        assert_eq!(
            client().build_search_by_salary_floor(1234.5).path,
            format!("{BASE}/salary?minSalary=1234.5")
        );
    }

    #[test]
    fn build_search_by_hire_year_uses_query() {
        let req = client().build_search_by_hire_year(2023);
        assert_eq!(req.path, format!("{BASE}/hired-in-year?year=2023"));
    }

    #[test]
    fn build_list_by_department_encodes_segment() {
        let req = client().build_list_by_department("Research & Development");
        assert_eq!(req.path, format!("{BASE}/department/Research%20%26%20Development"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EmployeeClient::new("http://localhost:8080/api/employees/");
        assert_eq!(client.build_list().path, BASE);
    }

    #[test]
    fn parse_list_success() {
        let body = r#"[{"id":1,"firstName":"A","lastName":"B","email":"a@b","salary":10.5}]"#;
        let employees = client().parse_list(response(200, body)).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, 1);
        assert_eq!(employees[0].salary, Some(10.5));
    }

    #[test]
    fn parse_get_by_id_not_found() {
        let err = client().parse_get_by_id(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_requires_201() {
        let body = r#"{"id":9,"firstName":"A","lastName":"B","email":"a@b"}"#;
        let err = client().parse_create(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 200, .. }));
        let created = client().parse_create(response(201, body)).unwrap();
        assert_eq!(created.id, 9);
    }

    #[test]
    fn parse_update_server_error() {
        let err = client().parse_update(response(500, "boom")).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_remove_statuses() {
        assert!(client().parse_remove(response(204, "")).is_ok());
        assert!(matches!(
            client().parse_remove(response(404, "")).unwrap_err(),
            ApiError::NotFound
        ));
    }

    #[test]
    fn parse_search_bad_json() {
        let err = client().parse_search(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
