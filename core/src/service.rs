//! Data-access layer: one method per remote operation.
//!
//! `EmployeeService` glues `EmployeeClient` to a `Transport`. Every call is a
//! single round trip with no retry or caching. Failures are logged once here
//! and then handed back to the caller untouched.

use tracing::{debug, error};

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Employee, EmployeeId};

/// Operations the views need from the remote service.
pub trait EmployeeApi {
    fn list(&self) -> Result<Vec<Employee>, ApiError>;
    fn get_by_id(&self, id: EmployeeId) -> Result<Employee, ApiError>;
    fn create(&self, employee: &Employee) -> Result<Employee, ApiError>;
    fn update(&self, id: EmployeeId, employee: &Employee) -> Result<Employee, ApiError>;
    fn remove(&self, id: EmployeeId) -> Result<(), ApiError>;
    fn search_by_last_name(&self, last_name: &str) -> Result<Vec<Employee>, ApiError>;
    /// Employees whose salary is strictly greater than `min_salary`.
    fn search_by_salary_floor(&self, min_salary: f64) -> Result<Vec<Employee>, ApiError>;
    fn search_by_hire_year(&self, year: i32) -> Result<Vec<Employee>, ApiError>;
    fn list_by_department(&self, department: &str) -> Result<Vec<Employee>, ApiError>;
}

pub struct EmployeeService<T = UreqTransport> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeService<UreqTransport> {
    /// Service over the blocking ureq transport.
    pub fn connect(base_url: &str) -> Self {
        Self::new(EmployeeClient::new(base_url), UreqTransport::new())
    }
}

impl<T: Transport> EmployeeService<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    /// Execute `request`, parse with `parse`, and log any failure under
    /// `operation` before returning it.
    fn round_trip<R>(
        &self,
        operation: &'static str,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&EmployeeClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let result = request.and_then(|request| {
            debug!(operation, method = %request.method, path = %request.path, "sending request");
            let response = self.transport.execute(&request)?;
            parse(&self.client, response)
        });
        if let Err(err) = &result {
            error!(operation, error = %err, "employee api call failed");
        }
        result
    }
}

impl<T: Transport> EmployeeApi for EmployeeService<T> {
    fn list(&self) -> Result<Vec<Employee>, ApiError> {
        self.round_trip("list", Ok(self.client.build_list()), EmployeeClient::parse_list)
    }

    fn get_by_id(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        self.round_trip(
            "get_by_id",
            Ok(self.client.build_get_by_id(id)),
            EmployeeClient::parse_get_by_id,
        )
    }

    fn create(&self, employee: &Employee) -> Result<Employee, ApiError> {
        self.round_trip(
            "create",
            self.client.build_create(employee),
            EmployeeClient::parse_create,
        )
    }

    fn update(&self, id: EmployeeId, employee: &Employee) -> Result<Employee, ApiError> {
        self.round_trip(
            "update",
            self.client.build_update(id, employee),
            EmployeeClient::parse_update,
        )
    }

    fn remove(&self, id: EmployeeId) -> Result<(), ApiError> {
        self.round_trip(
            "remove",
            Ok(self.client.build_remove(id)),
            EmployeeClient::parse_remove,
        )
    }

    fn search_by_last_name(&self, last_name: &str) -> Result<Vec<Employee>, ApiError> {
        self.round_trip(
            "search_by_last_name",
            Ok(self.client.build_search_by_last_name(last_name)),
            EmployeeClient::parse_search,
        )
    }

    fn search_by_salary_floor(&self, min_salary: f64) -> Result<Vec<Employee>, ApiError> {
        self.round_trip(
            "search_by_salary_floor",
            Ok(self.client.build_search_by_salary_floor(min_salary)),
            EmployeeClient::parse_search,
        )
    }

    fn search_by_hire_year(&self, year: i32) -> Result<Vec<Employee>, ApiError> {
        self.round_trip(
            "search_by_hire_year",
            Ok(self.client.build_search_by_hire_year(year)),
            EmployeeClient::parse_search,
        )
    }

    fn list_by_department(&self, department: &str) -> Result<Vec<Employee>, ApiError> {
        self.round_trip(
            "list_by_department",
            Ok(self.client.build_list_by_department(department)),
            EmployeeClient::parse_search,
        )
    }
}
