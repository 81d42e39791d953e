//! Dashboard screen: headcount, departments, and average salary.

use tracing::warn;

use super::{Phase, RequestState, Settled, Ticket, ViewError};
use crate::error::ApiError;
use crate::service::EmployeeApi;
use crate::types::Employee;

const LOAD_FAILED: &str = "Failed to load dashboard data. Please try again later.";

/// Read-only aggregates over the full employee list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub employee_count: usize,
    /// Distinct non-empty departments in first-seen order.
    pub departments: Vec<String>,
    /// Mean salary with a missing salary counted as 0; 0 for no employees.
    pub average_salary: f64,
}

impl DashboardSummary {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut departments: Vec<String> = Vec::new();
        for department in employees.iter().filter_map(|e| e.department.as_deref()) {
            let department = department.trim();
            if !department.is_empty() && !departments.iter().any(|d| d == department) {
                departments.push(department.to_string());
            }
        }

        let total: f64 = employees.iter().map(|e| e.salary.unwrap_or(0.0)).sum();
        let average_salary = if employees.is_empty() {
            0.0
        } else {
            total / employees.len() as f64
        };

        Self {
            employee_count: employees.len(),
            departments,
            average_salary,
        }
    }
}

/// Fetches the list once on mount and exposes its summary.
#[derive(Debug)]
pub struct DashboardView {
    state: RequestState,
    summary: DashboardSummary,
}

impl DashboardView {
    pub fn mount() -> (Self, Ticket) {
        let (state, ticket) = RequestState::started();
        let view = Self {
            state,
            summary: DashboardSummary::default(),
        };
        (view, ticket)
    }

    pub fn open(api: &impl EmployeeApi) -> Self {
        let (mut view, ticket) = Self::mount();
        view.finish_load(ticket, api.list());
        view
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    /// Re-run the fetch; used for a retry after a failure.
    pub fn start_load(&mut self) -> Result<Ticket, ViewError> {
        self.state.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Employee>, ApiError>) -> Settled {
        if !self.state.settle(ticket) {
            return Settled::Discarded;
        }
        match result {
            Ok(employees) => {
                self.summary = DashboardSummary::from_employees(&employees);
                self.state.succeed();
            }
            Err(err) => {
                warn!(error = %err, "dashboard load failed");
                self.state.fail(LOAD_FAILED);
            }
        }
        Settled::Applied
    }

    pub fn dispose(&mut self) {
        self.state.dispose();
    }
}
