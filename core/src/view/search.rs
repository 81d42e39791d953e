//! Search screen with three mutually exclusive modes.
//!
//! # Design
//! Each mode keeps its own input text. `SearchQuery::parse` validates the
//! active input before any request is opened, so bad input never reaches the
//! network. Results are cleared on any failure.

use tracing::warn;

use super::{ConfirmedDelete, Phase, RequestState, Settled, Ticket, ViewError};
use crate::error::ApiError;
use crate::service::EmployeeApi;
use crate::types::{Employee, EmployeeId};

const SEARCH_FAILED: &str = "An error occurred during search. Please try again.";
const DELETE_FAILED: &str = "Failed to delete employee. Please try again.";

/// Which filter the search screen is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    LastName,
    MinSalary,
    HireYear,
}

/// A validated search, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    LastName(String),
    MinSalary(f64),
    HireYear(i32),
}

impl SearchQuery {
    /// Validate raw input for `mode`.
    pub fn parse(mode: SearchMode, input: &str) -> Result<Self, ViewError> {
        let input = input.trim();
        match mode {
            SearchMode::LastName => {
                if input.is_empty() {
                    return Err(invalid("Please enter a last name to search"));
                }
                Ok(SearchQuery::LastName(input.to_string()))
            }
            SearchMode::MinSalary => match input.parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => {
                    Ok(SearchQuery::MinSalary(amount))
                }
                _ => Err(invalid("Please enter a valid salary amount")),
            },
            SearchMode::HireYear => {
                if input.len() != 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("Please enter a valid 4-digit year"));
                }
                input
                    .parse::<i32>()
                    .map(SearchQuery::HireYear)
                    .map_err(|_| invalid("Please enter a valid 4-digit year"))
            }
        }
    }

    pub fn run(&self, api: &impl EmployeeApi) -> Result<Vec<Employee>, ApiError> {
        match self {
            SearchQuery::LastName(name) => api.search_by_last_name(name),
            SearchQuery::MinSalary(amount) => api.search_by_salary_floor(*amount),
            SearchQuery::HireYear(year) => api.search_by_hire_year(*year),
        }
    }
}

fn invalid(message: &str) -> ViewError {
    ViewError::Validation(message.to_string())
}

/// Search by one of three mutually exclusive modes.
///
/// Each mode keeps its own input so switching back and forth does not lose
/// what was typed.
#[derive(Debug)]
pub struct SearchView {
    state: RequestState,
    mode: SearchMode,
    last_name: String,
    min_salary: String,
    hire_year: String,
    results: Vec<Employee>,
    searched: bool,
    delete: ConfirmedDelete,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            state: RequestState::new(Phase::Idle),
            mode: SearchMode::default(),
            last_name: String::new(),
            min_salary: String::new(),
            hire_year: String::new(),
            results: Vec::new(),
            searched: false,
            delete: ConfirmedDelete::default(),
        }
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

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn results(&self) -> &[Employee] {
        &self.results
    }

    /// Whether at least one search has been attempted.
    pub fn searched(&self) -> bool {
        self.searched
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Input text of the active mode.
    pub fn input(&self) -> &str {
        match self.mode {
            SearchMode::LastName => &self.last_name,
            SearchMode::MinSalary => &self.min_salary,
            SearchMode::HireYear => &self.hire_year,
        }
    }

    /// Replace the input text of the active mode.
    pub fn set_input(&mut self, text: &str) {
        let slot = match self.mode {
            SearchMode::LastName => &mut self.last_name,
            SearchMode::MinSalary => &mut self.min_salary,
            SearchMode::HireYear => &mut self.hire_year,
        };
        *slot = text.to_string();
    }

    /// Validate the active input and open the request. Invalid input fails
    /// the view and clears results without issuing a ticket.
    pub fn start_search(&mut self) -> Result<(Ticket, SearchQuery), ViewError> {
        self.state.ensure_ready()?;
        self.searched = true;
        let query = match SearchQuery::parse(self.mode, self.input()) {
            Ok(query) => query,
            Err(err) => {
                self.results.clear();
                self.state.fail(err.to_string());
                return Err(err);
            }
        };
        let ticket = self.state.begin()?;
        Ok((ticket, query))
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: Result<Vec<Employee>, ApiError>) -> Settled {
        if !self.state.settle(ticket) {
            return Settled::Discarded;
        }
        match result {
            Ok(results) => {
                self.results = results;
                self.state.succeed();
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "employee search failed");
                self.results.clear();
                self.state.fail(SEARCH_FAILED);
            }
        }
        Settled::Applied
    }

    /// Validate, run, and apply the active search against `api`.
    pub fn search(&mut self, api: &impl EmployeeApi) -> Result<&[Employee], ViewError> {
        let (ticket, query) = self.start_search()?;
        match query.run(api) {
            Ok(results) => {
                self.finish_search(ticket, Ok(results));
                Ok(&self.results)
            }
            Err(err) => {
                self.finish_search(ticket, Err(err.clone()));
                Err(err.into())
            }
        }
    }

    pub fn request_delete(&mut self, id: EmployeeId) {
        self.delete.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn pending_delete(&self) -> Option<EmployeeId> {
        self.delete.pending()
    }

    pub fn confirm_delete(&mut self) -> Result<(Ticket, EmployeeId), ViewError> {
        self.delete.confirm(&mut self.state)
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<(), ApiError>) -> Settled {
        self.delete
            .finish(&mut self.state, &mut self.results, ticket, result, DELETE_FAILED)
    }

    pub fn dispose(&mut self) {
        self.state.dispose();
        self.results.clear();
        self.delete.clear();
    }
}
