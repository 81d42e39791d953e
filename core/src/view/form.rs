//! Create/edit form screen.
//!
//! # Design
//! The mode is fixed at mount by the presence of an id. Edit mode starts with
//! a pre-fetch whose hire date is normalized to `YYYY-MM-DD`. Submitting
//! validates locally first; a successful save sets a success message and a
//! `Redirect` back to the list, which the host performs after the delay.

use std::time::Duration;

use tracing::warn;

use super::{Phase, RequestState, Settled, Ticket, ViewError};
use crate::error::ApiError;
use crate::route::Route;
use crate::service::EmployeeApi;
use crate::types::{normalize_hire_date, Employee, EmployeeId};

const FETCH_FAILED: &str = "Failed to fetch employee details. Please try again.";
const SAVE_FAILED: &str = "Failed to save employee data. Please check your inputs and try again.";
const CREATED: &str = "Employee created successfully!";
const UPDATED: &str = "Employee updated successfully!";

/// Delay before returning to the list after a successful save.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// Navigation the form asks for once a save succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

/// The call a submit resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(Employee),
    Update(EmployeeId, Employee),
}

impl Submission {
    pub fn send(&self, api: &impl EmployeeApi) -> Result<Employee, ApiError> {
        match self {
            Submission::Create(employee) => api.create(employee),
            Submission::Update(id, employee) => api.update(*id, employee),
        }
    }
}

/// Create/edit form for one employee.
#[derive(Debug)]
pub struct FormView {
    mode: FormMode,
    state: RequestState,
    form: Employee,
    success: Option<&'static str>,
    redirect: Option<Redirect>,
}

impl FormView {
    /// Mount for the given route parameter. Edit mode returns the ticket of
    /// the pre-fetch already in flight.
    pub fn mount(id: Option<EmployeeId>) -> (Self, Option<Ticket>) {
        match id {
            Some(id) => {
                let (state, ticket) = RequestState::started();
                (Self::with(FormMode::Edit(id), state), Some(ticket))
            }
            None => (Self::with(FormMode::Create, RequestState::new(Phase::Idle)), None),
        }
    }

    /// Mount and, in edit mode, run the pre-fetch against `api`.
    pub fn open(id: Option<EmployeeId>, api: &impl EmployeeApi) -> Self {
        let (mut view, ticket) = Self::mount(id);
        if let (Some(ticket), FormMode::Edit(id)) = (ticket, view.mode) {
            view.finish_prefetch(ticket, api.get_by_id(id));
        }
        view
    }

    fn with(mode: FormMode, state: RequestState) -> Self {
        Self {
            mode,
            state,
            form: Employee::default(),
            success: None,
            redirect: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
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

    pub fn success(&self) -> Option<&str> {
        self.success
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.redirect
    }

    pub fn form(&self) -> &Employee {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Employee {
        &mut self.form
    }

    /// Set one field by its JSON name from raw input text. Blank optional
    /// fields become absent.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), ViewError> {
        let optional = || {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        match name {
            "firstName" => self.form.first_name = value.to_string(),
            "lastName" => self.form.last_name = value.to_string(),
            "email" => self.form.email = value.to_string(),
            "phoneNumber" => self.form.phone_number = optional(),
            "hireDate" => self.form.hire_date = optional(),
            "department" => self.form.department = optional(),
            "salary" => {
                self.form.salary = match optional() {
                    None => None,
                    Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
                        ViewError::Validation("Salary must be a number".to_string())
                    })?),
                }
            }
            other => return Err(ViewError::Validation(format!("Unknown field: {other}"))),
        }
        Ok(())
    }

    pub fn finish_prefetch(&mut self, ticket: Ticket, result: Result<Employee, ApiError>) -> Settled {
        if !self.state.settle(ticket) {
            return Settled::Discarded;
        }
        match result {
            Ok(mut employee) => {
                employee.hire_date = employee.hire_date.as_deref().map(normalize_hire_date);
                self.form = employee;
                self.state.succeed();
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "employee pre-fetch failed");
                self.state.fail(FETCH_FAILED);
            }
        }
        Settled::Applied
    }

    /// Validate the form and open the save request. Invalid input fails the
    /// view without issuing a ticket.
    pub fn start_submit(&mut self) -> Result<(Ticket, Submission), ViewError> {
        self.state.ensure_ready()?;
        self.success = None;
        self.redirect = None;
        if let Err(err) = self.validate() {
            self.state.fail(err.to_string());
            return Err(err);
        }
        let ticket = self.state.begin()?;
        let submission = match self.mode {
            FormMode::Create => Submission::Create(self.form.clone()),
            FormMode::Edit(id) => Submission::Update(id, self.form.clone()),
        };
        Ok((ticket, submission))
    }

    pub fn finish_submit(&mut self, ticket: Ticket, result: Result<Employee, ApiError>) -> Settled {
        if !self.state.settle(ticket) {
            return Settled::Discarded;
        }
        match result {
            Ok(saved) => {
                match self.mode {
                    FormMode::Create => {
                        self.success = Some(CREATED);
                        self.form = Employee::default();
                    }
                    FormMode::Edit(_) => {
                        self.success = Some(UPDATED);
                        self.form = Employee {
                            hire_date: saved.hire_date.as_deref().map(normalize_hire_date),
                            ..saved
                        };
                    }
                }
                self.redirect = Some(Redirect {
                    to: Route::EmployeeList,
                    after: REDIRECT_DELAY,
                });
                self.state.succeed();
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "employee save failed");
                self.state.fail(SAVE_FAILED);
            }
        }
        Settled::Applied
    }

    /// Validate, send, and apply the save against `api`. Returns the record
    /// as stored by the service.
    pub fn submit(&mut self, api: &impl EmployeeApi) -> Result<Employee, ViewError> {
        let (ticket, submission) = self.start_submit()?;
        match submission.send(api) {
            Ok(saved) => {
                self.finish_submit(ticket, Ok(saved.clone()));
                Ok(saved)
            }
            Err(err) => {
                self.finish_submit(ticket, Err(err.clone()));
                Err(err.into())
            }
        }
    }

    pub fn dispose(&mut self) {
        self.state.dispose();
        self.redirect = None;
    }

    fn validate(&self) -> Result<(), ViewError> {
        let missing = self.form.missing_required_fields();
        if !missing.is_empty() {
            return Err(ViewError::Validation(format!(
                "Required fields missing: {}",
                missing.join(", ")
            )));
        }
        if self.form.salary.is_some_and(|s| !s.is_finite() || s < 0.0) {
            return Err(ViewError::Validation(
                "Salary must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{employee, FakeApi};

    fn filled(view: &mut FormView) {
        view.set_field("firstName", "Ada").unwrap();
        view.set_field("lastName", "Lovelace").unwrap();
        view.set_field("email", "ada@example.com").unwrap();
    }

    #[test]
    fn create_mode_starts_idle() {
        let (view, ticket) = FormView::mount(None);
        assert!(ticket.is_none());
        assert_eq!(view.mode(), FormMode::Create);
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn edit_mode_prefetch_normalizes_hire_date() {
        let stored = Employee {
            hire_date: Some("2023-05-14T00:00:00Z".to_string()),
            ..employee(4, "Hopper")
        };
        let api = FakeApi::with(vec![stored]);
        let view = FormView::open(Some(4), &api);
        assert_eq!(view.mode(), FormMode::Edit(4));
        assert_eq!(view.phase(), Phase::Success);
        assert_eq!(view.form().hire_date.as_deref(), Some("2023-05-14"));
        assert_eq!(view.form().last_name, "Hopper");
    }

    #[test]
    fn edit_mode_prefetch_failure() {
        let api = FakeApi::default();
        let view = FormView::open(Some(9), &api);
        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(view.error(), Some(FETCH_FAILED));
    }

    #[test]
    fn submit_create_resets_form_and_schedules_redirect() {
        let api = FakeApi::default();
        let mut view = FormView::open(None, &api);
        filled(&mut view);
        view.set_field("salary", "72000.50").unwrap();
        let saved = view.submit(&api).unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.first_name, "Ada");
        assert_eq!(saved.salary, Some(72000.5));
        assert_eq!(view.success(), Some(CREATED));
        assert_eq!(view.form(), &Employee::default());
        assert_eq!(
            view.redirect(),
            Some(Redirect {
                to: Route::EmployeeList,
                after: Duration::from_millis(1500)
            })
        );
    }

    #[test]
    fn submit_edit_updates_record() {
        let api = FakeApi::with(vec![employee(2, "Old")]);
        let mut view = FormView::open(Some(2), &api);
        view.set_field("lastName", "New").unwrap();
        let (ticket, submission) = view.start_submit().unwrap();
        assert!(matches!(submission, Submission::Update(2, _)));
        assert_eq!(view.finish_submit(ticket, submission.send(&api)), Settled::Applied);
        assert_eq!(view.success(), Some(UPDATED));
        assert_eq!(view.form().last_name, "New");
        assert_eq!(api.calls(), vec!["get_by_id", "update"]);
    }

    #[test]
    fn missing_required_fields_never_reach_network() {
        let api = FakeApi::default();
        let mut view = FormView::open(None, &api);
        view.set_field("firstName", "Ada").unwrap();
        let err = view.submit(&api).unwrap_err();
        assert!(matches!(err, ViewError::Validation(ref msg) if msg == "Required fields missing: lastName, email"));
        assert_eq!(view.phase(), Phase::Failed);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let api = FakeApi::default();
        let mut view = FormView::open(None, &api);
        filled(&mut view);
        view.set_field("salary", "-1").unwrap();
        assert!(matches!(view.submit(&api), Err(ViewError::Validation(_))));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn non_numeric_salary_input_is_rejected() {
        let (mut view, _) = FormView::mount(None);
        assert!(matches!(view.set_field("salary", "lots"), Err(ViewError::Validation(_))));
        view.set_field("salary", " ").unwrap();
        assert_eq!(view.form().salary, None);
    }

    #[test]
    fn save_failure_keeps_form_and_reports() {
        let api = FakeApi::default();
        let mut view = FormView::open(None, &api);
        filled(&mut view);
        api.fail(true);
        assert!(matches!(view.submit(&api), Err(ViewError::Api(_))));
        assert_eq!(view.error(), Some(SAVE_FAILED));
        assert!(view.success().is_none());
        assert!(view.redirect().is_none());
        assert_eq!(view.form().first_name, "Ada");
    }

    #[test]
    fn submit_during_prefetch_is_busy() {
        let (mut view, _ticket) = FormView::mount(Some(3));
        assert!(matches!(view.start_submit(), Err(ViewError::Busy)));
    }

    #[test]
    fn prefetch_after_dispose_is_discarded() {
        let api = FakeApi::with(vec![employee(3, "Late")]);
        let (mut view, ticket) = FormView::mount(Some(3));
        view.dispose();
        let ticket = ticket.unwrap();
        assert_eq!(view.finish_prefetch(ticket, api.get_by_id(3)), Settled::Discarded);
        assert_eq!(view.form(), &Employee::default());
    }
}
