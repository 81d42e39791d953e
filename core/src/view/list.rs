//! Employee list screen.
//!
//! # Design
//! The list is fetched once on mount and can be reloaded on demand. Deleting
//! is two-step: `request_delete` marks a row, `confirm_delete` opens the
//! remove call, and the row leaves the local set only when `finish_delete`
//! sees success.

use tracing::warn;

use super::{ConfirmedDelete, Phase, RequestState, Settled, Ticket, ViewError};
use crate::error::ApiError;
use crate::service::EmployeeApi;
use crate::types::{Employee, EmployeeId};

const LOAD_FAILED: &str = "Failed to load employees. Please try again later.";
const DELETE_FAILED: &str = "Failed to delete employee. Please try again.";

/// All employees, with a confirmed delete.
///
/// Rows leave the local set only after the remove call succeeds; a failed
/// load or delete keeps the previous rows visible.
#[derive(Debug)]
pub struct ListView {
    state: RequestState,
    employees: Vec<Employee>,
    delete: ConfirmedDelete,
}

impl ListView {
    /// Mount the view; the initial fetch is already in flight.
    pub fn mount() -> (Self, Ticket) {
        let (state, ticket) = RequestState::started();
        let view = Self {
            state,
            employees: Vec::new(),
            delete: ConfirmedDelete::default(),
        };
        (view, ticket)
    }

    /// Mount and run the initial fetch against `api`.
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

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn pending_delete(&self) -> Option<EmployeeId> {
        self.delete.pending()
    }

    pub fn start_load(&mut self) -> Result<Ticket, ViewError> {
        self.state.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Employee>, ApiError>) -> Settled {
        if !self.state.settle(ticket) {
            return Settled::Discarded;
        }
        match result {
            Ok(employees) => {
                self.employees = employees;
                self.state.succeed();
            }
            Err(err) => {
                warn!(error = %err, "employee list load failed");
                self.state.fail(LOAD_FAILED);
            }
        }
        Settled::Applied
    }

    pub fn reload(&mut self, api: &impl EmployeeApi) -> Result<(), ViewError> {
        let ticket = self.start_load()?;
        self.finish_load(ticket, api.list());
        Ok(())
    }

    /// Ask for confirmation before deleting `id`. Replaces any earlier
    /// unconfirmed request.
    pub fn request_delete(&mut self, id: EmployeeId) {
        self.delete.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Confirm the pending delete and open its request.
    pub fn confirm_delete(&mut self) -> Result<(Ticket, EmployeeId), ViewError> {
        self.delete.confirm(&mut self.state)
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<(), ApiError>) -> Settled {
        self.delete
            .finish(&mut self.state, &mut self.employees, ticket, result, DELETE_FAILED)
    }

    /// Confirm the pending delete and run it against `api`.
    pub fn delete_confirmed(&mut self, api: &impl EmployeeApi) -> Result<EmployeeId, ViewError> {
        let (ticket, id) = self.confirm_delete()?;
        match api.remove(id) {
            Ok(()) => {
                self.finish_delete(ticket, Ok(()));
                Ok(id)
            }
            Err(err) => {
                self.finish_delete(ticket, Err(err.clone()));
                Err(err.into())
            }
        }
    }

    /// Navigating away: later outcomes are dropped.
    pub fn dispose(&mut self) {
        self.state.dispose();
        self.employees.clear();
        self.delete.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{employee, FakeApi};

    fn api() -> FakeApi {
        FakeApi::with(vec![employee(1, "Smith"), employee(2, "Jones"), employee(3, "Brown")])
    }

    #[test]
    fn mount_starts_loading() {
        let (view, _ticket) = ListView::mount();
        assert_eq!(view.phase(), Phase::Loading);
        assert!(view.is_loading());
        assert!(view.employees().is_empty());
    }

    #[test]
    fn open_populates_rows() {
        let view = ListView::open(&api());
        assert_eq!(view.phase(), Phase::Success);
        assert_eq!(view.employees().len(), 3);
        assert!(view.error().is_none());
    }

    #[test]
    fn load_failure_keeps_previous_rows() {
        let api = api();
        let mut view = ListView::open(&api);
        api.fail(true);
        view.reload(&api).unwrap();
        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(view.error(), Some(LOAD_FAILED));
        assert_eq!(view.employees().len(), 3);
        assert!(!view.is_loading());
    }

    #[test]
    fn delete_needs_confirmation() {
        let api = api();
        let mut view = ListView::open(&api);
        assert!(matches!(view.confirm_delete(), Err(ViewError::NothingToConfirm)));
        view.request_delete(2);
        view.cancel_delete();
        assert!(matches!(view.confirm_delete(), Err(ViewError::NothingToConfirm)));
        assert!(!api.calls().contains(&"remove"));
    }

    #[test]
    fn row_is_removed_only_after_remove_resolves() {
        let api = api();
        let mut view = ListView::open(&api);
        view.request_delete(2);
        let (ticket, id) = view.confirm_delete().unwrap();
        assert_eq!(id, 2);
        assert!(view.employees().iter().any(|e| e.id == 2));
        assert_eq!(view.finish_delete(ticket, api.remove(id)), Settled::Applied);
        assert!(!view.employees().iter().any(|e| e.id == 2));
        assert_eq!(api.ids(), vec![1, 3]);
    }

    #[test]
    fn failed_delete_keeps_row() {
        let api = api();
        let mut view = ListView::open(&api);
        api.fail(true);
        view.request_delete(1);
        assert!(matches!(
            view.delete_confirmed(&api),
            Err(ViewError::Api(ApiError::HttpError { status: 500, .. }))
        ));
        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(view.error(), Some(DELETE_FAILED));
        assert_eq!(view.employees().len(), 3);
    }

    #[test]
    fn delete_confirmed_reports_id() {
        let api = api();
        let mut view = ListView::open(&api);
        view.request_delete(3);
        assert_eq!(view.delete_confirmed(&api).unwrap(), 3);
        let ids: Vec<_> = view.employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn actions_while_loading_are_busy() {
        let (mut view, _ticket) = ListView::mount();
        assert!(matches!(view.start_load(), Err(ViewError::Busy)));
        view.request_delete(1);
        assert!(matches!(view.confirm_delete(), Err(ViewError::Busy)));
        assert_eq!(view.pending_delete(), Some(1));
    }

    #[test]
    fn late_result_after_dispose_is_discarded() {
        let api = api();
        let (mut view, ticket) = ListView::mount();
        view.dispose();
        assert_eq!(view.finish_load(ticket, api.list()), Settled::Discarded);
        assert!(view.employees().is_empty());
        assert!(matches!(view.start_load(), Err(ViewError::Disposed)));
    }
}
