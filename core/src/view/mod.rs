//! Request/result state machines behind each screen.
//!
//! # Design
//! Every view walks the same three-step cycle: `Idle` → `Loading` →
//! `Success` | `Failed`, and any new action restarts it. A request is opened
//! with a `begin`/`start_*` call that hands out a `Ticket`; the caller runs
//! the data-access call and feeds the outcome back through the matching
//! `finish_*` method. Outcomes are applied only for the ticket that is
//! currently in flight on a view that has not been disposed, so a response
//! that arrives after navigation is dropped instead of mutating a dead view.
//!
//! Each view also has a one-shot helper taking an `EmployeeApi` that runs
//! the whole cycle synchronously.

mod dashboard;
mod form;
mod list;
mod search;

pub use dashboard::{DashboardSummary, DashboardView};
pub use form::{FormMode, FormView, Redirect, Submission, REDIRECT_DELAY};
pub use list::ListView;
pub use search::{SearchMode, SearchQuery, SearchView};

use thiserror::Error;

use tracing::warn;

use crate::error::ApiError;
use crate::types::{Employee, EmployeeId};

/// Where a view is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Why a view refused or failed an action.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Local input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// A request is already in flight for this view.
    #[error("a request is already in progress")]
    Busy,

    /// The view was disposed and accepts no new work.
    #[error("view has been disposed")]
    Disposed,

    /// `confirm_delete` without a preceding `request_delete`.
    #[error("no delete is awaiting confirmation")]
    NothingToConfirm,

    /// The data-access call failed. Carried by the one-shot helpers; the
    /// view itself only keeps the user-facing message.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Whether a finished request changed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// The view was disposed or the ticket is not the one in flight.
    Discarded,
}

/// Phase, message, and liveness shared by all views.
#[derive(Debug)]
pub(crate) struct RequestState {
    phase: Phase,
    error: Option<String>,
    generation: u64,
    in_flight: Option<u64>,
    disposed: bool,
}

impl RequestState {
    pub(crate) fn new(phase: Phase) -> Self {
        Self {
            phase,
            error: None,
            generation: 0,
            in_flight: None,
            disposed: false,
        }
    }

    /// State of a view mounted with its first request already in flight.
    pub(crate) fn started() -> (Self, Ticket) {
        let mut state = Self::new(Phase::Loading);
        state.generation = 1;
        state.in_flight = Some(1);
        (state, Ticket { generation: 1 })
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Move to `Loading` and issue a ticket.
    pub(crate) fn begin(&mut self) -> Result<Ticket, ViewError> {
        self.ensure_ready()?;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.phase = Phase::Loading;
        self.error = None;
        Ok(Ticket {
            generation: self.generation,
        })
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), ViewError> {
        if self.disposed {
            return Err(ViewError::Disposed);
        }
        if self.in_flight.is_some() {
            return Err(ViewError::Busy);
        }
        Ok(())
    }

    /// Close `ticket` if it is live. Returns false when the outcome must be
    /// dropped.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        if self.disposed || self.in_flight != Some(ticket.generation) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub(crate) fn succeed(&mut self) {
        self.phase = Phase::Success;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Failed;
        self.error = Some(message.into());
    }

    pub(crate) fn dispose(&mut self) {
        self.disposed = true;
        self.in_flight = None;
    }
}

/// Two-step delete over a set of rows: request, then confirm.
///
/// The row leaves `rows` only once the remove call has succeeded.
#[derive(Debug, Default)]
pub(crate) struct ConfirmedDelete {
    pending: Option<EmployeeId>,
    deleting: Option<EmployeeId>,
}

impl ConfirmedDelete {
    pub(crate) fn request(&mut self, id: EmployeeId) {
        self.pending = Some(id);
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    pub(crate) fn pending(&self) -> Option<EmployeeId> {
        self.pending
    }

    pub(crate) fn confirm(&mut self, state: &mut RequestState) -> Result<(Ticket, EmployeeId), ViewError> {
        state.ensure_ready()?;
        let id = self.pending.take().ok_or(ViewError::NothingToConfirm)?;
        let ticket = state.begin()?;
        self.deleting = Some(id);
        Ok((ticket, id))
    }

    pub(crate) fn finish(
        &mut self,
        state: &mut RequestState,
        rows: &mut Vec<Employee>,
        ticket: Ticket,
        result: Result<(), ApiError>,
        failure_message: &str,
    ) -> Settled {
        if !state.settle(ticket) {
            return Settled::Discarded;
        }
        let id = self.deleting.take();
        match result {
            Ok(()) => {
                if let Some(id) = id {
                    rows.retain(|e| e.id != id);
                }
                state.succeed();
            }
            Err(err) => {
                warn!(error = %err, ?id, "employee delete failed");
                state.fail(failure_message);
            }
        }
        Settled::Applied
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
        self.deleting = None;
    }
}
