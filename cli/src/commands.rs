//! One handler per subcommand, each driving the matching screen.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use employee_core::view::{DashboardView, FormView, ListView, SearchMode, SearchView};
use employee_core::{EmployeeApi, EmployeeId, Phase, ViewError};

use crate::args::{EmployeeFields, SearchBy};
use crate::render::Output;

/// Turn a failed screen into the message it would display.
fn failed(error: Option<&str>, fallback: &str) -> anyhow::Error {
    anyhow!("{}", error.unwrap_or(fallback))
}

pub fn list<W: Write>(api: &impl EmployeeApi, out: &mut Output<W>) -> Result<()> {
    let view = ListView::open(api);
    if view.phase() == Phase::Failed {
        return Err(failed(view.error(), "failed to load employees"));
    }
    out.employees(view.employees())
}

pub fn get<W: Write>(api: &impl EmployeeApi, out: &mut Output<W>, id: EmployeeId) -> Result<()> {
    let view = FormView::open(Some(id), api);
    if view.phase() == Phase::Failed {
        return Err(failed(view.error(), "failed to fetch employee"));
    }
    out.employee(view.form())
}

pub fn create<W: Write>(
    api: &impl EmployeeApi,
    out: &mut Output<W>,
    fields: &EmployeeFields,
) -> Result<()> {
    let mut view = FormView::open(None, api);
    apply(&mut view, fields)?;
    save(api, out, &mut view)
}

pub fn update<W: Write>(
    api: &impl EmployeeApi,
    out: &mut Output<W>,
    id: EmployeeId,
    fields: &EmployeeFields,
) -> Result<()> {
    let mut view = FormView::open(Some(id), api);
    if view.phase() == Phase::Failed {
        return Err(failed(view.error(), "failed to fetch employee"));
    }
    apply(&mut view, fields)?;
    save(api, out, &mut view)
}

fn apply(view: &mut FormView, fields: &EmployeeFields) -> Result<()> {
    let pairs = [
        ("firstName", &fields.first_name),
        ("lastName", &fields.last_name),
        ("email", &fields.email),
        ("phoneNumber", &fields.phone),
        ("hireDate", &fields.hire_date),
        ("salary", &fields.salary),
        ("department", &fields.department),
    ];
    for (name, value) in pairs {
        if let Some(value) = value {
            view.set_field(name, value)?;
        }
    }
    Ok(())
}

fn save<W: Write>(api: &impl EmployeeApi, out: &mut Output<W>, view: &mut FormView) -> Result<()> {
    match view.submit(api) {
        Ok(saved) => {
            if let Some(message) = view.success() {
                out.message(message)?;
            }
            if let Some(redirect) = view.redirect() {
                tracing::debug!(to = %redirect.to, "form would navigate");
            }
            out.employee(&saved)
        }
        Err(ViewError::Validation(message)) => bail!(message),
        Err(err) => {
            tracing::debug!(error = %err, "save failed");
            Err(failed(view.error(), "failed to save employee"))
        }
    }
}

/// Delete through the list screen's confirmation step. Without
/// `assume_yes`, one answer line is read from `input`.
pub fn delete<W: Write>(
    api: &impl EmployeeApi,
    out: &mut Output<W>,
    input: &mut impl BufRead,
    id: EmployeeId,
    assume_yes: bool,
) -> Result<()> {
    let mut view = ListView::open(api);
    if view.phase() == Phase::Failed {
        return Err(failed(view.error(), "failed to load employees"));
    }
    let Some(target) = view.employees().iter().find(|e| e.id == id) else {
        bail!("Employee {id} not found");
    };
    let label = format!("{} {} (#{id})", target.first_name, target.last_name);

    view.request_delete(id);
    if !assume_yes {
        out.prompt(&format!("Delete {label}?"))?;
        let mut answer = String::new();
        input.read_line(&mut answer).context("failed to read confirmation")?;
        if !is_yes(&answer) {
            view.cancel_delete();
            return out.message("Cancelled.");
        }
    }

    view.delete_confirmed(api)
        .map_err(|_| failed(view.error(), "failed to delete employee"))?;
    out.message(&format!("Deleted {label}."))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn search<W: Write>(
    api: &impl EmployeeApi,
    out: &mut Output<W>,
    by: SearchBy,
    value: &str,
) -> Result<()> {
    let mut view = SearchView::new();
    view.set_mode(match by {
        SearchBy::LastName => SearchMode::LastName,
        SearchBy::MinSalary => SearchMode::MinSalary,
        SearchBy::HireYear => SearchMode::HireYear,
    });
    view.set_input(value);

    if view.search(api).is_err() {
        return Err(failed(view.error(), "search failed"));
    }
    out.employees(view.results())
}

pub fn department<W: Write>(api: &impl EmployeeApi, out: &mut Output<W>, name: &str) -> Result<()> {
    let employees = api
        .list_by_department(name)
        .with_context(|| format!("Failed to load department {name}"))?;
    out.employees(&employees)
}

pub fn dashboard<W: Write>(api: &impl EmployeeApi, out: &mut Output<W>) -> Result<()> {
    let view = DashboardView::open(api);
    if view.phase() == Phase::Failed {
        return Err(failed(view.error(), "failed to load dashboard"));
    }
    out.summary(view.summary())
}
