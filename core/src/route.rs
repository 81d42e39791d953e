//! Path table for the admin screens.

use std::fmt;

use crate::types::EmployeeId;

/// One screen of the admin front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    EmployeeList,
    NewEmployee,
    EditEmployee(EmployeeId),
    Search,
}

impl Route {
    /// Match a path, ignoring one trailing slash. Edit paths need a positive
    /// id written as plain ASCII digits.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match trimmed {
            "/" => Some(Route::Dashboard),
            "/employees" => Some(Route::EmployeeList),
            "/employees/new" => Some(Route::NewEmployee),
            "/employees/search" => Some(Route::Search),
            other => {
                let digits = other.strip_prefix("/employees/edit/")?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let id: EmployeeId = digits.parse().ok()?;
                (id > 0).then_some(Route::EditEmployee(id))
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::EmployeeList => "/employees".to_string(),
            Route::NewEmployee => "/employees/new".to_string(),
            Route::EditEmployee(id) => format!("/employees/edit/{id}"),
            Route::Search => "/employees/search".to_string(),
        }
    }

    /// Route parameter carried by the path, if any.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            Route::EditEmployee(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
