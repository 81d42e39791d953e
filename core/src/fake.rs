//! In-memory `EmployeeApi` for view tests.

use std::cell::{Cell, RefCell};

use crate::error::ApiError;
use crate::service::EmployeeApi;
use crate::types::{Employee, EmployeeId};

#[derive(Default)]
pub(crate) struct FakeApi {
    employees: RefCell<Vec<Employee>>,
    next_id: Cell<EmployeeId>,
    calls: RefCell<Vec<&'static str>>,
    failing: Cell<bool>,
}

impl FakeApi {
    pub(crate) fn with(employees: Vec<Employee>) -> Self {
        let next_id = employees.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            employees: RefCell::new(employees),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    /// Make every following call fail with a 500.
    pub(crate) fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub(crate) fn ids(&self) -> Vec<EmployeeId> {
        self.employees.borrow().iter().map(|e| e.id).collect()
    }

    fn record(&self, call: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.failing.get() {
            return Err(ApiError::HttpError {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn filtered(&self, keep: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        self.employees.borrow().iter().filter(|e| keep(e)).cloned().collect()
    }
}

pub(crate) fn employee(id: EmployeeId, last_name: &str) -> Employee {
    Employee {
        id,
        ..Employee::new("Test", last_name, &format!("{}@example.com", last_name.to_lowercase()))
    }
}

impl EmployeeApi for FakeApi {
    fn list(&self) -> Result<Vec<Employee>, ApiError> {
        self.record("list")?;
        Ok(self.employees.borrow().clone())
    }

    fn get_by_id(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        self.record("get_by_id")?;
        self.filtered(|e| e.id == id).pop().ok_or(ApiError::NotFound)
    }

    fn create(&self, employee: &Employee) -> Result<Employee, ApiError> {
        self.record("create")?;
        self.next_id.set(self.next_id.get() + 1);
        let created = Employee {
            id: self.next_id.get(),
            ..employee.clone()
        };
        self.employees.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update(&self, id: EmployeeId, employee: &Employee) -> Result<Employee, ApiError> {
        self.record("update")?;
        let mut employees = self.employees.borrow_mut();
        let slot = employees.iter_mut().find(|e| e.id == id).ok_or(ApiError::NotFound)?;
        *slot = Employee {
            id,
            ..employee.clone()
        };
        Ok(slot.clone())
    }

    fn remove(&self, id: EmployeeId) -> Result<(), ApiError> {
        self.record("remove")?;
        let mut employees = self.employees.borrow_mut();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        if employees.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn search_by_last_name(&self, last_name: &str) -> Result<Vec<Employee>, ApiError> {
        self.record("search_by_last_name")?;
        let needle = last_name.to_lowercase();
        Ok(self.filtered(|e| e.last_name.to_lowercase().contains(&needle)))
    }

    fn search_by_salary_floor(&self, min_salary: f64) -> Result<Vec<Employee>, ApiError> {
        self.record("search_by_salary_floor")?;
        Ok(self.filtered(|e| e.salary.is_some_and(|s| s > min_salary)))
    }

    fn search_by_hire_year(&self, year: i32) -> Result<Vec<Employee>, ApiError> {
        self.record("search_by_hire_year")?;
        Ok(self.filtered(|e| e.hire_year() == Some(year)))
    }

    fn list_by_department(&self, department: &str) -> Result<Vec<Employee>, ApiError> {
        self.record("list_by_department")?;
        Ok(self.filtered(|e| e.department.as_deref() == Some(department)))
    }
}
