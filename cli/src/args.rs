//! Command-line definition for `employee-admin`.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use employee_core::EmployeeId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/employees";

/// Manage employee records over the REST API
#[derive(Parser, Debug)]
#[command(name = "employee-admin", author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the employee resource
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all employees
    List,
    /// Show one employee
    Get { id: EmployeeId },
    /// Create an employee
    Create(EmployeeFields),
    /// Replace an employee; omitted flags keep their current values
    Update {
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee after confirmation
    Delete {
        id: EmployeeId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search by last name, minimum salary, or hire year
    Search {
        #[arg(value_enum)]
        by: SearchBy,
        value: String,
    },
    /// List employees in one department
    Department { name: String },
    /// Headcount, departments, and average salary
    Dashboard,
}

#[derive(ClapArgs, Debug, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Hire date as YYYY-MM-DD
    #[arg(long)]
    pub hire_date: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchBy {
    LastName,
    MinSalary,
    HireYear,
}
