//! Terminal output for command results.
//!
//! Tables and detail cards for people, pretty JSON for scripts.

use std::io::Write;

use anyhow::Result;
use employee_core::view::DashboardSummary;
use employee_core::Employee;

/// Where command results go: an aligned table or pretty JSON.
///
/// In JSON mode, status lines and prompts go to stderr so the writer only
/// ever receives JSON.
pub struct Output<W> {
    json: bool,
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(json: bool, writer: W) -> Self {
        Self { json, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn employees(&mut self, employees: &[Employee]) -> Result<()> {
        if self.json {
            writeln!(self.writer, "{}", serde_json::to_string_pretty(employees)?)?;
        } else if employees.is_empty() {
            writeln!(self.writer, "No employees found.")?;
        } else {
            write!(self.writer, "{}", table(employees))?;
        }
        Ok(())
    }

    pub fn employee(&mut self, employee: &Employee) -> Result<()> {
        if self.json {
            writeln!(self.writer, "{}", serde_json::to_string_pretty(employee)?)?;
        } else {
            write!(self.writer, "{}", card(employee))?;
        }
        Ok(())
    }

    pub fn summary(&mut self, summary: &DashboardSummary) -> Result<()> {
        if self.json {
            let value = serde_json::json!({
                "employeeCount": summary.employee_count,
                "departments": summary.departments,
                "averageSalary": summary.average_salary,
            });
            writeln!(self.writer, "{}", serde_json::to_string_pretty(&value)?)?;
        } else {
            writeln!(self.writer, "Employees:      {}", summary.employee_count)?;
            writeln!(self.writer, "Departments:    {}", summary.departments.len())?;
            for department in &summary.departments {
                writeln!(self.writer, "  - {department}")?;
            }
            writeln!(self.writer, "Average salary: {}", money(summary.average_salary))?;
        }
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        if self.json {
            eprintln!("{text}");
        } else {
            writeln!(self.writer, "{text}")?;
        }
        Ok(())
    }

    /// Ask a yes/no question, leaving the cursor on the same line.
    pub fn prompt(&mut self, question: &str) -> Result<()> {
        if self.json {
            eprint!("{question} [y/N] ");
        } else {
            write!(self.writer, "{question} [y/N] ")?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

const HEADERS: [&str; 6] = ["ID", "NAME", "EMAIL", "DEPARTMENT", "HIRED", "SALARY"];

fn row(employee: &Employee) -> [String; 6] {
    [
        employee.id.to_string(),
        format!("{} {}", employee.first_name, employee.last_name),
        employee.email.clone(),
        employee.department.clone().unwrap_or_default(),
        employee.hire_date.clone().unwrap_or_default(),
        employee.salary.map(money).unwrap_or_default(),
    ]
}

pub(crate) fn table(employees: &[Employee]) -> String {
    let rows: Vec<[String; 6]> = employees.iter().map(row).collect();
    let mut widths = HEADERS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(&HEADERS);
    for cells in &rows {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out
}

fn card(employee: &Employee) -> String {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "ID:         {}\nName:       {} {}\nEmail:      {}\nPhone:      {}\nHire date:  {}\nSalary:     {}\nDepartment: {}\n",
        employee.id,
        employee.first_name,
        employee.last_name,
        employee.email,
        optional(&employee.phone_number),
        optional(&employee.hire_date),
        employee.salary.map(money).unwrap_or_else(|| "-".to_string()),
        optional(&employee.department),
    )
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_columns_and_blanks_missing_fields() {
        let mut ada = Employee::new("Ada", "Lovelace", "ada@example.com");
        ada.id = 1;
        ada.salary = Some(120000.0);
        ada.department = Some("Engineering".to_string());
        let mut bob = Employee::new("Bob", "Li", "b@x.io");
        bob.id = 12;

        let rendered = table(&[ada, bob]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  NAME          EMAIL"));
        assert!(lines[1].ends_with("Engineering         120000.00"));
        assert_eq!(lines[2], "12  Bob Li        b@x.io");
    }

    #[test]
    fn json_mode_writes_only_json() {
        let mut out = Output::new(true, Vec::new());
        out.message("Employee created successfully!").unwrap();
        out.employees(&[Employee::new("Ada", "Lovelace", "ada@example.com")])
            .unwrap();
        let written: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();
        assert_eq!(written[0]["lastName"], "Lovelace");
    }

    #[test]
    fn card_marks_absent_fields() {
        let text = card(&Employee::new("Eve", "Adams", "eve@example.com"));
        assert!(text.contains("Phone:      -"));
        assert!(text.contains("Salary:     -"));
    }
}
