//! Employee admin CLI
//!
//! Terminal front end for the employee REST service. Each subcommand mounts
//! the matching screen state machine from `employee-core` and prints what
//! the screen would show.
//!
//! # Design
//! Commands write through an `Output` and read confirmations from any
//! `BufRead`, so the binary wires in stdout/stdin while tests use buffers.
//! A failed screen becomes an `Err` carrying the screen's own message; the
//! binary turns that into a non-zero exit.

#![forbid(unsafe_code)]

pub mod args;
pub mod commands;
pub mod render;

use std::io::{BufRead, Write};

use anyhow::Result;
use employee_core::EmployeeApi;

pub use args::{Args, Command, EmployeeFields, SearchBy, DEFAULT_BASE_URL};
pub use render::Output;

/// Run one subcommand against `api`.
pub fn run<W: Write>(
    command: Command,
    api: &impl EmployeeApi,
    out: &mut Output<W>,
    input: &mut impl BufRead,
) -> Result<()> {
    match command {
        Command::List => commands::list(api, out),
        Command::Get { id } => commands::get(api, out, id),
        Command::Create(fields) => commands::create(api, out, &fields),
        Command::Update { id, fields } => commands::update(api, out, id, &fields),
        Command::Delete { id, yes } => commands::delete(api, out, input, id, yes),
        Command::Search { by, value } => commands::search(api, out, by, &value),
        Command::Department { name } => commands::department(api, out, &name),
        Command::Dashboard => commands::dashboard(api, out),
    }
}
