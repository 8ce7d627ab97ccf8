//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `employee_core` linkage and storage bootstrap end to end.
//! - Walk one create/conflict/update/delete cycle and print each outcome.
//!
//! # Environment
//! - `EMPLOYEE_DB_PATH`: SQLite file; an in-memory database when unset.
//! - `EMPLOYEE_LOG_DIR`: absolute log directory; logging stays off when unset.
//! - `EMPLOYEE_LOG_LEVEL`: defaults to the build-mode level.

use employee_core::db::{open_db, open_db_in_memory};
use employee_core::{
    default_log_level, init_logging, Employee, EmployeeService, SqliteEmployeeRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("employee_core ping={}", employee_core::ping());
    println!("employee_core version={}", employee_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("EMPLOYEE_LOG_DIR") {
        let level =
            std::env::var("EMPLOYEE_LOG_LEVEL").unwrap_or_else(|_| default_log_level().into());
        init_logging(&level, &log_dir)?;
    }

    let conn = match std::env::var_os("EMPLOYEE_DB_PATH") {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    let created = service.create(&Employee::new("Adarsh", "Kumar", "adarsh@gmail.com"))?;
    println!("create id={}", created.id);

    match service.create(&Employee::new("Anand", "Kumar", "adarsh@gmail.com")) {
        Ok(unexpected) => println!("create duplicate unexpectedly ok id={}", unexpected.id),
        Err(err) => println!("create duplicate rejected: {err}"),
    }

    let updated = service.update(&Employee::with_id(
        created.id,
        "Anand",
        "K",
        "anand@gmail.com",
    ))?;
    println!(
        "update id={} first_name={} last_name={} email={}",
        updated.id, updated.first_name, updated.last_name, updated.email
    );

    service.delete(created.id)?;
    println!(
        "delete id={} present_after={}",
        created.id,
        service.get_by_id(created.id)?.is_some()
    );
    println!("count={}", service.get_all()?.len());

    Ok(())
}
