use anyhow::Result;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let outcome = run::run(args)?;
    report::print(&outcome, verbose);

    let status = if !outcome.result.failures.is_empty() {
        ExitStatus::Failure
    } else if outcome.dry_run && outcome.result.pending() > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    };
    Ok(status)
}
