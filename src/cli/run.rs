//! Command dispatch: turns parsed arguments into an engine run.

use anyhow::Result;

use crate::cli::args::{Arguments, Command, CommonArgs};
use crate::engine::{self, BucketPattern, EngineParams, PseudoTranslator, RunResult};

/// What a command did, handed to the report layer.
pub struct RunOutcome {
    pub result: RunResult,
    /// True for `status`: nothing was translated or written.
    pub dry_run: bool,
}

pub fn run(Arguments { command }: Arguments) -> Result<RunOutcome> {
    match command {
        Some(Command::Translate(cmd)) => {
            let result = engine::run(&engine_params(
                &cmd.args.common,
                cmd.args.batch_cap,
                false,
            )?)?;
            Ok(RunOutcome {
                result,
                dry_run: false,
            })
        }
        Some(Command::Status(cmd)) => {
            let result = engine::run(&engine_params(&cmd.args.common, None, true)?)?;
            Ok(RunOutcome {
                result,
                dry_run: true,
            })
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn engine_params(
    common: &CommonArgs,
    batch_cap: Option<usize>,
    dry_run: bool,
) -> Result<EngineParams<'static>> {
    static PSEUDO: PseudoTranslator = PseudoTranslator;

    Ok(EngineParams {
        root: common.root.clone(),
        pattern: BucketPattern::new(&common.pattern)?,
        format: common.format.parse()?,
        source_locale: common.source_locale.clone(),
        target_locales: common.target_locales.clone(),
        batch_cap,
        translator: &PSEUDO,
        dry_run,
    })
}
