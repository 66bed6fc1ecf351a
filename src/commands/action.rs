use crate::commands::args::RunSettings;
use crate::core::{
    config::SqitchConfig,
    error::Result,
    options::{ActionKind, SqitchOptions},
    orchestrator::{ActionOutcome, Orchestrator},
    output::{print_preview, print_success},
    runner::SystemRunner,
    validation::ActionRequest,
};

/// Validate, preview and (outside why-run) execute one sqitch action
pub fn execute_action(
    kind: ActionKind,
    overrides: SqitchOptions,
    settings: &RunSettings,
) -> Result<ActionOutcome> {
    let config = SqitchConfig::resolve(settings.config_path.as_deref())?;
    run_action(kind, config.options_with(overrides), settings)
}

/// Run whatever action the config file names, deploy when it names none
pub fn execute_converge(
    action: Option<String>,
    overrides: SqitchOptions,
    settings: &RunSettings,
) -> Result<ActionOutcome> {
    let config = SqitchConfig::resolve(settings.config_path.as_deref())?;
    let kind = match action {
        Some(action) => action.parse::<ActionKind>()?,
        None => config.action.unwrap_or_default(),
    };
    log::debug!("Converging with action '{kind}'");

    run_action(kind, config.options_with(overrides), settings)
}

fn run_action(
    kind: ActionKind,
    options: SqitchOptions,
    settings: &RunSettings,
) -> Result<ActionOutcome> {
    let request = ActionRequest::new(kind, options)?;
    let mut orchestrator = Orchestrator::new(SystemRunner::new(), settings.why_run);
    let outcome = orchestrator.run(&request)?;

    if outcome.executed {
        print_success(&format!("sqitch {kind}: {}", outcome.preview));
    } else {
        print_preview(&outcome.preview, &outcome.command_line);
    }

    Ok(outcome)
}
