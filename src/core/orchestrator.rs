//! The deploy/revert state machine.
//!
//! An [`Orchestrator`] walks a validated [`ActionRequest`] through
//! `Idle -> Previewing -> Executing -> Done`:
//!
//! 1. **Previewing**: a deploy asks `sqitch status` what is pending and describes it;
//!    a revert is described from its target tag alone.
//! 2. **Executing**: skipped in why-run mode. Otherwise the real `sqitch deploy` or
//!    `sqitch revert` runs.
//! 3. **Done**: exit codes 0 and 1 are both success. sqitch exits with 1 when there
//!    is nothing to do, e.g. deploying everything when nothing is new, or reverting
//!    to the tag the database is already at.
//!
//! Any error moves the machine to [`ActionState::Failed`].

use crate::core::{
    command::SqitchCommand,
    error::{Result, SqitchError},
    options::{ActionKind, SqitchOptions},
    preview::{deploy_preview, revert_preview},
    runner::CommandRunner,
    sqitch_status::StatusReport,
    validation::ActionRequest,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Previewing,
    Executing,
    Done,
    Failed,
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionState::Idle => "idle",
            ActionState::Previewing => "previewing",
            ActionState::Executing => "executing",
            ActionState::Done => "done",
            ActionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Whether a sqitch deploy/revert exit code counts as success
pub fn is_success_exit(code: Option<i32>) -> bool {
    matches!(code, Some(0 | 1))
}

/// Run `sqitch status` for `options` and interpret its output
pub fn query_status<R: CommandRunner>(runner: &R, options: &SqitchOptions) -> Result<StatusReport> {
    let command = SqitchCommand::status(options);
    let result = runner.run(&command, options.user.as_deref())?;

    // an uninitialized database makes status fail, but its stderr is still what we need
    if result.exit_code != Some(0) {
        log::debug!("'{command}' exited with {:?}", result.exit_code);
    }

    Ok(StatusReport::parse(&result.stdout, &result.stderr))
}

/// What happened during one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    /// Human-readable description of the work, e.g. for why-run output
    pub preview: String,
    /// Parsed `sqitch status`; only deploys query it
    pub status: Option<StatusReport>,
    /// The deploy/revert command line, whether or not it ran
    pub command_line: String,
    pub executed: bool,
    pub exit_code: Option<i32>,
}

pub struct Orchestrator<R: CommandRunner> {
    runner: R,
    why_run: bool,
    state: ActionState,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(runner: R, why_run: bool) -> Self {
        Self {
            runner,
            why_run,
            state: ActionState::Idle,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one action to completion
    pub fn run(&mut self, request: &ActionRequest) -> Result<ActionOutcome> {
        self.state = ActionState::Idle;

        match self.drive(request) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                log::warn!("sqitch {} failed in state {}: {e}", request.kind(), self.state);
                self.transition(ActionState::Failed);
                Err(e)
            }
        }
    }

    fn drive(&mut self, request: &ActionRequest) -> Result<ActionOutcome> {
        self.transition(ActionState::Previewing);

        let (preview, status) = match request.kind() {
            ActionKind::Deploy => {
                let report = query_status(&self.runner, request.options())?;
                (deploy_preview(&report), Some(report))
            }
            ActionKind::Revert => (revert_preview(request.target().unwrap_or_default()), None),
        };
        log::debug!("Previewing: {preview}");

        let command = SqitchCommand::for_action(request.kind(), request.options());
        let mut outcome = ActionOutcome {
            kind: request.kind(),
            preview,
            status,
            command_line: command.to_command_line(),
            executed: false,
            exit_code: None,
        };

        if self.why_run {
            log::info!("Why-run: skipping '{}'", outcome.command_line);
            self.transition(ActionState::Done);
            return Ok(outcome);
        }

        self.transition(ActionState::Executing);
        let result = self.runner.run(&command, request.run_as())?;
        outcome.executed = true;
        outcome.exit_code = result.exit_code;

        if !is_success_exit(result.exit_code) {
            return Err(SqitchError::command_failed(
                result.exit_code,
                outcome.command_line,
                result.stderr,
            ));
        }

        if result.exit_code == Some(1) {
            log::info!("sqitch {} had nothing to do", request.kind());
        }

        self.transition(ActionState::Done);
        Ok(outcome)
    }

    fn transition(&mut self, next: ActionState) {
        log::debug!("sqitch action state: {} -> {next}", self.state);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::Engine;
    use crate::core::runner::ExecResult;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays scripted results and records every command line it was given
    #[derive(Default)]
    struct ScriptedRunner {
        results: RefCell<VecDeque<ExecResult>>,
        calls: RefCell<Vec<(String, Option<String>)>>,
    }

    impl ScriptedRunner {
        fn with(results: Vec<ExecResult>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, command: &SqitchCommand, user: Option<&str>) -> Result<ExecResult> {
            self.calls
                .borrow_mut()
                .push((command.to_command_line(), user.map(str::to_string)));
            Ok(self
                .results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| ExecResult::new(0, "", "")))
        }
    }

    struct BrokenRunner;

    impl CommandRunner for BrokenRunner {
        fn run(&self, command: &SqitchCommand, _user: Option<&str>) -> Result<ExecResult> {
            Err(SqitchError::sqitch_not_found(command.program()))
        }
    }

    fn deploy_request(target: Option<&str>) -> ActionRequest {
        let options = SqitchOptions {
            engine: Some(Engine::Pg),
            db_name: Some("app".to_string()),
            to_target: target.map(str::to_string),
            ..Default::default()
        };
        ActionRequest::new(ActionKind::Deploy, options).unwrap()
    }

    fn revert_request(target: &str) -> ActionRequest {
        let options = SqitchOptions {
            to_target: Some(target.to_string()),
            user: Some("postgres".to_string()),
            ..Default::default()
        };
        ActionRequest::new(ActionKind::Revert, options).unwrap()
    }

    #[test]
    fn test_success_exit_codes() {
        assert!(is_success_exit(Some(0)));
        assert!(is_success_exit(Some(1)));
        assert!(!is_success_exit(Some(2)));
        assert!(!is_success_exit(Some(-1)));
        assert!(!is_success_exit(Some(255)));
        assert!(!is_success_exit(None));
    }

    #[test]
    fn test_deploy_runs_status_then_deploy() {
        let runner = ScriptedRunner::with(vec![
            ExecResult::new(0, "Undeployed changes:\n  * users @1.0\n  * widgets\n", ""),
            ExecResult::new(0, "+ users .. ok\n+ widgets .. ok\n", ""),
        ]);
        let mut orchestrator = Orchestrator::new(runner, false);

        let outcome = orchestrator.run(&deploy_request(Some("1.0"))).unwrap();

        assert_eq!(orchestrator.state(), ActionState::Done);
        assert!(outcome.executed);
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.preview.contains("users"));
        assert!(outcome.preview.contains("widgets"));
        assert_eq!(
            outcome.status.unwrap().pending_change_names(),
            ["users", "widgets"]
        );

        let calls = orchestrator.runner().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "sqitch --engine pg --db-name app status");
        assert_eq!(
            calls[1].0,
            "sqitch --engine pg --db-name app deploy --to-target @1.0 --verify"
        );
    }

    #[test]
    fn test_exit_code_one_is_success() {
        let runner = ScriptedRunner::with(vec![
            ExecResult::new(0, "Nothing to deploy (up-to-date)\n", ""),
            ExecResult::new(1, "Nothing to deploy (up-to-date)\n", ""),
        ]);
        let mut orchestrator = Orchestrator::new(runner, false);

        let outcome = orchestrator.run(&deploy_request(None)).unwrap();
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(
            outcome.preview,
            "deploy nothing, because everything is up-to-date"
        );
        assert_eq!(orchestrator.state(), ActionState::Done);
    }

    #[test]
    fn test_other_exit_codes_fail() {
        let runner = ScriptedRunner::with(vec![
            ExecResult::new(0, "Undeployed changes:\n  * users\n", ""),
            ExecResult::new(2, "", "Verify script failed\n"),
        ]);
        let mut orchestrator = Orchestrator::new(runner, false);

        let err = orchestrator.run(&deploy_request(None)).unwrap_err();
        match err {
            SqitchError::CommandFailed {
                code,
                command,
                stderr,
            } => {
                assert_eq!(code, Some(2));
                assert!(command.ends_with("deploy --verify"));
                assert_eq!(stderr, "Verify script failed");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(orchestrator.state(), ActionState::Failed);
    }

    #[test]
    fn test_killed_process_fails() {
        let runner = ScriptedRunner::with(vec![ExecResult {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        }]);
        let mut orchestrator = Orchestrator::new(runner, false);

        let result = orchestrator.run(&revert_request("1.0"));
        assert!(matches!(
            result,
            Err(SqitchError::CommandFailed { code: None, .. })
        ));
    }

    #[test]
    fn test_why_run_deploy_only_queries_status() {
        let runner = ScriptedRunner::with(vec![ExecResult::new(
            0,
            "Undeployed changes:\n  * users\n",
            "",
        )]);
        let mut orchestrator = Orchestrator::new(runner, true);

        let outcome = orchestrator.run(&deploy_request(None)).unwrap();

        assert!(!outcome.executed);
        assert_eq!(outcome.exit_code, None);
        assert_eq!(
            outcome.command_line,
            "sqitch --engine pg --db-name app deploy --verify"
        );
        assert_eq!(orchestrator.state(), ActionState::Done);

        let calls = orchestrator.runner().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.ends_with("status"));
    }

    #[test]
    fn test_why_run_revert_runs_nothing() {
        let mut orchestrator = Orchestrator::new(ScriptedRunner::default(), true);

        let outcome = orchestrator.run(&revert_request("1.1.6")).unwrap();

        assert_eq!(outcome.preview, "revert schema to tag 1.1.6");
        assert!(outcome.status.is_none());
        assert!(orchestrator.runner().calls().is_empty());
    }

    #[test]
    fn test_revert_runs_as_user_without_status_query() {
        let mut orchestrator = Orchestrator::new(ScriptedRunner::default(), false);

        let outcome = orchestrator.run(&revert_request("2.0.0")).unwrap();
        assert!(outcome.executed);

        let calls = orchestrator.runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sqitch revert --to-target @2.0.0 -y");
        assert_eq!(calls[0].1.as_deref(), Some("postgres"));
    }

    #[test]
    fn test_uninitialized_database_previews_everything() {
        let runner = ScriptedRunner::with(vec![
            ExecResult::new(
                2,
                "",
                "ERROR:  relation \"changes\" does not exist\nLINE 1: SELECT ...\n",
            ),
            ExecResult::new(0, "Adding registry tables\n", ""),
        ]);
        let mut orchestrator = Orchestrator::new(runner, false);

        let outcome = orchestrator.run(&deploy_request(None)).unwrap();
        let status = outcome.status.unwrap();
        assert!(status.is_uninitialized());
        assert!(outcome.executed);
    }

    #[test]
    fn test_runner_error_fails_during_preview() {
        let mut orchestrator = Orchestrator::new(BrokenRunner, false);

        let result = orchestrator.run(&deploy_request(None));
        assert!(matches!(result, Err(SqitchError::SqitchNotFound { .. })));
        assert_eq!(orchestrator.state(), ActionState::Failed);
    }

    #[test]
    fn test_orchestrator_is_reusable() {
        let mut orchestrator = Orchestrator::new(ScriptedRunner::default(), false);
        orchestrator.run(&revert_request("1.0")).unwrap();
        orchestrator.run(&revert_request("0.9")).unwrap();

        assert_eq!(orchestrator.state(), ActionState::Done);
        assert_eq!(orchestrator.runner().calls().len(), 2);
    }
}
