use std::{cell::RefCell, collections::VecDeque, io};

use onlinealter_core::{ProcessOutput, ToolCommand, ToolRunner};

#[derive(Debug)]
enum Reply {
    Output(ProcessOutput),
    SpawnError(String),
}

/// Answers dry-run and real invocations from separate scripted queues and
/// records every command it receives.
#[derive(Debug, Default)]
pub struct FakeRunner {
    state: RefCell<FakeRunnerState>,
}

#[derive(Debug, Default)]
struct FakeRunnerState {
    dry_run_replies: VecDeque<Reply>,
    execute_replies: VecDeque<Reply>,
    commands: Vec<ToolCommand>,
}

#[allow(dead_code)]
impl FakeRunner {
    pub fn with_probe_output(stdout: impl Into<String>) -> Self {
        let runner = Self::default();
        runner.push_dry_run(ProcessOutput::succeeded(stdout));
        runner
    }

    pub fn push_dry_run(&self, output: ProcessOutput) {
        self.state
            .borrow_mut()
            .dry_run_replies
            .push_back(Reply::Output(output));
    }

    pub fn push_execute(&self, output: ProcessOutput) {
        self.state
            .borrow_mut()
            .execute_replies
            .push_back(Reply::Output(output));
    }

    pub fn fail_dry_run_spawn(&self, message: impl Into<String>) {
        self.state
            .borrow_mut()
            .dry_run_replies
            .push_back(Reply::SpawnError(message.into()));
    }

    pub fn fail_execute_spawn(&self, message: impl Into<String>) {
        self.state
            .borrow_mut()
            .execute_replies
            .push_back(Reply::SpawnError(message.into()));
    }

    pub fn commands(&self) -> Vec<ToolCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn last_command(&self) -> ToolCommand {
        self.state
            .borrow()
            .commands
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("fake runner received no commands"))
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ProcessOutput> {
        let mut state = self.state.borrow_mut();
        state.commands.push(command.clone());

        let queue = if command.is_dry_run() {
            &mut state.dry_run_replies
        } else {
            &mut state.execute_replies
        };

        match queue.pop_front() {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::SpawnError(message)) => {
                Err(io::Error::new(io::ErrorKind::NotFound, message))
            }
            None => Ok(ProcessOutput::succeeded("")),
        }
    }
}
