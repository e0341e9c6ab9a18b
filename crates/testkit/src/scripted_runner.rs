use std::{cell::RefCell, io};

use onlinealter_core::{ProcessOutput, ToolCommand, ToolRunner};

/// Replies to the dry-run probe and the real invocation with fixed outputs.
#[derive(Debug)]
pub struct ScriptedToolRunner {
    probe: ProcessOutput,
    execute: ProcessOutput,
    commands: RefCell<Vec<ToolCommand>>,
}

impl ScriptedToolRunner {
    #[must_use]
    pub fn new(probe: ProcessOutput, execute: ProcessOutput) -> Self {
        Self {
            probe,
            execute,
            commands: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn commands(&self) -> Vec<ToolCommand> {
        self.commands.borrow().clone()
    }

    /// The first dry-run command, which is always the probe.
    #[must_use]
    pub fn probe_command(&self) -> Option<ToolCommand> {
        self.commands.borrow().first().cloned()
    }
}

impl ToolRunner for ScriptedToolRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ProcessOutput> {
        let is_probe = self.commands.borrow().is_empty();
        self.commands.borrow_mut().push(command.clone());

        Ok(if is_probe {
            self.probe.clone()
        } else {
            self.execute.clone()
        })
    }
}
