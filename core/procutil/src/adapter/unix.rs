//! Unix 用アダプター実装（ProcessExecutor / HostnameSetter を fork/exec・sethostname で実装）

use crate::domain::{ExecutionResult, ShellCommand};
use crate::error::Error;
use crate::exec::{Executor, StdioFds};
use crate::hostname;
use crate::ports::outbound::{HostnameSetter, ProcessExecutor};

/// exec::Executor を ProcessExecutor としてラップ
#[derive(Debug, Clone, Default)]
pub struct UnixExecutor(pub Executor);

impl UnixExecutor {
    pub fn new(executor: Executor) -> Self {
        Self(executor)
    }
}

impl ProcessExecutor for UnixExecutor {
    fn execute(&self, command: &ShellCommand, fds: StdioFds) -> Result<ExecutionResult, Error> {
        self.0.execute(command, fds)
    }
}

/// HostnameSetter の Unix 実装
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixHostname;

impl HostnameSetter for UnixHostname {
    fn set_hostname(&self, name: &str) -> Result<(), Error> {
        hostname::set_hostname(name)
    }

    fn hostname(&self) -> Result<String, Error> {
        hostname::hostname()
    }
}
