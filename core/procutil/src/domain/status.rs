//! 子プロセスの終了状態
//!
//! waitpid が返す生の wait status をデコードした値と、execute の戻り値。

use std::fmt;

/// wait status をデコードした終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    /// exit(code) で正常終了
    Exited { code: i32 },
    /// シグナルで終了
    Signaled { signal: i32, core_dumped: bool },
    /// 停止中（WUNTRACED 指定時のみ観測される）
    Stopped { signal: i32 },
    /// SIGCONT で再開（WCONTINUED 指定時のみ観測される）
    Continued,
}

impl TerminationStatus {
    /// 生の wait status をデコードする
    #[cfg(unix)]
    pub fn from_raw(raw: i32) -> Self {
        if libc::WIFEXITED(raw) {
            TerminationStatus::Exited {
                code: libc::WEXITSTATUS(raw),
            }
        } else if libc::WIFSIGNALED(raw) {
            TerminationStatus::Signaled {
                signal: libc::WTERMSIG(raw),
                core_dumped: libc::WCOREDUMP(raw),
            }
        } else if libc::WIFSTOPPED(raw) {
            TerminationStatus::Stopped {
                signal: libc::WSTOPSIG(raw),
            }
        } else {
            TerminationStatus::Continued
        }
    }

    pub fn exited(&self) -> bool {
        matches!(self, TerminationStatus::Exited { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match *self {
            TerminationStatus::Exited { code } => Some(code),
            _ => None,
        }
    }

    pub fn signaled(&self) -> bool {
        matches!(self, TerminationStatus::Signaled { .. })
    }

    pub fn term_signal(&self) -> Option<i32> {
        match *self {
            TerminationStatus::Signaled { signal, .. } => Some(signal),
            _ => None,
        }
    }

    pub fn core_dumped(&self) -> bool {
        matches!(
            self,
            TerminationStatus::Signaled {
                core_dumped: true,
                ..
            }
        )
    }

    pub fn stopped(&self) -> bool {
        matches!(self, TerminationStatus::Stopped { .. })
    }

    pub fn stop_signal(&self) -> Option<i32> {
        match *self {
            TerminationStatus::Stopped { signal } => Some(signal),
            _ => None,
        }
    }

    /// exit 0 で終了したか
    pub fn success(&self) -> bool {
        self.exit_code() == Some(0)
    }

    /// シェル流の終了コード（シグナル終了は 128 + シグナル番号）
    pub fn shell_code(&self) -> i32 {
        match *self {
            TerminationStatus::Exited { code } => code,
            TerminationStatus::Signaled { signal, .. } => 128 + signal,
            TerminationStatus::Stopped { signal } => 128 + signal,
            TerminationStatus::Continued => 0,
        }
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TerminationStatus::Exited { code } => write!(f, "exit {}", code),
            TerminationStatus::Signaled {
                signal,
                core_dumped,
            } => {
                write!(f, "{} (signal {})", signal_name(signal), signal)?;
                if core_dumped {
                    f.write_str(" (core dumped)")?;
                }
                Ok(())
            }
            TerminationStatus::Stopped { signal } => {
                write!(f, "stopped {} (signal {})", signal_name(signal), signal)
            }
            TerminationStatus::Continued => f.write_str("continued"),
        }
    }
}

/// execute の結果（pid と終了状態）
///
/// 1 回の execute で 1 つ作られ、以後変化しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pid: u32,
    raw: i32,
    status: TerminationStatus,
}

impl ExecutionResult {
    #[cfg(unix)]
    pub fn from_raw(pid: u32, raw: i32) -> Self {
        Self {
            pid,
            raw,
            status: TerminationStatus::from_raw(raw),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// waitpid が返した生の wait status
    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn status(&self) -> TerminationStatus {
        self.status
    }

    pub fn exited(&self) -> bool {
        self.status.exited()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.status.exit_code()
    }

    pub fn signaled(&self) -> bool {
        self.status.signaled()
    }

    pub fn term_signal(&self) -> Option<i32> {
        self.status.term_signal()
    }

    pub fn core_dumped(&self) -> bool {
        self.status.core_dumped()
    }

    pub fn stopped(&self) -> bool {
        self.status.stopped()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid {} {}", self.pid, self.status)
    }
}

/// シグナル番号を SIGxxx 名に変換する（表にないものは "SIG?"）
pub fn signal_name(signal: i32) -> &'static str {
    match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGQUIT => "SIGQUIT",
        libc::SIGILL => "SIGILL",
        libc::SIGTRAP => "SIGTRAP",
        libc::SIGABRT => "SIGABRT",
        libc::SIGBUS => "SIGBUS",
        libc::SIGFPE => "SIGFPE",
        libc::SIGKILL => "SIGKILL",
        libc::SIGUSR1 => "SIGUSR1",
        libc::SIGSEGV => "SIGSEGV",
        libc::SIGUSR2 => "SIGUSR2",
        libc::SIGPIPE => "SIGPIPE",
        libc::SIGALRM => "SIGALRM",
        libc::SIGTERM => "SIGTERM",
        libc::SIGCHLD => "SIGCHLD",
        libc::SIGCONT => "SIGCONT",
        libc::SIGSTOP => "SIGSTOP",
        libc::SIGTSTP => "SIGTSTP",
        libc::SIGTTIN => "SIGTTIN",
        libc::SIGTTOU => "SIGTTOU",
        libc::SIGXCPU => "SIGXCPU",
        libc::SIGXFSZ => "SIGXFSZ",
        libc::SIGWINCH => "SIGWINCH",
        _ => "SIG?",
    }
}
