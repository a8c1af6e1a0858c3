//! 標準入出力まわりの呼び出し側ヘルパー
//!
//! - [`Redirects`]: 未指定の端点を呼び出し元自身の 0/1/2 に解決して [`execute`](crate::execute) に渡す
//! - [`reopen_null`]: 呼び出し元プロセス自身の 0/1/2 を /dev/null に付け替える（デーモン化用）

use std::os::unix::io::{AsRawFd, RawFd};

use crate::domain::{ExecutionResult, ShellCommand};
use crate::error::{Error, Result};
use crate::exec::{Executor, StdioFds};

/// 子の標準入出力の指定
///
/// 指定しなかった端点は呼び出し元の 0/1/2 をそのまま共有する（複製はしない）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redirects {
    stdin: Option<RawFd>,
    stdout: Option<RawFd>,
    stderr: Option<RawFd>,
}

impl Redirects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdin(self, io: &impl AsRawFd) -> Self {
        self.stdin_fd(io.as_raw_fd())
    }

    pub fn stdout(self, io: &impl AsRawFd) -> Self {
        self.stdout_fd(io.as_raw_fd())
    }

    pub fn stderr(self, io: &impl AsRawFd) -> Self {
        self.stderr_fd(io.as_raw_fd())
    }

    pub fn stdin_fd(mut self, fd: RawFd) -> Self {
        self.stdin = Some(fd);
        self
    }

    pub fn stdout_fd(mut self, fd: RawFd) -> Self {
        self.stdout = Some(fd);
        self
    }

    pub fn stderr_fd(mut self, fd: RawFd) -> Self {
        self.stderr = Some(fd);
        self
    }

    /// 未指定を 0/1/2 で埋めた fd の組
    pub fn resolve(&self) -> StdioFds {
        StdioFds::new(
            self.stdin.unwrap_or(libc::STDIN_FILENO),
            self.stdout.unwrap_or(libc::STDOUT_FILENO),
            self.stderr.unwrap_or(libc::STDERR_FILENO),
        )
    }
}

/// Redirects を解決して既定の Executor で実行する
pub fn system(command: &str, redirects: &Redirects) -> Result<ExecutionResult> {
    Executor::new().execute(&ShellCommand::from(command), redirects.resolve())
}

/// 呼び出し元自身の stdin を /dev/null（読み込み）、stdout / stderr を /dev/null（書き込み）に付け替える
///
/// open と dup2 しか使わず確保もしないので、fork 直後の子でも呼べる。
pub fn reopen_null() -> Result<()> {
    reopen_slot(libc::STDIN_FILENO, libc::O_RDONLY)?;
    reopen_slot(libc::STDOUT_FILENO, libc::O_WRONLY)?;
    reopen_slot(libc::STDERR_FILENO, libc::O_WRONLY)?;
    Ok(())
}

fn reopen_slot(slot: RawFd, mode: libc::c_int) -> Result<()> {
    let fd = unsafe { libc::open(c"/dev/null".as_ptr(), mode | libc::O_CLOEXEC) };
    if fd < 0 {
        return Err(Error::last_os_error("open"));
    }
    if fd == slot {
        // スロットが空いていて同じ番号が返った。exec 後も残るよう CLOEXEC を外す
        let ret = unsafe { libc::fcntl(fd, libc::F_SETFD, 0) };
        if ret < 0 {
            return Err(Error::last_os_error("fcntl"));
        }
        return Ok(());
    }
    let ret = unsafe { libc::dup2(fd, slot) };
    let result = if ret < 0 {
        Err(Error::last_os_error("dup2"))
    } else {
        Ok(())
    };
    unsafe { libc::close(fd) };
    result
}
