//! 標準入出力を差し替えてシェルコマンドを実行し、終了を待つ
//!
//! fork した子で 0/1/2 を呼び出し元の fd に dup2 し、`sh -c <command>` を exec する。
//! 親は子の終了まで waitpid でブロックし、wait status をデコードして返す。
//!
//! 子側の失敗（dup2 / exec）はエラーとして返らない。終了コードでのみ観測できる:
//! - dup2 失敗: [`DUP_FAILURE_EXIT_CODE`]
//! - exec 失敗: [`EXEC_FAILURE_EXIT_CODE`]
//!
//! シェル自身の「command not found」(127) と exec 失敗は区別しない。

use std::ffi::{CStr, CString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

use libc::{c_char, c_int, pid_t};

use crate::domain::{ExecutionResult, ShellCommand};
use crate::error::{Error, Result};

/// 既定のシェル
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// 子で dup2 が失敗したときの終了コード（_exit(-1) 相当）
pub const DUP_FAILURE_EXIT_CODE: c_int = 255;

/// 子で exec が失敗したときの終了コード
pub const EXEC_FAILURE_EXIT_CODE: c_int = 127;

/// 子の 0/1/2 に割り当てる fd
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdioFds {
    pub stdin: RawFd,
    pub stdout: RawFd,
    pub stderr: RawFd,
}

impl StdioFds {
    pub fn new(stdin: RawFd, stdout: RawFd, stderr: RawFd) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }

    /// 呼び出し元自身の 0/1/2 をそのまま渡す
    pub fn inherit() -> Self {
        Self::new(libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO)
    }

    fn as_array(&self) -> [RawFd; 3] {
        [self.stdin, self.stdout, self.stderr]
    }
}

impl Default for StdioFds {
    fn default() -> Self {
        Self::inherit()
    }
}

/// fork/exec でシェルコマンドを実行する Executor
#[derive(Debug, Clone)]
pub struct Executor {
    shell: PathBuf,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// `/bin/sh` を使う Executor
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    /// シェルのパスを指定する（起動は常に `<shell> -c <command>`）
    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// コマンドを実行し、子が終了して回収されるまでブロックする
    ///
    /// 渡した fd は閉じない。戻った時点で子は回収済み（ゾンビは残らない）。
    pub fn execute(&self, command: &ShellCommand, fds: StdioFds) -> Result<ExecutionResult> {
        // fork 後の子では確保できないので、argv はここで全部作る
        let argv = ShellArgv::new(&self.shell, command)?;

        let pid = unsafe { libc::fork() };
        if pid < 0 {
            return Err(Error::last_os_error("fork"));
        }
        if pid == 0 {
            unsafe { exec_child(&argv, fds) }
        }

        let raw = wait_for(pid)?;
        Ok(ExecutionResult::from_raw(pid as u32, raw))
    }
}

/// 既定の Executor でコマンドを実行する
pub fn execute(
    command: &str,
    stdin_fd: RawFd,
    stdout_fd: RawFd,
    stderr_fd: RawFd,
) -> Result<ExecutionResult> {
    Executor::new().execute(
        &ShellCommand::from(command),
        StdioFds::new(stdin_fd, stdout_fd, stderr_fd),
    )
}

/// `<shell> -c <command>` の argv（C 文字列とポインタ配列）
struct ShellArgv {
    shell: CString,
    _dash_c: CString,
    _command: CString,
    ptrs: [*const c_char; 4],
}

impl ShellArgv {
    fn new(shell: &Path, command: &ShellCommand) -> Result<Self> {
        let shell = CString::new(shell.as_os_str().as_bytes()).map_err(|_| {
            Error::invalid_argument(format!(
                "shell path contains an interior NUL byte: {}",
                shell.display()
            ))
        })?;
        let dash_c = CString::from(c"-c");
        let command = command.to_cstring()?;
        // CString の中身はヒープ上にあるので、構造体へ move してもポインタは有効
        let ptrs = [
            shell.as_ptr(),
            dash_c.as_ptr(),
            command.as_ptr(),
            std::ptr::null(),
        ];
        Ok(Self {
            shell,
            _dash_c: dash_c,
            _command: command,
            ptrs,
        })
    }
}

/// 子プロセス側: 0/1/2 を差し替えて exec する。戻らない。
///
/// fork 後なので async-signal-safe な呼び出し（fcntl / dup2 / write / execv / _exit）だけを使う。
unsafe fn exec_child(argv: &ShellArgv, fds: StdioFds) -> ! {
    let mut sources = fds.as_array();

    // 後の dup2 で上書きされる標準スロットに居る fd は、先に 3 以上へ退避する
    for target in 0..3 {
        let src = sources[target];
        if (0..3).contains(&src) && src != target as RawFd {
            let moved = libc::fcntl(src, libc::F_DUPFD_CLOEXEC, 3);
            if moved < 0 {
                child_fail(c"dup2: cannot move descriptor out of the standard slots\n");
            }
            sources[target] = moved;
        }
    }

    for (target, &src) in sources.iter().enumerate() {
        let target = target as RawFd;
        if src == target {
            // dup2(fd, fd) は何もしないので、exec で閉じられないよう CLOEXEC だけ外す
            let flags = libc::fcntl(src, libc::F_GETFD);
            if flags < 0 || libc::fcntl(src, libc::F_SETFD, flags & !libc::FD_CLOEXEC) < 0 {
                child_fail(c"dup2: bad file descriptor\n");
            }
        } else if libc::dup2(src, target) < 0 {
            child_fail(c"dup2: bad file descriptor\n");
        }
    }

    libc::execv(argv.shell.as_ptr(), argv.ptrs.as_ptr());
    libc::_exit(EXEC_FAILURE_EXIT_CODE)
}

unsafe fn child_fail(msg: &CStr) -> ! {
    let bytes = msg.to_bytes();
    libc::write(
        libc::STDERR_FILENO,
        bytes.as_ptr() as *const libc::c_void,
        bytes.len(),
    );
    libc::_exit(DUP_FAILURE_EXIT_CODE)
}

/// 指定した子の終了を待ち、生の wait status を返す（EINTR のみ再試行）
fn wait_for(pid: pid_t) -> Result<c_int> {
    let mut status: c_int = 0;
    loop {
        let ret = unsafe { libc::waitpid(pid, &mut status, 0) };
        if ret == pid {
            return Ok(status);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(Error::os("waitpid", err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdio_fds_default_is_inherit() {
        assert_eq!(StdioFds::default(), StdioFds::new(0, 1, 2));
    }

    #[test]
    fn test_executor_default_shell() {
        assert_eq!(Executor::new().shell(), Path::new("/bin/sh"));
        assert_eq!(
            Executor::with_shell("/bin/bash").shell(),
            Path::new("/bin/bash")
        );
    }

    #[test]
    fn test_shell_argv_layout() {
        let argv = ShellArgv::new(Path::new("/bin/sh"), &ShellCommand::from("exit 3")).unwrap();
        let args: Vec<&[u8]> = argv.ptrs[..3]
            .iter()
            .map(|&p| unsafe { CStr::from_ptr(p) }.to_bytes())
            .collect();
        assert_eq!(args, vec![&b"/bin/sh"[..], b"-c", b"exit 3"]);
        assert!(argv.ptrs[3].is_null());
    }

    #[test]
    fn test_nul_in_command_fails_before_fork() {
        let err = Executor::new()
            .execute(&ShellCommand::from("true\0"), StdioFds::inherit())
            .unwrap_err();
        assert!(err.is_usage());
    }
}
