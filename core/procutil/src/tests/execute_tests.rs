use crate::domain::{ExecutionResult, ShellCommand, TerminationStatus};
use crate::exec::{execute, Executor, StdioFds, DUP_FAILURE_EXIT_CODE, EXEC_FAILURE_EXIT_CODE};
use crate::stdio::{system, Redirects};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::os::unix::io::AsRawFd;

fn devnull_read() -> File {
    File::open("/dev/null").unwrap()
}

fn devnull_write() -> File {
    OpenOptions::new().write(true).open("/dev/null").unwrap()
}

fn read_back(file: &mut File) -> String {
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut s = String::new();
    file.read_to_string(&mut s).unwrap();
    s
}

/// 子が回収済みなら waitpid は ECHILD で失敗する
fn assert_reaped(pid: u32) {
    let mut status = 0;
    let ret = unsafe { libc::waitpid(pid as libc::pid_t, &mut status, libc::WNOHANG) };
    assert_eq!(ret, -1, "child {} is still waitable (zombie)", pid);
    assert_eq!(
        std::io::Error::last_os_error().raw_os_error(),
        Some(libc::ECHILD)
    );
}

#[test]
fn test_true_exits_normally() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let result = execute("true", i.as_raw_fd(), o.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert!(result.pid() > 0);
    assert!(result.exited());
    assert_eq!(result.exit_code(), Some(0));
    assert!(result.success());
    assert!(!result.signaled());
    assert_reaped(result.pid());
}

#[test]
fn test_ls_with_discarded_output() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let result = execute("ls -l", i.as_raw_fd(), o.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert!(result.pid() > 0);
    assert_eq!(result.exit_code(), Some(0));
}

#[test]
fn test_specific_exit_code() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let result = execute("exit 7", i.as_raw_fd(), o.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert_eq!(result.status(), TerminationStatus::Exited { code: 7 });
    assert_eq!(result.raw() >> 8, 7);
}

#[test]
fn test_stdout_round_trip() {
    let i = devnull_read();
    let e = devnull_write();
    let mut out = tempfile::tempfile().unwrap();
    let result = execute(
        "printf 'hello\\nworld'",
        i.as_raw_fd(),
        out.as_raw_fd(),
        e.as_raw_fd(),
    )
    .unwrap();
    assert!(result.success());
    assert_eq!(read_back(&mut out), "hello\nworld");
}

#[test]
fn test_stdin_is_read_from_descriptor() {
    let mut input = tempfile::tempfile().unwrap();
    input.write_all(b"one\ntwo\nthree\n").unwrap();
    input.seek(SeekFrom::Start(0)).unwrap();
    let mut out = tempfile::tempfile().unwrap();
    let e = devnull_write();

    let result = execute("wc -l", input.as_raw_fd(), out.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert!(result.success());
    assert_eq!(read_back(&mut out).trim(), "3");
}

#[test]
fn test_stderr_goes_to_its_own_descriptor() {
    let i = devnull_read();
    let mut out = tempfile::tempfile().unwrap();
    let mut err = tempfile::tempfile().unwrap();
    let result = execute(
        "echo to-out; echo to-err 1>&2",
        i.as_raw_fd(),
        out.as_raw_fd(),
        err.as_raw_fd(),
    )
    .unwrap();
    assert!(result.success());
    assert_eq!(read_back(&mut out), "to-out\n");
    assert_eq!(read_back(&mut err), "to-err\n");
}

#[test]
fn test_shell_features_are_available() {
    let i = devnull_read();
    let e = devnull_write();
    let mut out = tempfile::tempfile().unwrap();
    let result = execute(
        "printf 'a\\nb\\n' | wc -l",
        i.as_raw_fd(),
        out.as_raw_fd(),
        e.as_raw_fd(),
    )
    .unwrap();
    assert!(result.success());
    assert_eq!(read_back(&mut out).trim(), "2");
}

#[test]
fn test_same_descriptor_for_stdout_and_stderr() {
    let i = devnull_read();
    let mut out = tempfile::tempfile().unwrap();
    let fd = out.as_raw_fd();
    let result = execute("echo a; echo b 1>&2", i.as_raw_fd(), fd, fd).unwrap();
    assert!(result.success());
    assert_eq!(read_back(&mut out), "a\nb\n");
}

#[test]
fn test_killed_by_signal() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let result = execute("kill -9 $$", i.as_raw_fd(), o.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert!(result.signaled());
    assert!(!result.exited());
    assert_eq!(result.term_signal(), Some(libc::SIGKILL));
    assert_eq!(result.exit_code(), None);
    assert_reaped(result.pid());
}

#[test]
fn test_command_not_found_folds_into_exit_code() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let result = execute(
        "procutil-surely-missing-command",
        i.as_raw_fd(),
        o.as_raw_fd(),
        e.as_raw_fd(),
    )
    .unwrap();
    assert_eq!(result.exit_code(), Some(127));
}

#[test]
fn test_invalid_descriptor_terminates_child() {
    let (o, e) = (devnull_write(), devnull_write());
    let result = execute("true", -1, o.as_raw_fd(), e.as_raw_fd()).unwrap();
    assert_eq!(result.exit_code(), Some(DUP_FAILURE_EXIT_CODE));
    assert_reaped(result.pid());
}

#[test]
fn test_exec_failure_terminates_child() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    let executor = Executor::with_shell("/nonexistent/procutil/sh");
    let result = executor
        .execute(
            &ShellCommand::from("true"),
            StdioFds::new(i.as_raw_fd(), o.as_raw_fd(), e.as_raw_fd()),
        )
        .unwrap();
    assert_eq!(result.exit_code(), Some(EXEC_FAILURE_EXIT_CODE));
    assert_reaped(result.pid());
}

#[test]
fn test_caller_descriptors_stay_open() {
    let i = devnull_read();
    let e = devnull_write();
    let mut out = tempfile::tempfile().unwrap();
    execute("echo first", i.as_raw_fd(), out.as_raw_fd(), e.as_raw_fd()).unwrap();

    for fd in [i.as_raw_fd(), out.as_raw_fd(), e.as_raw_fd()] {
        assert!(unsafe { libc::fcntl(fd, libc::F_GETFD) } >= 0, "fd {} was closed", fd);
    }
    out.write_all(b"second\n").unwrap();
    assert_eq!(read_back(&mut out), "first\nsecond\n");
}

#[test]
fn test_sequential_calls_leave_no_zombies() {
    let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
    for n in 0..5 {
        let result = execute(
            &format!("exit {}", n),
            i.as_raw_fd(),
            o.as_raw_fd(),
            e.as_raw_fd(),
        )
        .unwrap();
        assert_eq!(result.exit_code(), Some(n));
        assert_reaped(result.pid());
    }
}

#[test]
fn test_concurrent_calls_leave_no_zombies() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let (i, o, e) = (devnull_read(), devnull_write(), devnull_write());
                execute(
                    &format!("exit {}", n + 10),
                    i.as_raw_fd(),
                    o.as_raw_fd(),
                    e.as_raw_fd(),
                )
                .unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result.exit_code(), Some(n as i32 + 10));
        assert_reaped(result.pid());
    }
}

#[test]
fn test_system_with_redirects() {
    let i = devnull_read();
    let mut out = tempfile::tempfile().unwrap();
    let redirects = Redirects::new().stdin(&i).stdout(&out).stderr_fd(out.as_raw_fd());
    let result = system("echo via-system; exit 3", &redirects).unwrap();
    assert_eq!(result.exit_code(), Some(3));
    assert_eq!(read_back(&mut out), "via-system\n");
}

/// fork した子で body を実行し、その戻り値を子の終了コードとして返す
///
/// 子自身の 0/1/2 を付け替えるので、テストハーネスの標準入出力には触れない。
/// execute は子の中で確保するが、glibc / musl は fork 時に malloc のロックを整えるので使える。
fn in_forked_child(body: impl FnOnce() -> i32) -> i32 {
    let pid = unsafe { libc::fork() };
    assert!(pid >= 0, "fork failed");
    if pid == 0 {
        let code = body();
        unsafe { libc::_exit(code) }
    }
    let mut status = 0;
    let ret = unsafe { libc::waitpid(pid, &mut status, 0) };
    assert_eq!(ret, pid);
    assert!(libc::WIFEXITED(status));
    libc::WEXITSTATUS(status)
}

fn exit_code_of(result: crate::error::Result<ExecutionResult>) -> i32 {
    match result {
        Ok(r) if r.exit_code() == Some(0) => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

#[test]
fn test_standard_fds_passed_as_is_survive_exec() {
    let i = devnull_read();
    let mut out = tempfile::tempfile().unwrap();
    let code = in_forked_child(|| unsafe {
        if libc::dup2(i.as_raw_fd(), 0) < 0 || libc::dup2(out.as_raw_fd(), 1) < 0 {
            return 3;
        }
        // CLOEXEC が残っていれば exec で閉じられ、echo は書けない
        if libc::fcntl(1, libc::F_SETFD, libc::FD_CLOEXEC) < 0 {
            return 4;
        }
        exit_code_of(execute("echo hi", 0, 1, 2))
    });
    assert_eq!(code, 0);
    assert_eq!(read_back(&mut out), "hi\n");
}

#[test]
fn test_stdout_given_as_fd_zero_lands_in_stdout() {
    let i = devnull_read();
    let mut out = tempfile::tempfile().unwrap();
    let code = in_forked_child(|| unsafe {
        if libc::dup2(out.as_raw_fd(), 0) < 0 {
            return 3;
        }
        exit_code_of(execute("echo hi", i.as_raw_fd(), 0, 2))
    });
    assert_eq!(code, 0);
    assert_eq!(read_back(&mut out), "hi\n");
}

#[test]
fn test_cross_swapped_stdin_and_stdout() {
    let mut input = tempfile::tempfile().unwrap();
    input.write_all(b"abc\n").unwrap();
    input.seek(SeekFrom::Start(0)).unwrap();
    let mut out = tempfile::tempfile().unwrap();
    let code = in_forked_child(|| unsafe {
        if libc::dup2(out.as_raw_fd(), 0) < 0 || libc::dup2(input.as_raw_fd(), 1) < 0 {
            return 3;
        }
        exit_code_of(execute("cat", 1, 0, 2))
    });
    assert_eq!(code, 0);
    assert_eq!(read_back(&mut out), "abc\n");
}
