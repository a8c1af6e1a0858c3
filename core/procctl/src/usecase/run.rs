//! Run コマンドのユースケース
//!
//! 端点（パス / fd / 未指定）を fd に解決して ProcessExecutor に渡し、結果をログに残す。
//! 未指定の端点は procctl 自身の 0/1/2 をそのまま共有する。

use crate::domain::{Endpoint, RunRequest};
use crate::ports::outbound::StreamOpener;
use crate::wiring::App;
use procutil::domain::{ExecutionResult, ShellCommand};
use procutil::error::Error;
use procutil::exec::StdioFds;
use procutil::ports::outbound::{Log, LogLevel, LogRecord, ProcessExecutor};
use std::fs::File;
use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::Arc;

/// Run コマンドのユースケース
pub struct RunUseCase {
    executor: Arc<dyn ProcessExecutor>,
    opener: Arc<dyn StreamOpener>,
    logger: Arc<dyn Log>,
}

impl RunUseCase {
    pub fn new(
        executor: Arc<dyn ProcessExecutor>,
        opener: Arc<dyn StreamOpener>,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            executor,
            opener,
            logger,
        }
    }

    /// App から RunUseCase を作成する
    pub fn from_app(app: &App) -> Self {
        Self::new(
            Arc::clone(&app.executor),
            Arc::clone(&app.opener),
            Arc::clone(&app.logger),
        )
    }

    /// コマンドを実行し、子の終了まで待つ
    pub fn run(&self, req: &RunRequest) -> Result<ExecutionResult, Error> {
        // 開いたファイルは execute が戻るまで生かしておく
        let mut opened: Vec<File> = Vec::new();
        let stdin = self.resolve(&req.stdin, libc::STDIN_FILENO, false, req.append, &mut opened)?;
        let stdout = self.resolve(&req.stdout, libc::STDOUT_FILENO, true, req.append, &mut opened)?;
        let stderr = self.resolve(&req.stderr, libc::STDERR_FILENO, true, req.append, &mut opened)?;
        let fds = StdioFds::new(stdin, stdout, stderr);

        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .field("command", req.command.as_str())
                .field("stdin", stdin)
                .field("stdout", stdout)
                .field("stderr", stderr),
        );

        let result = self
            .executor
            .execute(&ShellCommand::from(req.command.as_str()), fds);
        drop(opened);

        match &result {
            Ok(r) => {
                let mut rec = LogRecord::new(LogLevel::Info, "command finished")
                    .field("pid", r.pid())
                    .field("raw_status", r.raw());
                if let Some(code) = r.exit_code() {
                    rec = rec.field("exit_code", code);
                }
                if let Some(sig) = r.term_signal() {
                    rec = rec.field("signal", sig);
                }
                self.log(rec);
            }
            Err(e) => self.log(
                LogRecord::new(LogLevel::Error, "command failed").field("error", e.to_string()),
            ),
        }
        result
    }

    fn resolve(
        &self,
        endpoint: &Endpoint,
        default_fd: RawFd,
        output: bool,
        append: bool,
        opened: &mut Vec<File>,
    ) -> Result<RawFd, Error> {
        match endpoint {
            Endpoint::Inherit => Ok(default_fd),
            Endpoint::Fd(fd) => Ok(*fd),
            Endpoint::Path(path) => {
                let file = if output {
                    self.opener.open_output(path, append)?
                } else {
                    self.opener.open_input(path)?
                };
                let fd = file.as_raw_fd();
                opened.push(file);
                Ok(fd)
            }
        }
    }

    /// ログの失敗は実行結果に影響させない
    fn log(&self, record: LogRecord) {
        let _ = self
            .logger
            .log(&record.layer("usecase").kind("process"));
    }
}
