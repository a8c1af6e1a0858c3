//! プロセス実行 Outbound ポート
//!
//! usecase はこの trait 経由でのみ子プロセスを起動する。

use crate::domain::{ExecutionResult, ShellCommand};
use crate::error::Error;
use crate::exec::StdioFds;

/// シェルコマンドを 0/1/2 を差し替えて実行し、終了まで待つ抽象
///
/// 実装は `procutil::adapter::UnixExecutor`（fork/exec）やテスト用のモックなど。
pub trait ProcessExecutor: Send + Sync {
    fn execute(&self, command: &ShellCommand, fds: StdioFds) -> Result<ExecutionResult, Error>;
}
