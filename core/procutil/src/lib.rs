//! procutil: 標準入出力を差し替えたシェルコマンド実行とホスト名変更
//!
//! - [`execute`]: fork した子の 0/1/2 を指定 fd に dup2 し、`sh -c` で実行して終了を待つ
//! - [`set_hostname`]: sethostname(2) を呼び、失敗はエラーとして返す
//! - [`stdio`]: 未指定の端点を 0/1/2 に解決するヘルパーと、自プロセスの /dev/null 付け替え
//!
//! コアはログを出さず、再試行もしない。

/// エラーハンドリング
pub mod error;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// ドメイン型（コマンド・終了状態）
#[cfg(unix)]
pub mod domain;

/// fork/exec による実行
#[cfg(unix)]
pub mod exec;

/// ホスト名の変更
#[cfg(unix)]
pub mod hostname;

#[cfg(unix)]
pub mod stdio;

#[cfg(all(test, unix))]
mod tests;

pub use error::{Error, Result};

#[cfg(unix)]
pub use domain::{ExecutionResult, ShellCommand, TerminationStatus};
#[cfg(unix)]
pub use exec::{execute, Executor, StdioFds};
#[cfg(unix)]
pub use hostname::{hostname, set_hostname};
#[cfg(unix)]
pub use stdio::{reopen_null, system, Redirects};
