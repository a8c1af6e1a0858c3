//! Outbound ポート: アプリが外界（プロセス実行・ホスト名・ログ）を使うための trait

#[cfg(unix)]
pub mod executor;
pub mod hostname;
pub mod log;

#[cfg(unix)]
pub use executor::ProcessExecutor;
pub use hostname::HostnameSetter;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
