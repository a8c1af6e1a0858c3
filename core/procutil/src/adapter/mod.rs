//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみプロセス・ホスト名・ログに触れる。
//! 実装はここの標準実装かテスト用のモックを注入する。

pub mod file_json_log;
#[cfg(unix)]
pub mod unix;

pub use file_json_log::{FileJsonLog, NoopLog};
#[cfg(unix)]
pub use unix::{UnixExecutor, UnixHostname};
