//! エラーハンドリング
//!
//! ライブラリ全体で 1 つの `Error` を使う。CLI は `exit_code()` でプロセスの終了コードに落とす。

use std::io;
use thiserror::Error;

/// procutil のエラー型
#[derive(Debug, Error)]
pub enum Error {
    /// 引数不正（コマンド文字列の NUL、CLI の不正値など）
    #[error("{0}")]
    InvalidArgument(String),

    /// システムコールの失敗（fork / waitpid / dup2 / open など）
    #[error("{call} failed: {source}")]
    Os {
        call: &'static str,
        #[source]
        source: io::Error,
    },

    /// 権限不足によるシステムコールの失敗（sethostname の EPERM / EACCES）
    #[error("{call} failed: permission denied: {source}")]
    PermissionDenied {
        call: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("environment error: {0}")]
    Env(String),

    #[error("system error: {0}")]
    System(String),
}

/// procutil の Result 型
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// システムコール名と OS エラーから Error を作る
    pub fn os(call: &'static str, source: io::Error) -> Self {
        Error::Os { call, source }
    }

    /// 直前の errno から Error を作る（libc 呼び出し直後に使う）
    pub fn last_os_error(call: &'static str) -> Self {
        Error::os(call, io::Error::last_os_error())
    }

    /// 使い方の誤りか（main で Usage を表示する判定に使う）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }

    /// OS エラー由来なら errno を返す
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Os { source, .. } | Error::PermissionDenied { source, .. } => {
                source.raw_os_error()
            }
            _ => None,
        }
    }

    /// プロセスの終了コード（sysexits.h の値に合わせる）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::System(_) => 70,
            Error::Os { .. } => 71,
            Error::Io(_) => 74,
            Error::PermissionDenied { .. } => 77,
            Error::Env(_) => 78,
        }
    }
}
