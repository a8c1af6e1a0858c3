//! 標準環境変数解決実装（std::env を委譲）

use crate::ports::outbound::EnvResolver;
use procutil::error::Error;
use std::env::{self, VarError};
use std::path::PathBuf;

/// JSONL ログの出力先
pub const LOG_FILE_ENV: &str = "PROCCTL_LOG_FILE";
/// run で使うシェル
pub const SHELL_ENV: &str = "PROCCTL_SHELL";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

/// env::var の結果をパスに変換する。未設定・空は None、UTF-8 でない値は Error::Env
fn non_empty_path(name: &str, value: Result<String, VarError>) -> Result<Option<PathBuf>, Error> {
    match value {
        Ok(s) if s.is_empty() => Ok(None),
        Ok(s) => Ok(Some(PathBuf::from(s))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(Error::env(format!(
            "{} is not valid UTF-8: {:?}",
            name, raw
        ))),
    }
}

impl EnvResolver for StdEnvResolver {
    fn log_file_path(&self) -> Result<Option<PathBuf>, Error> {
        non_empty_path(LOG_FILE_ENV, env::var(LOG_FILE_ENV))
    }

    fn shell(&self) -> Result<Option<PathBuf>, Error> {
        non_empty_path(SHELL_ENV, env::var(SHELL_ENV))
    }
}
