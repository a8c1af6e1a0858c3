//! シェルに渡すコマンド文字列

use std::ffi::CString;

use crate::error::{Error, Result};

/// `sh -c` に渡すコマンド文字列
///
/// 中身は解釈しない（引数分割・glob・パイプはシェルの仕事）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand(String);

impl ShellCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self(command.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// exec に渡せる C 文字列に変換する。NUL を含む文字列は exec に渡せないので拒否する。
    pub fn to_cstring(&self) -> Result<CString> {
        CString::new(self.0.as_bytes()).map_err(|_| {
            Error::invalid_argument(format!(
                "command contains an interior NUL byte: {:?}",
                self.0
            ))
        })
    }
}

impl From<&str> for ShellCommand {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ShellCommand {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
