//! procctl コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、match でディスパッチする。

use std::os::unix::io::RawFd;
use std::path::PathBuf;

/// 子プロセスの標準入出力 1 本分の指定
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// procctl 自身の 0/1/2 をそのまま渡す
    #[default]
    Inherit,
    /// パスを開いて渡す
    Path(PathBuf),
    /// 既に開いている fd を渡す
    Fd(RawFd),
}

/// `run` サブコマンドの入力
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunRequest {
    pub command: String,
    pub stdin: Endpoint,
    pub stdout: Endpoint,
    pub stderr: Endpoint,
    /// stdout / stderr のファイルを追記で開く
    pub append: bool,
    /// 終了状態の行を stderr に出さない
    pub quiet: bool,
}

/// procctl のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示
    Help,

    /// シェルコマンドを実行して終了を待つ
    Run(RunRequest),

    /// ホスト名の表示（None）または変更（Some）
    Hostname { name: Option<String> },

    /// 未知のコマンド（エラー用）
    Unknown(String),
}
