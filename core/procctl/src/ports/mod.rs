//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: ファイルを開く・環境変数を読む trait（実行・ホスト名・ログは procutil のポートを使う）

pub mod inbound;
pub mod outbound;
