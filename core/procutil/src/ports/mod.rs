//! Ports & Adapters のポート定義
//!
//! - inbound: なし（procutil はライブラリのためアプリの入り口を持たない）
//! - outbound: アプリが OS（プロセス実行・ホスト名・ログ）に依頼するための trait

pub mod outbound;
