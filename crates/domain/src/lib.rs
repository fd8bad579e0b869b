//! # LawMatics ドメイン層
//!
//! API クライアントが扱う純粋な値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - ネットワーク・ファイル I/O には一切依存しない
//! - 時刻は [`clock::Clock`] 経由で取得し、テストで固定時刻を注入できるようにする
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`credentials`] - アクセストークン等の認証情報

pub mod clock;
pub mod credentials;

pub use credentials::{Credentials, TokenResponse};

/// Debug 出力でマスクする値の表記
pub const REDACTED: &str = "[REDACTED]";
