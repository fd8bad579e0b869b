//! # 構造化ログのフィールド定数
//!
//! ディスパッチャが出力するログの `error.category` / `error.kind` の値。
//! ドット記法のフィールド名は JSON 出力でフラットなキーになり、
//! `jq 'select(.["error.kind"] == "rate_limit")'` のように絞り込める。

/// エラーカテゴリ
pub mod category {
   /// 上流 API が返したエラー（HTTP ステータス由来）
   pub const EXTERNAL_SERVICE: &str = "external_service";
   /// ローカルで発生したエラー（通信・シリアライズ）
   pub const CLIENT: &str = "client";
}

/// エラー種別
pub mod kind {
   pub const AUTHENTICATION: &str = "authentication";
   pub const NOT_FOUND: &str = "not_found";
   pub const RATE_LIMIT: &str = "rate_limit";
   pub const API: &str = "api";
   pub const TRANSPORT: &str = "transport";
   pub const SERIALIZATION: &str = "serialization";
   pub const DESERIALIZATION: &str = "deserialization";
   pub const CANCELLED: &str = "cancelled";
}
