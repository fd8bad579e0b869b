//! # LawMatics 共有ユーティリティ
//!
//! LawMatics API クライアント全体で使用される共通の型とユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ワイヤーフォーマット（JSON エンベロープ）の型はここに集約する
//! - HTTP クライアントへの依存は持たない（`reqwest` は client クレートのみ）
//! - 外部クレートへの依存は最小限に抑える

pub mod api_response;
pub mod error_response;
pub mod json;
pub mod log_fields;
pub mod observability;
pub mod pagination;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use json::JsonOptions;
pub use pagination::PaginationInfo;
