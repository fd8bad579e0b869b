//! # ページネーション情報
//!
//! 一覧系エンドポイントのレスポンスに付与されるページ番号ベースのページネーション。

use serde::{Deserialize, Serialize};

/// ページネーション情報
///
/// 記述用のデータであり、次ページの自動取得は行わない。
/// 次ページが必要な場合、呼び出し側が [`next_page`](Self::next_page) を使って
/// 改めてリクエストする。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "current_page": 1,
///   "per_page": 25,
///   "total": 120,
///   "total_pages": 5,
///   "has_next": true,
///   "has_prev": false,
///   "next_url": "https://api.lawmatics.com/v1/contacts?page=2"
/// }
/// ```
///
/// API によって欠落するフィールドがあるため、すべてデフォルト値を許容する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationInfo {
   pub current_page: u32,
   pub per_page:     u32,
   pub total:        u64,
   pub total_pages:  u32,
   pub has_next:     bool,
   pub has_prev:     bool,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub next_url:     Option<String>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub prev_url:     Option<String>,
}

impl PaginationInfo {
   /// 次ページ番号（次ページがなければ `None`）
   pub fn next_page(&self) -> Option<u32> {
      self.has_next.then_some(self.current_page.saturating_add(1))
   }

   /// 前ページ番号（前ページがなければ `None`）
   pub fn prev_page(&self) -> Option<u32> {
      (self.has_prev && self.current_page > 1).then_some(self.current_page.saturating_sub(1))
   }

   /// 最終ページかどうか
   pub fn is_last_page(&self) -> bool {
      !self.has_next
   }
}
