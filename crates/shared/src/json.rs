//! # JSON シリアライズ設定
//!
//! リクエストボディのシリアライズ方針を値として表現する。
//! プロセス全体の共有設定は持たず、クライアント生成時に明示的に渡す。
//!
//! フィールド名の snake_case 化と列挙型の文字列化は型側の serde 属性
//! （`#[serde(rename_all = "snake_case")]`）で表現し、この型は実行時に
//! 切り替えが必要な方針だけを扱う。

use serde_json::Value;

/// リクエストボディのシリアライズ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
   /// `null` のオブジェクトフィールドを出力から除外する
   pub omit_nulls: bool,
}

impl Default for JsonOptions {
   fn default() -> Self {
      Self { omit_nulls: true }
   }
}

impl JsonOptions {
   /// 変換済みの JSON 値に設定を適用する
   pub fn apply(&self, value: &mut Value) {
      if self.omit_nulls {
         strip_nulls(value);
      }
   }
}

/// オブジェクトの `null` フィールドを再帰的に取り除く
///
/// 配列要素の `null` は位置に意味があるため残す。
fn strip_nulls(value: &mut Value) {
   match value {
      Value::Object(map) => {
         map.retain(|_, v| !v.is_null());
         map.values_mut().for_each(strip_nulls);
      }
      Value::Array(items) => items.iter_mut().for_each(strip_nulls),
      _ => {}
   }
}
