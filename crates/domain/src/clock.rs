//! # Clock（時刻プロバイダ）
//!
//! 認証情報の有効期限判定で `Utc::now()` を直接呼ばず、
//! テストで任意の時刻を注入できるようにするための抽象化。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// システム時刻を返す実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返す実装
///
/// 有効期限の境界値テストで使用する。
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}

#[cfg(test)]
mod tests {
   use chrono::TimeZone;

   use super::*;

   fn base_time() -> DateTime<Utc> {
      Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
   }

   #[test]
   fn test_system_clockは呼び出し前後の時刻の間を返す() {
      let before = Utc::now();
      let result = SystemClock.now();
      let after = Utc::now();

      assert!(before <= result && result <= after);
   }

   #[test]
   fn test_fixed_clockは常に同じ時刻を返す() {
      let clock = FixedClock::new(base_time());

      assert_eq!(clock.now(), base_time());
      assert_eq!(clock.now(), clock.now());
   }
}
