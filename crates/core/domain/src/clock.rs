//! 时钟抽象。
//!
//! 缓存过期判定与 "今天" 判定都通过注入的时钟完成，测试可替换为 `ManualClock`。

use chrono::{Local, NaiveDate, Utc};
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    /// 当前时间（Unix 毫秒）。
    fn now_ms(&self) -> i64;

    /// 本地日历日的今天。
    fn today(&self) -> NaiveDate;
}

/// 系统时钟。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 手动时钟（用于测试）。
pub struct ManualClock {
    now_ms: AtomicI64,
    today: RwLock<NaiveDate>,
}

impl ManualClock {
    pub fn new(now_ms: i64, today: NaiveDate) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
            today: RwLock::new(today),
        }
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set_today(&self, today: NaiveDate) {
        match self.today.write() {
            Ok(mut guard) => *guard = today,
            Err(poisoned) => *poisoned.into_inner() = today,
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn today(&self) -> NaiveDate {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
