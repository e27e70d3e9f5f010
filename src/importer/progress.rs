// ==========================================
// 供应商问卷系统 - 导入进度与取消
// ==========================================
// 进度回调是"发出即忘"，回调内部失败不影响导入结果
// ==========================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ==========================================
// ProgressSink Trait
// ==========================================
// 用途: 接收 0–100 的进度百分比（单调不减，每行至少一次）
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn report(&self, percent: f64) {
        self(percent)
    }
}

/// 不关心进度时使用
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _percent: f64) {}
}

// ==========================================
// CancellationToken - 行间检查的取消标记
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
