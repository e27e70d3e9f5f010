// ==========================================
// 供应商问卷系统 - 应用层
// ==========================================
// 职责: 应用级共享状态（CLI 入口使用）
// ==========================================

pub mod state;

pub use state::AppState;
