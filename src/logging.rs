// ==========================================
// 供应商问卷系统 - 日志初始化
// ==========================================
// 职责: 安装 tracing 订阅器（文本或 JSON 行）
// 约束: 日志一律写 stderr；stdout 只留给命令结果（含 --json）
// 级别: RUST_LOG 优先，缺省 info
// ==========================================

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人读文本（带 target 与行号）
    #[default]
    Text,
    /// 每条事件一行 JSON，便于被采集
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("未知日志格式: {}（可选 text / json）", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// 安装全局订阅器
///
/// ```no_run
/// use questionnaire_import::logging::{self, LogFormat};
/// logging::init(LogFormat::Json);
/// ```
pub fn init(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_LEVEL))
        .with_writer(std::io::stderr)
        .with_line_number(true);

    match format {
        LogFormat::Text => builder.with_target(true).init(),
        LogFormat::Json => builder.json().flatten_event(true).init(),
    }
}

/// 测试用：debug 级别，输出交给测试框架捕获；可重复调用
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Text, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
    }
}
