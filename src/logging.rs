//! # 日志模块
//!
//! 显式构造的日志输出：控制台部分交给 `env_logger` (支持 `RUST_LOG`)，
//! 可选的日志文件按 `时间 - 级别 - 消息` 的格式追加写入。
//! 模块加载时不做任何配置，由 `main` 调用 [`init`] 安装，
//! 并在退出前调用 [`LogHandle::shutdown`] 刷新缓冲。

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use env_logger::Builder;
use log::{LevelFilter, Log, Metadata, Record};

type SharedFile = Arc<Mutex<BufWriter<File>>>;

/// 日志配置，来自命令行参数。
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 控制台与文件共用的默认级别；控制台级别可被 `RUST_LOG` 覆盖。
    pub level: LevelFilter,
    /// 额外写入的日志文件 (追加模式)。
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            file: None,
        }
    }
}

/// 根据 `-v` 出现的次数和 `-q` 选择日志级别。
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 日志文件中的一行。
pub fn format_line(record: &Record) -> String {
    format!(
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        record.level(),
        record.args()
    )
}

/// 同时写控制台和日志文件的 [`Log`] 实现。
struct Sink {
    console: env_logger::Logger,
    file: Option<SharedFile>,
    file_level: LevelFilter,
}

impl Sink {
    fn new(config: &LogConfig) -> Result<Self> {
        let console = Builder::new()
            .filter_level(config.level)
            .parse_default_env()
            .format_target(false)
            .build();

        let file = match &config.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| {
                        format!(
                            "Unable to open log file: {}",
                            path.to_string_lossy().red().bold()
                        )
                    })?;
                Some(Arc::new(Mutex::new(BufWriter::new(file))))
            }
            None => None,
        };

        Ok(Self {
            console,
            file,
            file_level: config.level,
        })
    }

    fn max_level(&self) -> LevelFilter {
        match self.file {
            Some(_) => self.console.filter().max(self.file_level),
            None => self.console.filter(),
        }
    }
}

impl Log for Sink {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
            || (self.file.is_some() && metadata.level() <= self.file_level)
    }

    fn log(&self, record: &Record) {
        if self.console.matches(record) {
            self.console.log(record);
        }
        if record.level() > self.file_level {
            return;
        }
        if let Some(file) = &self.file {
            if let Ok(mut writer) = file.lock() {
                // 日志写入失败时无处可报，直接忽略
                let _ = writeln!(writer, "{}", format_line(record));
            }
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.flush();
            }
        }
    }
}

/// 已安装日志输出的句柄，负责退出时的刷新。
#[must_use = "call shutdown() to flush the log file before exiting"]
pub struct LogHandle {
    file: Option<SharedFile>,
}

impl LogHandle {
    /// 刷新控制台与日志文件缓冲。
    pub fn shutdown(self) {
        log::logger().flush();
        if let Some(file) = self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.flush();
            }
        }
    }
}

/// 按配置构造并安装全局日志输出。
///
/// # Errors
///
/// 无法打开日志文件，或进程中已安装过日志输出时返回错误。
pub fn init(config: &LogConfig) -> Result<LogHandle> {
    let sink = Sink::new(config)?;
    let max_level = sink.max_level();
    let file = sink.file.clone();

    log::set_boxed_logger(Box::new(sink)).context("A logger has already been installed")?;
    log::set_max_level(max_level);

    Ok(LogHandle { file })
}
