//! # GetComics CLI
//!
//! 按关键词在漫画目录站点上搜索、按年份分组展示结果，并调用外部下载程序下载的 Rust 应用程序
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 客户端与下载程序，只暴露能力
//! - `PageFetcher` - URL → HTML 的抓取能力
//! - `DownloadSink` - URL + 目录 → 下载结果
//!
//! ### ② 业务能力层（Services）
//! - `keyword` - 关键词规范化、文件夹名格式化
//! - `ResultClassifier` - 搜索结果筛选与按年份分组（含大小查询）
//! - `VolumeResolver` - 详情页分卷链接解析
//! - `DownloadDispatcher` - 有并发上限的下载分发
//!
//! ### ③ 流程层（Workflow）
//! - `SearchCtx` - 搜索上下文（关键词 + 页码 + 解析模式）
//! - `SearchFlow` - 流程编排（search → resolve → plan）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，管理资源
//! - `orchestrator/session` - 交互会话
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, FetchError};
pub use models::{AliasTable, DownloadTarget, ResolutionMode, SearchResult, VolumeLink, YearBuckets};
pub use orchestrator::App;
pub use workflow::{SearchCtx, SearchFlow};
