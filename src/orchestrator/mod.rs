//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 持有 HTTP 客户端与下载程序客户端
//!
//! ### `session` - 交互会话
//! - 读取用户输入，打印结果列表
//! - 调度搜索、解析与下载
//!
//! ## 层次关系
//!
//! ```text
//! app (持有资源)
//!     ↓
//! session (处理一轮轮交互)
//!     ↓
//! workflow::SearchFlow (处理单次搜索)
//!     ↓
//! services (能力层：classify / resolve / dispatch)
//!     ↓
//! clients (基础设施：HTTP / aria2c)
//! ```

pub mod app;
pub mod session;

// 重新导出主要类型
pub use app::App;
pub use session::{RoundOutcome, Session, SessionStats, VolumeChoice};
