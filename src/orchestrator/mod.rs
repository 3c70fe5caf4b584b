//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责多用户处理和资源调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<用户>)
//!     ↓
//! workflow::UserFlow (处理单个用户)
//!     ↓
//! services (能力层：assignment / writer / upload / submission)
//!     ↓
//! clients (Classroom / Drive / LLM)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有授权会话和 HTTP 客户端
//! 2. **向下依赖**：编排层 → workflow → services → clients
//! 3. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
