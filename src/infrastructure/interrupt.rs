//! 用户中断标志
//!
//! Ctrl-C 只设置标志，由工作流在步骤之间检查（协作式取消）。
//! 第二次 Ctrl-C 直接以 130 退出进程。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建标志并在后台监听 Ctrl-C
    pub fn listen_ctrl_c() -> Self {
        let interrupt = Self::new();
        let flag = interrupt.clone();

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("无法监听 Ctrl-C: {}", e);
                return;
            }
            debug!("收到 Ctrl-C，将在当前步骤结束后停止");
            flag.trigger();

            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        });

        interrupt
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
