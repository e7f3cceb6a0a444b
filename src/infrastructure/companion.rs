//! 伴随任务执行器 - 基础设施层
//!
//! 在一个耗时操作执行期间，让另一个线程同时运行"伴随"过程（例如终端进度提示），
//! 不影响操作本身的结果。

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

/// 交给伴随过程的存活标志
///
/// 只由主任务写入一次（操作结束时），伴随线程只读。
#[derive(Debug, Clone)]
pub struct IsAlive(Arc<AtomicBool>);

impl IsAlive {
    /// 操作是否仍在进行
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// 离开作用域时把标志置为 false，保证 `work` 被取消时伴随线程也会退出
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 同时运行 `work` 和 `companion`
///
/// - `companion` 在独立的阻塞线程中运行，需要自己轮询 [`IsAlive`] 来决定何时退出
/// - 返回前一定会通知伴随线程停止并等待它结束
/// - `work` 的结果原样返回；伴随线程的 panic 只记录日志，不影响结果
pub async fn run_with_companion<F, C>(work: F, companion: C) -> F::Output
where
    F: Future,
    C: FnOnce(IsAlive) + Send + 'static,
{
    let alive = Arc::new(AtomicBool::new(true));
    let guard = StopOnDrop(alive.clone());

    let is_alive = IsAlive(alive);
    let handle = tokio::task::spawn_blocking(move || companion(is_alive));

    let output = work.await;

    drop(guard);
    if let Err(e) = handle.await {
        warn!("伴随线程异常退出: {}", e);
    }

    output
}
