//! Progress narrator: cosmetic phase labels while the model call is
//! outstanding.
//!
//! The underlying request is a single opaque call with no intermediate
//! progress signal, so the narrator fabricates one: twelve fixed phase
//! labels on a fixed cadence, a percentage advancing in equal increments
//! capped below completion, snapped to 100 when the real result arrives.
//! The cadence is tick-count driven and independent of the call's actual
//! duration.
//!
//! Lifecycle follows the shutdown-channel pattern used elsewhere in the
//! codebase: spawn a task, signal it over a oneshot, and treat a dropped
//! handle as abandonment (all pending timers released, no further
//! updates).

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// One label per protocol execution step, in execution order.
pub const PHASE_LABELS: [&str; 12] = [
    "Step 1: 初始化 Web3 投研元架构 V7.0...",
    "Step 2: 运行信息采集协议 V4.0 (身份锁定)...",
    "Step 3: 执行信息验证协议 V6.0 (六层级扫描)...",
    "Step 4: 白皮书对齐 WAP V3.0 (偏差与承诺核对)...",
    "Step 5: 技术实现能力评估 Tech V3.0 (代码审计)...",
    "Step 6: 叙事周期协议 NCP V7.0 (阶段与策略)...",
    "Step 7: 代币经济解析 TIP V5.0 (需求侧分级)...",
    "Step 8: 链上行为监控 Monitor V3.0 (资金流向)...",
    "Step 9: 风险识别协议 Risk V6.0 (五维模型)...",
    "Step 10: 经济模型压力测试 Stress V3.0 (死亡螺旋)...",
    "Step 11: 项目评分协议 Score V3.0 (反脆弱计算)...",
    "Step 12: 最终输出协议 Output V3.0 (生成报告)...",
];

/// Label emitted when the pipeline completes and progress snaps to 100.
pub const COMPLETION_LABEL: &str = "报告生成完毕";

/// Progress never advances past this value until the real result arrives.
pub const PROGRESS_CEILING: f32 = 95.0;

/// One cosmetic progress tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// 0–95 while narrating, exactly 100 on completion.
    pub percent: f32,
    pub label: &'static str,
    pub done: bool,
}

impl Default for ProgressUpdate {
    fn default() -> Self {
        Self {
            percent: 0.0,
            label: "",
            done: false,
        }
    }
}

impl ProgressUpdate {
    fn completed() -> Self {
        Self {
            percent: 100.0,
            label: COMPLETION_LABEL,
            done: true,
        }
    }
}

enum Stop {
    Finish,
}

/// Handle to a running narrator task.
///
/// `finish` snaps the indicator to 100 and stops the task; dropping the
/// handle (or calling `abandon`) cancels all pending timers without a
/// final update. Either way no update is emitted afterwards.
pub struct ProgressNarrator {
    updates: watch::Receiver<ProgressUpdate>,
    stop_tx: Option<oneshot::Sender<Stop>>,
    task: JoinHandle<()>,
}

impl ProgressNarrator {
    /// Spawn the narrator with the given step cadence.
    pub fn spawn(step: Duration) -> Self {
        let (tx, rx) = watch::channel(ProgressUpdate::default());
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(narrate(tx, stop_rx, step));
        Self {
            updates: rx,
            stop_tx: Some(stop_tx),
            task,
        }
    }

    /// Receiver for progress updates; clone freely.
    pub fn subscribe(&self) -> watch::Receiver<ProgressUpdate> {
        self.updates.clone()
    }

    /// The real result arrived: emit the final 100% update and stop.
    pub async fn finish(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(Stop::Finish);
        }
        let _ = (&mut self.task).await;
    }

    /// The flow was abandoned: release all pending timers, emit nothing.
    pub async fn abandon(mut self) {
        // Dropping the sender resolves the task's stop future with an
        // error, which exits without a final update.
        self.stop_tx.take();
        let _ = (&mut self.task).await;
    }
}

impl Drop for ProgressNarrator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn narrate(
    tx: watch::Sender<ProgressUpdate>,
    mut stop_rx: oneshot::Receiver<Stop>,
    step: Duration,
) {
    let mut interval = tokio::time::interval(step);
    // The first tick of a tokio interval fires immediately; consume it so
    // the first label lands one cadence after spawn.
    interval.tick().await;

    let increment = 100.0 / PHASE_LABELS.len() as f32;
    let mut percent = 0.0f32;
    let mut step_index = 0usize;

    loop {
        tokio::select! {
            result = &mut stop_rx => {
                if let Ok(Stop::Finish) = result {
                    let _ = tx.send(ProgressUpdate::completed());
                }
                // Channel closed without a signal: abandoned. Exit with
                // no further updates either way.
                return;
            }
            _ = interval.tick() => {
                if step_index < PHASE_LABELS.len() {
                    percent = (percent + increment).min(PROGRESS_CEILING);
                    let _ = tx.send(ProgressUpdate {
                        percent,
                        label: PHASE_LABELS[step_index],
                        done: false,
                    });
                    step_index += 1;
                }
                // Labels exhausted: hold at the ceiling until finish or
                // abandon.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn labels_advance_in_order() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();

        for expected in PHASE_LABELS.iter().take(3) {
            rx.changed().await.unwrap();
            assert_eq!(rx.borrow().label, *expected);
        }
        narrator.abandon().await;
    }

    #[tokio::test(start_paused = true)]
    async fn percent_advances_in_equal_increments() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();

        rx.changed().await.unwrap();
        let first = rx.borrow().percent;
        assert!((first - 100.0 / 12.0).abs() < 0.01);

        rx.changed().await.unwrap();
        let second = rx.borrow().percent;
        assert!((second - first - 100.0 / 12.0).abs() < 0.01);
        narrator.abandon().await;
    }

    #[tokio::test(start_paused = true)]
    async fn percent_caps_at_ceiling_after_all_steps() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();

        let mut last = 0.0;
        for _ in 0..PHASE_LABELS.len() {
            rx.changed().await.unwrap();
            last = rx.borrow().percent;
        }
        assert_eq!(last, PROGRESS_CEILING);
        assert_eq!(rx.borrow().label, PHASE_LABELS[11]);
        narrator.abandon().await;
    }

    #[tokio::test(start_paused = true)]
    async fn finish_snaps_to_one_hundred() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();

        rx.changed().await.unwrap();
        narrator.finish().await;

        rx.changed().await.unwrap();
        let update = rx.borrow().clone();
        assert_eq!(update.percent, 100.0);
        assert_eq!(update.label, COMPLETION_LABEL);
        assert!(update.done);
    }

    #[tokio::test(start_paused = true)]
    async fn finish_before_first_tick_still_completes() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();
        narrator.finish().await;

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().percent, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_emits_no_final_update() {
        let narrator = ProgressNarrator::spawn(STEP);
        let mut rx = narrator.subscribe();

        rx.changed().await.unwrap();
        let before = rx.borrow().clone();
        narrator.abandon().await;

        // The task is gone; the channel closes with no completed update.
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), before);
        assert!(!rx.borrow().done);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_the_task() {
        let rx = {
            let narrator = ProgressNarrator::spawn(STEP);
            narrator.subscribe()
        };
        // Sender side is aborted; the channel eventually closes.
        let mut rx = rx;
        while rx.changed().await.is_ok() {}
        assert!(!rx.borrow().done);
    }

    #[test]
    fn twelve_labels_one_per_protocol_step() {
        assert_eq!(PHASE_LABELS.len(), 12);
        for (i, label) in PHASE_LABELS.iter().enumerate() {
            assert!(label.contains(&format!("Step {}", i + 1)));
        }
    }
}
