use crate::options::FeedOptions;
use crate::state::{FeedPhase, FeedSnapshot};
use domain::{CapacityAggregate, ViewerContext};
use hr_aggregator::CapacityAggregator;
use hr_events::EventBus;
use hr_telemetry::record_forced_refresh;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// 单个查看者的容量视图。
pub struct CapacityFeed {
    aggregator: CapacityAggregator,
    ctx: ViewerContext,
    options: FeedOptions,
    state: watch::Sender<FeedSnapshot>,
    in_flight: AtomicUsize,
    unmounted: AtomicBool,
}

impl CapacityFeed {
    pub fn new(aggregator: CapacityAggregator, ctx: ViewerContext, options: FeedOptions) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::initial());
        Self {
            aggregator,
            ctx,
            options,
            state,
            in_flight: AtomicUsize::new(0),
            unmounted: AtomicBool::new(false),
        }
    }

    pub fn viewer(&self) -> &ViewerContext {
        &self.ctx
    }

    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    pub fn aggregator(&self) -> &CapacityAggregator {
        &self.aggregator
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted.load(Ordering::Acquire)
    }

    /// 加载一次；缓存在 `cache_timeout` 内新鲜时直接使用缓存。
    pub async fn load(self: &Arc<Self>) -> FeedSnapshot {
        self.run_pass(false).await
    }

    /// 跳过缓存，强制聚合一次。
    pub async fn refresh_capacity_data(self: &Arc<Self>) -> FeedSnapshot {
        record_forced_refresh();
        self.run_pass(true).await
    }

    /// 挂载：启动定时刷新并监听变更总线。返回的句柄被丢弃时自动卸载。
    pub fn mount(self: &Arc<Self>, bus: &EventBus) -> FeedHandle {
        if self.is_unmounted() {
            warn!(target: "hr.feed", role = %self.ctx.role, "mount after unmount ignored");
            return FeedHandle {
                feed: Arc::clone(self),
                task: None,
            };
        }
        let mut events = bus.subscribe();
        let feed = Arc::clone(self);
        let task = tokio::spawn(async move {
            info!(
                target: "hr.feed",
                role = %feed.ctx.role,
                user_id = %feed.ctx.user_id,
                refresh_interval_ms = feed.options.refresh_interval.as_millis() as u64,
                "feed mounted"
            );
            if feed.options.auto_fetch {
                feed.load().await;
            }

            let mut ticker = interval(feed.options.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 首次 tick 立即完成，跳过
            ticker.tick().await;

            let mut listening = true;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!(target: "hr.feed", role = %feed.ctx.role, "interval tick");
                        feed.load().await;
                    }
                    received = events.recv(), if listening => match received {
                        Ok(event) if event.kind.is_relevant() => {
                            info!(
                                target: "hr.feed",
                                role = %feed.ctx.role,
                                kind = %event.kind.as_str(),
                                "change signal, refreshing"
                            );
                            feed.refresh_capacity_data().await;
                        }
                        Ok(event) => {
                            debug!(target: "hr.feed", kind = %event.kind.as_str(), "ignored change signal");
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(target: "hr.feed", skipped, "change signals lagged, refreshing");
                            feed.refresh_capacity_data().await;
                        }
                        Err(RecvError::Closed) => {
                            listening = false;
                        }
                    },
                }
            }
        });
        FeedHandle {
            feed: Arc::clone(self),
            task: Some(task),
        }
    }

    async fn run_pass(self: &Arc<Self>, force: bool) -> FeedSnapshot {
        if self.is_unmounted() {
            return self.snapshot();
        }
        self.begin_pass();
        let feed = Arc::clone(self);
        // 聚合在独立任务中执行，卸载时中止挂载任务不会取消它
        let pass = tokio::spawn(async move {
            let aggregate = if force {
                feed.aggregator.aggregate_fresh(&feed.ctx).await
            } else {
                feed.aggregator
                    .aggregate_within(&feed.ctx, feed.options.cache_timeout)
                    .await
            };
            feed.finish_pass(aggregate);
        });
        if let Err(err) = pass.await {
            warn!(target: "hr.feed", role = %self.ctx.role, "aggregation task failed: {}", err);
            self.finish_pass(Arc::new(
                self.snapshot().capacity.with_error(err.to_string()),
            ));
        }
        self.snapshot()
    }

    fn begin_pass(&self) {
        let previous = self.in_flight.fetch_add(1, Ordering::AcqRel);
        if previous > 0 {
            debug!(
                target: "hr.feed",
                role = %self.ctx.role,
                in_flight = previous + 1,
                "aggregation already in flight"
            );
        }
        self.state.send_modify(|snapshot| {
            snapshot.phase = FeedPhase::Loading;
            snapshot.is_refreshing = true;
        });
    }

    fn finish_pass(&self, aggregate: Arc<CapacityAggregate>) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
        if self.is_unmounted() {
            debug!(target: "hr.feed", role = %self.ctx.role, "discarding result after unmount");
            return;
        }
        let (phase, aggregate) = match aggregate.error.clone() {
            // 缓存只有一个槽位，失败时以本视图已展示的数据为准
            Some(message) => {
                let previous = self.state.borrow().capacity.clone();
                let degraded = if previous.is_loading {
                    aggregate
                } else {
                    Arc::new(previous.with_error(message))
                };
                (FeedPhase::Error, degraded)
            }
            None => (FeedPhase::Ready, aggregate),
        };
        let capacity = if self.options.include_employee_details {
            aggregate
        } else {
            Arc::new(aggregate.without_employees())
        };
        self.state.send_modify(|snapshot| {
            snapshot.phase = phase;
            snapshot.is_refreshing = remaining > 0;
            snapshot.capacity = capacity;
        });
    }

    fn mark_unmounted(&self) {
        if self.unmounted.swap(true, Ordering::AcqRel) {
            return;
        }
        self.state.send_modify(|snapshot| {
            snapshot.phase = FeedPhase::Unmounted;
            snapshot.is_refreshing = false;
        });
        info!(target: "hr.feed", role = %self.ctx.role, "feed unmounted");
    }
}

/// 挂载句柄。
pub struct FeedHandle {
    feed: Arc<CapacityFeed>,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn feed(&self) -> &Arc<CapacityFeed> {
        &self.feed
    }

    /// 卸载：停止定时器与事件监听，之后视图状态不再变化。
    pub fn unmount(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.feed.mark_unmounted();
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
