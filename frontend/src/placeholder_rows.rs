use shared::{PlaceholderDecision, PlaceholderScheduler, TimerRuntime};
use futures::future::{FutureExt, LocalBoxFuture};
use zoon::*;

use crate::facet_store::FacetStore;

/// Browser timers: zoon tasks are cancelled when their handle is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoonTimers;

impl TimerRuntime for ZoonTimers {
    type Handle = TaskHandle;

    fn spawn_droppable<F>(&self, task: F) -> TaskHandle
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        Task::start_droppable(task)
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Timer::sleep(ms).boxed_local()
    }
}

/// Placeholder rows for one facet display region.
///
/// The scheduler lives inside `task`; dropping `PlaceholderRows` drops the
/// task, the scheduler and with it every timer the region owns.
pub struct PlaceholderRows {
    decision: Mutable<PlaceholderDecision>,
    #[allow(dead_code)]
    task: TaskHandle,
}

impl PlaceholderRows {
    pub fn new(store: &FacetStore) -> Self {
        let decision = Mutable::new(PlaceholderDecision::Hidden);
        let eligibility = store.placeholder_eligibility_signal();
        let task = Task::start_droppable({
            let decision = decision.clone();
            async move {
                let mut scheduler = PlaceholderScheduler::with_listener(ZoonTimers, {
                    let decision = decision.clone();
                    move |next| decision.set_neq(next)
                });
                eligibility
                    .for_each(move |eligible| {
                        scheduler.set_eligible(eligible);
                        async {}
                    })
                    .await;
            }
        });
        Self { decision, task }
    }

    pub fn decision_signal(&self) -> impl Signal<Item = PlaceholderDecision> + use<> {
        self.decision.signal()
    }
}
