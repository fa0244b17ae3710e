//! Timer runtime seam for time-driven view state.
//!
//! The browser shell backs this with zoon's `Task`/`Timer`; tests back it
//! with a manual clock so timing can be stepped deterministically.

use futures::future::LocalBoxFuture;
use std::future::Future;

/// Spawns cancellable tasks and produces sleep futures.
///
/// Dropping a `Handle` must cancel its task: no further polls of the task's
/// future may observably run after the drop.
pub trait TimerRuntime: Clone + 'static {
    type Handle;

    fn spawn_droppable<F>(&self, task: F) -> Self::Handle
    where
        F: Future<Output = ()> + 'static;

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

#[cfg(test)]
pub(crate) mod manual {
    use super::TimerRuntime;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::future::{FutureExt, LocalBoxFuture, RemoteHandle};
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::task::{Context, Poll, Waker};

    #[derive(Default)]
    struct Clock {
        now: Cell<u64>,
        sleepers: RefCell<Vec<(u64, Waker)>>,
    }

    impl Clock {
        fn next_due(&self) -> Option<u64> {
            self.sleepers.borrow().iter().map(|(due, _)| *due).min()
        }

        fn wake_due(&self) {
            let now = self.now.get();
            let due: Vec<Waker> = {
                let mut sleepers = self.sleepers.borrow_mut();
                let (ready, pending): (Vec<_>, Vec<_>) =
                    sleepers.drain(..).partition(|(due, _)| *due <= now);
                *sleepers = pending;
                ready.into_iter().map(|(_, waker)| waker).collect()
            };
            due.into_iter().for_each(Waker::wake);
        }
    }

    /// Runtime handed to code under test.
    #[derive(Clone)]
    pub(crate) struct ManualTimers {
        clock: Rc<Clock>,
        spawner: LocalSpawner,
    }

    /// Owns the executor and the virtual clock; time only moves on `advance`.
    pub(crate) struct ManualRuntime {
        pool: LocalPool,
        timers: ManualTimers,
    }

    impl ManualRuntime {
        pub(crate) fn new() -> Self {
            let pool = LocalPool::new();
            let timers = ManualTimers {
                clock: Rc::new(Clock::default()),
                spawner: pool.spawner(),
            };
            Self { pool, timers }
        }

        pub(crate) fn timers(&self) -> ManualTimers {
            self.timers.clone()
        }

        pub(crate) fn now(&self) -> u64 {
            self.timers.clock.now.get()
        }

        /// Run every task that can make progress at the current instant.
        pub(crate) fn run(&mut self) {
            self.pool.run_until_stalled();
        }

        /// Move time forward, stopping at every due sleep so tasks re-arm
        /// their next sleep from the instant they actually woke.
        pub(crate) fn advance(&mut self, ms: u64) {
            let clock = self.timers.clock.clone();
            let target = clock.now.get() + ms;
            self.run();
            while let Some(due) = clock.next_due().filter(|due| *due <= target) {
                clock.now.set(due.max(clock.now.get()));
                clock.wake_due();
                self.run();
            }
            clock.now.set(target);
            self.run();
        }
    }

    struct Sleep {
        due: u64,
        clock: Rc<Clock>,
    }

    impl Future for Sleep {
        type Output = ();

        fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.clock.now.get() >= self.due {
                return Poll::Ready(());
            }
            self.clock
                .sleepers
                .borrow_mut()
                .push((self.due, cx.waker().clone()));
            Poll::Pending
        }
    }

    impl TimerRuntime for ManualTimers {
        type Handle = RemoteHandle<()>;

        fn spawn_droppable<F>(&self, task: F) -> RemoteHandle<()>
        where
            F: Future<Output = ()> + 'static,
        {
            let (remote, handle) = task.remote_handle();
            self.spawner
                .spawn_local(remote)
                .expect("manual executor accepts tasks");
            handle
        }

        fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
            Sleep {
                due: self.clock.now.get() + u64::from(ms),
                clock: self.clock.clone(),
            }
            .boxed_local()
        }
    }

    #[test]
    fn test_sleep_wakes_only_when_due() {
        let mut runtime = ManualRuntime::new();
        let timers = runtime.timers();
        let fired = Rc::new(Cell::new(false));

        let _handle = timers.spawn_droppable({
            let timers = timers.clone();
            let fired = fired.clone();
            async move {
                timers.sleep(1000).await;
                fired.set(true);
            }
        });

        runtime.advance(999);
        assert!(!fired.get());
        runtime.advance(1);
        assert!(fired.get());
        assert_eq!(runtime.now(), 1000);
    }

    #[test]
    fn test_dropping_handle_cancels_task() {
        let mut runtime = ManualRuntime::new();
        let timers = runtime.timers();
        let fired = Rc::new(Cell::new(false));

        let handle = timers.spawn_droppable({
            let timers = timers.clone();
            let fired = fired.clone();
            async move {
                timers.sleep(10).await;
                fired.set(true);
            }
        });
        runtime.run();
        drop(handle);
        runtime.advance(50);
        assert!(!fired.get());
    }
}
