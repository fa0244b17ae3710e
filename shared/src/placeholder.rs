//! Placeholder (skeleton) rows shown while a facet loads.
//!
//! Two pieces live here:
//!
//! - the classifier, a pure function deciding from a facet's lifecycle state
//!   and data presence whether skeleton rows are wanted at all
//! - [`PlaceholderScheduler`], which turns that boolean into a row count over
//!   time: nothing during the entry delay, then a count rotating through
//!   3, 5 and 7 once per tick

use std::cell::RefCell;
use std::rc::Rc;

use crate::facet::FacetLifecycleState;
use crate::timer::TimerRuntime;

/// Row counts cycled through while placeholders are visible.
pub const PLACEHOLDER_ROW_COUNTS: [usize; 3] = [3, 5, 7];

/// Delay before the first placeholder row appears.
pub const ENTRY_DELAY_MS: u32 = 1000;

/// Interval between row count changes.
pub const CYCLE_TICK_MS: u32 = 1000;

// ===== CLASSIFIER =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPresence {
    Absent,
    Empty,
    Present,
}

impl DataPresence {
    pub fn of<T>(data: Option<&[T]>) -> Self {
        match data {
            None => Self::Absent,
            Some([]) => Self::Empty,
            Some(_) => Self::Present,
        }
    }
}

/// Whether a facet in `state` with the given data should show skeleton rows.
pub fn should_show_placeholders<T>(state: FacetLifecycleState, data: Option<&[T]>) -> bool {
    placeholders_for(state, DataPresence::of(data))
}

pub fn placeholders_for(state: FacetLifecycleState, presence: DataPresence) -> bool {
    match state {
        // Initial load or loading from scratch; real rows always win.
        FacetLifecycleState::Stale | FacetLifecycleState::Fetching => {
            presence != DataPresence::Present
        }
        // Partial data is the best answer available.
        FacetLifecycleState::Partial => false,
        FacetLifecycleState::Loaded | FacetLifecycleState::Error => false,
    }
}

/// Classifier over a raw state tag. Unrecognized tags never show placeholders.
pub fn should_show_placeholders_for_tag<T>(tag: &str, data: Option<&[T]>) -> bool {
    tag.parse::<FacetLifecycleState>()
        .is_ok_and(|state| should_show_placeholders(state, data))
}

// ===== DECISION =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderDecision {
    #[default]
    Hidden,
    Visible { rows: usize },
}

impl PlaceholderDecision {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    pub fn row_count(self) -> usize {
        match self {
            Self::Hidden => 0,
            Self::Visible { rows } => rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Not showing anything.
    Idle,
    /// Eligible, waiting out the entry delay.
    Pending,
    /// Rotating the row count.
    Cycling,
}

// ===== SCHEDULER =====

struct CycleState {
    phase: SchedulerPhase,
    index: usize,
    /// Incremented on every start and stop; a timer task only acts while
    /// the episode it was spawned for is still current.
    episode: u64,
}

impl CycleState {
    fn decision(&self) -> PlaceholderDecision {
        match self.phase {
            SchedulerPhase::Cycling => PlaceholderDecision::Visible {
                rows: PLACEHOLDER_ROW_COUNTS[self.index],
            },
            SchedulerPhase::Idle | SchedulerPhase::Pending => PlaceholderDecision::Hidden,
        }
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut(PlaceholderDecision)>>>;

/// Per-region placeholder row scheduler.
///
/// Owns at most one timer task at a time. Turning eligibility off, or
/// dropping the scheduler, drops that task's handle before anything else
/// happens, so no tick from an earlier episode can land afterwards.
pub struct PlaceholderScheduler<R: TimerRuntime> {
    runtime: R,
    cycle: Rc<RefCell<CycleState>>,
    listener: Option<Listener>,
    timer: Option<R::Handle>,
}

impl<R: TimerRuntime> PlaceholderScheduler<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            cycle: Rc::new(RefCell::new(CycleState {
                phase: SchedulerPhase::Idle,
                index: 0,
                episode: 0,
            })),
            listener: None,
            timer: None,
        }
    }

    /// Create a scheduler that reports every decision change to `listener`.
    pub fn with_listener(runtime: R, listener: impl FnMut(PlaceholderDecision) + 'static) -> Self {
        let mut scheduler = Self::new(runtime);
        scheduler.listener = Some(Rc::new(RefCell::new(Box::new(listener))));
        scheduler
    }

    /// Re-evaluate from the store's current state and data.
    pub fn update<T>(&mut self, state: FacetLifecycleState, data: Option<&[T]>) {
        self.set_eligible(should_show_placeholders(state, data));
    }

    pub fn set_eligible(&mut self, eligible: bool) {
        match (eligible, self.timer.is_some()) {
            // Already pending or cycling.
            (true, true) => {}
            (true, false) => self.start(),
            (false, _) => self.stop(),
        }
    }

    pub fn decision(&self) -> PlaceholderDecision {
        self.cycle.borrow().decision()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.cycle.borrow().phase
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle.borrow().index
    }

    fn start(&mut self) {
        let episode = {
            let mut cycle = self.cycle.borrow_mut();
            cycle.phase = SchedulerPhase::Pending;
            cycle.index = 0;
            cycle.episode += 1;
            cycle.episode
        };

        let runtime = self.runtime.clone();
        let cycle = self.cycle.clone();
        let listener = self.listener.clone();

        self.timer = Some(self.runtime.spawn_droppable(async move {
            runtime.sleep(ENTRY_DELAY_MS).await;
            let entered = {
                let mut state = cycle.borrow_mut();
                if state.episode == episode {
                    state.phase = SchedulerPhase::Cycling;
                    state.index = 0;
                    Some(state.decision())
                } else {
                    None
                }
            };
            let Some(decision) = entered else { return };
            emit(&listener, decision);

            loop {
                runtime.sleep(CYCLE_TICK_MS).await;
                let ticked = {
                    let mut state = cycle.borrow_mut();
                    if state.episode == episode {
                        state.index = (state.index + 1) % PLACEHOLDER_ROW_COUNTS.len();
                        Some(state.decision())
                    } else {
                        None
                    }
                };
                let Some(decision) = ticked else { return };
                emit(&listener, decision);
            }
        }));
    }

    fn stop(&mut self) {
        // Cancel first, then reset.
        self.timer = None;
        let was_visible = {
            let mut cycle = self.cycle.borrow_mut();
            let was_visible = cycle.phase == SchedulerPhase::Cycling;
            cycle.phase = SchedulerPhase::Idle;
            cycle.index = 0;
            cycle.episode += 1;
            was_visible
        };
        if was_visible {
            emit(&self.listener, PlaceholderDecision::Hidden);
        }
    }
}

impl<R: TimerRuntime> Drop for PlaceholderScheduler<R> {
    fn drop(&mut self) {
        self.timer = None;
        self.cycle.borrow_mut().episode += 1;
    }
}

fn emit(listener: &Option<Listener>, decision: PlaceholderDecision) {
    if let Some(listener) = listener {
        let mut listener = listener.borrow_mut();
        (*listener)(decision);
    }
}
