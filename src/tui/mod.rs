pub mod event;
pub mod ui;

use crate::api::{ClassroomSource, FetchError};
use crate::render::{render_assignments, render_courses, DisplayList};
use ratatui::widgets::ListState as RListState;
use tokio::sync::mpsc;

// ─── Triggers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Courses,
    Assignments,
}

impl Trigger {
    pub const ALL: [Trigger; 2] = [Trigger::Courses, Trigger::Assignments];

    pub fn title(&self) -> &'static str {
        match self {
            Trigger::Courses => "Courses",
            Trigger::Assignments => "Assignments",
        }
    }

    pub fn error_text(&self) -> &'static str {
        match self {
            Trigger::Courses => "Error loading courses",
            Trigger::Assignments => "Error loading assignments",
        }
    }

    pub fn other(&self) -> Trigger {
        match self {
            Trigger::Courses => Trigger::Assignments,
            Trigger::Assignments => Trigger::Courses,
        }
    }
}

// ─── View state ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading(Trigger),
    Rendered(Trigger),
    Errored(Trigger),
}

/// A finished fetch-and-render, sent back from a spawned task.
struct Outcome {
    trigger: Trigger,
    result: Result<DisplayList, FetchError>,
}

/// Tracks the cursor over the display list plus a persistent ratatui scroll
/// offset.
pub struct ListState {
    pub inner: RListState,
    pub selected: usize,
    pub len: usize,
}

impl ListState {
    pub fn new() -> Self {
        let mut inner = RListState::default();
        inner.select(Some(0));
        Self { inner, selected: 0, len: 0 }
    }

    /// Move down — clamped at the last item (no wrap-around).
    pub fn select_next(&mut self) {
        if self.len > 0 && self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    /// Move up — clamped at the first item (no wrap-around).
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Point at a fresh list of `len` items, starting from the top.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
        self.inner = RListState::default();
        self.inner.select(Some(0));
    }
}

// ─── Controller ─────────────────────────────────────────────────────────────

/// Owns the display list and everything that decides what goes in it.
pub struct ViewController<S: ClassroomSource> {
    source: S,
    pub running: bool,
    pub state: ViewState,
    /// Trigger most recently activated; highlighted in the navbar.
    pub active: Trigger,
    display: DisplayList,
    pub list_state: ListState,
    pub status_message: String,
    // Incremented each frame; drives the spinner and the backdrop.
    pub frame_count: u64,
    /// Triggers whose background fetch has not reported back yet.
    in_flight: Vec<Trigger>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl<S: ClassroomSource> ViewController<S> {
    pub fn new(source: S) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            source,
            running: true,
            state: ViewState::Idle,
            active: Trigger::Courses,
            display: DisplayList::default(),
            list_state: ListState::new(),
            status_message: "Press c for courses or a for assignments.".into(),
            frame_count: 0,
            in_flight: Vec::new(),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Fetch, render and swap in one go. Used by print mode and tests; the
    /// TUI goes through [`Self::trigger`] so the event loop stays live.
    pub async fn activate(&mut self, trigger: Trigger) {
        self.begin(trigger);
        let result = load(&self.source, trigger).await;
        self.apply(trigger, result);
    }

    /// Start a background fetch for `trigger` and return immediately.
    /// Earlier fetches still in flight are not cancelled; whichever finishes
    /// last decides what is shown.
    pub fn trigger(&mut self, trigger: Trigger) {
        self.begin(trigger);
        self.in_flight.push(trigger);

        let source = self.source.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = load(&source, trigger).await;
            let _ = tx.send(Outcome { trigger, result });
        });
    }

    /// Apply every finished background fetch, oldest first. Returns `true`
    /// when the display changed. While other fetches are still out the view
    /// stays in `Loading`.
    pub fn poll_results(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if let Some(pos) = self.in_flight.iter().position(|t| *t == outcome.trigger) {
                self.in_flight.remove(pos);
            }
            self.apply(outcome.trigger, outcome.result);
            changed = true;
        }
        if changed {
            if let Some(&pending) = self.in_flight.last() {
                self.state = ViewState::Loading(pending);
                self.status_message = format!("Loading {}…", pending.title().to_lowercase());
            }
        }
        changed
    }

    fn begin(&mut self, trigger: Trigger) {
        tracing::info!(trigger = trigger.title(), "trigger activated");
        self.active = trigger;
        self.state = ViewState::Loading(trigger);
        self.status_message = format!("Loading {}…", trigger.title().to_lowercase());
    }

    fn apply(&mut self, trigger: Trigger, result: Result<DisplayList, FetchError>) {
        match result {
            Ok(list) => {
                tracing::info!(trigger = trigger.title(), items = list.len(), "rendered");
                self.status_message = format!("{} loaded.", trigger.title());
                self.state = ViewState::Rendered(trigger);
                self.replace_display(list);
            }
            Err(e) => {
                tracing::error!(
                    trigger = trigger.title(),
                    status = e.status(),
                    "fetch failed: {e}"
                );
                self.status_message = format!("{}: {e}", trigger.error_text());
                self.state = ViewState::Errored(trigger);
                self.replace_display(DisplayList::error(trigger.error_text()));
            }
        }
    }

    fn replace_display(&mut self, list: DisplayList) {
        self.list_state.reset(list.len());
        self.display = list;
    }
}

async fn load<S: ClassroomSource>(
    source: &S,
    trigger: Trigger,
) -> Result<DisplayList, FetchError> {
    match trigger {
        Trigger::Courses => {
            let courses = source.fetch_courses().await?;
            Ok(render_courses(&courses))
        }
        Trigger::Assignments => {
            let groups = source.fetch_assignments().await?;
            Ok(render_assignments(&groups))
        }
    }
}
