//! Interaction controller binding UI events to repository calls.
//!
//! # Responsibility
//! - Translate semantic host events into exactly one repository or
//!   evaluator call, then re-render.
//! - Own transient UI state: active filter, search query, drag state,
//!   sidebar visibility and the banner.
//!
//! # Invariants
//! - Delete and clear-all never run without a positive confirmation.
//! - A cancelled note prompt leaves the note untouched.
//! - Transient state is never persisted.

use crate::config::CoreConfig;
use crate::filter::{filter_tasks, CategoryFilter, ALL_FILTER};
use crate::model::task::{NewTask, TaskId};
use crate::quote::{QuoteBanner, QuoteSelector};
use crate::render::{render_list, ListView};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use log::debug;

pub type ControllerResult<T> = RepoResult<T>;

/// Source of the current calendar date.
pub type Clock = Box<dyn Fn() -> NaiveDate>;

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter a task";
pub const CONFIRM_DELETE_MESSAGE: &str = "Delete this task?";
pub const CONFIRM_CLEAR_MESSAGE: &str = "Clear all tasks?";
pub const EDIT_NOTE_MESSAGE: &str = "Edit note for this task (leave empty to remove):";

/// Blocking yes/no prompt.
pub trait ConfirmationProvider {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Blocking text prompt. `None` means the user cancelled.
pub trait TextInputProvider {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

impl<T: ConfirmationProvider + ?Sized> ConfirmationProvider for &mut T {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

impl<T: TextInputProvider + ?Sized> TextInputProvider for &mut T {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        (**self).prompt(message, default)
    }
}

/// Semantic event emitted by the presentation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Add(NewTask),
    ToggleComplete(TaskId),
    Delete(TaskId),
    EditNote(TaskId),
    ClearAll,
    SelectFilter(String),
    SearchInput(String),
    DragStart(TaskId),
    DragOver(TaskId),
    DragLeave(TaskId),
    DragEnd,
    Drop {
        dest_id: TaskId,
        /// Source id carried by the drag payload, used when no drag-start
        /// was observed.
        payload_source: Option<TaskId>,
    },
    DismissQuote,
    OpenSidebar,
    CloseSidebar,
}

/// What the host should do besides redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// State changed (or a pure view event was applied).
    Applied,
    /// A task was added; clear the text and due-date inputs.
    ClearInputs,
    /// Input was rejected; show the message to the user.
    Rejected(&'static str),
    /// The user cancelled a confirm or prompt.
    Cancelled,
    /// The event referred to nothing actionable.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub effect: Effect,
    pub view: ListView,
}

pub struct InteractionController<S, C, P>
where
    S: KeyValueStore,
    C: ConfirmationProvider,
    P: TextInputProvider,
{
    repo: TaskRepository<S>,
    confirmer: C,
    input: P,
    quotes: QuoteSelector,
    categories: Vec<String>,
    clock: Clock,
    banner: QuoteBanner,
    active_filter: CategoryFilter,
    query: String,
    drag_source: Option<TaskId>,
    drag_over: Option<TaskId>,
    sidebar_open: bool,
}

impl<S, C, P> InteractionController<S, C, P>
where
    S: KeyValueStore,
    C: ConfirmationProvider,
    P: TextInputProvider,
{
    /// Loads persisted tasks and computes the banner for the date `clock`
    /// reports. The clock is consulted again on every quote dismissal, so a
    /// session left open past midnight stamps the new day.
    pub fn start(
        store: S,
        confirmer: C,
        input: P,
        config: &CoreConfig,
        clock: impl Fn() -> NaiveDate + 'static,
    ) -> Self {
        let quotes = QuoteSelector::new(config.storage.quote_dismissed.clone());
        let banner = quotes.startup(&store, clock());
        let repo = TaskRepository::load_at(store, config.storage.tasks.clone());

        Self {
            repo,
            confirmer,
            input,
            quotes,
            categories: config.categories.clone(),
            clock: Box::new(clock),
            banner,
            active_filter: CategoryFilter::All,
            query: String::new(),
            drag_source: None,
            drag_over: None,
            sidebar_open: false,
        }
    }

    /// Applies one event and returns the re-rendered view.
    ///
    /// # Errors
    /// - Propagates store write failures; validation failures are reported
    ///   as [`Effect::Rejected`] instead.
    pub fn handle(&mut self, event: UiEvent) -> ControllerResult<Outcome> {
        let effect = match event {
            UiEvent::Add(request) => self.add(request)?,
            UiEvent::ToggleComplete(id) => applied(self.repo.toggle_complete(&id)?),
            UiEvent::Delete(id) => self.delete(&id)?,
            UiEvent::EditNote(id) => self.edit_note(&id)?,
            UiEvent::ClearAll => self.clear_all()?,
            UiEvent::SelectFilter(value) => {
                self.active_filter = CategoryFilter::parse(&value);
                self.sidebar_open = false;
                Effect::Applied
            }
            UiEvent::SearchInput(query) => {
                self.query = query;
                Effect::Applied
            }
            UiEvent::DragStart(id) => {
                self.drag_source = Some(id);
                Effect::Applied
            }
            UiEvent::DragOver(id) => {
                self.drag_over = Some(id);
                Effect::Applied
            }
            UiEvent::DragLeave(id) => {
                if self.drag_over.as_deref() == Some(id.as_str()) {
                    self.drag_over = None;
                }
                Effect::Applied
            }
            UiEvent::DragEnd => {
                self.drag_source = None;
                self.drag_over = None;
                Effect::Applied
            }
            UiEvent::Drop {
                dest_id,
                payload_source,
            } => self.drop_on(&dest_id, payload_source)?,
            UiEvent::DismissQuote => {
                let today = (self.clock)();
                self.banner = self.quotes.dismiss(self.repo.store_mut(), today)?;
                Effect::Applied
            }
            UiEvent::OpenSidebar => {
                self.sidebar_open = true;
                Effect::Applied
            }
            UiEvent::CloseSidebar => {
                self.sidebar_open = false;
                Effect::Applied
            }
        };

        debug!("event=ui_event module=controller status=ok effect={effect:?}");
        Ok(Outcome {
            effect,
            view: self.view(),
        })
    }

    /// Renders the current list under the active filter and query.
    pub fn view(&self) -> ListView {
        let visible = filter_tasks(self.repo.tasks(), &self.active_filter, &self.query);
        render_list(self.repo.tasks(), &visible)
    }

    /// Sidebar entries: the "All" sentinel followed by configured categories.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(ALL_FILTER.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    pub fn banner(&self) -> QuoteBanner {
        self.banner
    }

    pub fn active_filter(&self) -> &CategoryFilter {
        &self.active_filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn drag_over(&self) -> Option<&str> {
        self.drag_over.as_deref()
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    fn add(&mut self, request: NewTask) -> ControllerResult<Effect> {
        match self.repo.add(request) {
            Ok(_) => Ok(Effect::ClearInputs),
            Err(RepoError::Validation(_)) => Ok(Effect::Rejected(EMPTY_TEXT_MESSAGE)),
            Err(err) => Err(err),
        }
    }

    fn delete(&mut self, id: &str) -> ControllerResult<Effect> {
        if self.repo.get(id).is_none() {
            return Ok(Effect::Ignored);
        }
        if !self.confirmer.confirm(CONFIRM_DELETE_MESSAGE) {
            return Ok(Effect::Cancelled);
        }
        Ok(applied(self.repo.delete(id)?))
    }

    fn edit_note(&mut self, id: &str) -> ControllerResult<Effect> {
        let Some(task) = self.repo.get(id) else {
            return Ok(Effect::Ignored);
        };
        let Some(note) = self.input.prompt(EDIT_NOTE_MESSAGE, &task.note) else {
            return Ok(Effect::Cancelled);
        };
        Ok(applied(self.repo.set_note(id, &note)?))
    }

    fn clear_all(&mut self) -> ControllerResult<Effect> {
        if self.repo.is_empty() {
            return Ok(Effect::Ignored);
        }
        if !self.confirmer.confirm(CONFIRM_CLEAR_MESSAGE) {
            return Ok(Effect::Cancelled);
        }
        self.repo.clear_all()?;
        Ok(Effect::Applied)
    }

    fn drop_on(
        &mut self,
        dest_id: &str,
        payload_source: Option<TaskId>,
    ) -> ControllerResult<Effect> {
        let source = self.drag_source.take().or(payload_source);
        self.drag_over = None;
        let Some(source) = source else {
            return Ok(Effect::Ignored);
        };
        Ok(applied(self.repo.reorder(&source, dest_id)?))
    }
}

fn applied(changed: bool) -> Effect {
    if changed {
        Effect::Applied
    } else {
        Effect::Ignored
    }
}
