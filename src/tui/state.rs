use std::collections::VecDeque;
use std::sync::Arc;

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::app::AppMessage;
use crate::catalog::Catalog;
use crate::models::{ArtistRecord, QueryState};
use crate::query;

use super::controller::AppController;

const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Search,
    Groups,
    Results,
    Logs,
}

impl FocusArea {
    pub fn next(self) -> Self {
        match self {
            FocusArea::Search => FocusArea::Groups,
            FocusArea::Groups => FocusArea::Results,
            FocusArea::Results => FocusArea::Logs,
            FocusArea::Logs => FocusArea::Search,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FocusArea::Search => FocusArea::Logs,
            FocusArea::Groups => FocusArea::Search,
            FocusArea::Results => FocusArea::Groups,
            FocusArea::Logs => FocusArea::Results,
        }
    }
}

pub struct App {
    pub controller: AppController,
    pub msg_rx: UnboundedReceiver<AppMessage>,
    pub catalog: Option<Arc<Catalog>>,
    pub query: QueryState,
    pub view: Vec<ArtistRecord>,
    pub results_state: ListState,
    pub logs: VecDeque<String>,
    pub focus: FocusArea,
    pub loading: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: AppController, msg_rx: UnboundedReceiver<AppMessage>) -> Self {
        let query = QueryState::with_sort(controller.config().initial_sort());
        let mut results_state = ListState::default();
        results_state.select(None);

        Self {
            controller,
            msg_rx,
            catalog: None,
            query,
            view: Vec::new(),
            results_state,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            focus: FocusArea::Search,
            loading: false,
            should_quit: false,
        }
    }

    /// Kicks off the one-shot dataset load. The first frames render an empty
    /// list until [`AppMessage::CatalogLoaded`] arrives.
    pub fn bootstrap(&mut self) {
        if let Some(catalog) = self.controller.loaded_catalog() {
            self.install_catalog(catalog);
            return;
        }
        self.loading = true;
        self.push_log(format!(
            "Loading {}...",
            self.controller.config().dataset().describe()
        ));
        self.controller.load_catalog();
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::CatalogLoaded(catalog) => {
                self.loading = false;
                for row in catalog.rejected() {
                    self.push_log(format!("Invalid row {}: {}", row.line_number, row.raw));
                }
                self.push_log(format!(
                    "Loaded {} artists in {} groups",
                    catalog.records().len(),
                    catalog.groups().len()
                ));
                self.install_catalog(catalog);
            }
            AppMessage::LoadFailed(reason) => {
                self.loading = false;
                self.push_log(reason);
            }
        }
    }

    fn install_catalog(&mut self, catalog: Arc<Catalog>) {
        // A filter carried over from before the load may name a group that
        // does not exist in this dataset.
        if let Some(group) = &self.query.group_filter {
            if !catalog.groups().contains(group) {
                self.query.group_filter = None;
            }
        }
        self.catalog = Some(catalog);
        self.refresh_view();
    }

    pub fn groups(&self) -> &[String] {
        self.catalog
            .as_deref()
            .map(Catalog::groups)
            .unwrap_or_default()
    }

    /// Recomputes the visible list from the current query parameters.
    pub fn refresh_view(&mut self) {
        let records = self
            .catalog
            .as_deref()
            .map(Catalog::records)
            .unwrap_or_default();
        self.view = query::query_state(records, &self.query);

        if self.view.is_empty() {
            self.results_state.select(None);
        } else {
            let idx = self
                .results_state
                .selected()
                .unwrap_or(0)
                .min(self.view.len() - 1);
            self.results_state.select(Some(idx));
        }
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.query.search_text.push(ch);
        self.refresh_view();
    }

    pub fn pop_search_char(&mut self) {
        if self.query.search_text.pop().is_some() {
            self.refresh_view();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.query.search_text.is_empty() {
            self.query.search_text.clear();
            self.refresh_view();
        }
    }

    pub fn cycle_sort(&mut self) {
        self.query.sort_key = self.query.sort_key.next();
        info!(sort = %self.query.sort_key, "sort key changed");
        self.refresh_view();
    }

    /// Tab index into `["All", groups..]`.
    pub fn group_tab_index(&self) -> usize {
        match &self.query.group_filter {
            None => 0,
            Some(group) => self
                .groups()
                .iter()
                .position(|candidate| candidate == group)
                .map_or(0, |idx| idx + 1),
        }
    }

    pub fn move_group_tab(&mut self, delta: isize) {
        let tabs = self.groups().len() + 1;
        let current = self.group_tab_index();
        let step = delta.unsigned_abs();
        let target = if delta < 0 {
            current.saturating_sub(step)
        } else {
            (current + step).min(tabs - 1)
        };
        self.select_group_tab(target);
    }

    pub fn select_group_tab(&mut self, index: usize) {
        let filter = match index {
            0 => None,
            idx => self.groups().get(idx - 1).cloned(),
        };
        if filter != self.query.group_filter {
            self.query.group_filter = filter;
            self.refresh_view();
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_focus(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn push_log<S: Into<String>>(&mut self, message: S) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(message.into());
    }

    pub fn selected_artist(&self) -> Option<&ArtistRecord> {
        self.results_state
            .selected()
            .and_then(|idx| self.view.get(idx))
    }

    pub fn move_result_selection(&mut self, delta: isize) {
        let len = self.view.len();
        update_list_state(&mut self.results_state, len, delta);
    }
}

fn update_list_state(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }

    let current = state.selected().unwrap_or(0);
    let step = delta.unsigned_abs();
    let new_index = if delta < 0 {
        current.saturating_sub(step)
    } else {
        (current + step).min(len - 1)
    };
    state.select(Some(new_index));
}
