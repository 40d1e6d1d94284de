//! Listing screen state: one-shot fetch, presentation state and live search.
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::api::{self, UserRecord, UserSource};
use crate::error::Result;
use crate::search;

/// Message shown for any failed fetch.
pub const LOAD_ERROR: &str = "Error loading users";

/// What the listing screen renders, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation<'a> {
    Loading,
    Error(&'a str),
    Table,
}

pub struct ListingState {
    users: Vec<UserRecord>,
    search_query: String,
    loading: bool,
    error: Option<String>,
    pending: Option<Receiver<Result<Vec<UserRecord>>>>,
    pub selected_index: usize,
    pub rows_per_page: usize,
}

impl ListingState {
    /// Fresh state in the loading presentation with no fetch in flight.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            search_query: String::new(),
            loading: true,
            error: None,
            pending: None,
            selected_index: 0,
            rows_per_page: 10,
        }
    }

    /// Build the screen and start loading users from `source`.
    pub fn activate<S>(source: S) -> Self
    where
        S: UserSource + 'static,
    {
        let mut state = Self::new();
        state.load_users(source);
        state
    }

    /// Issue the single fetch for this activation.
    pub fn load_users<S>(&mut self, source: S)
    where
        S: UserSource + 'static,
    {
        self.loading = true;
        self.pending = Some(api::spawn_fetch(source));
    }

    /// Check whether the in-flight fetch has settled. Returns true if state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(crate::error::simple_error("fetch worker exited without a result"))
            }
        };
        self.pending = None;
        self.apply_load_result(result);
        true
    }

    /// Settle the load with `result`.
    pub fn apply_load_result(&mut self, result: Result<Vec<UserRecord>>) {
        match result {
            Ok(users) => {
                tracing::info!(count = users.len(), "users loaded");
                self.users = users;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading users failed");
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
        self.loading = false;
        self.clamp_selection();
    }

    pub fn presentation(&self) -> Presentation<'_> {
        if self.loading {
            Presentation::Loading
        } else if let Some(msg) = &self.error {
            Presentation::Error(msg)
        } else {
            Presentation::Table
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.clamp_selection();
    }

    /// Users matching the current query, recomputed on every call.
    pub fn filtered_view(&self) -> impl Iterator<Item = &UserRecord> {
        search::filtered_view(&self.users, &self.search_query)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_view().count()
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.filtered_len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let rpp = self.rows_per_page.max(1);
        let new_idx = self.selected_index.saturating_add(rpp);
        self.selected_index = new_idx.min(self.filtered_len().saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let rpp = self.rows_per_page.max(1);
        self.selected_index = self.selected_index.saturating_sub(rpp);
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.filtered_len().saturating_sub(1));
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}
