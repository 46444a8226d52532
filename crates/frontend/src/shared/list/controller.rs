//! Контроллер списка: фильтры, пагинация, загрузка, мутации
//!
//! One controller instance backs one list view. All state changes happen
//! synchronously inside the trigger methods; the network part is returned as a
//! [`FetchTask`] for the view layer to spawn. Every fetch gets a new
//! generation number and only the response of the latest generation is ever
//! applied, so the visible state always belongs to the last *triggered*
//! request, whatever order responses arrive in.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::api_error::ErrorSurface;
use contracts::shared::paged::PageParams;
use contracts::shared::record_id::RowId;
use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::shared::http::{
    record_path, ApiError, CancelToken, HttpClient, Method, RequestOptions,
};

use super::config::ListConfig;
use super::filter::{FilterSet, FilterValue};
use super::kpi::{compute_kpis, Kpi};
use super::page::{self, PageState};
use super::reconcile::{decrement_total, remove_by_id, replace_or_append, upsert_front};
use super::row::ListRow;
use super::search::apply_search_fallback;
use super::unwrap::{unwrap_list, unwrap_record};

/// Network half of a trigger. Must be spawned (or awaited) to complete.
pub type FetchTask = LocalBoxFuture<'static, ()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failure,
}

struct ListState<R> {
    filters: FilterSet,
    page: PageState,
    rows: Vec<R>,
    total: Option<u64>,
    /// Rows the last applied response carried, decodable or not.
    returned: usize,
    server_filtered: bool,
    phase: FetchPhase,
    error: Option<ApiError>,
    generation: u64,
    in_flight: Option<CancelToken>,
}

struct Inner<R> {
    client: Rc<dyn HttpClient>,
    config: ListConfig,
    state: RefCell<ListState<R>>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

/// Render-ready copy of the controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<R> {
    pub rows: Vec<R>,
    pub total: u64,
    pub reported_total: Option<u64>,
    pub page: u32,
    pub limit: u32,
    pub phase: FetchPhase,
    pub loading: bool,
    pub error: Option<ErrorSurface>,
    pub has_next: bool,
    pub has_previous: bool,
    pub kpis: Vec<Kpi>,
}

pub struct ListController<R> {
    inner: Rc<Inner<R>>,
}

impl<R> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: ListRow> ListController<R> {
    /// One-time setup. Defaults from the config are applied to the filter set;
    /// nothing is fetched until [`ListController::load`] is spawned.
    pub fn configure(client: Rc<dyn HttpClient>, config: ListConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut filters = FilterSet::new(&config.schema);
        for (key, value) in &config.defaults {
            filters.set(key, value.clone());
        }

        let state = ListState {
            filters,
            page: PageState::new(config.default_limit),
            rows: Vec::new(),
            total: None,
            returned: 0,
            server_filtered: false,
            phase: FetchPhase::Idle,
            error: None,
            generation: 0,
            in_flight: None,
        };

        Ok(Self {
            inner: Rc::new(Inner {
                client,
                config,
                state: RefCell::new(state),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &ListConfig {
        &self.inner.config
    }

    /// Registers a callback fired after every state change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Первичная загрузка при монтировании
    pub fn load(&self) -> FetchTask {
        self.begin_fetch()
    }

    /// Re-issue the fetch with the current filters and page.
    pub fn refresh(&self) -> FetchTask {
        self.begin_fetch()
    }

    /// Updates one filter and resets to page 1. Unknown keys are ignored and
    /// return `None`.
    pub fn set_filter(&self, key: &str, value: impl Into<FilterValue>) -> Option<FetchTask> {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.filters.set(key, value.into()) {
                log::debug!(
                    "{}: ignoring unknown filter '{}'",
                    self.inner.config.resource_path,
                    key
                );
                return None;
            }
            state.page.page = 1;
        }
        Some(self.begin_fetch())
    }

    /// Pages are 1-based; there is no upper bound on the client.
    pub fn set_page(&self, page: u32) -> Result<FetchTask, ApiError> {
        if page == 0 {
            return Err(ApiError::validation("Page must be at least 1"));
        }
        self.inner.state.borrow_mut().page.page = page;
        Ok(self.begin_fetch())
    }

    pub fn set_limit(&self, limit: u32) -> Result<FetchTask, ApiError> {
        if !self.inner.config.page_sizes.contains(&limit) {
            return Err(ApiError::validation(format!(
                "Page size {} is not one of {:?}",
                limit, self.inner.config.page_sizes
            )));
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.page.limit = limit;
            state.page.page = 1;
        }
        Ok(self.begin_fetch())
    }

    /// `None` on the last known page.
    pub fn next_page(&self) -> Option<FetchTask> {
        if !self.has_next_page() {
            return None;
        }
        self.set_page(self.page() + 1).ok()
    }

    pub fn previous_page(&self) -> Option<FetchTask> {
        if !self.has_previous_page() {
            return None;
        }
        self.set_page(self.page() - 1).ok()
    }

    fn begin_fetch(&self) -> FetchTask {
        let (generation, query, token, superseded) = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.phase = FetchPhase::Loading;
            state.error = None;

            let token = CancelToken::new();
            let superseded = state.in_flight.replace(token.clone());
            (state.generation, self.query_of(&state), token, superseded)
        };

        // Best-effort abort of the request this one replaces
        if let Some(previous) = superseded {
            previous.cancel();
        }

        log::debug!(
            "{}: fetch #{} {:?}",
            self.inner.config.resource_path,
            generation,
            query
        );
        self.notify();

        let this = self.clone();
        Box::pin(async move {
            let path = this.inner.config.resource_path.clone();
            let options = RequestOptions::get(query).cancel_with(token);
            let result = this.inner.client.request(&path, options).await;
            this.apply(generation, result);
        })
    }

    /// Applies a response if it belongs to the latest generation.
    fn apply(&self, generation: u64, result: Result<Value, ApiError>) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if generation != state.generation {
                log::debug!(
                    "{}: dropping stale response #{} (latest #{})",
                    self.inner.config.resource_path,
                    generation,
                    state.generation
                );
                return false;
            }
            state.in_flight = None;

            match result {
                Ok(body) => {
                    let fetched = unwrap_list::<R>(&body);
                    state.rows = fetched.rows;
                    state.total = fetched.total;
                    state.returned = fetched.returned;
                    state.server_filtered = fetched.server_filtered;
                    state.phase = FetchPhase::Success;
                }
                Err(err) => {
                    log::warn!("{}: fetch failed: {}", self.inner.config.resource_path, err);
                    state.rows.clear();
                    state.total = Some(0);
                    state.returned = 0;
                    state.server_filtered = false;
                    state.error = Some(err);
                    state.phase = FetchPhase::Failure;
                }
            }
        }
        self.notify();
        true
    }

    fn query_of(&self, state: &ListState<R>) -> Vec<(String, String)> {
        let mut query = state.filters.to_query(&self.inner.config.schema);
        query.extend(
            PageParams {
                page: state.page.page,
                limit: state.page.limit,
            }
            .to_pairs(),
        );
        query
    }

    // ------------------------------------------------------------------
    // Mutations: confirm, then reconcile
    // ------------------------------------------------------------------

    /// `POST {resource}`. The returned row is upserted by id or prepended.
    /// Returns `Ok(None)` when the server only acknowledged.
    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Option<R>, ApiError> {
        let body = match self.prepare_payload(payload).and_then(|b| self.check_required(b)) {
            Ok(body) => body,
            Err(err) => return Err(self.fail_mutation(err)),
        };

        let path = self.inner.config.resource_path.clone();
        let response = self
            .inner
            .client
            .request(&path, RequestOptions::with_body(Method::Post, Some(body)))
            .await;
        let response = match response {
            Ok(v) => v,
            Err(err) => return Err(self.fail_mutation(err)),
        };

        let Some(row) = unwrap_record::<R>(&response) else {
            log::debug!("{}: create acknowledged without a row", path);
            self.mutation_succeeded();
            return Ok(None);
        };

        {
            let mut state = self.inner.state.borrow_mut();
            if upsert_front(&mut state.rows, row.clone()) {
                if let Some(total) = state.total.as_mut() {
                    *total += 1;
                }
            }
        }
        self.mutation_succeeded();
        Ok(Some(row))
    }

    /// `PATCH {resource}/{id}`. The returned row replaces the one with the same
    /// id or is appended.
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        id: &RowId,
        payload: &P,
    ) -> Result<Option<R>, ApiError> {
        let body = match self.prepare_payload(payload) {
            Ok(body) => body,
            Err(err) => return Err(self.fail_mutation(err)),
        };

        let path = record_path(&self.inner.config.resource_path, &id.value);
        let response = self
            .inner
            .client
            .request(&path, RequestOptions::with_body(Method::Patch, Some(body)))
            .await;
        let response = match response {
            Ok(v) => v,
            Err(err) => return Err(self.fail_mutation(err)),
        };

        let Some(row) = unwrap_record::<R>(&response) else {
            log::debug!("{}: update acknowledged without a row", path);
            self.mutation_succeeded();
            return Ok(None);
        };

        replace_or_append(&mut self.inner.state.borrow_mut().rows, row.clone());
        self.mutation_succeeded();
        Ok(Some(row))
    }

    /// `DELETE {resource}/{id}`. Drops the matching row and decrements a
    /// reported total (floored at 0). When a fetch was triggered while the
    /// request was pending and the row is already gone, that fetch owns the
    /// total and it is left alone.
    pub async fn remove(&self, id: &RowId) -> Result<(), ApiError> {
        let path = record_path(&self.inner.config.resource_path, &id.value);
        let started = self.inner.state.borrow().generation;
        let response = self
            .inner
            .client
            .request(&path, RequestOptions::with_body(Method::Delete, None))
            .await;

        match response {
            Ok(_) => {}
            // 2xx с текстовым телом — сервер удаление подтвердил
            Err(ApiError::Parse { .. }) => {
                log::debug!("{}: delete confirmed with a non-JSON body", path);
            }
            Err(err) => return Err(self.fail_mutation(err)),
        }

        {
            let mut state = self.inner.state.borrow_mut();
            let removed = remove_by_id(&mut state.rows, id);
            if removed || state.generation == started {
                state.total = decrement_total(state.total);
            } else {
                log::debug!("{}: deleted row already absent after a refetch", path);
            }
        }
        self.mutation_succeeded();
        Ok(())
    }

    fn prepare_payload<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| ApiError::validation(format!("Invalid payload: {}", e)))?;
        if !body.is_object() {
            return Err(ApiError::validation("Payload must be an object"));
        }
        Ok(body)
    }

    fn check_required(&self, body: Value) -> Result<Value, ApiError> {
        let missing: Vec<&str> = self
            .inner
            .config
            .required_fields
            .iter()
            .filter(|field| match body.get(field.as_str()) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(body)
        } else {
            Err(ApiError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    fn fail_mutation(&self, err: ApiError) -> ApiError {
        log::warn!("{}: mutation failed: {}", self.inner.config.resource_path, err);
        self.inner.state.borrow_mut().error = Some(err.clone());
        self.notify();
        err
    }

    /// A fetch failure stays visible; an earlier mutation error is cleared.
    fn mutation_succeeded(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != FetchPhase::Failure {
                state.error = None;
            }
        }
        self.notify();
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    /// Rows to render. When a search term is set and the response does not
    /// look server-filtered, the client fallback drops non-matching rows.
    pub fn rows(&self) -> Vec<R> {
        let state = self.inner.state.borrow();
        match self.search_term(&state) {
            Some(term) if !state.server_filtered => {
                apply_search_fallback(&state.rows, &term, &self.inner.config.search_fields)
            }
            _ => state.rows.clone(),
        }
    }

    fn search_term(&self, state: &ListState<R>) -> Option<String> {
        let key = self.inner.config.search_key.as_deref()?;
        state.filters.get(key).and_then(FilterValue::as_text)
    }

    /// Rows exactly as the server sent them (after reconciliation).
    pub fn raw_rows(&self) -> Vec<R> {
        self.inner.state.borrow().rows.clone()
    }

    /// Reported total, or the number of fetched rows when there is none.
    pub fn total(&self) -> u64 {
        let state = self.inner.state.borrow();
        state.total.unwrap_or(state.rows.len() as u64)
    }

    pub fn reported_total(&self) -> Option<u64> {
        self.inner.state.borrow().total
    }

    pub fn server_filtered(&self) -> bool {
        self.inner.state.borrow().server_filtered
    }

    pub fn loading(&self) -> bool {
        self.phase() == FetchPhase::Loading
    }

    pub fn phase(&self) -> FetchPhase {
        self.inner.state.borrow().phase
    }

    pub fn error(&self) -> Option<ApiError> {
        self.inner.state.borrow().error.clone()
    }

    pub fn page(&self) -> u32 {
        self.inner.state.borrow().page.page
    }

    pub fn limit(&self) -> u32 {
        self.inner.state.borrow().page.limit
    }

    pub fn page_sizes(&self) -> &[u32] {
        &self.inner.config.page_sizes
    }

    pub fn filters(&self) -> FilterSet {
        self.inner.state.borrow().filters.clone()
    }

    pub fn filter(&self, key: &str) -> Option<FilterValue> {
        self.inner.state.borrow().filters.get(key).cloned()
    }

    /// Query the next fetch would send.
    pub fn query(&self) -> Vec<(String, String)> {
        let state = self.inner.state.borrow();
        self.query_of(&state)
    }

    pub fn has_next_page(&self) -> bool {
        let state = self.inner.state.borrow();
        page::has_next_page(state.page, state.total, state.returned)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page() > 1
    }

    pub fn page_count(&self) -> Option<u64> {
        let state = self.inner.state.borrow();
        page::page_count(state.page.limit, state.total)
    }

    pub fn kpis(&self) -> Vec<Kpi> {
        compute_kpis(&self.rows(), &self.inner.config.kpis)
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        let phase = self.phase();
        ListSnapshot {
            rows: self.rows(),
            total: self.total(),
            reported_total: self.reported_total(),
            page: self.page(),
            limit: self.limit(),
            phase,
            loading: phase == FetchPhase::Loading,
            error: self.error().map(|e| e.surface()),
            has_next: self.has_next_page(),
            has_previous: self.has_previous_page(),
            kpis: self.kpis(),
        }
    }
}
