//! Привязка контроллера к сигналам Leptos
//!
//! The controller stays framework-agnostic; this wrapper bumps a version signal
//! on every change so reactive closures that read through it re-run.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::controller::{FetchTask, ListController, ListSnapshot};
use super::filter::FilterValue;
use super::row::ListRow;

pub struct ListResource<R> {
    controller: ListController<R>,
    version: RwSignal<u64>,
}

impl<R> Clone for ListResource<R> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            version: self.version,
        }
    }
}

impl<R: ListRow> ListResource<R> {
    /// Wraps the controller and starts the initial load.
    pub fn mount(controller: ListController<R>) -> Self {
        let version = RwSignal::new(0u64);
        controller.subscribe(move || {
            version.try_update(|v| *v += 1);
        });
        let resource = Self {
            controller,
            version,
        };
        resource.run(resource.controller.load());
        resource
    }

    fn run(&self, task: FetchTask) {
        spawn_local(task);
    }

    pub fn controller(&self) -> &ListController<R> {
        &self.controller
    }

    /// Tracked read: call inside a reactive closure.
    pub fn snapshot(&self) -> ListSnapshot<R> {
        self.version.track();
        self.controller.snapshot()
    }

    pub fn set_filter(&self, key: &str, value: impl Into<FilterValue>) {
        if let Some(task) = self.controller.set_filter(key, value) {
            self.run(task);
        }
    }

    pub fn set_page(&self, page: u32) {
        match self.controller.set_page(page) {
            Ok(task) => self.run(task),
            Err(e) => log::warn!("{}", e),
        }
    }

    pub fn set_limit(&self, limit: u32) {
        match self.controller.set_limit(limit) {
            Ok(task) => self.run(task),
            Err(e) => log::warn!("{}", e),
        }
    }

    pub fn refresh(&self) {
        self.run(self.controller.refresh());
    }

    pub fn next_page(&self) {
        if let Some(task) = self.controller.next_page() {
            self.run(task);
        }
    }

    pub fn previous_page(&self) {
        if let Some(task) = self.controller.previous_page() {
            self.run(task);
        }
    }
}
