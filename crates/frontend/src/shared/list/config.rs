use crate::shared::config::ListDefaults;
use crate::shared::http::ApiError;

use super::filter::{FilterRule, FilterSchema, FilterValue};
use super::kpi::KpiSpec;
use super::page::DEFAULT_PAGE_SIZES;

/// Настройка списка: ресурс, фильтры, поиск, размеры страниц, KPI
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub resource_path: String,
    pub schema: FilterSchema,
    pub page_sizes: Vec<u32>,
    pub default_limit: u32,
    /// Filter key holding the free-text search term.
    pub search_key: Option<String>,
    /// Row fields the client-side search fallback looks at.
    pub search_fields: Vec<String>,
    /// Fields `create` checks before issuing a request.
    pub required_fields: Vec<String>,
    pub defaults: Vec<(String, FilterValue)>,
    pub kpis: Vec<(String, KpiSpec)>,
}

impl ListConfig {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            schema: FilterSchema::new(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_limit: 20,
            search_key: None,
            search_fields: Vec::new(),
            required_fields: Vec::new(),
            defaults: Vec::new(),
            kpis: Vec::new(),
        }
    }

    pub fn filter(mut self, key: impl Into<String>, rule: FilterRule) -> Self {
        self.schema.add(key, rule);
        self
    }

    /// Declares `key` as the text search filter and the row fields it covers.
    pub fn search<I, S>(mut self, key: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        if !self.schema.contains(&key) {
            self.schema.add(key.clone(), FilterRule::Text);
        }
        self.search_key = Some(key);
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.page_sizes = sizes.into();
        self
    }

    pub fn default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn default_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.defaults.push((key.into(), value.into()));
        self
    }

    pub fn kpi(mut self, label: impl Into<String>, spec: KpiSpec) -> Self {
        self.kpis.push((label.into(), spec));
        self
    }

    /// Page sizes and default limit from the client configuration.
    pub fn with_list_defaults(self, defaults: &ListDefaults) -> Self {
        self.page_sizes(defaults.page_sizes.clone())
            .default_limit(defaults.default_limit)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.resource_path.trim().is_empty() {
            return Err(ApiError::validation("Resource path is empty"));
        }
        if self.page_sizes.is_empty() || self.page_sizes.contains(&0) {
            return Err(ApiError::validation("Page sizes must be positive"));
        }
        if !self.page_sizes.contains(&self.default_limit) {
            return Err(ApiError::validation(format!(
                "Default limit {} is not one of {:?}",
                self.default_limit, self.page_sizes
            )));
        }
        if let Some((key, _)) = self.defaults.iter().find(|(k, _)| !self.schema.contains(k)) {
            return Err(ApiError::validation(format!("Unknown default filter '{}'", key)));
        }
        Ok(())
    }
}
