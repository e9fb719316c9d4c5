//! Collection configuration: which list to browse and how to page it

use crate::paginated::DEFAULT_PER_PAGE_LIMIT;
use crate::request::{QueryParams, QueryValue};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Route used when nothing else is configured
pub const DEFAULT_ROUTE: &str = "/api/v1/patient/";

/// Columns shown for the default route
pub const DEFAULT_COLUMNS: [&str; 6] = ["id", "name", "gender", "age", "phone_number", "facility"];

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionConfig {
    /// Route template, may contain `{param}` placeholders
    pub route: String,
    pub per_page: u32,
    pub initial_page: u32,
    /// Item fields rendered as table columns, in order
    pub columns: Vec<String>,
    pub hide_if_single_page: bool,
    /// Suppress warn-level logging of fetch failures
    pub silent: bool,
    /// Extra query parameters sent with every page request
    pub filters: BTreeMap<String, String>,
    pub path_params: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
            per_page: DEFAULT_PER_PAGE_LIMIT,
            initial_page: 1,
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            hide_if_single_page: true,
            silent: false,
            filters: BTreeMap::new(),
            path_params: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// `[collection]` as written in the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCollection {
    pub route: Option<String>,
    pub per_page: Option<u32>,
    pub initial_page: Option<u32>,
    pub columns: Option<Vec<String>>,
    pub hide_if_single_page: Option<bool>,
    pub silent: Option<bool>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub path_params: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl CollectionConfig {
    pub fn from_file(file: Option<FileCollection>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            route: file.route.unwrap_or(defaults.route),
            per_page: file.per_page.unwrap_or(defaults.per_page),
            initial_page: file.initial_page.unwrap_or(defaults.initial_page),
            columns: file
                .columns
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.columns),
            hide_if_single_page: file
                .hide_if_single_page
                .unwrap_or(defaults.hide_if_single_page),
            silent: file.silent.unwrap_or(defaults.silent),
            filters: file.filters,
            path_params: file.path_params,
            headers: file.headers,
        }
    }

    /// Filters as typed query values, each sent exactly as written
    pub fn query_params(&self) -> QueryParams {
        self.filters
            .iter()
            .map(|(k, v)| (k.clone(), QueryValue::parse(v)))
            .collect()
    }

    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
