//! The application state and the listing engines it is built from.
//!
//! [`Model`] is owned by the UI loop. Every update consumes the current model and
//! returns the next one; nothing else holds on to a copy.

pub mod pagination;
pub mod search;
pub mod table;

use crate::core::{
    catalog::{AuthMethod, Category, Operation, OperationKind, Provider, Service},
    AppError, ApprovalAction, FunctionStatus, InvokeResult, Item, PipelineStatus, View,
};

use self::{pagination::Pagination, search::SearchState};

pub const DEFAULT_LAMBDA_PAYLOAD: &str = "{}";

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How key presses should be read for the current model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Command,
    /// Manual entry or a search query.
    Text,
    /// The Lambda payload editor.
    Payload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub current_view: View,
    /// Where Error and Help views return to.
    pub return_view: Option<View>,

    pub selected_provider: Option<Provider>,
    pub selected_auth_method: Option<AuthMethod>,
    pub aws_profile: String,
    pub aws_region: String,
    pub profiles: Vec<String>,
    pub preferred_profile: Option<String>,
    pub preferred_region: Option<String>,

    pub selected_service: Option<Service>,
    pub selected_category: Option<Category>,
    pub selected_operation: Option<Operation>,

    pub selected_function: Option<FunctionStatus>,
    pub selected_pipeline: Option<PipelineStatus>,
    pub selected_approval: Option<ApprovalAction>,

    // current page only
    pub functions: Vec<FunctionStatus>,
    pub pipelines: Vec<PipelineStatus>,
    pub approvals: Vec<ApprovalAction>,

    pub page_size: usize,
    pub pagination: Pagination<Item>,
    pub search: SearchState<Item>,
    /// Highlighted table row.
    pub cursor: usize,

    pub is_loading: bool,
    pub loading_message: String,
    pub spinner_frame: usize,

    pub err: Option<AppError>,
    pub error_message: Option<AppError>,
    pub success_message: Option<String>,

    pub manual_input: bool,
    pub text_input: String,

    pub is_execute_lambda_flow: bool,
    pub is_lambda_input_mode: bool,
    pub lambda_payload: String,
    pub lambda_result: Option<InvokeResult>,
    pub response_scroll: u16,

    pub approve_action: bool,
    pub approval_comment: String,
    pub commit_id: String,
    pub manual_commit_id: bool,

}

impl Model {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);

        Self {
            current_view: View::Providers,
            return_view: None,
            selected_provider: None,
            selected_auth_method: None,
            aws_profile: String::new(),
            aws_region: String::new(),
            profiles: Vec::new(),
            preferred_profile: None,
            preferred_region: None,
            selected_service: None,
            selected_category: None,
            selected_operation: None,
            selected_function: None,
            selected_pipeline: None,
            selected_approval: None,
            functions: Vec::new(),
            pipelines: Vec::new(),
            approvals: Vec::new(),
            page_size,
            pagination: Pagination::reset(page_size),
            search: SearchState::default(),
            cursor: 0,
            is_loading: false,
            loading_message: String::new(),
            spinner_frame: 0,
            err: None,
            error_message: None,
            success_message: None,
            manual_input: false,
            text_input: String::new(),
            is_execute_lambda_flow: false,
            is_lambda_input_mode: false,
            lambda_payload: DEFAULT_LAMBDA_PAYLOAD.to_string(),
            lambda_result: None,
            response_scroll: 0,
            approve_action: false,
            approval_comment: String::new(),
            commit_id: String::new(),
            manual_commit_id: false,
        }
    }

    pub fn with_profiles(self, profiles: Vec<String>) -> Self {
        Self { profiles, ..self }
    }

    pub fn with_preferences(self, profile: Option<String>, region: Option<String>) -> Self {
        Self {
            preferred_profile: profile,
            preferred_region: region,
            ..self
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.current_view == View::LambdaExecute && self.is_lambda_input_mode {
            InputMode::Payload
        } else if self.manual_input || (self.search.is_active && self.current_view.is_listing()) {
            InputMode::Text
        } else {
            InputMode::Command
        }
    }

    /// Switches to `view` with the first row highlighted and no inline error.
    pub fn show(self, view: View) -> Self {
        Self {
            current_view: view,
            cursor: 0,
            error_message: None,
            ..self
        }
    }

    pub fn reject(self, error: AppError) -> Self {
        Self {
            error_message: Some(error),
            ..self
        }
    }

    pub fn begin_text_input(self, initial: &str) -> Self {
        Self {
            manual_input: true,
            text_input: initial.to_string(),
            error_message: None,
            ..self
        }
    }

    pub fn operation_kind(&self) -> Option<OperationKind> {
        self.selected_operation.map(|operation| operation.kind)
    }

    pub fn is_start_pipeline_flow(&self) -> bool {
        self.operation_kind() == Some(OperationKind::StartPipeline)
    }

    /// The items pages are cut from: the search results while a query is set.
    pub fn source(&self) -> &[Item] {
        self.search.source(&self.pagination.all_items)
    }

    pub fn start_loading(self, message: &str) -> Self {
        Self {
            is_loading: true,
            loading_message: message.to_string(),
            ..self
        }
    }

    pub fn stop_loading(self) -> Self {
        Self {
            is_loading: false,
            loading_message: String::new(),
            ..self
        }
    }

    /// Installs a fetched result set as the active listing and shows page one.
    pub fn load_listing(self, items: Vec<Item>) -> Self {
        let pagination = Pagination::from_fetch(items, self.page_size);
        Self {
            pagination,
            search: SearchState::deactivate(),
            ..self
        }
        .refresh_page()
    }

    /// Recuts the visible page from the effective source.
    pub fn refresh_page(mut self) -> Self {
        let source = self.source();
        let page = self
            .pagination
            .page_slice(self.pagination.current_page, source)
            .to_vec();
        let total_items = source.len() as i64;
        let has_more_pages = self
            .pagination
            .has_more_after(self.pagination.current_page, source.len());

        self.functions = page.iter().filter_map(|i| i.as_function().cloned()).collect();
        self.pipelines = page.iter().filter_map(|i| i.as_pipeline().cloned()).collect();
        self.approvals = page.iter().filter_map(|i| i.as_approval().cloned()).collect();
        self.pagination.total_items = total_items;
        self.pagination.has_more_pages = has_more_pages;
        self.cursor = 0;
        self
    }

    pub fn next_page(self) -> Self {
        if !self.pagination.has_more_pages {
            return self;
        }
        let pagination = self.pagination.clone().advance(self.source());
        Self { pagination, ..self }.refresh_page()
    }

    pub fn previous_page(self) -> Self {
        if self.pagination.current_page <= 1 {
            return self;
        }
        let pagination = self.pagination.clone().retreat();
        Self { pagination, ..self }.refresh_page()
    }

    pub fn activate_search(self) -> Self {
        Self {
            search: SearchState::activate(),
            ..self
        }
    }

    pub fn deactivate_search(self) -> Self {
        let mut model = Self {
            search: SearchState::deactivate(),
            ..self
        };
        model.pagination = model.pagination.clone().rewind(&model.pagination.all_items);
        model.refresh_page()
    }

    pub fn set_search_query(self, query: impl Into<String>) -> Self {
        let search = self
            .search
            .clone()
            .with_query(query, &self.pagination.all_items);
        let mut model = Self { search, ..self };
        model.pagination = model.pagination.clone().rewind(model.source());
        model.refresh_page()
    }

    /// Forgets the active listing so the next visit fetches again.
    pub fn reset_listing(self) -> Self {
        Self {
            pagination: Pagination::reset(self.page_size),
            search: SearchState::deactivate(),
            functions: Vec::new(),
            pipelines: Vec::new(),
            approvals: Vec::new(),
            cursor: 0,
            ..self
        }
    }

    pub fn clear_text_input(self) -> Self {
        Self {
            manual_input: false,
            text_input: String::new(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pagination::PaginationKind;

    fn lettered_pipelines() -> Vec<Item> {
        (0..10)
            .map(|i| {
                let letter = (b'A' + (i % 3) as u8) as char;
                Item::Pipeline(PipelineStatus {
                    name: format!("pipeline-{}-{}", letter, i),
                    stages: vec![],
                })
            })
            .collect()
    }

    fn pipeline_model(count: usize, page_size: usize) -> Model {
        let items = (0..count)
            .map(|i| {
                Item::Pipeline(PipelineStatus {
                    name: format!("pipeline-{:02}", i),
                    stages: vec![],
                })
            })
            .collect();
        Model {
            current_view: View::PipelineStatus,
            ..Model::new(page_size)
        }
        .load_listing(items)
    }

    #[test]
    fn load_listing_shows_first_page() {
        let model = pipeline_model(12, 5);

        assert_eq!(model.pagination.kind, PaginationKind::ClientPaged);
        assert_eq!(model.pipelines.len(), 5);
        assert_eq!(model.pipelines[0].name, "pipeline-00");
        assert!(model.pagination.has_more_pages);
    }

    #[test]
    fn paging_forward_and_back_recuts_the_table() {
        let model = pipeline_model(12, 5).next_page().next_page();
        assert_eq!(model.pagination.current_page, 3);
        assert_eq!(model.pipelines.len(), 2);
        assert!(!model.pagination.has_more_pages);

        let model = model.next_page();
        assert_eq!(model.pagination.current_page, 3);
        assert_eq!(model.pipelines[0].name, "pipeline-10");

        let model = model.previous_page();
        assert_eq!(model.pagination.current_page, 2);
        assert_eq!(model.pipelines[0].name, "pipeline-05");
        assert!(model.pagination.has_more_pages);
    }

    #[test]
    fn query_resets_to_first_page() {
        let model = Model {
            current_view: View::PipelineStatus,
            ..Model::new(3)
        }
        .load_listing(lettered_pipelines())
        .next_page()
        .next_page();
        assert_eq!(model.pagination.current_page, 3);

        let model = model.activate_search().set_search_query("A");

        assert_eq!(model.pagination.current_page, 1);
        assert_eq!(model.search.filtered_items.len(), 4);
        assert_eq!(model.pagination.total_items, 4);
        assert!(model.pagination.has_more_pages);
        assert!(model
            .pipelines
            .iter()
            .all(|p| p.name.to_lowercase().contains('a')));
    }

    #[test]
    fn filtered_listing_pages_over_matches_only() {
        let model = Model {
            current_view: View::PipelineStatus,
            ..Model::new(3)
        }
        .load_listing(lettered_pipelines())
        .activate_search()
        .set_search_query("a")
        .next_page();

        assert_eq!(model.pagination.current_page, 2);
        assert_eq!(model.pipelines.len(), 1);
        assert_eq!(model.pipelines[0].name, "pipeline-A-9");
        assert!(!model.pagination.has_more_pages);
    }

    #[test]
    fn deactivating_search_restores_all_items() {
        let model = pipeline_model(12, 5)
            .activate_search()
            .set_search_query("pipeline-1")
            .deactivate_search();

        assert!(!model.search.is_active);
        assert_eq!(model.pagination.current_page, 1);
        assert_eq!(model.pagination.total_items, 12);
        assert_eq!(model.pipelines.len(), 5);
    }

    #[test]
    fn search_over_empty_listing_is_not_an_error() {
        let model = Model {
            current_view: View::FunctionStatus,
            ..Model::new(5)
        }
        .load_listing(vec![])
        .activate_search()
        .set_search_query("x");

        assert!(model.functions.is_empty());
        assert!(!model.pagination.has_more_pages);
        assert!(model.err.is_none());
    }

    #[test]
    fn input_mode_follows_modal_flags() {
        let model = pipeline_model(3, 5);
        assert_eq!(model.input_mode(), InputMode::Command);

        let model = model.activate_search();
        assert_eq!(model.input_mode(), InputMode::Text);

        let model = Model {
            current_view: View::LambdaExecute,
            is_lambda_input_mode: true,
            ..Model::new(5)
        };
        assert_eq!(model.input_mode(), InputMode::Payload);
    }

    #[test]
    fn reset_listing_forgets_everything() {
        let model = pipeline_model(12, 5)
            .activate_search()
            .set_search_query("pipe")
            .reset_listing();

        assert!(model.pagination.all_items.is_empty());
        assert!(model.search.filtered_items.is_empty());
        assert_eq!(model.pagination.current_page, 1);
        assert!(!model.pagination.has_more_pages);
        assert_eq!(model.pagination.total_items, -1);
        assert!(model.pipelines.is_empty());
    }
}
