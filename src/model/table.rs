//! Table contents for each view, derived from the model on demand.

use crate::core::{
    catalog::{self, Category, Operation, Service},
    View,
};

use super::Model;

pub const DEFAULT_WIDTH: u16 = 30;
pub const WIDE_WIDTH: u16 = 40;
pub const NARROW_WIDTH: u16 = 20;
pub const DESCRIPTION_WIDTH: u16 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub width: u16,
}

const fn column(title: &'static str, width: u16) -> Column {
    Column { title, width }
}

pub fn services() -> Vec<Service> {
    let mut services = catalog::SERVICES.to_vec();
    services.sort_by_key(|service| service.name);
    services
}

pub fn categories(model: &Model) -> Vec<Category> {
    model
        .selected_service
        .map(|service| service.categories.to_vec())
        .unwrap_or_default()
}

pub fn operations(model: &Model) -> Vec<Operation> {
    let mut operations = model
        .selected_category
        .map(|category| category.operations.to_vec())
        .unwrap_or_default();
    operations.sort_by_key(|operation| operation.name);
    operations
}

/// Rows offered on the Summary view of the start-pipeline flow.
pub const LATEST_COMMIT_ROW: usize = 0;
pub const MANUAL_COMMIT_ROW: usize = 1;

/// Rows offered on the ExecutingAction view.
pub const EXECUTE_ROW: usize = 0;
pub const CANCEL_ROW: usize = 1;

pub fn columns(model: &Model) -> Vec<Column> {
    match model.current_view {
        View::Providers => vec![
            column("Provider", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::AuthMethodSelect => vec![
            column("Authentication Method", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::AuthConfig => vec![column("Profile", DEFAULT_WIDTH)],
        View::AwsConfig => vec![column("Region", DEFAULT_WIDTH)],
        View::SelectService => vec![
            column("Service", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::SelectCategory => vec![
            column("Category", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::SelectOperation => vec![
            column("Operation", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::Approvals => vec![
            column("Pipeline", WIDE_WIDTH),
            column("Stage", DEFAULT_WIDTH),
            column("Action", NARROW_WIDTH),
        ],
        View::Confirmation | View::ExecutingAction => vec![
            column("Action", DEFAULT_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::PipelineStatus => vec![
            column("Pipeline", WIDE_WIDTH),
            column("Description", DESCRIPTION_WIDTH),
        ],
        View::PipelineStages => vec![
            column("Stage", DEFAULT_WIDTH),
            column("Status", NARROW_WIDTH),
            column("Last Updated", NARROW_WIDTH),
        ],
        View::FunctionStatus => vec![
            column("Function", WIDE_WIDTH),
            column("Runtime", NARROW_WIDTH),
            column("Last Updated", DEFAULT_WIDTH),
        ],
        View::FunctionDetails => vec![
            column("Property", DEFAULT_WIDTH),
            column("Value", WIDE_WIDTH),
        ],
        View::Summary => vec![
            column("Type", DEFAULT_WIDTH),
            column("Value", DESCRIPTION_WIDTH),
        ],
        View::LambdaExecute
        | View::LambdaResponse
        | View::Error
        | View::Success
        | View::Help => vec![],
    }
}

pub fn rows(model: &Model) -> Vec<Vec<String>> {
    match model.current_view {
        View::Providers => catalog::PROVIDERS
            .iter()
            .map(|provider| {
                let description = if provider.available {
                    provider.description.to_string()
                } else {
                    format!("{} (coming soon)", provider.description)
                };
                vec![provider.name.to_string(), description]
            })
            .collect(),
        View::AuthMethodSelect => catalog::AUTH_METHODS
            .iter()
            .map(|method| vec![method.name.to_string(), method.description.to_string()])
            .collect(),
        View::AuthConfig => std::iter::once(catalog::MANUAL_ENTRY.to_string())
            .chain(model.profiles.iter().cloned())
            .map(|profile| vec![profile])
            .collect(),
        View::AwsConfig => std::iter::once(catalog::MANUAL_ENTRY)
            .chain(catalog::REGIONS.iter().copied())
            .map(|region| vec![region.to_string()])
            .collect(),
        View::SelectService => services()
            .iter()
            .map(|s| vec![s.name.to_string(), s.description.to_string()])
            .collect(),
        View::SelectCategory => categories(model)
            .iter()
            .map(|c| vec![c.name.to_string(), c.description.to_string()])
            .collect(),
        View::SelectOperation => operations(model)
            .iter()
            .map(|o| vec![o.name.to_string(), o.description.to_string()])
            .collect(),
        View::Approvals => model
            .approvals
            .iter()
            .map(|a| {
                vec![
                    a.pipeline_name.clone(),
                    a.stage_name.clone(),
                    a.action_name.clone(),
                ]
            })
            .collect(),
        View::Confirmation => vec![
            vec!["Approve".into(), "Approve the pipeline stage".into()],
            vec!["Reject".into(), "Reject the pipeline stage".into()],
        ],
        View::ExecutingAction => {
            let description = if model.is_start_pipeline_flow() {
                if model.manual_commit_id && !model.commit_id.is_empty() {
                    format!("Start pipeline with commit {}", model.commit_id)
                } else {
                    "Start pipeline with latest commit".to_string()
                }
            } else if model.approve_action {
                "Execute approve action".to_string()
            } else {
                "Execute reject action".to_string()
            };
            vec![
                vec!["Execute".into(), description],
                vec!["Cancel".into(), "Cancel and return to main menu".into()],
            ]
        }
        View::PipelineStatus => model
            .pipelines
            .iter()
            .map(|p| vec![p.name.clone(), format!("{} stages", p.stages.len())])
            .collect(),
        View::PipelineStages => model
            .selected_pipeline
            .iter()
            .flat_map(|p| p.stages.iter())
            .map(|s| vec![s.name.clone(), s.status.clone(), s.last_updated.clone()])
            .collect(),
        View::FunctionStatus => model
            .functions
            .iter()
            .map(|f| {
                vec![
                    f.name.clone(),
                    f.runtime.clone(),
                    format_timestamp(&f.last_modified),
                ]
            })
            .collect(),
        View::FunctionDetails => {
            let Some(f) = &model.selected_function else {
                return vec![];
            };
            let mut rows = vec![
                vec!["Name".into(), f.name.clone()],
                vec!["Description".into(), f.description.clone()],
                vec!["ARN".into(), f.arn.clone()],
                vec!["Runtime".into(), f.runtime.clone()],
                vec!["Handler".into(), f.handler.clone()],
                vec!["Memory".into(), format!("{} MB", f.memory)],
                vec!["Timeout".into(), format!("{} seconds", f.timeout)],
                vec!["Code Size".into(), format_code_size(f.code_size)],
                vec!["Last Updated".into(), format_timestamp(&f.last_modified)],
                vec!["Version".into(), f.version.clone()],
                vec!["Package Type".into(), f.package_type.clone()],
                vec!["Architecture".into(), f.architecture.clone()],
                vec!["Role".into(), f.role.clone()],
            ];
            if let Some(log_group) = f.log_group.as_ref().filter(|g| !g.is_empty()) {
                rows.push(vec!["Log Group".into(), log_group.clone()]);
            }
            rows
        }
        View::Summary if model.is_start_pipeline_flow() => {
            if model.selected_pipeline.is_none() {
                return vec![];
            }
            vec![
                vec!["Latest Commit".into(), "Use latest commit from source".into()],
                vec!["Manual Input".into(), "Enter specific commit ID".into()],
            ]
        }
        View::Summary
        | View::LambdaExecute
        | View::LambdaResponse
        | View::Error
        | View::Success
        | View::Help => vec![],
    }
}

pub fn row_count(model: &Model) -> usize {
    rows(model).len()
}

/// Trims `2024-06-29T07:10:02.331+0000` down to `2024-06-29 07:10:02`.
pub fn format_timestamp(timestamp: &str) -> String {
    match timestamp.get(..19) {
        Some(trimmed) if timestamp.len() > 19 => trimmed.replacen('T', " ", 1),
        _ => timestamp.to_string(),
    }
}

pub fn format_code_size(bytes: i64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FunctionStatus, Item};

    #[test]
    fn timestamps_lose_fraction_and_offset() {
        assert_eq!(
            format_timestamp("2024-06-29T07:10:02.331+0000"),
            "2024-06-29 07:10:02"
        );
        assert_eq!(format_timestamp("2024-06-29"), "2024-06-29");
    }

    #[test]
    fn code_size_picks_a_unit() {
        assert_eq!(format_code_size(512), "512 bytes");
        assert_eq!(format_code_size(2048), "2.00 KB");
        assert_eq!(format_code_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn function_rows_follow_the_current_page() {
        let functions = (0..7)
            .map(|i| {
                Item::Function(FunctionStatus {
                    name: format!("fn-{}", i),
                    runtime: "nodejs20.x".into(),
                    last_modified: "2024-06-29T07:10:02.331+0000".into(),
                    ..Default::default()
                })
            })
            .collect();
        let model = Model {
            current_view: View::FunctionStatus,
            ..Model::new(5)
        }
        .load_listing(functions);

        let rows = rows(&model);
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[0],
            vec!["fn-0", "nodejs20.x", "2024-06-29 07:10:02"]
        );
        assert_eq!(columns(&model).len(), 3);
    }

    #[test]
    fn details_include_log_group_only_when_known() {
        let mut model = Model {
            current_view: View::FunctionDetails,
            selected_function: Some(FunctionStatus {
                name: "fn".into(),
                ..Default::default()
            }),
            ..Model::new(5)
        };
        assert_eq!(row_count(&model), 13);

        if let Some(function) = model.selected_function.as_mut() {
            function.log_group = Some("/aws/lambda/fn".into());
        }
        assert_eq!(row_count(&model), 14);
    }

    #[test]
    fn region_picker_starts_with_manual_entry() {
        let model = Model {
            current_view: View::AwsConfig,
            ..Model::new(5)
        };

        let rows = rows(&model);
        assert_eq!(rows[0], vec![catalog::MANUAL_ENTRY]);
        assert_eq!(rows.len(), catalog::REGIONS.len() + 1);
    }
}
