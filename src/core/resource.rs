use std::hash::Hash;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct FunctionStatus {
    pub name: String,
    pub runtime: String,
    pub memory: i64,
    pub timeout: i64,
    pub last_modified: String,
    pub role: String,
    pub handler: String,
    pub description: String,
    pub arn: String,
    pub code_size: i64,
    pub version: String,
    pub package_type: String,
    pub architecture: String,
    pub log_group: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct StageStatus {
    pub name: String,
    pub status: String,
    pub last_updated: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct PipelineStatus {
    pub name: String,
    pub stages: Vec<StageStatus>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct ApprovalAction {
    pub pipeline_name: String,
    pub stage_name: String,
    pub action_name: String,
    /// Approval token of the in-progress execution, required to answer it.
    pub token: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct InvokeResult {
    pub status_code: i32,
    pub executed_version: String,
    pub payload: String,
    pub logs: String,
}

/// Identity of a listed resource. Two items with equal keys are the same resource.
pub trait Keyed {
    type Key: Eq + Hash;

    fn key(&self) -> Self::Key;

    /// Lower-cased components compared in order when sorting a listing.
    fn sort_key(&self) -> Vec<String>;
}

/// Text a search query is matched against, already lower-cased.
pub trait Searchable {
    fn search_text(&self) -> String;
}

impl Keyed for FunctionStatus {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn sort_key(&self) -> Vec<String> {
        vec![self.name.to_lowercase()]
    }
}

impl Searchable for FunctionStatus {
    fn search_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        if !self.runtime.is_empty() {
            text.push(' ');
            text.push_str(&self.runtime.to_lowercase());
        }
        text
    }
}

impl Keyed for PipelineStatus {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn sort_key(&self) -> Vec<String> {
        vec![self.name.to_lowercase()]
    }
}

impl Searchable for PipelineStatus {
    fn search_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        for stage in &self.stages {
            text.push(' ');
            text.push_str(&stage.name.to_lowercase());
            text.push(' ');
            text.push_str(&stage.status.to_lowercase());
        }
        text
    }
}

impl Keyed for ApprovalAction {
    type Key = (String, String, String);

    fn key(&self) -> Self::Key {
        (
            self.pipeline_name.clone(),
            self.stage_name.clone(),
            self.action_name.clone(),
        )
    }

    fn sort_key(&self) -> Vec<String> {
        vec![
            self.pipeline_name.to_lowercase(),
            self.stage_name.to_lowercase(),
            self.action_name.to_lowercase(),
        ]
    }
}

impl Searchable for ApprovalAction {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.pipeline_name, self.stage_name, self.action_name
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(FunctionStatus),
    Pipeline(PipelineStatus),
    Approval(ApprovalAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Function(String),
    Pipeline(String),
    Approval(String, String, String),
}

impl Item {
    pub fn as_function(&self) -> Option<&FunctionStatus> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_pipeline(&self) -> Option<&PipelineStatus> {
        match self {
            Self::Pipeline(pipeline) => Some(pipeline),
            _ => None,
        }
    }

    pub fn as_approval(&self) -> Option<&ApprovalAction> {
        match self {
            Self::Approval(approval) => Some(approval),
            _ => None,
        }
    }
}

impl Keyed for Item {
    type Key = ItemKey;

    fn key(&self) -> ItemKey {
        match self {
            Self::Function(f) => ItemKey::Function(f.key()),
            Self::Pipeline(p) => ItemKey::Pipeline(p.key()),
            Self::Approval(a) => {
                let (pipeline, stage, action) = a.key();
                ItemKey::Approval(pipeline, stage, action)
            }
        }
    }

    fn sort_key(&self) -> Vec<String> {
        match self {
            Self::Function(f) => f.sort_key(),
            Self::Pipeline(p) => p.sort_key(),
            Self::Approval(a) => a.sort_key(),
        }
    }
}

impl Searchable for Item {
    fn search_text(&self) -> String {
        match self {
            Self::Function(f) => f.search_text(),
            Self::Pipeline(p) => p.search_text(),
            Self::Approval(a) => a.search_text(),
        }
    }
}

impl From<FunctionStatus> for Item {
    fn from(function: FunctionStatus) -> Self {
        Self::Function(function)
    }
}

impl From<PipelineStatus> for Item {
    fn from(pipeline: PipelineStatus) -> Self {
        Self::Pipeline(pipeline)
    }
}

impl From<ApprovalAction> for Item {
    fn from(approval: ApprovalAction) -> Self {
        Self::Approval(approval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_search_text_includes_stages() {
        let pipeline = PipelineStatus {
            name: "Deploy-API".into(),
            stages: vec![StageStatus {
                name: "Source".into(),
                status: "Succeeded".into(),
                last_updated: "N/A".into(),
            }],
        };

        assert_eq!(pipeline.search_text(), "deploy-api source succeeded");
    }

    #[test]
    fn approval_keys_are_composite() {
        let a = Item::from(ApprovalAction {
            pipeline_name: "p".into(),
            stage_name: "s".into(),
            action_name: "a".into(),
            token: "t1".into(),
        });
        let b = Item::from(ApprovalAction {
            pipeline_name: "p".into(),
            stage_name: "s".into(),
            action_name: "a".into(),
            token: "t2".into(),
        });

        assert_eq!(a.key(), b.key());
        assert_eq!(a.search_text(), "p s a");
    }

    #[test]
    fn function_search_text_skips_empty_runtime() {
        let function = FunctionStatus {
            name: "Resize".into(),
            ..Default::default()
        };

        assert_eq!(function.search_text(), "resize");
    }
}
