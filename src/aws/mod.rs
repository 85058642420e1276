use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};

use crate::{
    core::{ApprovalAction, FunctionStatus, InvokeResult, PipelineStatus},
    executor::{CloudProvider, Connector},
};

pub(crate) mod codepipeline;
pub(crate) mod lambda;
pub mod profile;

pub struct Aws {
    pub sdk_config: aws_config::SdkConfig,
    pub lambda_client: aws_sdk_lambda::Client,
    pub codepipeline_client: aws_sdk_codepipeline::Client,
}

impl Aws {
    pub async fn new(profile: &str, region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::v2023_11_09())
            .profile_name(profile)
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let lambda_client = aws_sdk_lambda::Client::new(&sdk_config);
        let codepipeline_client = aws_sdk_codepipeline::Client::new(&sdk_config);

        Self {
            sdk_config,
            lambda_client,
            codepipeline_client,
        }
    }
}

#[async_trait]
impl CloudProvider for Aws {
    #[tracing::instrument(skip(self))]
    async fn fetch_functions(&self) -> Result<Vec<FunctionStatus>> {
        lambda::list_functions(&self.lambda_client).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_pipelines(&self) -> Result<Vec<PipelineStatus>> {
        codepipeline::list_pipelines(&self.codepipeline_client).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_approvals(&self) -> Result<Vec<ApprovalAction>> {
        codepipeline::list_approvals(&self.codepipeline_client).await
    }

    #[tracing::instrument(skip(self, payload))]
    async fn invoke_function(&self, name: &str, payload: &str) -> Result<InvokeResult> {
        lambda::invoke(&self.lambda_client, name, payload).await
    }

    #[tracing::instrument(skip(self))]
    async fn start_pipeline(&self, name: &str, commit_id: Option<&str>) -> Result<()> {
        codepipeline::start_pipeline(&self.codepipeline_client, name, commit_id).await
    }

    #[tracing::instrument(skip(self, comment), fields(pipeline = %approval.pipeline_name))]
    async fn set_approval(
        &self,
        approval: &ApprovalAction,
        approve: bool,
        comment: &str,
    ) -> Result<()> {
        codepipeline::set_approval(&self.codepipeline_client, approval, approve, comment).await
    }
}

/// Loads the shared AWS configuration for whatever profile and region the user picks.
pub struct AwsConnector;

#[async_trait]
impl Connector for AwsConnector {
    async fn connect(&self, profile: &str, region: &str) -> Result<Arc<dyn CloudProvider>> {
        let aws = Aws::new(profile, region).await;
        tracing::info!(
            profile,
            region = ?aws.sdk_config.region(),
            "loaded AWS configuration"
        );
        Ok(Arc::new(aws))
    }
}
