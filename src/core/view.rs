#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Providers,
    SelectService,
    SelectCategory,
    SelectOperation,
    AuthMethodSelect,
    AuthConfig,
    AwsConfig,
    Approvals,
    PipelineStatus,
    PipelineStages,
    FunctionStatus,
    FunctionDetails,
    LambdaExecute,
    LambdaResponse,
    Confirmation,
    Summary,
    ExecutingAction,
    Error,
    Success,
    Help,
}

impl View {
    /// Views backed by a fetched, paginated and searchable listing.
    pub fn is_listing(self) -> bool {
        matches!(
            self,
            Self::FunctionStatus | Self::PipelineStatus | Self::Approvals
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Providers => "Select Cloud Provider",
            Self::SelectService => "Select AWS Service",
            Self::SelectCategory => "Select Category",
            Self::SelectOperation => "Select Operation",
            Self::AuthMethodSelect => "Select Authentication Method",
            Self::AuthConfig => "Select AWS Profile",
            Self::AwsConfig => "Select AWS Region",
            Self::Approvals => "Select Approval",
            Self::PipelineStatus => "Select Pipeline",
            Self::PipelineStages => "Pipeline Stages",
            Self::FunctionStatus => "Lambda Functions",
            Self::FunctionDetails => "Function Details",
            Self::LambdaExecute => "Execute Lambda Function",
            Self::LambdaResponse => "Lambda Response",
            Self::Confirmation => "Select Action",
            Self::Summary => "Summary",
            Self::ExecutingAction => "Execute Action",
            Self::Error => "Error",
            Self::Success => "Success",
            Self::Help => "Help",
        }
    }
}
