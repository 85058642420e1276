//! Static menu of providers, services, categories and the operations behind them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provider {
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthMethod {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    ManualApproval,
    PipelineStatus,
    StartPipeline,
    FunctionStatus,
    ExecuteFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
    pub operations: &'static [Operation],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub name: &'static str,
    pub description: &'static str,
    pub categories: &'static [Category],
}

pub const PROVIDERS: &[Provider] = &[
    Provider {
        name: "AWS",
        description: "Amazon Web Services",
        available: true,
    },
    Provider {
        name: "Azure",
        description: "Microsoft Azure",
        available: false,
    },
    Provider {
        name: "GCP",
        description: "Google Cloud Platform",
        available: false,
    },
];

pub const AUTH_METHODS: &[AuthMethod] = &[AuthMethod {
    name: "profile",
    description: "Use AWS profile from ~/.aws/credentials",
}];

pub const SERVICES: &[Service] = &[
    Service {
        name: "CodePipeline",
        description: "Continuous Delivery Service",
        categories: &[Category {
            name: "Workflows",
            description: "Pipeline approvals and executions",
            operations: &[
                Operation {
                    kind: OperationKind::ManualApproval,
                    name: "Manual Approval",
                    description: "Manage manual approval actions",
                },
                Operation {
                    kind: OperationKind::PipelineStatus,
                    name: "Pipeline Status",
                    description: "View pipeline status",
                },
                Operation {
                    kind: OperationKind::StartPipeline,
                    name: "Start Pipeline",
                    description: "Trigger a pipeline execution",
                },
            ],
        }],
    },
    Service {
        name: "Lambda",
        description: "Serverless Compute Service",
        categories: &[Category {
            name: "Task Functions",
            description: "Lambda function inspection and invocation",
            operations: &[
                Operation {
                    kind: OperationKind::ExecuteFunction,
                    name: "Execute Function",
                    description: "Execute Lambda function with JSON payload",
                },
                Operation {
                    kind: OperationKind::FunctionStatus,
                    name: "Function Status",
                    description: "View Lambda function status",
                },
            ],
        }],
    },
];

pub const REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ca-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-central-1",
    "eu-north-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "sa-east-1",
];

/// Label of the first row in the profile and region pickers.
pub const MANUAL_ENTRY: &str = "Manual Entry";
