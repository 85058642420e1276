use anyhow::{Context, Result};
use aws_sdk_lambda::{
    primitives::Blob,
    types::{FunctionConfiguration, LogType},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, warn};

use crate::core::{FunctionStatus, InvokeResult};

const DEFAULT_ARCHITECTURE: &str = "x86_64";

pub(crate) async fn list_functions(client: &aws_sdk_lambda::Client) -> Result<Vec<FunctionStatus>> {
    let mut functions: Vec<FunctionStatus> = Vec::new();
    let mut next_marker = None;

    loop {
        let response = client
            .list_functions()
            .max_items(50)
            .set_marker(next_marker)
            .send()
            .await
            .context("could not list Lambda functions")?;

        functions.extend(response.functions().iter().map(function_status));

        next_marker = response.next_marker().map(str::to_string);
        if next_marker.is_none() {
            break;
        }
    }

    debug!(count = functions.len(), "listed functions");
    Ok(functions)
}

fn function_status(f: &FunctionConfiguration) -> FunctionStatus {
    FunctionStatus {
        name: f.function_name().unwrap_or_default().to_string(),
        runtime: f
            .runtime()
            .map(|runtime| runtime.as_str().to_string())
            .unwrap_or_default(),
        memory: f.memory_size().unwrap_or_default() as i64,
        timeout: f.timeout().unwrap_or_default() as i64,
        last_modified: f.last_modified().unwrap_or_default().to_string(),
        role: f.role().unwrap_or_default().to_string(),
        handler: f.handler().unwrap_or_default().to_string(),
        description: f.description().unwrap_or_default().to_string(),
        arn: f.function_arn().unwrap_or_default().to_string(),
        code_size: f.code_size(),
        version: f.version().unwrap_or_default().to_string(),
        package_type: f
            .package_type()
            .map(|package_type| package_type.as_str().to_string())
            .unwrap_or_default(),
        architecture: f
            .architectures()
            .first()
            .map(|arch| arch.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_ARCHITECTURE.to_string()),
        log_group: f
            .logging_config()
            .and_then(|config| config.log_group())
            .map(str::to_string),
    }
}

pub(crate) async fn invoke(
    client: &aws_sdk_lambda::Client,
    name: &str,
    payload: &str,
) -> Result<InvokeResult> {
    let response = client
        .invoke()
        .function_name(name)
        .payload(Blob::new(payload.as_bytes().to_vec()))
        .log_type(LogType::Tail)
        .send()
        .await
        .with_context(|| format!("could not invoke {}", name))?;

    if let Some(function_error) = response.function_error() {
        warn!(function = name, %function_error, "function returned an error");
    }

    Ok(InvokeResult {
        status_code: response.status_code(),
        executed_version: response.executed_version().unwrap_or_default().to_string(),
        payload: response
            .payload()
            .map(|blob| String::from_utf8_lossy(blob.as_ref()).into_owned())
            .unwrap_or_default(),
        logs: response.log_result().map(decode_log_tail).unwrap_or_default(),
    })
}

/// The tail arrives base64 encoded. Anything that fails to decode is shown as sent.
fn decode_log_tail(encoded: &str) -> String {
    match STANDARD.decode(encoded) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            warn!(%err, "could not decode log tail");
            encoded.to_string()
        }
    }
}
