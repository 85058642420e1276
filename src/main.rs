pub mod app;
pub mod aws;
pub mod config;
pub mod core;
pub mod executor;
pub mod logging;
pub mod model;
pub mod termination;
pub mod update;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("could not load configuration")?;
    logging::init_logging(&config);

    let model = model::Model::new(config.page_size)
        .with_profiles(aws::profile::discover_profiles())
        .with_preferences(config.profile.clone(), config.region.clone());

    let (_terminator_tx, terminator_rx) = termination::create_termination();
    let (outcome_tx, outcome_rx) = tokio::sync::mpsc::unbounded_channel();
    let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();

    let executor =
        executor::Executor::new(Box::new(aws::AwsConnector), outcome_tx, action_rx);
    let executor = tokio::spawn(executor.run());

    let app = app::App::new(model, action_tx, outcome_rx, terminator_rx);
    let result = app.run().await;

    // A provider call may still be in flight; quitting never waits for it.
    executor.abort();
    tracing::info!("stratus stopped");

    result
}
