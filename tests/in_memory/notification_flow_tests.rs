//! In-memory integration tests for state-change notifications.

use super::helpers::{Bridge, bridge, execution_event, pull_request_webhook};
use pr_pipeline_bridge::{
    ingress::domain::HandlerResponse,
    pipeline::domain::{CommitState, PipelineName, StageExecutionStatus, StageName, StageState},
};
use rstest::rstest;

async fn open(bridge: &Bridge, number: u64) {
    let response = bridge
        .handlers
        .webhook
        .handle(&pull_request_webhook("opened", number, "app"))
        .await;
    assert_eq!(response, HandlerResponse::acknowledged());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn succeeded_execution_reaches_latest_pull_request(bridge: Bridge) -> Result<(), eyre::Report> {
    open(&bridge, 3).await;
    open(&bridge, 12).await;
    open(&bridge, 7).await;

    let response = bridge
        .handlers
        .state_change
        .handle_json(execution_event("build_PR-7-Repo-app", "SUCCEEDED"))
        .await;

    eyre::ensure!(response == HandlerResponse::acknowledged(), "expected acknowledgment");
    let published = bridge.published()?;
    let last = published
        .last()
        .ok_or_else(|| eyre::eyre!("no status posted"))?;
    eyre::ensure!(
        last.url.as_str() == "https://api.github.test/repos/acme/app/statuses/sha12",
        "status sent to {}",
        last.url
    );
    eyre::ensure!(last.status.state() == CommitState::Success, "expected success");
    eyre::ensure!(last.status.context() == "CodePipeline", "unexpected context");
    eyre::ensure!(
        last.status.target_url()
            == Some("https://eu-west-1.console.aws.amazon.com/codesuite/codepipeline/pipelines/build_PR-7-Repo-app/view?region=eu-west-1"),
        "unexpected console link"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_execution_reports_each_failed_stage(bridge: Bridge) {
    open(&bridge, 5).await;
    bridge
        .control_plane
        .set_stage_states(
            PipelineName::new("build_PR-5-Repo-app"),
            vec![
                StageState::new(
                    StageName::new("Source").expect("valid stage"),
                    Some(StageExecutionStatus::Succeeded),
                ),
                StageState::new(
                    StageName::new("Build").expect("valid stage"),
                    Some(StageExecutionStatus::Failed),
                ),
                StageState::new(
                    StageName::new("Test").expect("valid stage"),
                    Some(StageExecutionStatus::Failed),
                ),
            ],
        )
        .expect("stage states stored");

    bridge
        .handlers
        .state_change
        .handle_json(execution_event("build_PR-5-Repo-app", "FAILED"))
        .await;

    let contexts: Vec<(CommitState, String)> = bridge
        .published()
        .expect("recorded")
        .into_iter()
        .skip(1)
        .map(|published| (published.status.state(), published.status.context().to_owned()))
        .collect();
    assert_eq!(
        contexts,
        vec![
            (CommitState::Failure, "CodePipeline".to_owned()),
            (CommitState::Failure, "codepipeline/Build".to_owned()),
            (CommitState::Failure, "codepipeline/Test".to_owned()),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn events_before_any_pull_request_are_acknowledged(bridge: Bridge) {
    let response = bridge
        .handlers
        .state_change
        .handle_json(execution_event("build_PR-1-Repo-app", "STARTED"))
        .await;

    assert_eq!(response, HandlerResponse::acknowledged());
    assert!(bridge.published().expect("recorded").is_empty());
}
