//! In-memory integration tests for webhook-driven pipeline lifecycle.

use super::helpers::{Bridge, TOKEN, bridge, pull_request_webhook};
use pr_pipeline_bridge::{
    ingress::domain::HandlerResponse,
    pipeline::domain::{CommitState, PipelineName},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opened_pull_request_gets_its_own_pipeline(bridge: Bridge) -> Result<(), eyre::Report> {
    let response = bridge
        .handlers
        .webhook
        .handle(&pull_request_webhook("opened", 5, "app"))
        .await;

    eyre::ensure!(
        response == HandlerResponse::acknowledged(),
        "unexpected response {response:?}"
    );

    let instance = PipelineName::new("build_PR-5-Repo-app");
    let definition = bridge
        .control_plane
        .pipeline(&instance)?
        .ok_or_else(|| eyre::eyre!("instance pipeline missing"))?;
    eyre::ensure!(definition.source_branch() == Some("feature-x"), "branch not overridden");
    eyre::ensure!(definition.source_token() == Some(TOKEN), "token not overridden");
    eyre::ensure!(
        definition.as_json().pointer("/roleArn")
            == Some(&serde_json::json!("arn:aws:iam::123456789012:role/pipeline")),
        "unrelated fields must survive the clone"
    );

    let stored = bridge.parameter("/codepipeline/build/status_url/5")?;
    eyre::ensure!(
        stored.as_deref() == Some("https://api.github.test/repos/acme/app/statuses/sha5"),
        "statuses URL not recorded: {stored:?}"
    );

    let published = bridge.published()?;
    let pending = published
        .first()
        .ok_or_else(|| eyre::eyre!("pending status missing"))?;
    eyre::ensure!(pending.status.state() == CommitState::Pending, "expected pending");
    eyre::ensure!(
        pending.status.description() == Some("Build started"),
        "unexpected description"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pushes_restart_the_same_pipeline(bridge: Bridge) {
    let router = &bridge.handlers.webhook;
    router.handle(&pull_request_webhook("opened", 5, "app")).await;
    router.handle(&pull_request_webhook("synchronize", 5, "app")).await;
    router.handle(&pull_request_webhook("synchronize", 5, "app")).await;

    assert_eq!(
        bridge.control_plane.created().expect("created list"),
        vec![PipelineName::new("build_PR-5-Repo-app")]
    );
    assert_eq!(bridge.control_plane.started().expect("started list").len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pull_requests_from_different_repositories_get_distinct_pipelines(bridge: Bridge) {
    let router = &bridge.handlers.webhook;
    router.handle(&pull_request_webhook("opened", 5, "app")).await;
    router.handle(&pull_request_webhook("opened", 5, "web")).await;

    assert_eq!(
        bridge.control_plane.created().expect("created list"),
        vec![
            PipelineName::new("build_PR-5-Repo-app"),
            PipelineName::new("build_PR-5-Repo-web"),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_removes_pipeline_and_entry(bridge: Bridge) {
    let router = &bridge.handlers.webhook;
    router.handle(&pull_request_webhook("opened", 42, "foo")).await;

    let response = router.handle(&pull_request_webhook("closed", 42, "foo")).await;

    assert_eq!(response, HandlerResponse::ok("build_PR-42-Repo-foo"));
    assert!(
        bridge
            .control_plane
            .pipeline(&PipelineName::new("build_PR-42-Repo-foo"))
            .expect("lookup")
            .is_none()
    );
    assert_eq!(
        bridge
            .parameter("/codepipeline/build/status_url/42")
            .expect("readable"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_twice_still_answers_ok(bridge: Bridge) {
    let router = &bridge.handlers.webhook;
    router.handle(&pull_request_webhook("opened", 7, "app")).await;
    router.handle(&pull_request_webhook("closed", 7, "app")).await;

    let response = router.handle(&pull_request_webhook("closed", 7, "app")).await;

    assert_eq!(response, HandlerResponse::ok("build_PR-7-Repo-app"));
}
