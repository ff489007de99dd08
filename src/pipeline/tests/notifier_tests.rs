//! State-change notification tests.

use super::fixtures::{Harness, pull_request, template};
use crate::pipeline::{
    domain::{CommitState, PipelineName, StageExecutionStatus, StageName, StageState},
    ports::CorrelationStore,
    services::{ActionStateChange, ExecutionStateChange, NotificationReport},
};
use rstest::{fixture, rstest};
use serde_json::json;

const INSTANCE: &str = "build_PR-5-Repo-app";

#[fixture]
async fn harness() -> Harness {
    let harness = Harness::seeded();
    harness
        .lifecycle
        .create_or_start(&pull_request(5))
        .await
        .expect("instance should be created");
    harness
}

fn execution(state: &str) -> ExecutionStateChange {
    ExecutionStateChange {
        pipeline: PipelineName::new(INSTANCE),
        state: state.to_owned(),
    }
}

fn stage(name: &str, status: StageExecutionStatus) -> StageState {
    StageState::new(StageName::new(name).expect("valid stage"), Some(status))
}

/// Statuses posted after the pending announcement made during creation.
fn notifications(harness: &Harness) -> Vec<serde_json::Value> {
    harness
        .publisher
        .published()
        .expect("recorded statuses")
        .into_iter()
        .skip(1)
        .map(|published| {
            assert_eq!(published.url.as_str(), "https://host/statuses/pr-5");
            serde_json::to_value(&published.status).expect("serializable status")
        })
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn succeeded_execution_posts_success_to_latest_url(#[future] harness: Harness) {
    let harness = harness.await;

    let report = harness.notifier.notify_execution(&execution("SUCCEEDED")).await;

    assert_eq!(
        report,
        NotificationReport {
            delivered: 1,
            failed: 0
        }
    );
    assert_eq!(
        notifications(&harness),
        vec![json!({
            "state": "success",
            "description": "Build Success",
            "context": "CodePipeline",
            "target_url": "https://eu-west-1.console.aws.amazon.com/codesuite/codepipeline/pipelines/build_PR-5-Repo-app/view?region=eu-west-1"
        })]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_execution_fans_out_failed_stages(#[future] harness: Harness) {
    let harness = harness.await;
    harness
        .control_plane
        .set_stage_states(
            PipelineName::new(INSTANCE),
            vec![
                stage("Source", StageExecutionStatus::Succeeded),
                stage("Build", StageExecutionStatus::Failed),
                StageState::new(StageName::new("Deploy").expect("valid stage"), None),
            ],
        )
        .expect("stage states stored");

    let report = harness.notifier.notify_execution(&execution("FAILED")).await;

    assert_eq!(report.delivered, 2);
    let posted = notifications(&harness);
    let [primary, failed_stage] = posted.as_slice() else {
        panic!("expected two statuses, got {posted:?}");
    };
    assert_eq!(primary.get("state"), Some(&json!("failure")));
    assert_eq!(primary.get("context"), Some(&json!("CodePipeline")));
    assert_eq!(primary.get("description"), Some(&json!("Build Failed")));
    assert_eq!(
        failed_stage,
        &json!({"state": "failure", "context": "codepipeline/Build"})
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn started_execution_without_failed_stages_posts_once(#[future] harness: Harness) {
    let harness = harness.await;

    let report = harness.notifier.notify_execution(&execution("STARTED")).await;

    assert_eq!(report.delivered, 1);
    let posted = notifications(&harness);
    let primary = posted.first().expect("primary status");
    assert_eq!(primary.get("state"), Some(&json!("pending")));
    assert_eq!(primary.get("description"), Some(&json!("Build started")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn action_change_posts_single_stage_status(#[future] harness: Harness) {
    let harness = harness.await;
    let change = ActionStateChange {
        pipeline: PipelineName::new(INSTANCE),
        stage: StageName::new("Build").expect("valid stage"),
        state: "SUCCEEDED".to_owned(),
    };

    let report = harness.notifier.notify_action(&change).await;

    assert_eq!(report.delivered, 1);
    assert_eq!(
        notifications(&harness),
        vec![json!({"state": "success", "context": "codepipeline/Build"})]
    );
}

#[rstest]
#[case("CANCELED")]
#[case("SUPERSEDED")]
#[tokio::test(flavor = "multi_thread")]
async fn unmapped_status_posts_nothing(#[future] harness: Harness, #[case] state: &str) {
    let harness = harness.await;

    let report = harness.notifier.notify_execution(&execution(state)).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.delivered, 0);
    assert!(notifications(&harness).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_correlation_entry_posts_nothing() {
    let harness = Harness::seeded();

    let report = harness.notifier.notify_execution(&execution("SUCCEEDED")).await;

    assert_eq!(report.failed, 1);
    assert!(harness.publisher.published().expect("recorded").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn latest_pull_request_receives_status(#[future] harness: Harness) {
    let harness = harness.await;
    harness
        .correlation
        .put(
            &template(),
            pull_request(12).number(),
            pull_request(12).statuses_url(),
        )
        .await
        .expect("put should succeed");

    harness.notifier.notify_execution(&execution("SUCCEEDED")).await;

    let published = harness.publisher.published().expect("recorded");
    let last = published.last().expect("status posted");
    assert_eq!(last.url.as_str(), "https://host/statuses/pr-12");
    assert_eq!(last.status.state(), CommitState::Success);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_post_is_counted_as_failed(#[future] harness: Harness) {
    let harness = harness.await;
    harness
        .publisher
        .reject_with(401)
        .expect("publisher configured");

    let report = harness.notifier.notify_execution(&execution("SUCCEEDED")).await;

    assert_eq!(
        report,
        NotificationReport {
            delivered: 0,
            failed: 1
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pipeline_name_without_template_segment_posts_nothing(#[future] harness: Harness) {
    let harness = harness.await;
    let change = ExecutionStateChange {
        pipeline: PipelineName::new("_PR-5-Repo-app"),
        state: "SUCCEEDED".to_owned(),
    };

    let report = harness.notifier.notify_execution(&change).await;

    assert_eq!(report.failed, 1);
    assert!(notifications(&harness).is_empty());
}
