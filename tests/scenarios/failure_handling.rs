//! Test: Failure Handling - the first failing task ends the run

use crate::helpers::*;
use crewx::agent::LlmError;
use crewx::core::{Crew, CrewError, TaskState};
use crewx::execution::ExecutionEvent;

/// A failure at k stops the run; no later task is called
#[tokio::test]
async fn test_failure_at_k_skips_rest() {
    let n = 4;
    for k in 0..n - 1 {
        let crew = linear_crew(n);
        let client = MockClient::failing_at(k, LlmError::Transport("connection reset".into()));

        let result = run_crew_with_client(&crew, client.clone(), report_params("x").client_config()).await;

        assert_failed_at(&result, k);
        assert_eq!(client.call_count(), k + 1);
        assert!(result.state.tasks[k + 1..].iter().all(|t| *t == TaskState::Pending));
    }
}

/// Writer failure carries the writer's role and the adapter error
#[tokio::test]
async fn test_writer_rate_limited() {
    let params = report_params("Solid State Batteries");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::failing_at(1, LlmError::RateLimit("Rate limit reached".into()));

    let result = run_crew_with_client(&crew, client, params.client_config()).await;

    assert_failed_at(&result, 1);
    match result.result {
        Err(CrewError::Execution {
            task_index,
            agent_role,
            source,
        }) => {
            assert_eq!(task_index, 1);
            assert_eq!(agent_role, "Technical Content Strategist");
            assert_eq!(source, LlmError::RateLimit("Rate limit reached".into()));
        }
        other => panic!("expected execution failure, got {:?}", other.map(|r| r.into_text())),
    }
}

/// Authentication failure on the first call becomes a user-facing message
#[tokio::test]
async fn test_rejected_credential() {
    let params = report_params("Solid State Batteries");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::failing_at(0, LlmError::Authentication("Invalid API Key".into()));

    let result = run_crew_with_client(&crew, client.clone(), params.client_config()).await;

    assert_failed_at(&result, 0);
    assert_eq!(client.call_count(), 1);
    let err = result.result.as_ref().unwrap_err();
    assert!(!err.is_missing_input());
    assert!(err.user_message().contains("API key was rejected"));
}

/// Failure events: the failing task, then the run end
#[tokio::test]
async fn test_failure_events() {
    let crew = linear_crew(3);
    let client = MockClient::failing_at(1, LlmError::ModelNotFound {
        model: "llama3-70b-8192".into(),
        message: "decommissioned".into(),
    });

    let result = run_crew_with_client(&crew, client, report_params("x").client_config()).await;

    let n = result.events.len();
    assert!(matches!(result.events[n - 2], ExecutionEvent::TaskFailed { task_index: 1, .. }));
    assert!(matches!(result.events[n - 1], ExecutionEvent::RunFinished { .. }));
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, ExecutionEvent::TaskStarted { task_index: 2, .. })));
}
