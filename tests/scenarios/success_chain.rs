//! Test: Success Chain - tasks run in order and outputs flow forward

use crate::helpers::*;
use crewx::core::{Crew, ExecutionStatus};
use crewx::execution::ExecutionEvent;

/// The research output reaches the writer, and the writer's text is the result
#[tokio::test]
async fn test_research_feeds_writer() {
    let params = report_params("Solid State Batteries").with_model("llama3-70b-8192");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::scripted(vec!["FACTS", "ARTICLE"]);

    let result = run_crew_with_client(&crew, client.clone(), params.client_config()).await;

    assert_completed(&result);
    assert_eq!(result.result.as_ref().unwrap().text(), "ARTICLE");
    assert_eq!(client.call_count(), 2);
    assert!(client.prompt(1).contains("FACTS"));
    assert!(!client.prompt(0).contains("FACTS"));

    // Every call uses the run's model
    assert!(client.calls().iter().all(|c| c.model == "llama3-70b-8192"));
}

/// With an echoing client, the writer prompt contains the research output verbatim
#[tokio::test]
async fn test_echoed_research_appears_verbatim() {
    let params = report_params("Quantum Networking");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::echo();

    let result = run_crew_with_client(&crew, client.clone(), params.client_config()).await;

    assert_completed(&result);
    let research_output = client.prompt(0);
    assert!(client.prompt(1).contains(&research_output));
    assert!(client.prompt(1).contains("Technical Content Strategist"));
}

/// Trailing blank lines of the research output survive into the writer prompt
#[tokio::test]
async fn test_research_trailing_newlines_kept() {
    let params = report_params("Solid State Batteries");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::scripted(vec!["- fact\n\n", "ARTICLE"]);

    let result = run_crew_with_client(&crew, client.clone(), params.client_config()).await;

    assert_completed(&result);
    assert!(client.prompt(1).contains("- fact\n\n"));
}

/// n tasks mean exactly n calls, in list order
#[tokio::test]
async fn test_n_tasks_n_calls_in_order() {
    for n in 1..=4 {
        let crew = linear_crew(n);
        let client = MockClient::scripted((0..n).map(|i| format!("OUTPUT {}", i)).collect::<Vec<_>>());

        let result = run_crew_with_client(&crew, client.clone(), report_params("x").client_config()).await;

        assert_completed(&result);
        assert_call_order(&client, n);
        assert_eq!(
            result.result.as_ref().unwrap().text(),
            format!("OUTPUT {}", n - 1)
        );
    }
}

/// Later tasks see every earlier output, in the order produced
#[tokio::test]
async fn test_context_accumulates_in_order() {
    let crew = linear_crew(3);
    let client = MockClient::scripted(vec!["FIRST", "SECOND", "THIRD"]);

    let result = run_crew_with_client(&crew, client.clone(), report_params("x").client_config()).await;

    assert_completed(&result);
    let last_prompt = client.prompt(2);
    let first = last_prompt.find("FIRST").unwrap();
    let second = last_prompt.find("SECOND").unwrap();
    assert!(first < second);
    assert!(!client.prompt(1).contains("SECOND"));
}

/// Progress events describe the run
#[tokio::test]
async fn test_events_track_progress() {
    let params = report_params("Solid State Batteries");
    let crew = Crew::research_report(&params).unwrap();
    let client = MockClient::scripted(vec!["FACTS", "ARTICLE"]);

    let result = run_crew_with_client(&crew, client, params.client_config()).await;

    let started: Vec<_> = result
        .events
        .iter()
        .filter_map(|e| match e {
            ExecutionEvent::TaskStarted { agent_role, .. } => Some(agent_role.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec!["Senior Research Analyst", "Technical Content Strategist"]);
    assert!(matches!(
        result.events.last(),
        Some(ExecutionEvent::RunFinished {
            status: ExecutionStatus::Completed,
            ..
        })
    ));
    assert_eq!(result.state.completed_tasks(), 2);
}
