//! Test: Validation - bad input never reaches the client

use crate::helpers::*;
use crewx::core::{report_filename, Crew, CrewError, ExecutionStatus, ValidationError};

/// Missing topic: crew construction fails, zero calls
#[tokio::test]
async fn test_missing_topic() {
    let params = report_params("   ");
    let err = Crew::research_report(&params).unwrap_err();
    assert_eq!(err, ValidationError::MissingTopic);

    let crew_error = CrewError::from(err);
    assert!(crew_error.is_missing_input());
    assert!(crew_error.user_message().contains("research topic"));
}

/// Missing credential: the engine refuses to start, zero calls
#[tokio::test]
async fn test_missing_credential_makes_no_calls() {
    let crew = linear_crew(2);
    let client = MockClient::scripted(vec!["unused"]);
    let config = crewx::agent::ClientConfig::new("llama3-70b-8192", "");

    let result = run_crew_with_client(&crew, client.clone(), config).await;

    assert_eq!(client.call_count(), 0);
    assert_eq!(result.status(), ExecutionStatus::Pending);
    assert!(result.events.is_empty());
    assert!(matches!(
        result.result,
        Err(CrewError::Validation(ValidationError::MissingCredential))
    ));
}

/// Unsupported model is rejected before any call
#[tokio::test]
async fn test_unsupported_model() {
    let params = report_params("Fusion").with_model("gpt-4o");
    assert_eq!(
        Crew::research_report(&params).unwrap_err(),
        ValidationError::UnsupportedModel("gpt-4o".to_string())
    );
}

/// Report file names never contain spaces
#[test]
fn test_report_filename_for_topic() {
    let name = report_filename("Solid State Batteries");
    assert!(name.contains("Solid_State_Batteries"));
    assert!(!name.contains(' '));
    assert!(name.ends_with(".md"));
}
