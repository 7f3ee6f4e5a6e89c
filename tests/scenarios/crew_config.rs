//! Test: Crew Config - YAML crews run like built-in ones

use crate::helpers::*;
use crewx::core::config::CrewConfig;

/// A third stage added in YAML sees both earlier outputs
#[tokio::test]
async fn test_three_stage_crew_from_yaml() {
    let config = CrewConfig::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/crews/research_review.yaml"
    ))
    .unwrap();
    let params = report_params("Solid State Batteries");
    let crew = config.to_crew(&params).unwrap();
    assert_eq!(crew.len(), 3);

    let client = MockClient::scripted(vec!["FACTS", "DRAFT", "FINAL"]);
    let result = run_crew_with_client(&crew, client.clone(), params.client_config()).await;

    assert_completed(&result);
    assert_eq!(result.result.as_ref().unwrap().text(), "FINAL");
    assert_eq!(client.call_count(), 3);

    let editor_prompt = client.prompt(2);
    assert!(editor_prompt.contains("You are Managing Editor."));
    assert!(editor_prompt.contains("FACTS"));
    assert!(editor_prompt.contains("DRAFT"));
}

/// The bundled research crew file validates
#[test]
fn test_bundled_crew_file_is_valid() {
    let config = CrewConfig::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/crews/research_report.yaml"
    ))
    .unwrap();
    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.tasks.len(), 2);
}
