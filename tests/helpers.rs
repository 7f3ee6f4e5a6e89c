//! Test utility functions for crewx
#![allow(dead_code)]

use async_trait::async_trait;
use crewx::agent::{ClientConfig, Completion, LlmClient, LlmError};
use crewx::core::{Crew, CrewError, ExecutionStatus, PipelineResult, ReportParams, RunState};
use crewx::execution::{ExecutionEngine, ExecutionEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted reply for one call
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(LlmError),
}

/// One call received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// 0-based order in which the call arrived
    pub sequence: usize,
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

/// Mock client that returns predefined replies and records every prompt
pub struct MockClient {
    replies: Arc<Vec<MockReply>>,
    echo: bool,
    index: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockClient {
    /// Reply with `responses` in order, then fail
    pub fn scripted<S: Into<String>>(responses: Vec<S>) -> Arc<Self> {
        Self::with_replies(responses.into_iter().map(|r| MockReply::Text(r.into())).collect())
    }

    /// Reply with the prompt itself
    pub fn echo() -> Arc<Self> {
        Arc::new(Self {
            replies: Arc::new(Vec::new()),
            echo: true,
            index: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Reply `"OUTPUT <i>"` for every call before `k`, fail call `k` with `error`
    pub fn failing_at(k: usize, error: LlmError) -> Arc<Self> {
        let mut replies: Vec<MockReply> =
            (0..k).map(|i| MockReply::Text(format!("OUTPUT {}", i))).collect();
        replies.push(MockReply::Fail(error));
        Self::with_replies(replies)
    }

    pub fn with_replies(replies: Vec<MockReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Arc::new(replies),
            echo: false,
            index: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// All calls received, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Prompt of call `i`
    pub fn prompt(&self, i: usize) -> String {
        self.calls()
            .get(i)
            .map(|c| c.prompt.clone())
            .unwrap_or_else(|| panic!("MockClient: no call {}", i))
    }
}

#[async_trait]
impl LlmClient for MockClient {
    async fn generate(&self, prompt: &str, config: &ClientConfig) -> Result<Completion, LlmError> {
        let sequence = self.index.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(RecordedCall {
            sequence,
            prompt: prompt.to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        });

        if self.echo {
            return Ok(Completion::new(prompt));
        }

        match self.replies.get(sequence) {
            Some(MockReply::Text(text)) => Ok(Completion::new(text.clone())),
            Some(MockReply::Fail(error)) => Err(error.clone()),
            None => Err(LlmError::Transport(format!(
                "MockClient: No response available for request {}",
                sequence + 1
            ))),
        }
    }
}

/// Outcome of running a crew against a mock
pub struct CrewTestResult {
    pub result: Result<PipelineResult, CrewError>,
    pub state: RunState,
    pub events: Vec<ExecutionEvent>,
}

impl CrewTestResult {
    pub fn status(&self) -> ExecutionStatus {
        self.state.status
    }
}

/// Default parameters for the research report crew
pub fn report_params(topic: &str) -> ReportParams {
    ReportParams::new(topic, "gsk_test_key")
}

/// Run a crew with `client`, collecting events
pub async fn run_crew_with_client(
    crew: &Crew,
    client: Arc<MockClient>,
    config: ClientConfig,
) -> CrewTestResult {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let mut engine = ExecutionEngine::new(client, config)
        .with_event_handler(move |event| sink.lock().unwrap().push(event));

    let result = engine.execute(crew).await;
    let events = events.lock().unwrap().clone();

    CrewTestResult {
        result,
        state: engine.state().clone(),
        events,
    }
}

/// Build a linear crew with `n` tasks, one agent per task
pub fn linear_crew(n: usize) -> Crew {
    let mut builder = Crew::builder("linear");
    for i in 0..n {
        let agent = builder.agent(crewx::core::AgentDefinition::new(
            format!("Agent {}", i),
            format!("Goal {}", i),
            "Backstory",
        ));
        builder.task(agent, format!("Task {}", i), "Anything");
    }
    builder.build().unwrap()
}

/// Assert the run completed
pub fn assert_completed(result: &CrewTestResult) {
    assert_eq!(
        result.status(),
        ExecutionStatus::Completed,
        "Run should be completed, got {:?} ({:?})",
        result.status(),
        result.result.as_ref().err()
    );
    assert!(result.result.is_ok());
}

/// Assert the run failed at task `k`
pub fn assert_failed_at(result: &CrewTestResult, k: usize) {
    assert_eq!(result.status(), ExecutionStatus::Failed { task_index: k });
    let err = result.result.as_ref().err().expect("run should have failed");
    assert_eq!(err.failed_task(), Some(k));
}

/// Assert calls arrived with sequence numbers 0..n in order
pub fn assert_call_order(client: &MockClient, n: usize) {
    let calls = client.calls();
    assert_eq!(calls.len(), n, "expected {} calls, got {}", n, calls.len());
    for (i, call) in calls.iter().enumerate() {
        assert_eq!(call.sequence, i);
        assert!(
            call.prompt.contains(&format!("## Task\nTask {}", i)),
            "call {} should carry task {}",
            i,
            i
        );
    }
}
