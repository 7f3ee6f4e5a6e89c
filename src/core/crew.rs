//! Crew domain model - agents plus the ordered tasks bound to them

use crate::core::prompt::render_template;
use crate::core::{AgentDefinition, AgentRef, ReportParams, TaskDefinition, ValidationError};
use uuid::Uuid;

pub const RESEARCHER_ROLE: &str = "Senior Research Analyst";
pub const RESEARCHER_GOAL: &str = "Conduct in-depth research about {{ topic }}";
pub const RESEARCHER_BACKSTORY: &str =
    "You are an expert researcher with access to complex data patterns.";

pub const WRITER_ROLE: &str = "Technical Content Strategist";
pub const WRITER_GOAL: &str = "Write a {{ tone }} report about {{ topic }} based on research";
pub const WRITER_BACKSTORY: &str =
    "You specialize in translating complex research into engaging articles.";

pub const RESEARCH_TASK: &str = "Analyze {{ topic }} and provide 5 key breakthrough facts.";
pub const RESEARCH_EXPECTED_OUTPUT: &str = "Bullet points of high-quality research data.";

pub const WRITING_TASK: &str =
    "Using the research, write a {{ length }}-word article in a {{ tone }} tone.";
pub const WRITING_EXPECTED_OUTPUT: &str = "A professionally formatted Markdown article.";

/// A validated set of agents plus the tasks to run, in order
#[derive(Debug, Clone)]
pub struct Crew {
    id: Uuid,
    name: String,
    agents: Vec<AgentDefinition>,
    tasks: Vec<TaskDefinition>,
}

impl Crew {
    /// Start building a crew
    pub fn builder(name: impl Into<String>) -> CrewBuilder {
        CrewBuilder {
            id: Uuid::new_v4(),
            name: name.into(),
            agents: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// The two-stage research report crew
    ///
    /// Validates the parameters first, then renders the agent and task
    /// templates with them. The writing task never embeds research output;
    /// that arrives through the execution context.
    pub fn research_report(params: &ReportParams) -> Result<Crew, ValidationError> {
        params.validate()?;
        let vars = params.template_variables();
        let render = |template: &str| render_template(template, &vars);

        let mut builder = Crew::builder("research-report");
        let researcher = builder.agent(AgentDefinition::new(
            RESEARCHER_ROLE,
            render(RESEARCHER_GOAL),
            RESEARCHER_BACKSTORY,
        ));
        let writer = builder.agent(AgentDefinition::new(
            WRITER_ROLE,
            render(WRITER_GOAL),
            WRITER_BACKSTORY,
        ));

        builder
            .task(researcher, render(RESEARCH_TASK), RESEARCH_EXPECTED_OUTPUT)
            .task(writer, render(WRITING_TASK), WRITING_EXPECTED_OUTPUT);

        builder.build()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agents(&self) -> &[AgentDefinition] {
        &self.agents
    }

    /// Tasks in execution order
    pub fn tasks(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The agent a task is bound to
    ///
    /// Every task of a built crew references one of its own agents, so the
    /// lookup cannot miss.
    pub fn agent_for(&self, task: &TaskDefinition) -> &AgentDefinition {
        &self.agents[task.agent().index()]
    }
}

/// Builder that hands out agent references and checks the crew invariants
#[derive(Debug)]
pub struct CrewBuilder {
    id: Uuid,
    name: String,
    agents: Vec<AgentDefinition>,
    tasks: Vec<TaskDefinition>,
}

impl CrewBuilder {
    /// Add an agent and get a reference for binding tasks to it
    pub fn agent(&mut self, agent: AgentDefinition) -> AgentRef {
        self.agents.push(agent);
        AgentRef {
            crew_id: self.id,
            index: self.agents.len() - 1,
        }
    }

    /// Append a task bound to `agent`
    pub fn task(
        &mut self,
        agent: AgentRef,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> &mut Self {
        self.tasks
            .push(TaskDefinition::new(agent, description, expected_output));
        self
    }

    /// Check invariants and produce the crew
    pub fn build(self) -> Result<Crew, ValidationError> {
        if self.agents.iter().any(|a| a.role().trim().is_empty()) {
            return Err(ValidationError::EmptyRole);
        }
        if self.tasks.is_empty() {
            return Err(ValidationError::NoTasks);
        }
        for (task_index, task) in self.tasks.iter().enumerate() {
            let agent = task.agent();
            if agent.crew_id != self.id || agent.index >= self.agents.len() {
                return Err(ValidationError::ForeignAgent { task_index });
            }
            if task.description().trim().is_empty() {
                return Err(ValidationError::EmptyDescription(task_index));
            }
        }

        Ok(Crew {
            id: self.id,
            name: self.name,
            agents: self.agents,
            tasks: self.tasks,
        })
    }
}
