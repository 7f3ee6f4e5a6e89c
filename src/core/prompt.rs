//! Prompt assembly

use crate::core::{AgentDefinition, ExecutionContext, TaskDefinition};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Render a template with variable substitution
///
/// Placeholders have the form `{{ name }}` (inner whitespace optional).
/// Unknown names are left untouched.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all placeholders used in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_pattern()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Build the prompt sent for one task
///
/// Sections, in order: the agent's role, goal and backstory; the task
/// description; the expected output; then every prior output in the order it
/// was produced. The context section is omitted for the first task.
pub fn assemble_prompt(
    agent: &AgentDefinition,
    task: &TaskDefinition,
    context: &ExecutionContext,
) -> String {
    let mut prompt = format!(
        "You are {}.\nYour goal: {}\n{}\n\n## Task\n{}\n\n## Expected output\n{}\n",
        agent.role(),
        agent.goal(),
        agent.backstory(),
        task.description(),
        task.expected_output()
    );

    if !context.is_empty() {
        prompt.push_str("\n## Context from previous tasks\n");
        prompt.push_str(&context.format_for_prompt());
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Crew;

    fn two_stage_crew() -> Crew {
        let mut builder = Crew::builder("test");
        let researcher = builder.agent(AgentDefinition::new("Researcher", "Find facts", "Curious."));
        let writer = builder.agent(AgentDefinition::new("Writer", "Write prose", "Eloquent."));
        builder.task(researcher, "List facts", "Bullet points");
        builder.task(writer, "Write the article", "Markdown");
        builder.build().unwrap()
    }

    #[test]
    fn test_render_template() {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), "batteries".to_string());
        vars.insert("tone".to_string(), "Technical".to_string());

        assert_eq!(
            render_template("Write a {{ tone }} report on {{topic}}", &vars),
            "Write a Technical report on batteries"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let vars = HashMap::new();
        assert_eq!(render_template("Hello {{ name }}", &vars), "Hello {{ name }}");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("{{ topic }} in a {{tone}} tone, {{ length }} words"),
            vec!["topic", "tone", "length"]
        );
    }

    #[test]
    fn test_first_prompt_has_no_context_section() {
        let crew = two_stage_crew();
        let task = &crew.tasks()[0];
        let prompt = assemble_prompt(crew.agent_for(task), task, &ExecutionContext::new());

        assert!(prompt.starts_with("You are Researcher.\nYour goal: Find facts\nCurious.\n"));
        assert!(prompt.contains("## Task\nList facts"));
        assert!(prompt.contains("## Expected output\nBullet points"));
        assert!(!prompt.contains("Context from previous tasks"));
    }

    #[test]
    fn test_prompt_includes_prior_outputs_in_order() {
        let crew = two_stage_crew();
        let mut context = ExecutionContext::new();
        context.push(0, "Researcher", "FACTS".to_string());

        let task = &crew.tasks()[1];
        let prompt = assemble_prompt(crew.agent_for(task), task, &context);

        assert!(prompt.contains("You are Writer."));
        assert!(prompt.contains("## Context from previous tasks"));
        assert!(prompt.contains("FACTS"));
        let task_pos = prompt.find("## Task").unwrap();
        let context_pos = prompt.find("FACTS").unwrap();
        assert!(task_pos < context_pos);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let crew = two_stage_crew();
        let mut context = ExecutionContext::new();
        context.push(0, "Researcher", "FACTS".to_string());
        let task = &crew.tasks()[1];

        let first = assemble_prompt(crew.agent_for(task), task, &context);
        let second = assemble_prompt(crew.agent_for(task), task, &context);
        assert_eq!(first, second);
    }
}
