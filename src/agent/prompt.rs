//! ReAct prompt template
//!
//! The initial prompt is laid out as
//! `{prefix}\n\n{tool descriptions}\n\n{instructions}\n\n{suffix}`.
//! Models are prompted to follow this format exactly, so whitespace matters.

use crate::tools::ToolRegistry;

/// Default prompt prefix
pub const PREFIX: &str =
    "Answer the following question as best you can. You have access to the following tools:";

/// Default prompt suffix
pub const SUFFIX: &str = "Begin\n\nQuestion: {question}\n";

/// Default format instructions
pub const INSTRUCTIONS: &str = "Use the following format:\n\n\
Question: the input question you must answer\n\
Thought: you should always think about what to do next\n\
Action: the action to take, should be one of {tool_names}\n\
Action Input: The input to the action\n\
Observation: the result of the action\n\
... (this Thought/Action/Action Input/Observation can repeat N times)\n\
Thought: I now know the final answer\n\
Final Answer: the final answer to the original input question";

/// The three editable sections of the initial prompt
///
/// `{question}` and `{tool_names}` are substituted in every section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub prefix: String,
    pub suffix: String,
    pub instructions: String,
}

impl PromptTemplate {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            instructions: instructions.into(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Render the initial prompt for a question
    pub fn render(&self, question: &str, tools: &ToolRegistry) -> String {
        let tool_names = format_tool_names(&tools.tool_names());
        let values = [("{question}", question), ("{tool_names}", tool_names.as_str())];
        let fill = |section: &str| fill_placeholders(section, &values);

        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            fill(&self.prefix),
            tools.descriptions(),
            fill(&self.instructions),
            fill(&self.suffix)
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(PREFIX, SUFFIX, INSTRUCTIONS)
    }
}

/// Substitute placeholders in a single left-to-right pass
///
/// Substituted text is never scanned again, so a question or tool name
/// containing `{question}` is inserted verbatim.
fn fill_placeholders(section: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(section.len());
    let mut rest = section;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render tool names as `['Search', 'Calculator']`
pub fn format_tool_names(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{FnTool, Tool};
    use std::sync::Arc;

    fn registry() -> ToolRegistry {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(FnTool::new("Search", "Look things up", |i| Ok(i.to_string()))),
            Arc::new(FnTool::new("Calculator", "Do math", |i| Ok(i.to_string()))),
        ];
        ToolRegistry::from_tools(tools).unwrap()
    }

    #[test]
    fn test_format_tool_names() {
        assert_eq!(format_tool_names(&["Search", "Calculator"]), "['Search', 'Calculator']");
        assert_eq!(format_tool_names(&[]), "[]");
    }

    #[test]
    fn test_default_layout() {
        let prompt = PromptTemplate::default().render("What is 2+2?", &registry());

        let expected_start = format!(
            "{}\n\nSearch: Look things up\n\nCalculator: Do math\n\nUse the following format:",
            PREFIX
        );
        assert!(prompt.starts_with(&expected_start));
        assert!(prompt.contains("should be one of ['Search', 'Calculator']\n"));
        assert!(prompt.ends_with(
            "Final Answer: the final answer to the original input question\n\nBegin\n\nQuestion: What is 2+2?\n"
        ));
    }

    #[test]
    fn test_custom_sections() {
        let template = PromptTemplate::default()
            .with_prefix("Tools:")
            .with_instructions("Pick from {tool_names}.")
            .with_suffix("Q: {question}");
        let prompt = template.render("why?", &registry());

        assert_eq!(
            prompt,
            "Tools:\n\nSearch: Look things up\n\nCalculator: Do math\n\nPick from ['Search', 'Calculator'].\n\nQ: why?"
        );
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(FnTool::new(
            "{question}",
            "Odd name",
            |i| Ok(i.to_string()),
        ))];
        let registry = ToolRegistry::from_tools(tools).unwrap();
        let prompt = PromptTemplate::default().render("QQ", &registry);

        assert!(prompt.contains("should be one of ['{question}']\n"));
        assert!(prompt.ends_with("Question: QQ\n"));

        let prompt = PromptTemplate::default().render("what is {tool_names}?", &registry);
        assert!(prompt.ends_with("Question: what is {tool_names}?\n"));
    }

    #[test]
    fn test_fill_placeholders_keeps_other_braces() {
        let filled = fill_placeholders("{a} {x} {", &[("{a}", "1")]);
        assert_eq!(filled, "1 {x} {");
    }

    #[test]
    fn test_descriptions_are_not_templated() {
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(FnTool::new(
            "Json",
            "Takes {\"key\": value}",
            |i| Ok(i.to_string()),
        ))];
        let registry = ToolRegistry::from_tools(tools).unwrap();
        let prompt = PromptTemplate::default().render("q", &registry);
        assert!(prompt.contains("Json: Takes {\"key\": value}"));
    }
}
