//! ReAct output parser
//!
//! Scans a model completion line by line for the first `Action:` or
//! `Final Answer:` marker. Other `key: value` lines (`Thought:`, `Plan:`,
//! ...) are treated as free-form thought text.

use std::fmt;

pub const ACTION: &str = "Action";
pub const ACTION_INPUT: &str = "Action Input";
pub const FINAL_ANSWER: &str = "Final Answer";
pub const OBSERVATION_PREFIX: &str = "Observation:";

/// Appended to completions that contain no recognizable action
pub const UNPARSED_WARNING: &str = "Warning: No parsable action detected. Be sure to use the \"Action:\"/\"Action Input:\" or \"Final Answer:\" format.";

/// What the model asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    /// Run a tool and observe its output
    ToolCall {
        thought: String,
        tool: String,
        input: String,
    },
    /// The model is done
    FinalAnswer { thought: String, answer: String },
    /// Neither marker was found
    Unparsed { raw: String, warning: String },
}

impl fmt::Display for ParsedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedAction::ToolCall {
                thought,
                tool,
                input,
            } => write!(
                f,
                "ToolCall {{ thought: {:?}, tool: {:?}, input: {:?} }}",
                thought, tool, input
            ),
            ParsedAction::FinalAnswer { thought, answer } => write!(
                f,
                "FinalAnswer {{ thought: {:?}, answer: {:?} }}",
                thought, answer
            ),
            ParsedAction::Unparsed { raw, warning } => write!(f, "{}\n{}", raw, warning),
        }
    }
}

/// Text before the first colon, trimmed
fn marker(line: &str) -> Option<&str> {
    line.split_once(':').map(|(key, _)| key.trim())
}

/// Text after the first colon, trimmed
fn value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}

/// Parse one model completion
pub fn parse_output(output: &str) -> ParsedAction {
    let lines: Vec<&str> = output.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let Some(kind) = marker(line) else {
            continue;
        };

        match kind {
            ACTION => {
                let tool = value(line).unwrap_or_default().to_string();
                let thought = lines[..idx].join("\n");
                let input = collect_input(&lines[idx + 1..]);
                return ParsedAction::ToolCall {
                    thought,
                    tool,
                    input,
                };
            }
            FINAL_ANSWER => {
                return ParsedAction::FinalAnswer {
                    thought: lines[..idx].join("\n"),
                    answer: value(line).unwrap_or_default().to_string(),
                };
            }
            _ => {}
        }
    }

    ParsedAction::Unparsed {
        raw: output.to_string(),
        warning: UNPARSED_WARNING.to_string(),
    }
}

/// Gather the tool input from the lines following an `Action:` line
///
/// The first line should be `Action Input: ...`. Later lines are appended
/// verbatim until an `Observation:` line or the end of the completion.
fn collect_input(rest: &[&str]) -> String {
    let Some((first, tail)) = rest.split_first() else {
        tracing::warn!("Possible problem parsing action input: no line after Action");
        return String::new();
    };

    if marker(first) != Some(ACTION_INPUT) {
        tracing::warn!("Possible problem parsing action input: {:?}", first);
    }

    let mut input = value(first).unwrap_or_else(|| first.trim()).to_string();
    for line in tail {
        if line.starts_with(OBSERVATION_PREFIX) {
            break;
        }
        input.push('\n');
        input.push_str(line);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call() {
        let parsed = parse_output(
            "Thought: I should search\nAction: Search\nAction Input: capital of France\nObservation: ignored",
        );
        assert_eq!(
            parsed,
            ParsedAction::ToolCall {
                thought: "Thought: I should search".into(),
                tool: "Search".into(),
                input: "capital of France".into(),
            }
        );
    }

    #[test]
    fn test_final_answer() {
        let parsed = parse_output("Thought: done\nFinal Answer: Paris");
        assert_eq!(
            parsed,
            ParsedAction::FinalAnswer {
                thought: "Thought: done".into(),
                answer: "Paris".into(),
            }
        );
    }

    #[test]
    fn test_no_marker() {
        let parsed = parse_output("no colons here");
        match &parsed {
            ParsedAction::Unparsed { raw, warning } => {
                assert_eq!(raw, "no colons here");
                assert_eq!(warning, UNPARSED_WARNING);
            }
            other => panic!("Expected Unparsed, got {:?}", other),
        }
        assert_eq!(
            parsed.to_string(),
            format!("no colons here\n{}", UNPARSED_WARNING)
        );
    }

    #[test]
    fn test_multiline_input() {
        let parsed = parse_output("Action: Search\nAction Input: line one\nextra line\nObservation: x");
        match parsed {
            ParsedAction::ToolCall {
                thought,
                tool,
                input,
            } => {
                assert_eq!(thought, "");
                assert_eq!(tool, "Search");
                assert_eq!(input, "line one\nextra line");
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_input_runs_to_end_without_observation() {
        let parsed = parse_output("Action: Python\nAction Input: x = 1\n    print(x)\n");
        match parsed {
            ParsedAction::ToolCall { input, .. } => assert_eq!(input, "x = 1\n    print(x)"),
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_colons_in_values() {
        let parsed = parse_output("Thought: t\nFinal Answer: at 10:30: on Monday");
        assert_eq!(
            parsed,
            ParsedAction::FinalAnswer {
                thought: "Thought: t".into(),
                answer: "at 10:30: on Monday".into(),
            }
        );

        let parsed = parse_output("Action: Fetch\nAction Input: https://example.com");
        match parsed {
            ParsedAction::ToolCall { input, .. } => assert_eq!(input, "https://example.com"),
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_action_input_line() {
        let parsed = parse_output("Action: Search\nParis population");
        match parsed {
            ParsedAction::ToolCall { tool, input, .. } => {
                assert_eq!(tool, "Search");
                assert_eq!(input, "Paris population");
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }

        let parsed = parse_output("Thought: go\nAction: Clock");
        match parsed {
            ParsedAction::ToolCall { tool, input, .. } => {
                assert_eq!(tool, "Clock");
                assert_eq!(input, "");
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_first_marker_wins() {
        let parsed = parse_output(
            "Plan: look it up\nAction: Search\nAction Input: q\nFinal Answer: too early",
        );
        match parsed {
            ParsedAction::ToolCall {
                thought, input, ..
            } => {
                assert_eq!(thought, "Plan: look it up");
                assert_eq!(input, "q\nFinal Answer: too early");
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_markers_only() {
        let parsed = parse_output("Thought: hmm\nNote: nothing to do");
        assert!(matches!(parsed, ParsedAction::Unparsed { .. }));
    }
}
