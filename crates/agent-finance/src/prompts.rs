//! Prompt templates for the finance agent

use crate::error::Result;
use minijinja::{Environment, context};

/// Rules the agent must follow on every run
pub const INSTRUCTIONS: &[&str] = &[
    "You MUST call the available tools to get real data.",
    "ALWAYS print numeric values in markdown tables.",
    "Include stock price, market cap, PE, PB, EPS, dividend yield, beta, 52-week high and low.",
    "If comparing two stocks, output a side-by-side table.",
];

const SYSTEM_TEMPLATE: &str = "\
You are {{ name }}, a financial analysis assistant.

Instructions:
{% for rule in instructions %}- {{ rule }}
{% endfor %}
Use markdown to format your answers.
{%- if tools %}

Available tools: {{ tools | join(\", \") }}.
{%- endif %}";

const QUERY_TEMPLATE: &str =
    "Analyze and compare these stocks if more than one is given: {{ input }}";

/// Name the agent introduces itself with
pub const AGENT_NAME: &str = "xAI Finance Agent";

/// Render the system prompt listing the instructions and tool names
pub fn system_prompt(tools: &[&str]) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(
        SYSTEM_TEMPLATE,
        context! {
            name => AGENT_NAME,
            instructions => INSTRUCTIONS,
            tools => tools,
        },
    )?)
}

/// Render the user message for a raw ticker input
///
/// The input is embedded verbatim, not the parsed symbol list.
pub fn analysis_query(raw_input: &str) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(QUERY_TEMPLATE, context! { input => raw_input })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_query_embeds_raw_input() {
        assert_eq!(
            analysis_query("aapl vs msft").unwrap(),
            "Analyze and compare these stocks if more than one is given: aapl vs msft"
        );
        assert!(analysis_query("TSLA,MSFT").unwrap().ends_with("TSLA,MSFT"));
    }

    #[test]
    fn test_system_prompt_lists_instructions_and_tools() {
        let prompt = system_prompt(&["price_history", "stock_price"]).unwrap();

        assert!(prompt.starts_with("You are xAI Finance Agent"));
        for rule in INSTRUCTIONS {
            assert!(prompt.contains(&format!("- {rule}")), "missing rule: {rule}");
        }
        assert!(prompt.contains("Available tools: price_history, stock_price."));
    }

    #[test]
    fn test_system_prompt_without_tools() {
        let prompt = system_prompt(&[]).unwrap();
        assert!(!prompt.contains("Available tools"));
        assert!(prompt.trim_end().ends_with("Use markdown to format your answers."));
    }
}
