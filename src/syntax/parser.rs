//! Turtille Parser
//!
//! Runs the pest grammar over a single line and hands the parse tree to the
//! [`AstBuilder`]. Grammar failures become [`TurtilleError::Syntax`] with the
//! unparsable fragment labelled in the source line.

use pest::{
    error::{Error, InputLocation},
    Parser,
};
use pest_derive::Parser;

use crate::{
    ast::{builder::AstBuilder, Statement},
    errors::{Result, SourceContext, TurtilleError},
};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub(crate) struct TurtilleParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses multi-line source into statements, stopping at the first bad line.
///
/// Lines are named `<source_name>:<line>` in diagnostics.
pub fn parse(text: &str, source_name: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let name = format!("{source_name}:{}", index + 1);
        if let Some(statement) = parse_line(line, &name)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

/// Parses one line. Blank lines yield `None`.
pub fn parse_line(line: &str, source_name: &str) -> Result<Option<Statement>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let source = SourceContext::new(source_name, line);
    let mut pairs = TurtilleParser::parse(Rule::line, line)
        .map_err(|e| convert_parse_error(e, &source))?;
    match pairs.next() {
        Some(pair) => AstBuilder::new(&source).build_line(pair),
        None => Ok(None),
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceContext) -> TurtilleError {
    let (start, end) = match error.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span(span) => span,
    };
    let error = error.renamed_rules(describe_rule);
    let help = error.variant.message().into_owned();
    source.syntax_error(start..end, Some(help))
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of line",
        Rule::definition => "a definition",
        Rule::run | Rule::command | Rule::call => "a command",
        Rule::comment => "a comment",
        Rule::postfix_repeat => "'* count'",
        Rule::repeat | Rule::kw_repeat => "'repeat'",
        Rule::animate | Rule::kw_animate => "'animate'",
        Rule::times => "'count * command'",
        Rule::movement | Rule::movement_kw => "forward/back/left/right",
        Rule::goto | Rule::goto_kw => "move/goto",
        Rule::block => "'[ ... ]'",
        Rule::name => "a command name",
        Rule::text => "quoted text",
        Rule::expr | Rule::term | Rule::factor | Rule::negated | Rule::number => "a number",
        Rule::add_op | Rule::mul_op => "an operator",
        other => return format!("{other:?}"),
    }
    .to_string()
}
