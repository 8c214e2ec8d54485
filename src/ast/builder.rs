//! # AST Builder
//!
//! Walks a pest parse tree for one line and emits normalized [`Statement`]s.
//!
//! - Movement keywords collapse to their one-letter alias (`backward` → `b`) and
//!   get their default argument when none is given.
//! - `move`/`mv`/`m`/`goto`/`g` all become `move`.
//! - `repeat N cmd...`, `N * cmd` and `cmd * N` all become
//!   `("repeat", [N, Program(body)])`; `animate` keeps the same shape with an optional count.
//! - Arithmetic is evaluated here, so commands only carry numbers.

use pest::iterators::{Pair, Pairs};

use crate::{
    ast::{
        expr::{Expr, Op},
        Arg, Command, Program, Statement,
    },
    errors::{Result, SourceContext, TurtilleError},
    syntax::parser::Rule,
};

pub const TURN_DEFAULT: f64 = 45.0;
pub const STEP_DEFAULT: f64 = 20.0;

/// Default argument substituted when a movement command is written bare.
pub fn default_argument(name: &str) -> Option<f64> {
    match name {
        "l" | "r" | "left" | "right" => Some(TURN_DEFAULT),
        "f" | "b" | "forward" | "back" | "backward" => Some(STEP_DEFAULT),
        _ => None,
    }
}

pub struct AstBuilder<'s> {
    source: &'s SourceContext,
}

impl<'s> AstBuilder<'s> {
    pub fn new(source: &'s SourceContext) -> Self {
        Self { source }
    }

    /// Builds the statement for a `line` pair. Comments in a run are kept as a trailing
    /// `comment` command; a comment after a definition is dropped.
    pub fn build_line(&self, pair: Pair<Rule>) -> Result<Option<Statement>> {
        let mut statement = None;
        let mut comment = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::definition => statement = Some(self.build_definition(inner)?),
                Rule::run => statement = Some(Statement::Run(self.build_commands(inner.into_inner())?)),
                Rule::comment => comment = Some(Command::comment(comment_text(inner.as_str()))),
                Rule::EOI => {}
                _ => return Err(self.malformed(&inner)),
            }
        }
        Ok(match (statement, comment) {
            (Some(Statement::Run(mut program)), Some(comment)) => {
                program.push(comment);
                Some(Statement::Run(program))
            }
            (None, Some(comment)) => Some(Statement::Run(vec![comment])),
            (statement, _) => statement,
        })
    }

    fn build_definition(&self, pair: Pair<Rule>) -> Result<Statement> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .ok_or_else(|| self.missing(span.start(), "macro name"))?
            .as_str()
            .to_string();
        let body = self.build_commands(inner)?;
        Ok(Statement::Define { name, body })
    }

    fn build_commands(&self, pairs: Pairs<Rule>) -> Result<Program> {
        pairs.map(|p| self.build_command(p)).collect()
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    fn build_command(&self, pair: Pair<Rule>) -> Result<Command> {
        if pair.as_rule() != Rule::command {
            return Err(self.malformed(&pair));
        }
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let simple = inner
            .next()
            .ok_or_else(|| self.missing(span.start(), "command"))?;
        let command = self.build_simple(simple)?;
        match inner.next() {
            Some(postfix) if postfix.as_rule() == Rule::postfix_repeat => {
                let count_pair = postfix
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.missing(span.end(), "repeat count"))?;
                let count = self.eval(count_pair)?;
                Ok(repeat_command(count, vec![command]))
            }
            Some(other) => Err(self.malformed(&other)),
            None => Ok(command),
        }
    }

    fn build_simple(&self, pair: Pair<Rule>) -> Result<Command> {
        let span = pair.as_span();
        match pair.as_rule() {
            Rule::movement => {
                let mut inner = pair.into_inner();
                let keyword = inner
                    .next()
                    .ok_or_else(|| self.missing(span.start(), "movement keyword"))?;
                let alias = &keyword.as_str()[..1];
                let args = match inner.next() {
                    Some(expr) => vec![Arg::Number(self.eval(expr)?)],
                    None => Vec::new(),
                };
                Ok(with_defaults(alias, args))
            }
            Rule::goto => {
                let mut inner = pair.into_inner().skip(1);
                let mut coordinate = |what: &str| match inner.next() {
                    Some(expr) => self.eval(expr),
                    None => Err(self.missing(span.end(), what)),
                };
                let x = coordinate("x coordinate")?;
                let y = coordinate("y coordinate")?;
                Ok(Command::new("move", vec![Arg::Number(x), Arg::Number(y)]))
            }
            Rule::call => {
                let mut inner = pair.into_inner();
                let name = inner
                    .next()
                    .ok_or_else(|| self.missing(span.start(), "command name"))?
                    .as_str();
                let args = match inner.next() {
                    Some(arg) if arg.as_rule() == Rule::text => vec![Arg::Text(text_content(arg.as_str()))],
                    Some(expr) => vec![Arg::Number(self.eval(expr)?)],
                    None => Vec::new(),
                };
                Ok(with_defaults(name, args))
            }
            Rule::repeat => {
                let mut inner = pair.into_inner().skip(1);
                let count_pair = inner
                    .next()
                    .ok_or_else(|| self.missing(span.end(), "repeat count"))?;
                let count = self.eval(count_pair)?;
                Ok(repeat_command(count, self.build_body(inner)?))
            }
            Rule::animate => {
                let mut args = Vec::new();
                let mut body = Vec::new();
                for inner in pair.into_inner().skip(1) {
                    match inner.as_rule() {
                        Rule::expr => args.push(Arg::Number(self.eval(inner)?)),
                        Rule::block => body.extend(self.build_commands(inner.into_inner())?),
                        _ => body.push(self.build_command(inner)?),
                    }
                }
                args.push(Arg::Program(body));
                Ok(Command::new("animate", args))
            }
            Rule::times => {
                let mut inner = pair.into_inner();
                let count_pair = inner
                    .next()
                    .ok_or_else(|| self.missing(span.start(), "repeat count"))?;
                let count = self.eval(count_pair)?;
                Ok(repeat_command(count, self.build_body(inner)?))
            }
            _ => Err(self.malformed(&pair)),
        }
    }

    /// A body is either a single `[ ... ]` block or a run of commands.
    fn build_body<'i>(&self, pairs: impl Iterator<Item = Pair<'i, Rule>>) -> Result<Program> {
        let mut body = Vec::new();
        for pair in pairs {
            match pair.as_rule() {
                Rule::block => body.extend(self.build_commands(pair.into_inner())?),
                _ => body.push(self.build_command(pair)?),
            }
        }
        Ok(body)
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn eval(&self, pair: Pair<Rule>) -> Result<f64> {
        self.build_expr(pair)?.eval()
    }

    fn build_expr(&self, pair: Pair<Rule>) -> Result<Expr> {
        match pair.as_rule() {
            Rule::expr | Rule::term => {
                let span = pair.as_span();
                let mut inner = pair.into_inner();
                let first = inner
                    .next()
                    .ok_or_else(|| self.missing(span.start(), "operand"))?;
                let mut lhs = self.build_expr(first)?;
                while let Some(op_pair) = inner.next() {
                    let op = Op::try_from(op_pair.as_str()).map_err(|_| self.malformed(&op_pair))?;
                    let rhs_pair = inner
                        .next()
                        .ok_or_else(|| self.missing(span.end(), "operand"))?;
                    lhs = Expr::binary(lhs, op, self.build_expr(rhs_pair)?);
                }
                Ok(lhs)
            }
            Rule::factor => {
                let span = pair.as_span();
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.missing(span.start(), "number"))?;
                self.build_expr(inner)
            }
            Rule::negated => {
                let span = pair.as_span();
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.missing(span.end(), "number"))?;
                Ok(Expr::Neg(Box::new(self.build_expr(inner)?)))
            }
            Rule::number => pair
                .as_str()
                .parse::<f64>()
                .map(Expr::Number)
                .map_err(|_| self.malformed(&pair)),
            _ => Err(self.malformed(&pair)),
        }
    }

    // ========================================================================
    // ERRORS
    // ========================================================================

    fn malformed(&self, pair: &Pair<Rule>) -> TurtilleError {
        let span = pair.as_span();
        self.source.syntax_error(
            span.start()..span.end(),
            Some(format!("unexpected {:?}", pair.as_rule())),
        )
    }

    fn missing(&self, at: usize, what: &str) -> TurtilleError {
        self.source.syntax_error(at..at, Some(format!("missing {what}")))
    }
}

fn repeat_command(count: f64, body: Program) -> Command {
    Command::new("repeat", vec![Arg::Number(count), Arg::Program(body)])
}

fn with_defaults(name: &str, args: Vec<Arg>) -> Command {
    match default_argument(name) {
        Some(default) if args.is_empty() => Command::new(name, vec![Arg::Number(default)]),
        _ => Command::new(name, args),
    }
}

fn comment_text(raw: &str) -> &str {
    raw.strip_prefix('#')
        .or_else(|| raw.strip_prefix("--"))
        .unwrap_or(raw)
        .trim()
}

fn text_content(raw: &str) -> String {
    raw.trim_matches('"').to_string()
}
