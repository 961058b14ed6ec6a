/*!
 * Command Line Parser
 * Turns one input line into a command or a two-stage pipeline
 */

use crate::process::pipeline::PipelineRequest;
use crate::process::types::CommandSpec;
use miette::Diagnostic;
use thiserror::Error;

/// Parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ParseError {
    #[error("unbalanced quotes")]
    #[diagnostic(code(parse::unbalanced_quotes))]
    UnbalancedQuotes,

    #[error("missing file name after '{0}'")]
    #[diagnostic(code(parse::missing_redirect_target))]
    MissingRedirectTarget(char),

    #[error("empty command in pipeline")]
    #[diagnostic(code(parse::empty_stage))]
    EmptyStage,

    #[error("only a single '|' is supported")]
    #[diagnostic(code(parse::too_many_stages))]
    TooManyStages,

    #[error("'&' is only allowed at the end of the line")]
    #[diagnostic(code(parse::misplaced_background))]
    MisplacedBackground,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Single(CommandSpec),
    Pipeline(PipelineRequest),
}

/// Lexical unit of a line: a word, or an unquoted operator
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Op(char),
}

const OPERATORS: [char; 4] = ['|', '<', '>', '&'];

/// Split a line into words and operators.
///
/// Operators count only outside quotes and when not escaped. The text
/// between operators is split and unquoted by `shlex`.
fn tokenize(line: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut segment = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(open), c) if c == open => {
                quote = None;
                segment.push(c);
            }
            (None, '\\') | (Some('"'), '\\') => {
                segment.push(c);
                if let Some(escaped) = chars.next() {
                    segment.push(escaped);
                }
            }
            (Some(_), c) => segment.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                segment.push(c);
            }
            (None, c) if OPERATORS.contains(&c) => {
                flush_words(&mut segment, &mut tokens)?;
                tokens.push(Token::Op(c));
            }
            (None, c) => segment.push(c),
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnbalancedQuotes);
    }
    flush_words(&mut segment, &mut tokens)?;
    Ok(tokens)
}

fn flush_words(segment: &mut String, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    let words = shlex::split(segment).ok_or(ParseError::UnbalancedQuotes)?;
    tokens.extend(words.into_iter().map(Token::Word));
    segment.clear();
    Ok(())
}

/// Parse one line. Blank lines yield `None`.
///
/// Words are split shell-style, so quotes group arguments and a quoted
/// `|`, `<`, `>` or `&` is an ordinary argument. `<` and `>` may be
/// separated from their target or attached to it (`>out.txt`); a final
/// `&`, spaced or not (`sleep 10&`), makes every stage a background command.
pub fn parse_line(line: &str) -> Result<Option<CommandLine>, ParseError> {
    let mut tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let background = tokens.last() == Some(&Token::Op('&'));
    if background {
        tokens.pop();
    }
    if tokens.contains(&Token::Op('&')) {
        return Err(ParseError::MisplacedBackground);
    }
    if tokens.is_empty() {
        return Err(ParseError::EmptyStage);
    }

    let mut stages = tokens
        .split(|t| *t == Token::Op('|'))
        .map(|stage| parse_stage(stage, !background))
        .collect::<Result<Vec<_>, _>>()?;

    match stages.len() {
        1 => Ok(stages.pop().map(CommandLine::Single)),
        2 => {
            let right = stages.pop().ok_or(ParseError::EmptyStage)?;
            let left = stages.pop().ok_or(ParseError::EmptyStage)?;
            Ok(Some(CommandLine::Pipeline(PipelineRequest::new(left, right))))
        }
        _ => Err(ParseError::TooManyStages),
    }
}

fn parse_stage(tokens: &[Token], blocking: bool) -> Result<CommandSpec, ParseError> {
    let mut argv: Vec<String> = Vec::new();
    let mut input = None;
    let mut output = None;

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        // `|` and `&` are gone by now, so only redirections remain
        let (target, op) = match token {
            Token::Word(word) => {
                argv.push(word.clone());
                continue;
            }
            Token::Op('<') => (&mut input, '<'),
            Token::Op(op) => (&mut output, *op),
        };

        match iter.next() {
            Some(Token::Word(path)) => *target = Some(path.clone()),
            _ => return Err(ParseError::MissingRedirectTarget(op)),
        }
    }

    let mut argv = argv.into_iter();
    let program = argv.next().ok_or(ParseError::EmptyStage)?;

    let mut spec = CommandSpec::new(program)
        .with_args(argv)
        .with_blocking(blocking);
    if let Some(path) = input {
        spec = spec.with_input(path);
    }
    if let Some(path) = output {
        spec = spec.with_output(path);
    }
    Ok(spec)
}
