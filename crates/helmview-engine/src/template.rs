//! Constrained template substitution
//!
//! The ConfigMap preview template uses a fixed vocabulary of directives:
//!
//! ```text
//! {{#if (lookup Values.data "config.json")}} ... {{else}} ... {{/if}}
//! {{#each (splitLines (lookup Values.data "config.json"))}} {{this}} {{/each}}
//! ```
//!
//! This is a closed grammar, not general Handlebars. The parser recognizes
//! exactly these shapes as a tagged directive tree and treats everything
//! else as literal text; a general template language would be solving a
//! problem this tool does not have.
//!
//! Rendering is total. A lookup that does not resolve is falsy, an `each`
//! over a missing or non-string value iterates zero times, and malformed
//! or unterminated directives degrade to best-effort output. Identical
//! (template, context) inputs always produce identical output.

use serde_json::Value as JsonValue;

/// A node in the directive tree
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Verbatim text
    Literal(String),

    /// `{{#if (lookup PATH "KEY")}} then {{else}} else {{/if}}`
    IfLookup {
        path: String,
        key: String,
        then_branch: Vec<Directive>,
        else_branch: Vec<Directive>,
    },

    /// `{{#each (splitLines (lookup PATH "KEY"))}} body {{/each}}`
    EachSplitLines {
        path: String,
        key: String,
        body: Vec<Directive>,
    },

    /// `{{this}}` - the current line inside an `each` body
    This,
}

/// A parsed template, ready to render against a context
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    directives: Vec<Directive>,
}

impl Template {
    /// Parse a template source string
    ///
    /// Total: malformed directives become literal text and unterminated
    /// blocks absorb the rest of the input.
    pub fn parse(source: &str) -> Self {
        let tokens = lex(source);
        let mut pos = 0;
        let mut directives = Vec::new();

        // A stray closer at the top level terminates parse_block early;
        // it carries no text, so keep parsing what follows it
        while pos < tokens.len() {
            let (mut block, _) = parse_block(&tokens, &mut pos);
            directives.append(&mut block);
        }

        Self { directives }
    }

    /// Render against a context object
    ///
    /// The context is the data root the lookup paths walk from, e.g.
    /// `{"Values": {"data": {"config.json": "..."}}}`.
    pub fn render(&self, context: &JsonValue) -> String {
        let mut out = String::new();
        render_into(&self.directives, context, None, &mut out);
        out
    }

    /// Access the parsed directive tree
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

/// Parse and render in one step
pub fn render(source: &str, context: &JsonValue) -> String {
    Template::parse(source).render(context)
}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    OpenIf { path: String, key: String },
    Else,
    CloseIf,
    OpenEach { path: String, key: String },
    This,
    CloseEach,
}

fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        let after_braces = &rest[start + 2..];

        match lex_tag(after_braces) {
            Some((token, consumed)) => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(token);
                rest = &after_braces[consumed..];
            }
            None => {
                // Not a directive we know; keep the braces as literal text
                // and rescan right after them so inner tags still match
                text.push_str("{{");
                rest = after_braces;
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }

    tokens
}

/// Try to lex one tag starting just past `{{`; returns the token and the
/// number of bytes consumed (through the closing `}}`)
fn lex_tag(input: &str) -> Option<(Token, usize)> {
    let close = input.find("}}")?;
    let inner = input[..close].trim();
    let consumed = close + 2;

    let token = match inner {
        "else" => Token::Else,
        "/if" => Token::CloseIf,
        "this" => Token::This,
        "/each" => Token::CloseEach,
        _ => {
            if let Some(expr) = inner.strip_prefix("#if") {
                let (path, key) = parse_lookup(expr.trim())?;
                Token::OpenIf { path, key }
            } else if let Some(expr) = inner.strip_prefix("#each") {
                let (path, key) = parse_split_lines(expr.trim())?;
                Token::OpenEach { path, key }
            } else {
                return None;
            }
        }
    };

    Some((token, consumed))
}

/// Parse `(lookup PATH "KEY")`, returning the path and key
fn parse_lookup(expr: &str) -> Option<(String, String)> {
    let inner = expr.strip_prefix('(')?.strip_suffix(')')?.trim();
    let args = inner.strip_prefix("lookup")?.trim_start();

    let (path, rest) = match args.find(char::is_whitespace) {
        Some(idx) => (&args[..idx], args[idx..].trim_start()),
        None => return None,
    };

    let key = rest.strip_prefix('"')?;
    let end = key.find('"')?;
    if !key[end + 1..].trim().is_empty() {
        return None;
    }

    Some((path.to_string(), key[..end].to_string()))
}

/// Parse `(splitLines (lookup PATH "KEY"))`
fn parse_split_lines(expr: &str) -> Option<(String, String)> {
    let inner = expr.strip_prefix('(')?.strip_suffix(')')?.trim();
    let lookup_expr = inner.strip_prefix("splitLines")?.trim();
    parse_lookup(lookup_expr)
}

// ============================================================================
// Parser
// ============================================================================

/// What ended a block
#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockEnd {
    Else,
    EndIf,
    EndEach,
    Eof,
}

/// Consume tokens into a directive list until a terminator or end of input
fn parse_block(tokens: &[Token], pos: &mut usize) -> (Vec<Directive>, BlockEnd) {
    let mut directives = Vec::new();

    while *pos < tokens.len() {
        let token = &tokens[*pos];
        *pos += 1;

        match token {
            Token::Text(text) => directives.push(Directive::Literal(text.clone())),
            Token::This => directives.push(Directive::This),
            Token::Else => return (directives, BlockEnd::Else),
            Token::CloseIf => return (directives, BlockEnd::EndIf),
            Token::CloseEach => return (directives, BlockEnd::EndEach),
            Token::OpenIf { path, key } => {
                let (then_branch, end) = parse_block(tokens, pos);
                let else_branch = if end == BlockEnd::Else {
                    let (branch, _) = parse_block(tokens, pos);
                    branch
                } else {
                    Vec::new()
                };
                directives.push(Directive::IfLookup {
                    path: path.clone(),
                    key: key.clone(),
                    then_branch,
                    else_branch,
                });
            }
            Token::OpenEach { path, key } => {
                let (body, _) = parse_block(tokens, pos);
                directives.push(Directive::EachSplitLines {
                    path: path.clone(),
                    key: key.clone(),
                    body,
                });
            }
        }
    }

    (directives, BlockEnd::Eof)
}

// ============================================================================
// Renderer
// ============================================================================

/// Resolve `(lookup PATH "KEY")` against the context
fn lookup<'a>(context: &'a JsonValue, path: &str, key: &str) -> Option<&'a JsonValue> {
    let mut node = context;
    for part in path.split('.') {
        node = node.as_object()?.get(part)?;
    }
    node.as_object()?.get(key)
}

/// JavaScript-style truthiness: null, false, 0, and "" are falsy
fn is_truthy(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => true,
    }
}

fn render_into(
    directives: &[Directive],
    context: &JsonValue,
    current_line: Option<&str>,
    out: &mut String,
) {
    for directive in directives {
        match directive {
            Directive::Literal(text) => out.push_str(text),
            Directive::This => {
                if let Some(line) = current_line {
                    out.push_str(line);
                }
            }
            Directive::IfLookup {
                path,
                key,
                then_branch,
                else_branch,
            } => {
                let branch = if is_truthy(lookup(context, path, key)) {
                    then_branch
                } else {
                    else_branch
                };
                render_into(branch, context, current_line, out);
            }
            Directive::EachSplitLines { path, key, body } => {
                if let Some(JsonValue::String(text)) = lookup(context, path, key) {
                    for line in text.split('\n') {
                        render_into(body, context, Some(line), out);
                    }
                }
            }
        }
    }
}
