//! SPDX license expressions.
//!
//! Grammar (operators are upper-case, `AND` binds tighter than `OR`):
//!
//! ```text
//! expr  := and ("OR" and)*
//! and   := with ("AND" with)*
//! with  := atom ("WITH" exception-id)?
//! atom  := license-id ["+"] | "(" expr ")"
//! ```
//!
//! Parenthesis nesting is capped at [`MAX_NESTING`] and the number of `AND`/`OR` operators at
//! [`MAX_OPERATORS`].
//!
//! Only syntax is checked. Whether an identifier names a license that actually exists in the
//! SPDX list is left to the auditing tool.

use std::fmt;

/// Deepest parenthesis nesting accepted in one expression.
pub const MAX_NESTING: usize = 64;

/// Most `AND`/`OR` operators accepted in one expression.
pub const MAX_OPERATORS: usize = 512;

/// A single license requirement, e.g. `GPL-2.0+ WITH Classpath-exception-2.0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LicenseReq {
    pub id: String,
    pub or_later: bool,
    pub exception: Option<String>,
}

/// Parsed license expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LicenseExpr {
    License(LicenseReq),
    And(Box<LicenseExpr>, Box<LicenseExpr>),
    Or(Box<LicenseExpr>, Box<LicenseExpr>),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionErrorKind {
    #[error("expression is empty")]
    Empty,
    #[error("expression ends unexpectedly")]
    UnexpectedEnd,
    #[error("unexpected `{found}`")]
    UnexpectedToken { found: String },
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    #[error("`{id}` is not a valid license identifier")]
    InvalidIdentifier { id: String },
    #[error("operator `{found}` must be upper-case (did you mean `{expected}`?)")]
    LowercaseOperator { found: String, expected: String },
    #[error("parentheses nest deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("more than {max} AND/OR operators")]
    TooLong { max: usize },
    #[error("`{found}` joins licenses; expected a single license")]
    Compound { found: String },
}

/// Error with the byte offset into the expression where it was detected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at offset {offset})")]
pub struct ExpressionError {
    pub offset: usize,
    pub kind: ExpressionErrorKind,
}

impl LicenseExpr {
    /// Parse an SPDX license expression.
    pub fn parse(input: &str) -> Result<LicenseExpr, ExpressionError> {
        let tokens = lex(input)?;
        if tokens.is_empty() {
            return Err(ExpressionError {
                offset: 0,
                kind: ExpressionErrorKind::Empty,
            });
        }

        let mut parser = Parser::new(&tokens, input.len());
        let expr = parser.parse_or()?;
        parser.finish()?;
        Ok(expr)
    }

    /// All license requirements in the expression, left to right.
    pub fn requirements(&self) -> Vec<&LicenseReq> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a LicenseReq>) {
        match self {
            LicenseExpr::License(req) => out.push(req),
            LicenseExpr::And(a, b) | LicenseExpr::Or(a, b) => {
                a.collect(out);
                b.collect(out);
            }
        }
    }
}

impl LicenseReq {
    /// Parse one license requirement: an identifier, an optional `+`, and an optional
    /// `WITH <exception>`. Parentheses and `AND`/`OR` are rejected.
    pub fn parse(input: &str) -> Result<LicenseReq, ExpressionError> {
        let tokens = lex(input)?;
        if tokens.is_empty() {
            return Err(ExpressionError {
                offset: 0,
                kind: ExpressionErrorKind::Empty,
            });
        }
        let joiner = tokens
            .iter()
            .find(|t| !matches!(t.kind, TokenKind::Id | TokenKind::With));
        if let Some(tok) = joiner {
            return Err(ExpressionError {
                offset: tok.offset,
                kind: ExpressionErrorKind::Compound {
                    found: tok.text.to_string(),
                },
            });
        }

        let mut parser = Parser::new(&tokens, input.len());
        let expr = parser.parse_with()?;
        parser.finish()?;
        match expr {
            LicenseExpr::License(req) => Ok(req),
            LicenseExpr::And(..) | LicenseExpr::Or(..) => Err(ExpressionError {
                offset: 0,
                kind: ExpressionErrorKind::Compound {
                    found: input.trim().to_string(),
                },
            }),
        }
    }
}

impl fmt::Display for LicenseReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if self.or_later {
            f.write_str("+")?;
        }
        if let Some(exception) = &self.exception {
            write!(f, " WITH {exception}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LicenseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseExpr::License(req) => write!(f, "{req}"),
            LicenseExpr::Or(a, b) => write!(f, "{a} OR {b}"),
            LicenseExpr::And(a, b) => {
                write_and_operand(f, a)?;
                f.write_str(" AND ")?;
                write_and_operand(f, b)
            }
        }
    }
}

fn write_and_operand(f: &mut fmt::Formatter<'_>, expr: &LicenseExpr) -> fmt::Result {
    match expr {
        LicenseExpr::Or(..) => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

/// Whether `id` is a syntactically valid SPDX license (or exception) identifier.
///
/// Accepts plain idstrings (`[A-Za-z0-9.-]+`), `LicenseRef-<idstring>`, and
/// `DocumentRef-<idstring>:LicenseRef-<idstring>`.
pub fn is_valid_license_id(id: &str) -> bool {
    match id.split_once(':') {
        Some((doc, lic)) => {
            doc.strip_prefix("DocumentRef-").is_some_and(is_idstring)
                && lic.strip_prefix("LicenseRef-").is_some_and(is_idstring)
        }
        None => match id.strip_prefix("LicenseRef-") {
            Some(rest) => is_idstring(rest),
            None => is_idstring(id),
        },
    }
}

fn is_idstring(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    LParen,
    RParen,
    And,
    Or,
    With,
    Id,
}

#[derive(Clone, Debug)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    offset: usize,
}

fn lex(input: &str) -> Result<Vec<Token<'_>>, ExpressionError> {
    let mut out = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' || c == ')' {
            chars.next();
            out.push(Token {
                kind: if c == '(' {
                    TokenKind::LParen
                } else {
                    TokenKind::RParen
                },
                text: &input[offset..offset + 1],
                offset,
            });
            continue;
        }

        let mut end = offset;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        let text = &input[offset..end];
        out.push(Token {
            kind: classify(text, offset)?,
            text,
            offset,
        });
    }

    Ok(out)
}

fn classify(word: &str, offset: usize) -> Result<TokenKind, ExpressionError> {
    let op = match word {
        "AND" => return Ok(TokenKind::And),
        "OR" => return Ok(TokenKind::Or),
        "WITH" => return Ok(TokenKind::With),
        w if w.eq_ignore_ascii_case("and") => "AND",
        w if w.eq_ignore_ascii_case("or") => "OR",
        w if w.eq_ignore_ascii_case("with") => "WITH",
        _ => return Ok(TokenKind::Id),
    };
    Err(ExpressionError {
        offset,
        kind: ExpressionErrorKind::LowercaseOperator {
            found: word.to_string(),
            expected: op.to_string(),
        },
    })
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    end: usize,
    depth: usize,
    operators: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
            operators: 0,
        }
    }

    /// Fails if any token is left over.
    fn finish(&self) -> Result<(), ExpressionError> {
        let Some(tok) = self.peek() else {
            return Ok(());
        };
        let kind = match tok.kind {
            TokenKind::RParen => ExpressionErrorKind::UnbalancedParen,
            _ => ExpressionErrorKind::UnexpectedToken {
                found: tok.text.to_string(),
            },
        };
        Err(ExpressionError {
            offset: tok.offset,
            kind,
        })
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Result<Token<'a>, ExpressionError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ExpressionError {
            offset: self.end,
            kind: ExpressionErrorKind::UnexpectedEnd,
        })?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Like [`Parser::eat`] for `AND`/`OR`, counting operators against [`MAX_OPERATORS`].
    fn eat_operator(&mut self, kind: TokenKind) -> Result<bool, ExpressionError> {
        let Some(offset) = self.peek().filter(|t| t.kind == kind).map(|t| t.offset) else {
            return Ok(false);
        };
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ExpressionError {
                offset,
                kind: ExpressionErrorKind::TooLong { max: MAX_OPERATORS },
            });
        }
        self.pos += 1;
        Ok(true)
    }

    fn parse_or(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let mut left = self.parse_and()?;
        while self.eat_operator(TokenKind::Or)? {
            let right = self.parse_and()?;
            left = LicenseExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let mut left = self.parse_with()?;
        while self.eat_operator(TokenKind::And)? {
            let right = self.parse_with()?;
            left = LicenseExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_with(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let atom_offset = self.peek().map(|t| t.offset).unwrap_or(self.end);
        let atom = self.parse_atom()?;

        let Some(with) = self.peek().filter(|t| t.kind == TokenKind::With).cloned() else {
            return Ok(atom);
        };
        self.pos += 1;

        let LicenseExpr::License(mut req) = atom else {
            return Err(ExpressionError {
                offset: with.offset,
                kind: ExpressionErrorKind::UnexpectedToken {
                    found: with.text.to_string(),
                },
            });
        };
        if req.exception.is_some() {
            return Err(ExpressionError {
                offset: atom_offset,
                kind: ExpressionErrorKind::UnexpectedToken {
                    found: with.text.to_string(),
                },
            });
        }

        let tok = self.next_token()?;
        if tok.kind != TokenKind::Id {
            return Err(unexpected(&tok));
        }
        if !is_valid_license_id(tok.text) {
            return Err(ExpressionError {
                offset: tok.offset,
                kind: ExpressionErrorKind::InvalidIdentifier {
                    id: tok.text.to_string(),
                },
            });
        }
        req.exception = Some(tok.text.to_string());
        Ok(LicenseExpr::License(req))
    }

    fn parse_atom(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let tok = self.next_token()?;
        match tok.kind {
            TokenKind::LParen => {
                if self.depth == MAX_NESTING {
                    return Err(ExpressionError {
                        offset: tok.offset,
                        kind: ExpressionErrorKind::TooDeep { max: MAX_NESTING },
                    });
                }
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                if self.eat(TokenKind::RParen) {
                    Ok(inner)
                } else {
                    Err(ExpressionError {
                        offset: tok.offset,
                        kind: ExpressionErrorKind::UnbalancedParen,
                    })
                }
            }
            TokenKind::Id => {
                let (id, or_later) = match tok.text.strip_suffix('+') {
                    Some(base) => (base, true),
                    None => (tok.text, false),
                };
                if !is_valid_license_id(id) {
                    return Err(ExpressionError {
                        offset: tok.offset,
                        kind: ExpressionErrorKind::InvalidIdentifier {
                            id: tok.text.to_string(),
                        },
                    });
                }
                Ok(LicenseExpr::License(LicenseReq {
                    id: id.to_string(),
                    or_later,
                    exception: None,
                }))
            }
            TokenKind::RParen => Err(ExpressionError {
                offset: tok.offset,
                kind: ExpressionErrorKind::UnbalancedParen,
            }),
            TokenKind::And | TokenKind::Or | TokenKind::With => Err(unexpected(&tok)),
        }
    }
}

fn unexpected(tok: &Token<'_>) -> ExpressionError {
    ExpressionError {
        offset: tok.offset,
        kind: ExpressionErrorKind::UnexpectedToken {
            found: tok.text.to_string(),
        },
    }
}
