#![forbid(unsafe_code)]

//! Tokenizer for `.proto` source
//!
//! Produces a flat token stream with 1-indexed positions. Comments are not
//! tokens; each comment block is attached to the next token as its leading
//! comment, provided the block ends on the line directly above that token
//! (or on the same line, for block comments). A blank line between a comment
//! and a declaration detaches the comment.

use crate::ast::nodes::Comment;
use crate::error::ParseError;
use crate::types::Position;
use std::path::Path;

/// Kind of a lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword, possibly dotted (`google.protobuf.Empty`)
    Ident,
    /// String literal, quotes removed
    Str,
    /// Integer or floating literal, kept as written
    Number,
    /// Single punctuation character
    Symbol(char),
    /// End of input
    Eof,
}

/// One lexed token with its source position and optional leading comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub comment: Option<Comment>,
}

impl Token {
    pub fn position(&self, path: &Path) -> Position {
        Position::new(path, self.line, self.column)
    }
}

/// A comment block being accumulated during lexing
struct PendingComment {
    line: u32,
    column: u32,
    /// Line the comment block ends on
    end_line: u32,
    lines: Vec<String>,
}

struct Lexer<'a> {
    path: &'a Path,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    pending: Option<PendingComment>,
    /// Line of the most recently emitted token, 0 before the first one
    last_token_line: u32,
}

/// Tokenizes one file's source text
pub fn tokenize(path: &Path, source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        path,
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
        pending: None,
        last_token_line: 0,
    };
    lexer.run()
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    column: self.column,
                    comment: None,
                });
                return Ok(tokens);
            };

            let (line, column) = (self.line, self.column);
            let token = if c.is_alphabetic() || c == '_' {
                let text = self.read_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                Token {
                    kind: TokenKind::Ident,
                    text,
                    line,
                    column,
                    comment: None,
                }
            } else if c.is_ascii_digit() || (c == '-' && self.peek_next_is_digit()) {
                let mut text = String::new();
                if c == '-' {
                    text.push(self.advance());
                }
                text.push_str(&self.read_while(|c| {
                    c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-'
                }));
                Token {
                    kind: TokenKind::Number,
                    text,
                    line,
                    column,
                    comment: None,
                }
            } else if c == '"' || c == '\'' {
                let text = self.read_string(c)?;
                Token {
                    kind: TokenKind::Str,
                    text,
                    line,
                    column,
                    comment: None,
                }
            } else {
                self.advance();
                Token {
                    kind: TokenKind::Symbol(c),
                    text: c.to_string(),
                    line,
                    column,
                    comment: None,
                }
            };

            self.last_token_line = line;
            tokens.push(self.attach_comment(token));
        }
    }

    /// Moves a pending comment block onto `token` if it is contiguous with it
    fn attach_comment(&mut self, mut token: Token) -> Token {
        if let Some(pending) = self.pending.take() {
            let contiguous = pending.end_line + 1 == token.line || pending.end_line == token.line;
            if contiguous {
                token.comment = Some(Comment::new(
                    Position::new(self.path, pending.line, pending.column),
                    pending.lines,
                ));
            }
        }
        token
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => self.read_line_comment(),
                Some('/') if self.peek_at(1) == Some('*') => self.read_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn read_line_comment(&mut self) {
        let (line, column) = (self.line, self.column);
        self.advance(); // '/'
        self.advance(); // '/'
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(self.advance());
        }

        // A comment trailing other tokens on its line documents the
        // declaration before it, not the one after; drop it rather than
        // misattribute it.
        if line == self.last_token_line {
            return;
        }

        let text = text.strip_prefix(' ').unwrap_or(&text).to_string();

        match &mut self.pending {
            // Extend a block of consecutive line comments.
            Some(pending) if pending.end_line + 1 == line => {
                pending.lines.push(text);
                pending.end_line = line;
            }
            _ => {
                self.pending = Some(PendingComment {
                    line,
                    column,
                    end_line: line,
                    lines: vec![text],
                });
            }
        }
    }

    fn read_block_comment(&mut self) -> Result<(), ParseError> {
        let (line, column) = (self.line, self.column);
        self.advance(); // '/'
        self.advance(); // '*'
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => text.push(self.advance()),
                None => {
                    return Err(self.error(line, column, "unterminated block comment"));
                }
            }
        }

        if line == self.last_token_line {
            return Ok(());
        }

        let lines: Vec<String> = text
            .lines()
            .map(|l| {
                let l = l.trim_start();
                let l = l.strip_prefix('*').unwrap_or(l);
                l.strip_prefix(' ').unwrap_or(l).to_string()
            })
            .filter(|l| !l.is_empty())
            .collect();

        self.pending = Some(PendingComment {
            line,
            column,
            end_line: self.line,
            lines,
        });
        Ok(())
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(text);
                }
                Some('\\') => {
                    // Keep escapes verbatim; string contents are opaque here.
                    text.push(self.advance());
                    if self.peek().is_some() {
                        text.push(self.advance());
                    }
                }
                Some('\n') | None => {
                    return Err(self.error(line, column, "unterminated string literal"));
                }
                Some(_) => text.push(self.advance()),
            }
        }
    }

    fn read_while(&mut self, test: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !test(c) {
                break;
            }
            text.push(self.advance());
        }
        text
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn peek_next_is_digit(&self) -> bool {
        self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn error(&self, line: u32, column: u32, message: &str) -> ParseError {
        ParseError {
            file: self.path.to_path_buf(),
            line,
            column,
            message: message.to_string(),
        }
    }
}
