//! Logos-based lexer for the alias surface language.
//!
//! Every byte of the input ends up in exactly one token; unknown input
//! becomes `ERROR` tokens so the parser stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// One lexed token and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Iterator of [`Token`]s over a source string
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Lex all of `input` at once
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Raw logos tokens, converted into [`SyntaxKind`]s by the iterator
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    UpperIdent,

    #[regex(r"[a-z_][a-zA-Z0-9_]*[?!]?")]
    Ident,

    #[regex(r"[a-z_][a-zA-Z0-9_]*:")]
    KeywordKey,

    #[regex(r":[a-zA-Z_][a-zA-Z0-9_]*")]
    Atom,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("defmodule")]
    DefmoduleKw,
    #[token("defprotocol")]
    DefprotocolKw,
    #[token("defimpl")]
    DefimplKw,
    #[token("alias")]
    AliasKw,
    #[token("do")]
    DoKw,
    #[token("end")]
    EndKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Comment => SyntaxKind::COMMENT,

            UpperIdent => SyntaxKind::UPPER_IDENT,
            Ident => SyntaxKind::IDENT,
            KeywordKey => SyntaxKind::KEYWORD_KEY,
            Atom => SyntaxKind::ATOM,
            Integer => SyntaxKind::INTEGER,
            String => SyntaxKind::STRING,

            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,

            DefmoduleKw => SyntaxKind::DEFMODULE_KW,
            DefprotocolKw => SyntaxKind::DEFPROTOCOL_KW,
            DefimplKw => SyntaxKind::DEFIMPL_KW,
            AliasKw => SyntaxKind::ALIAS_KW,
            DoKw => SyntaxKind::DO_KW,
            EndKw => SyntaxKind::END_KW,
        }
    }
}
