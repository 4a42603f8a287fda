//! Recursive descent parser
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that end an expression list
const BLOCK_END: &[SyntaxKind] = &[SyntaxKind::END_KW];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn bump_error(&mut self) {
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    fn bump_alias(&mut self) {
        self.start_node(SyntaxKind::ALIAS);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Expr*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_exprs(&[]);
        self.skip_trivia();
        self.finish_node();
    }

    /// Expr* up to (not including) a terminator
    fn parse_exprs(&mut self, terminators: &[SyntaxKind]) {
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at_any(terminators) {
                break;
            }
            let pos_before = self.pos;
            self.parse_expr();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("unexpected token: {:?}", self.current_kind()));
                self.bump_error();
            }
        }
    }

    /// Expr = ModuleDef | AliasDirective | Chain
    fn parse_expr(&mut self) {
        self.skip_trivia();
        match self.current_kind() {
            SyntaxKind::DEFMODULE_KW | SyntaxKind::DEFPROTOCOL_KW => self.parse_module_definition(),
            SyntaxKind::DEFIMPL_KW => self.parse_implementation(),
            SyntaxKind::ALIAS_KW => self.parse_alias_directive(),
            _ => self.parse_chain(),
        }
    }

    /// ModuleDef = ("defmodule" | "defprotocol") Chain DoBlock
    fn parse_module_definition(&mut self) {
        self.start_node(SyntaxKind::MODULE_DEFINITION);
        self.bump(); // keyword
        self.skip_trivia();
        self.parse_chain();
        self.skip_trivia();
        self.parse_do_block();
        self.finish_node();
    }

    /// ModuleDef = "defimpl" Chain "," "for:" Chain DoBlock
    fn parse_implementation(&mut self) {
        self.start_node(SyntaxKind::MODULE_DEFINITION);
        self.bump(); // defimpl
        self.skip_trivia();
        self.parse_chain();
        self.skip_trivia();
        if self.eat(SyntaxKind::COMMA) {
            self.skip_trivia();
            self.start_node(SyntaxKind::FOR_CLAUSE);
            if self.at(SyntaxKind::KEYWORD_KEY) && self.current_text() == "for:" {
                self.bump();
                self.skip_trivia();
                self.parse_chain();
            } else {
                self.error("expected `for:` in defimpl");
            }
            self.finish_node();
        } else {
            self.error("expected `, for:` in defimpl");
        }
        self.skip_trivia();
        self.parse_do_block();
        self.finish_node();
    }

    /// AliasDirective = "alias" Chain ("," "as:" Alias)?
    fn parse_alias_directive(&mut self) {
        self.start_node(SyntaxKind::ALIAS_DIRECTIVE);
        self.bump(); // alias
        self.skip_trivia();
        self.parse_chain();
        if self.nth(0) == SyntaxKind::COMMA {
            self.skip_trivia();
            self.bump(); // ,
            self.skip_trivia();
            self.start_node(SyntaxKind::AS_CLAUSE);
            if self.at(SyntaxKind::KEYWORD_KEY) && self.current_text() == "as:" {
                self.bump();
                self.skip_trivia();
                if self.at(SyntaxKind::UPPER_IDENT) {
                    self.bump_alias();
                } else {
                    self.error("expected alias name after `as:`");
                }
            } else {
                self.error("expected `as:` in alias directive");
            }
            self.finish_node();
        }
        self.finish_node();
    }

    /// DoBlock = "do" Expr* "end"
    fn parse_do_block(&mut self) {
        self.start_node(SyntaxKind::DO_BLOCK);
        if self.expect(SyntaxKind::DO_KW) {
            self.parse_exprs(BLOCK_END);
            self.skip_trivia();
            self.expect(SyntaxKind::END_KW);
        }
        self.finish_node();
    }

    /// Chain = Primary ("." (Alias | Ident ArgList?))*
    ///
    /// Left-associative: `A.B.C` nests `A.B` as the qualifier of `C`.
    fn parse_chain(&mut self) {
        self.skip_trivia();
        let checkpoint = self.builder.checkpoint();
        if !self.parse_primary() {
            return;
        }

        while self.nth(0) == SyntaxKind::DOT {
            match self.nth(1) {
                SyntaxKind::UPPER_IDENT => {
                    self.start_node_at(checkpoint, SyntaxKind::QUALIFIED_ALIAS);
                    self.skip_trivia();
                    self.bump(); // .
                    self.skip_trivia();
                    self.bump_alias();
                    self.finish_node();
                }
                SyntaxKind::IDENT => {
                    self.start_node_at(checkpoint, SyntaxKind::CALL);
                    self.skip_trivia();
                    self.bump(); // .
                    self.skip_trivia();
                    self.bump(); // function name
                    if self.at(SyntaxKind::L_PAREN) {
                        self.parse_arg_list();
                    }
                    self.finish_node();
                }
                _ => {
                    self.skip_trivia();
                    self.error("expected alias or function name after `.`");
                    self.bump_error();
                    break;
                }
            }
        }
    }

    /// Primary = Alias | Ident ArgList? | "(" Expr ")" | Literal
    ///
    /// Returns false when nothing was consumed.
    fn parse_primary(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::UPPER_IDENT => {
                // The leftmost alias of a chain sits inside an access expression
                if self.nth(1) == SyntaxKind::DOT {
                    self.start_node(SyntaxKind::ACCESS_EXPRESSION);
                    self.bump_alias();
                    self.finish_node();
                } else {
                    self.bump_alias();
                }
                true
            }
            SyntaxKind::IDENT => {
                self.start_node(SyntaxKind::CALL);
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
                self.finish_node();
                true
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::ACCESS_EXPRESSION);
                self.bump();
                self.parse_expr();
                self.skip_trivia();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
                true
            }
            kind if kind.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
                true
            }
            _ => false,
        }
    }

    /// ArgList = "(" (Expr ("," Expr)*)? ")"
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.bump(); // (
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                break;
            }
            let pos_before = self.pos;
            self.parse_expr();
            if self.pos == pos_before {
                self.error("expected argument");
                self.bump_error();
            }
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }
}
