//! Parser state - token management and expression parsing methods.

use std::fmt;

use maxarity_common::EcmaVersion;
use maxarity_scanner::{ScanError, ScannerState, SyntaxKind};

use super::base::{NodeIndex, NodeList};
use super::node::{FunctionData, FunctionFlags, NodeArena, ParameterData, node_flags};
use super::parse_rules::{look_ahead_is, look_ahead_kind};
use super::syntax_kind_ext;

pub(crate) const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
pub(crate) const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 2;

/// Fatal parse failure. The analysis of the current callable is aborted;
/// there is no recovery or partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Scan(ScanError),
    UnexpectedToken {
        kind: SyntaxKind,
        pos: u32,
    },
    ExpectedToken {
        expected: SyntaxKind,
        found: SyntaxKind,
        pos: u32,
    },
    VersionGated {
        what: &'static str,
        pos: u32,
    },
    /// The parsed root was not a callable-definition node.
    NotACallable,
}

impl From<ScanError> for ParseError {
    fn from(err: ScanError) -> ParseError {
        ParseError::Scan(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Scan(err) => write!(f, "{err}"),
            ParseError::UnexpectedToken { kind, pos } => {
                write!(f, "unexpected token `{}` at {pos}", kind.label())
            }
            ParseError::ExpectedToken {
                expected,
                found,
                pos,
            } => write!(
                f,
                "expected `{}` but found `{}` at {pos}",
                expected.label(),
                found.label()
            ),
            ParseError::VersionGated { what, pos } => {
                write!(f, "{what} is not available in the selected grammar version (at {pos})")
            }
            ParseError::NotACallable => {
                write!(f, "source text did not parse to a callable definition")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Scan(err) => Some(err),
            _ => None,
        }
    }
}

/// Recursive-descent parser over a pull scanner, building a [`NodeArena`].
pub struct ParserState<'a> {
    pub(crate) scanner: ScannerState<'a>,
    pub(crate) arena: NodeArena,
    pub(crate) token: SyntaxKind,
    /// End offset of the most recently consumed token; node end positions.
    pub(crate) prev_token_end: u32,
    pub(crate) ecma: EcmaVersion,
    pub(crate) context_flags: u32,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str, ecma: EcmaVersion) -> ParserState<'a> {
        ParserState {
            scanner: ScannerState::new(source),
            arena: NodeArena::new(),
            token: SyntaxKind::Unknown,
            prev_token_end: 0,
            ecma,
            context_flags: 0,
        }
    }

    /// Pull the first token.
    pub fn prime(&mut self) -> Result<(), ParseError> {
        self.next_token()
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    // ========================================================================
    // Token plumbing
    // ========================================================================

    pub(crate) fn next_token(&mut self) -> Result<(), ParseError> {
        self.prev_token_end = self.scanner.token_end() as u32;
        self.token = self.scanner.scan()?;
        Ok(())
    }

    pub(crate) fn token_start(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    pub(crate) fn has_line_break_before_token(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> Result<(), ParseError> {
        if self.token == kind {
            self.next_token()
        } else {
            Err(ParseError::ExpectedToken {
                expected: kind,
                found: self.token,
                pos: self.token_start(),
            })
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Result<bool, ParseError> {
        if self.token == kind {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn unexpected<T>(&self) -> Result<T, ParseError> {
        Err(ParseError::UnexpectedToken {
            kind: self.token,
            pos: self.token_start(),
        })
    }

    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with the `in` operator allowed (inside brackets and argument
    /// lists the `for`-head restriction does not apply).
    pub(crate) fn with_in_allowed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Whether the current token can be an identifier in this context.
    /// Contextual keywords qualify; `await`/`yield` only outside async and
    /// generator bodies respectively.
    pub(crate) fn is_identifier_token(&self) -> bool {
        match self.token {
            SyntaxKind::Identifier
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::GetKeyword
            | SyntaxKind::SetKeyword
            | SyntaxKind::OfKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::StaticKeyword => true,
            SyntaxKind::AwaitKeyword => !self.in_context(CONTEXT_FLAG_ASYNC),
            SyntaxKind::YieldKeyword => !self.in_context(CONTEXT_FLAG_GENERATOR),
            _ => false,
        }
    }

    /// Parse an identifier in binding or reference position.
    pub(crate) fn parse_identifier(&mut self) -> Result<NodeIndex, ParseError> {
        if !self.is_identifier_token() {
            return self.unexpected();
        }
        let idx = self.arena.add_identifier(
            self.token_start(),
            self.token_end(),
            self.scanner.token_text(),
        );
        self.next_token()?;
        Ok(idx)
    }

    /// Parse an identifier name (keywords allowed): member names, property
    /// keys, labels.
    pub(crate) fn parse_identifier_name(&mut self) -> Result<NodeIndex, ParseError> {
        if !self.token.is_identifier_or_keyword() {
            return self.unexpected();
        }
        let idx = self.arena.add_identifier(
            self.token_start(),
            self.token_end(),
            self.scanner.token_text(),
        );
        self.next_token()?;
        Ok(idx)
    }

    fn parse_member_name(&mut self) -> Result<NodeIndex, ParseError> {
        if self.token == SyntaxKind::PrivateIdentifier {
            let idx = self.arena.add_private_identifier(
                self.token_start(),
                self.token_end(),
                self.scanner.token_text(),
            );
            self.next_token()?;
            return Ok(idx);
        }
        self.parse_identifier_name()
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Full expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let mut expr = self.parse_assignment_expression()?;
        while self.token == SyntaxKind::CommaToken {
            self.next_token()?;
            let right = self.parse_assignment_expression()?;
            expr = self.arena.add_binary_expr(
                start,
                self.prev_token_end,
                SyntaxKind::CommaToken as u16,
                expr,
                right,
            );
        }
        Ok(expr)
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> Result<NodeIndex, ParseError> {
        if self.token == SyntaxKind::YieldKeyword && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        // Arrow heads need bounded lookahead: a parenthesized parameter list
        // is indistinguishable from a parenthesized expression until `=>`.
        if self.token == SyntaxKind::AsyncKeyword
            && super::parse_rules::look_ahead_is_async_arrow(&self.scanner)
        {
            return self.parse_arrow_function(true);
        }
        if self.token == SyntaxKind::OpenParenToken
            && super::parse_rules::look_ahead_is_paren_arrow(&self.scanner)
        {
            return self.parse_arrow_function(false);
        }
        if self.is_identifier_token()
            && look_ahead_is(&self.scanner, SyntaxKind::EqualsGreaterThanToken)
        {
            return self.parse_arrow_function(false);
        }

        let start = self.token_start();
        let expr = self.parse_conditional_expression()?;
        if self.token.is_assignment_operator() {
            if self.token.is_logical_assignment_operator()
                && !self.ecma.supports_logical_assignment()
            {
                return Err(ParseError::VersionGated {
                    what: "logical assignment",
                    pos: self.token_start(),
                });
            }
            let operator = self.token as u16;
            self.next_token()?;
            let right = self.parse_assignment_expression()?;
            return Ok(self
                .arena
                .add_binary_expr(start, self.prev_token_end, operator, expr, right));
        }
        Ok(expr)
    }

    fn parse_yield_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        let mut flags = node_flags::NONE;
        let delegated = self.eat(SyntaxKind::AsteriskToken)?;
        if delegated {
            flags |= node_flags::DELEGATED;
        }
        let operand = if delegated
            || (!self.has_line_break_before_token() && self.token_can_start_expression())
        {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_unary_expr(
            syntax_kind_ext::YIELD_EXPRESSION,
            start,
            self.prev_token_end,
            flags,
            SyntaxKind::YieldKeyword as u16,
            operand,
        ))
    }

    fn token_can_start_expression(&self) -> bool {
        !matches!(
            self.token,
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EndOfFileToken
        )
    }

    /// Arrow function, either `(params) => body`, `ident => body`, or the
    /// `async` variants. The caller has already confirmed the shape by
    /// lookahead.
    fn parse_arrow_function(&mut self, is_async: bool) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        if is_async {
            self.next_token()?;
        }
        let parameters = if self.token == SyntaxKind::OpenParenToken {
            self.parse_parameters()?
        } else {
            let param_start = self.token_start();
            let name = self.parse_identifier()?;
            let param = self.arena.add_parameter(
                param_start,
                self.prev_token_end,
                ParameterData {
                    name,
                    initializer: NodeIndex::NONE,
                    dot_dot_dot: false,
                },
            );
            NodeList::new(vec![param])
        };
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        let mut flags = FunctionFlags::ARROW;
        if is_async {
            flags |= FunctionFlags::ASYNC;
        }
        let body = if self.token == SyntaxKind::OpenBraceToken {
            self.parse_function_body_block(flags)?
        } else {
            let saved = self.context_flags;
            self.context_flags = if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
            let body = self.parse_assignment_expression();
            self.context_flags = saved;
            body?
        };
        Ok(self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start,
            self.prev_token_end,
            FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                flags,
            },
        ))
    }

    fn parse_conditional_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let condition = self.parse_binary_expression(1)?;
        if self.token != SyntaxKind::QuestionToken {
            return Ok(condition);
        }
        self.next_token()?;
        let when_true = self.with_in_allowed(|p| p.parse_assignment_expression())?;
        self.expect(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        Ok(self.arena.add_conditional_expr(
            start,
            self.prev_token_end,
            condition,
            when_true,
            when_false,
        ))
    }

    fn binary_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QuestionQuestionToken => 1,
            SyntaxKind::BarBarToken => 2,
            SyntaxKind::AmpersandAmpersandToken => 3,
            SyntaxKind::BarToken => 4,
            SyntaxKind::CaretToken => 5,
            SyntaxKind::AmpersandToken => 6,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 7,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword => 8,
            SyntaxKind::InKeyword => {
                if self.in_context(CONTEXT_FLAG_DISALLOW_IN) {
                    0
                } else {
                    8
                }
            }
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 9,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 10,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 11,
            SyntaxKind::AsteriskAsteriskToken => 12,
            _ => 0,
        }
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let mut left = self.parse_unary_expression()?;
        loop {
            let precedence = self.binary_precedence(self.token);
            if precedence == 0 || precedence < min_precedence {
                return Ok(left);
            }
            let operator = self.token as u16;
            self.next_token()?;
            // `**` is right-associative.
            let next_min = if operator == SyntaxKind::AsteriskAsteriskToken as u16 {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min)?;
            left = self
                .arena
                .add_binary_expr(start, self.prev_token_end, operator, left, right);
        }
    }

    fn parse_unary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let start = self.token_start();
                let operator = self.token as u16;
                self.next_token()?;
                let operand = self.parse_unary_expression()?;
                Ok(self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start,
                    self.prev_token_end,
                    node_flags::NONE,
                    operator,
                    operand,
                ))
            }
            SyntaxKind::AwaitKeyword if self.in_context(CONTEXT_FLAG_ASYNC) => {
                let start = self.token_start();
                self.next_token()?;
                let operand = self.parse_unary_expression()?;
                Ok(self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start,
                    self.prev_token_end,
                    node_flags::NONE,
                    SyntaxKind::AwaitKeyword as u16,
                    operand,
                ))
            }
            _ => {
                let start = self.token_start();
                let expr = self.parse_left_hand_side_expression()?;
                if (self.token == SyntaxKind::PlusPlusToken
                    || self.token == SyntaxKind::MinusMinusToken)
                    && !self.has_line_break_before_token()
                {
                    let operator = self.token as u16;
                    self.next_token()?;
                    return Ok(self.arena.add_unary_expr(
                        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                        start,
                        self.prev_token_end,
                        node_flags::NONE,
                        operator,
                        expr,
                    ));
                }
                Ok(expr)
            }
        }
    }

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let expr = if self.token == SyntaxKind::NewKeyword {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_expression_rest(start, expr, true)
    }

    fn parse_new_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        if self.token == SyntaxKind::DotToken {
            // `new.target`
            self.next_token()?;
            self.parse_identifier_name()?;
            return Ok(self.arena.add_token_node(
                syntax_kind_ext::META_PROPERTY,
                start,
                self.prev_token_end,
            ));
        }
        let callee = if self.token == SyntaxKind::NewKeyword {
            self.parse_new_expression()?
        } else {
            let callee_start = self.token_start();
            let primary = self.parse_primary_expression()?;
            self.parse_member_expression_rest(callee_start, primary, false)?
        };
        let arguments = if self.token == SyntaxKind::OpenParenToken {
            self.parse_arguments()?
        } else {
            NodeList::default()
        };
        Ok(self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start,
            self.prev_token_end,
            node_flags::NONE,
            callee,
            arguments,
        ))
    }

    fn parse_member_expression_rest(
        &mut self,
        start: u32,
        mut expr: NodeIndex,
        allow_call: bool,
    ) -> Result<NodeIndex, ParseError> {
        loop {
            match self.token {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let name = self.parse_member_name()?;
                    expr = self.arena.add_access_expr(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start,
                        self.prev_token_end,
                        node_flags::NONE,
                        expr,
                        name,
                    );
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token()?;
                    match self.token {
                        SyntaxKind::OpenParenToken if allow_call => {
                            let arguments = self.parse_arguments()?;
                            expr = self.arena.add_call_expr(
                                syntax_kind_ext::CALL_EXPRESSION,
                                start,
                                self.prev_token_end,
                                node_flags::OPTIONAL,
                                expr,
                                arguments,
                            );
                        }
                        SyntaxKind::OpenBracketToken => {
                            self.next_token()?;
                            let index =
                                self.with_in_allowed(|p| p.parse_expression())?;
                            self.expect(SyntaxKind::CloseBracketToken)?;
                            expr = self.arena.add_access_expr(
                                syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                                start,
                                self.prev_token_end,
                                node_flags::OPTIONAL,
                                expr,
                                index,
                            );
                        }
                        _ => {
                            let name = self.parse_member_name()?;
                            expr = self.arena.add_access_expr(
                                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                                start,
                                self.prev_token_end,
                                node_flags::OPTIONAL,
                                expr,
                                name,
                            );
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token()?;
                    let index = self.with_in_allowed(|p| p.parse_expression())?;
                    self.expect(SyntaxKind::CloseBracketToken)?;
                    expr = self.arena.add_access_expr(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start,
                        self.prev_token_end,
                        node_flags::NONE,
                        expr,
                        index,
                    );
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments()?;
                    expr = self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start,
                        self.prev_token_end,
                        node_flags::NONE,
                        expr,
                        arguments,
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
                    if allow_call =>
                {
                    let template = self.parse_template_literal()?;
                    expr = self.arena.add_access_expr(
                        syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION,
                        start,
                        self.prev_token_end,
                        node_flags::NONE,
                        expr,
                        template,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_arguments(&mut self) -> Result<NodeList, ParseError> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        self.with_in_allowed(|p| {
            while p.token != SyntaxKind::CloseParenToken {
                if p.token == SyntaxKind::DotDotDotToken {
                    let start = p.token_start();
                    p.next_token()?;
                    let expression = p.parse_assignment_expression()?;
                    arguments.push(p.arena.add_wrapped_expr(
                        syntax_kind_ext::SPREAD_ELEMENT,
                        start,
                        p.prev_token_end,
                        expression,
                    ));
                } else {
                    arguments.push(p.parse_assignment_expression()?);
                }
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(arguments))
    }

    fn parse_primary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral => self.parse_literal(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword => {
                let idx = self.arena.add_token_node(
                    self.token as u16,
                    self.token_start(),
                    self.token_end(),
                );
                self.next_token()?;
                Ok(idx)
            }
            SyntaxKind::OpenParenToken => {
                let start = self.token_start();
                self.next_token()?;
                let expression = self.with_in_allowed(|p| p.parse_expression())?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Ok(self.arena.add_wrapped_expr(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    start,
                    self.prev_token_end,
                    expression,
                ))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression(),
            SyntaxKind::FunctionKeyword => {
                self.parse_function(syntax_kind_ext::FUNCTION_EXPRESSION, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class(syntax_kind_ext::CLASS_EXPRESSION),
            SyntaxKind::AsyncKeyword
                if look_ahead_kind(&self.scanner) == SyntaxKind::FunctionKeyword =>
            {
                let start = self.token_start();
                self.next_token()?;
                self.parse_function_at(start, syntax_kind_ext::FUNCTION_EXPRESSION, true)
            }
            _ if self.is_identifier_token() => self.parse_identifier(),
            _ => self.unexpected(),
        }
    }

    pub(crate) fn parse_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let idx = self.arena.add_literal(
            self.token as u16,
            self.token_start(),
            self.token_end(),
            self.scanner.token_text(),
        );
        self.next_token()?;
        Ok(idx)
    }

    fn parse_array_literal_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        self.with_in_allowed(|p| {
            while p.token != SyntaxKind::CloseBracketToken {
                if p.token == SyntaxKind::CommaToken {
                    // Elision hole.
                    elements.push(p.arena.add_token_node(
                        syntax_kind_ext::OMITTED_EXPRESSION,
                        p.token_start(),
                        p.token_start(),
                    ));
                    p.next_token()?;
                    continue;
                }
                if p.token == SyntaxKind::DotDotDotToken {
                    let spread_start = p.token_start();
                    p.next_token()?;
                    let expression = p.parse_assignment_expression()?;
                    elements.push(p.arena.add_wrapped_expr(
                        syntax_kind_ext::SPREAD_ELEMENT,
                        spread_start,
                        p.prev_token_end,
                        expression,
                    ));
                } else {
                    elements.push(p.parse_assignment_expression()?);
                }
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(self.arena.add_literal_expression(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start,
            self.prev_token_end,
            NodeList::new(elements),
        ))
    }

    /// Template literal: either the no-substitution form or head + spans.
    pub(crate) fn parse_template_literal(&mut self) -> Result<NodeIndex, ParseError> {
        if self.token == SyntaxKind::NoSubstitutionTemplateLiteral {
            return self.parse_literal();
        }
        let start = self.token_start();
        let head = self.parse_literal()?;
        let mut spans = Vec::new();
        loop {
            let span_start = self.token_start();
            let expression = self.with_in_allowed(|p| p.parse_expression())?;
            if self.token != SyntaxKind::CloseBraceToken {
                return Err(ParseError::ExpectedToken {
                    expected: SyntaxKind::CloseBraceToken,
                    found: self.token,
                    pos: self.token_start(),
                });
            }
            // The `}` closes a substitution; re-scan it as template text.
            let kind = self.scanner.re_scan_template_token()?;
            self.token = kind;
            let literal = self.parse_literal()?;
            spans.push(self.arena.add_template_span(
                span_start,
                self.prev_token_end,
                expression,
                literal,
            ));
            if kind == SyntaxKind::TemplateTail {
                break;
            }
        }
        Ok(self
            .arena
            .add_template_expr(start, self.prev_token_end, head, NodeList::new(spans)))
    }

    // ========================================================================
    // Functions and parameters
    // ========================================================================

    /// `function` expression or declaration, with the `function` keyword as
    /// the current token.
    pub(crate) fn parse_function(
        &mut self,
        kind: u16,
        is_async: bool,
    ) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.parse_function_at(start, kind, is_async)
    }

    pub(crate) fn parse_function_at(
        &mut self,
        start: u32,
        kind: u16,
        is_async: bool,
    ) -> Result<NodeIndex, ParseError> {
        self.expect(SyntaxKind::FunctionKeyword)?;
        let mut flags = FunctionFlags::empty();
        if is_async {
            flags |= FunctionFlags::ASYNC;
        }
        if self.eat(SyntaxKind::AsteriskToken)? {
            flags |= FunctionFlags::GENERATOR;
        }
        let name = if self.is_identifier_token() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let parameters = self.parse_parameters()?;
        let body = self.parse_function_body_block(flags)?;
        Ok(self.arena.add_function(
            kind,
            start,
            self.prev_token_end,
            FunctionData {
                name,
                parameters,
                body,
                flags,
            },
        ))
    }

    /// Parse a `{...}` body under the context the callable's flags dictate.
    pub(crate) fn parse_function_body_block(
        &mut self,
        flags: FunctionFlags,
    ) -> Result<NodeIndex, ParseError> {
        let saved = self.context_flags;
        let mut context = 0;
        if flags.contains(FunctionFlags::ASYNC) {
            context |= CONTEXT_FLAG_ASYNC;
        }
        if flags.contains(FunctionFlags::GENERATOR) {
            context |= CONTEXT_FLAG_GENERATOR;
        }
        self.context_flags = context;
        let body = self.parse_block();
        self.context_flags = saved;
        body
    }

    pub(crate) fn parse_parameters(&mut self) -> Result<NodeList, ParseError> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        self.with_in_allowed(|p| {
            while p.token != SyntaxKind::CloseParenToken {
                parameters.push(p.parse_parameter()?);
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(parameters))
    }

    fn parse_parameter(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
        let name = self.parse_binding_name()?;
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_parameter(
            start,
            self.prev_token_end,
            ParameterData {
                name,
                initializer,
                dot_dot_dot,
            },
        ))
    }
}
