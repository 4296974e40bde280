//! Parser state - object literal members, method shorthand, and classes.

use maxarity_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{ClassData, FunctionData, FunctionFlags};
use super::parse_rules::look_ahead_kind;
use super::state::{ParseError, ParserState};
use super::syntax_kind_ext;

/// Tokens that can begin a property name (method or field).
fn starts_property_name(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        )
}

impl ParserState<'_> {
    pub(crate) fn parse_object_literal_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        self.with_in_allowed(|p| {
            while p.token != SyntaxKind::CloseBraceToken {
                properties.push(p.parse_object_literal_member()?);
                if !p.eat(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_literal_expression(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start,
            self.prev_token_end,
            NodeList::new(properties),
        ))
    }

    fn parse_object_literal_member(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        if self.token == SyntaxKind::DotDotDotToken {
            self.next_token()?;
            let expression = self.parse_assignment_expression()?;
            return Ok(self.arena.add_wrapped_expr(
                syntax_kind_ext::SPREAD_ELEMENT,
                start,
                self.prev_token_end,
                expression,
            ));
        }

        // `async` is a modifier only when a property name (or `*`) follows;
        // otherwise it is itself the name (`{ async() {} }`, `{ async: 1 }`).
        let mut flags = FunctionFlags::empty();
        if self.token == SyntaxKind::AsyncKeyword {
            let next = look_ahead_kind(&self.scanner);
            if starts_property_name(next) || next == SyntaxKind::AsteriskToken {
                self.next_token()?;
                flags |= FunctionFlags::ASYNC;
            }
        }
        if self.token == SyntaxKind::AsteriskToken {
            self.next_token()?;
            flags |= FunctionFlags::GENERATOR;
        }
        // Accessors: `get name() {}` / `set name(v) {}`. A following property
        // name distinguishes them from `{ get: 1 }` and `{ get() {} }`.
        if flags.is_empty()
            && (self.token == SyntaxKind::GetKeyword || self.token == SyntaxKind::SetKeyword)
            && starts_property_name(look_ahead_kind(&self.scanner))
        {
            let accessor_kind = if self.token == SyntaxKind::GetKeyword {
                syntax_kind_ext::GET_ACCESSOR
            } else {
                syntax_kind_ext::SET_ACCESSOR
            };
            let accessor_flag = if accessor_kind == syntax_kind_ext::GET_ACCESSOR {
                FunctionFlags::GETTER
            } else {
                FunctionFlags::SETTER
            };
            self.next_token()?;
            let (name, _) = self.parse_property_name()?;
            return self.parse_method_tail(start, name, accessor_kind, accessor_flag);
        }

        let (name, shorthand_ok) = self.parse_property_name()?;
        if self.token == SyntaxKind::OpenParenToken {
            return self.parse_method_tail(start, name, syntax_kind_ext::METHOD_DECLARATION, flags);
        }
        if !flags.is_empty() {
            return self.unexpected();
        }
        if self.eat(SyntaxKind::ColonToken)? {
            let initializer = self.parse_assignment_expression()?;
            return Ok(self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start,
                self.prev_token_end,
                name,
                initializer,
            ));
        }
        // Shorthand property; the cover grammar admits a default initializer
        // so that destructuring assignment targets parse.
        if !shorthand_ok {
            return self.unexpected();
        }
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self
            .arena
            .add_shorthand_property(start, self.prev_token_end, name, initializer))
    }

    /// Property name in member position. The second value reports whether the
    /// name may double as a shorthand binding (plain identifier only).
    pub(crate) fn parse_property_name(&mut self) -> Result<(NodeIndex, bool), ParseError> {
        match self.token {
            SyntaxKind::OpenBracketToken => {
                let start = self.token_start();
                self.next_token()?;
                let expression = self.with_in_allowed(|p| p.parse_assignment_expression())?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                let idx = self.arena.add_wrapped_expr(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start,
                    self.prev_token_end,
                    expression,
                );
                Ok((idx, false))
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok((self.parse_literal()?, false))
            }
            SyntaxKind::PrivateIdentifier => {
                let idx = self.arena.add_private_identifier(
                    self.token_start(),
                    self.token_end(),
                    self.scanner.token_text(),
                );
                self.next_token()?;
                Ok((idx, false))
            }
            k if k.is_identifier_or_keyword() => {
                let shorthand_ok = self.is_identifier_token();
                let idx = self.arena.add_identifier(
                    self.token_start(),
                    self.token_end(),
                    self.scanner.token_text(),
                );
                self.next_token()?;
                Ok((idx, shorthand_ok))
            }
            _ => self.unexpected(),
        }
    }

    pub(crate) fn parse_method_tail(
        &mut self,
        start: u32,
        name: NodeIndex,
        kind: u16,
        flags: FunctionFlags,
    ) -> Result<NodeIndex, ParseError> {
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

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class(&mut self, kind: u16) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::ClassKeyword)?;
        let name = if self.is_identifier_token() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let heritage = if self.eat(SyntaxKind::ExtendsKeyword)? {
            self.parse_left_hand_side_expression()?
        } else {
            NodeIndex::NONE
        };
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while self.token != SyntaxKind::CloseBraceToken {
            if self.eat(SyntaxKind::SemicolonToken)? {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_class(
            kind,
            start,
            self.prev_token_end,
            ClassData {
                name,
                heritage,
                members: NodeList::new(members),
            },
        ))
    }

    fn parse_class_member(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        // `static` is a modifier when a member name or `*` follows.
        if self.token == SyntaxKind::StaticKeyword {
            let next = look_ahead_kind(&self.scanner);
            if starts_property_name(next) || next == SyntaxKind::AsteriskToken {
                self.next_token()?;
            }
        }
        let mut flags = FunctionFlags::empty();
        if self.token == SyntaxKind::AsyncKeyword {
            let next = look_ahead_kind(&self.scanner);
            if starts_property_name(next) || next == SyntaxKind::AsteriskToken {
                self.next_token()?;
                flags |= FunctionFlags::ASYNC;
            }
        }
        if self.token == SyntaxKind::AsteriskToken {
            self.next_token()?;
            flags |= FunctionFlags::GENERATOR;
        }
        if flags.is_empty()
            && (self.token == SyntaxKind::GetKeyword || self.token == SyntaxKind::SetKeyword)
            && starts_property_name(look_ahead_kind(&self.scanner))
        {
            let accessor_kind = if self.token == SyntaxKind::GetKeyword {
                syntax_kind_ext::GET_ACCESSOR
            } else {
                syntax_kind_ext::SET_ACCESSOR
            };
            let accessor_flag = if accessor_kind == syntax_kind_ext::GET_ACCESSOR {
                FunctionFlags::GETTER
            } else {
                FunctionFlags::SETTER
            };
            self.next_token()?;
            let (name, _) = self.parse_property_name()?;
            return self.parse_method_tail(start, name, accessor_kind, accessor_flag);
        }

        let (name, _) = self.parse_property_name()?;
        if self.token == SyntaxKind::OpenParenToken {
            let member_kind = if flags.is_empty()
                && self.arena.identifier_text_at(name) == Some("constructor")
            {
                syntax_kind_ext::CONSTRUCTOR
            } else {
                syntax_kind_ext::METHOD_DECLARATION
            };
            return self.parse_method_tail(start, name, member_kind, flags);
        }
        if !flags.is_empty() {
            return self.unexpected();
        }
        // Class field, with optional initializer.
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        self.eat(SyntaxKind::SemicolonToken)?;
        Ok(self.arena.add_property_assignment(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start,
            self.prev_token_end,
            name,
            initializer,
        ))
    }
}
