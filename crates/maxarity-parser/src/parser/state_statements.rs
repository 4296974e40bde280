//! Parser state - statement, declaration, and binding pattern methods.

use maxarity_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::{
    BindingElementData, ForInOfData, LoopData, TryData, node_flags,
};
use super::parse_rules::{look_ahead_is, look_ahead_kind};
use super::state::{CONTEXT_FLAG_DISALLOW_IN, ParseError, ParserState};
use super::syntax_kind_ext;

impl ParserState<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let idx = self.arena.add_token_node(
                    syntax_kind_ext::EMPTY_STATEMENT,
                    self.token_start(),
                    self.token_end(),
                );
                self.next_token()?;
                Ok(idx)
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.let_starts_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => {
                self.parse_function(syntax_kind_ext::FUNCTION_DECLARATION, false)
            }
            SyntaxKind::AsyncKeyword
                if look_ahead_kind(&self.scanner) == SyntaxKind::FunctionKeyword =>
            {
                let start = self.token_start();
                self.next_token()?;
                self.parse_function_at(start, syntax_kind_ext::FUNCTION_DECLARATION, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class(syntax_kind_ext::CLASS_DECLARATION),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ContinueKeyword => {
                self.parse_jump_statement(syntax_kind_ext::CONTINUE_STATEMENT)
            }
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_start();
                self.next_token()?;
                self.parse_semicolon()?;
                Ok(self.arena.add_token_node(
                    syntax_kind_ext::DEBUGGER_STATEMENT,
                    start,
                    self.prev_token_end,
                ))
            }
            _ if self.is_identifier_token()
                && look_ahead_is(&self.scanner, SyntaxKind::ColonToken) =>
            {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` begins a declaration only when followed by a binding name; bare
    /// `let` is an ordinary identifier in sloppy mode.
    fn let_starts_declaration(&self) -> bool {
        let next = look_ahead_kind(&self.scanner);
        next.is_identifier_or_keyword()
            || next == SyntaxKind::OpenBraceToken
            || next == SyntaxKind::OpenBracketToken
    }

    pub(crate) fn parse_block(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut statements = Vec::new();
        while self.token != SyntaxKind::CloseBraceToken {
            if self.token == SyntaxKind::EndOfFileToken {
                return Err(ParseError::ExpectedToken {
                    expected: SyntaxKind::CloseBraceToken,
                    found: self.token,
                    pos: self.token_start(),
                });
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self
            .arena
            .add_block(start, self.prev_token_end, NodeList::new(statements)))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start,
            self.prev_token_end,
            expression,
        ))
    }

    /// Statement terminator with automatic semicolon insertion: an explicit
    /// `;`, a closing brace, end of input, or a preceding line break.
    pub(crate) fn parse_semicolon(&mut self) -> Result<(), ParseError> {
        if self.token == SyntaxKind::SemicolonToken {
            return self.next_token();
        }
        if self.token == SyntaxKind::CloseBraceToken
            || self.token == SyntaxKind::EndOfFileToken
            || self.has_line_break_before_token()
        {
            return Ok(());
        }
        Err(ParseError::ExpectedToken {
            expected: SyntaxKind::SemicolonToken,
            found: self.token,
            pos: self.token_start(),
        })
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    fn parse_variable_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let statement = self.parse_variable_declaration_list()?;
        self.parse_semicolon()?;
        Ok(statement)
    }

    /// `var`/`let`/`const` declaration list without the trailing semicolon
    /// (shared with `for`-statement heads).
    pub(crate) fn parse_variable_declaration_list(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let flags = match self.token {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token()?;
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_start();
            let name = self.parse_binding_name()?;
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                self.parse_assignment_expression()?
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.add_variable_declaration(
                decl_start,
                self.prev_token_end,
                name,
                initializer,
            ));
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        Ok(self.arena.add_variable_statement(
            start,
            self.prev_token_end,
            flags,
            NodeList::new(declarations),
        ))
    }

    // ========================================================================
    // Binding names and patterns
    // ========================================================================

    /// Identifier or destructuring pattern, in declaration position.
    pub(crate) fn parse_binding_name(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut elements = Vec::new();
        while self.token != SyntaxKind::CloseBraceToken {
            elements.push(self.parse_object_binding_element()?);
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start,
            self.prev_token_end,
            NodeList::new(elements),
        ))
    }

    fn parse_object_binding_element(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        if self.eat(SyntaxKind::DotDotDotToken)? {
            // Object rest binds a plain identifier.
            let name = self.parse_identifier()?;
            return Ok(self.arena.add_binding_element(
                start,
                self.prev_token_end,
                BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer: NodeIndex::NONE,
                    dot_dot_dot: true,
                },
            ));
        }

        let (property_name, name) = match self.token {
            SyntaxKind::OpenBracketToken => {
                // Computed key: `{ [expr]: name }`
                let key_start = self.token_start();
                self.next_token()?;
                let key_expr = self.with_in_allowed(|p| p.parse_assignment_expression())?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                let key = self.arena.add_wrapped_expr(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    key_start,
                    self.prev_token_end,
                    key_expr,
                );
                self.expect(SyntaxKind::ColonToken)?;
                (key, self.parse_binding_name()?)
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                let key = self.parse_literal()?;
                self.expect(SyntaxKind::ColonToken)?;
                (key, self.parse_binding_name()?)
            }
            k if k.is_identifier_or_keyword() => {
                let key_start = self.token_start();
                let key_end = self.token_end();
                let key_text = self.scanner.token_text();
                let shorthand_ok = self.is_identifier_token();
                self.next_token()?;
                if self.eat(SyntaxKind::ColonToken)? {
                    let key = self.arena.add_identifier(key_start, key_end, key_text);
                    (key, self.parse_binding_name()?)
                } else {
                    // Shorthand: the key is itself the bound name.
                    if !shorthand_ok {
                        return Err(ParseError::UnexpectedToken {
                            kind: k,
                            pos: key_start,
                        });
                    }
                    let name = self.arena.add_identifier(key_start, key_end, key_text);
                    (NodeIndex::NONE, name)
                }
            }
            _ => return self.unexpected(),
        };

        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_binding_element(
            start,
            self.prev_token_end,
            BindingElementData {
                property_name,
                name,
                initializer,
                dot_dot_dot: false,
            },
        ))
    }

    fn parse_array_binding_pattern(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while self.token != SyntaxKind::CloseBracketToken {
            if self.token == SyntaxKind::CommaToken {
                // Elision hole.
                elements.push(self.arena.add_token_node(
                    syntax_kind_ext::OMITTED_EXPRESSION,
                    self.token_start(),
                    self.token_start(),
                ));
                self.next_token()?;
                continue;
            }
            let element_start = self.token_start();
            let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
            let name = self.parse_binding_name()?;
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                self.parse_assignment_expression()?
            } else {
                NodeIndex::NONE
            };
            elements.push(self.arena.add_binding_element(
                element_start,
                self.prev_token_end,
                BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                    dot_dot_dot,
                },
            ));
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start,
            self.prev_token_end,
            NodeList::new(elements),
        ))
    }

    // ========================================================================
    // Control flow statements
    // ========================================================================

    fn parse_if_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.eat(SyntaxKind::ElseKeyword)? {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_if_statement(
            start,
            self.prev_token_end,
            expression,
            then_statement,
            else_statement,
        ))
    }

    fn parse_while_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        ))
    }

    fn parse_do_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        let statement = self.parse_statement()?;
        self.expect(SyntaxKind::WhileKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        // `do ... while (x)` accepts but does not require a semicolon.
        self.eat(SyntaxKind::SemicolonToken)?;
        Ok(self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        ))
    }

    fn parse_for_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        // `for await (a of b)` parses like `for`-`of`.
        self.eat(SyntaxKind::AwaitKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;

        let initializer = if self.token == SyntaxKind::SemicolonToken {
            NodeIndex::NONE
        } else if matches!(
            self.token,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword
        ) || (self.token == SyntaxKind::LetKeyword && self.let_starts_declaration())
        {
            self.parse_variable_declaration_list()?
        } else {
            let saved = self.context_flags;
            self.context_flags |= CONTEXT_FLAG_DISALLOW_IN;
            let init = self.parse_expression();
            self.context_flags = saved;
            init?
        };

        if self.token == SyntaxKind::InKeyword || self.token == SyntaxKind::OfKeyword {
            let kind = if self.token == SyntaxKind::InKeyword {
                syntax_kind_ext::FOR_IN_STATEMENT
            } else {
                syntax_kind_ext::FOR_OF_STATEMENT
            };
            self.next_token()?;
            let expression = if kind == syntax_kind_ext::FOR_IN_STATEMENT {
                self.parse_expression()?
            } else {
                self.parse_assignment_expression()?
            };
            self.expect(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            return Ok(self.arena.add_for_in_of(
                kind,
                start,
                self.prev_token_end,
                ForInOfData {
                    initializer,
                    expression,
                    statement,
                },
            ));
        }

        self.expect(SyntaxKind::SemicolonToken)?;
        let condition = if self.token != SyntaxKind::SemicolonToken {
            self.parse_expression()?
        } else {
            NodeIndex::NONE
        };
        self.expect(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.token != SyntaxKind::CloseParenToken {
            self.parse_expression()?
        } else {
            NodeIndex::NONE
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        ))
    }

    fn parse_return_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        // The `return` operand must start on the same line.
        let expression = if self.token == SyntaxKind::SemicolonToken
            || self.token == SyntaxKind::CloseBraceToken
            || self.token == SyntaxKind::EndOfFileToken
            || self.has_line_break_before_token()
        {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            syntax_kind_ext::RETURN_STATEMENT,
            start,
            self.prev_token_end,
            expression,
        ))
    }

    fn parse_throw_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            syntax_kind_ext::THROW_STATEMENT,
            start,
            self.prev_token_end,
            expression,
        ))
    }

    fn parse_try_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        let try_block = self.parse_block()?;
        let catch_clause = if self.token == SyntaxKind::CatchKeyword {
            let catch_start = self.token_start();
            self.next_token()?;
            let binding = if self.eat(SyntaxKind::OpenParenToken)? {
                let binding = self.parse_binding_name()?;
                self.expect(SyntaxKind::CloseParenToken)?;
                binding
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block()?;
            self.arena
                .add_catch_clause(catch_start, self.prev_token_end, binding, block)
        } else {
            NodeIndex::NONE
        };
        let finally_block = if self.eat(SyntaxKind::FinallyKeyword)? {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };
        if catch_clause.is_none() && finally_block.is_none() {
            return Err(ParseError::ExpectedToken {
                expected: SyntaxKind::CatchKeyword,
                found: self.token,
                pos: self.token_start(),
            });
        }
        Ok(self.arena.add_try(
            start,
            self.prev_token_end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        ))
    }

    fn parse_switch_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut clauses = Vec::new();
        while self.token != SyntaxKind::CloseBraceToken {
            let clause_start = self.token_start();
            let clause_expression = if self.eat(SyntaxKind::CaseKeyword)? {
                self.parse_expression()?
            } else {
                self.expect(SyntaxKind::DefaultKeyword)?;
                NodeIndex::NONE
            };
            self.expect(SyntaxKind::ColonToken)?;
            let mut statements = Vec::new();
            while !matches!(
                self.token,
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
            ) {
                statements.push(self.parse_statement()?);
            }
            clauses.push(self.arena.add_case_clause(
                clause_start,
                self.prev_token_end,
                clause_expression,
                NodeList::new(statements),
            ));
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_switch(
            start,
            self.prev_token_end,
            expression,
            NodeList::new(clauses),
        ))
    }

    fn parse_jump_statement(&mut self, kind: u16) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        self.next_token()?;
        let label = if self.is_identifier_token() && !self.has_line_break_before_token() {
            self.parse_identifier_name()?
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon()?;
        Ok(self.arena.add_jump(kind, start, self.prev_token_end, label))
    }

    fn parse_labeled_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let start = self.token_start();
        let label = self.parse_identifier_name()?;
        self.expect(SyntaxKind::ColonToken)?;
        let statement = self.parse_statement()?;
        Ok(self
            .arena
            .add_labeled(start, self.prev_token_end, label, statement))
    }
}
