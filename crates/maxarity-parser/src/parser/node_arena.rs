//! NodeArena creation methods (add_* methods).
//!
//! Every creation method pushes the typed data first, then the thin node,
//! and finally re-parents the children onto the new node. Children are
//! always created before their parent, so parent links are complete once
//! the root has been added.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;
use maxarity_scanner::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self, kind: u16, pos: u32, end: u32, flags: u16, data_index: u32) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            pos,
            end,
            flags,
            data_index,
        });
        self.extended_info.push(ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        });
        idx
    }

    // ========================================================================
    // Parent mapping helpers
    // ========================================================================

    /// Set the parent for a single child node.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    /// Set the parent for a list of children.
    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    // ========================================================================
    // Node creation methods
    // ========================================================================

    /// Token-shaped node with no side data (`this`, `super`, `true`, holes,
    /// empty statements, ...).
    pub fn add_token_node(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, node_flags::NONE, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: &str) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: text.to_string(),
        });
        self.push_node(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            node_flags::NONE,
            data_index,
        )
    }

    pub fn add_private_identifier(&mut self, pos: u32, end: u32, text: &str) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: text.to_string(),
        });
        self.push_node(
            SyntaxKind::PrivateIdentifier as u16,
            pos,
            end,
            node_flags::NONE,
            data_index,
        )
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, text: &str) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(LiteralData {
            text: text.to_string(),
        });
        self.push_node(kind, pos, end, node_flags::NONE, data_index)
    }

    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        debug_assert!(syntax_kind_ext::is_function_like(kind));
        let name = data.name;
        let body = data.body;
        let parameters = data.parameters.clone();
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(name, idx);
        self.set_parent_list(&parameters, idx);
        self.set_parent(body, idx);
        idx
    }

    pub fn add_parameter(&mut self, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let name = data.name;
        let initializer = data.initializer;
        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        let idx = self.push_node(
            syntax_kind_ext::PARAMETER,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(name, idx);
        self.set_parent(initializer, idx);
        idx
    }

    pub fn add_block(&mut self, pos: u32, end: u32, statements: NodeList) -> NodeIndex {
        let data_index = self.blocks.len() as u32;
        let list = statements.clone();
        self.blocks.push(BlockData { statements });
        let idx = self.push_node(syntax_kind_ext::BLOCK, pos, end, node_flags::NONE, data_index);
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_variable_statement(
        &mut self,
        pos: u32,
        end: u32,
        flags: u16,
        declarations: NodeList,
    ) -> NodeIndex {
        let data_index = self.variables.len() as u32;
        let list = declarations.clone();
        self.variables.push(VariableData { declarations });
        let idx = self.push_node(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            end,
            flags,
            data_index,
        );
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_variable_declaration(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations
            .push(VariableDeclarationData { name, initializer });
        let idx = self.push_node(
            syntax_kind_ext::VARIABLE_DECLARATION,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(name, idx);
        self.set_parent(initializer, idx);
        idx
    }

    pub fn add_binding_pattern(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        elements: NodeList,
    ) -> NodeIndex {
        debug_assert!(syntax_kind_ext::is_binding_pattern(kind));
        let data_index = self.lists.len() as u32;
        let list = elements.clone();
        self.lists.push(ListData { elements });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_binding_element(
        &mut self,
        pos: u32,
        end: u32,
        data: BindingElementData,
    ) -> NodeIndex {
        let property_name = data.property_name;
        let name = data.name;
        let initializer = data.initializer;
        let data_index = self.binding_elements.len() as u32;
        self.binding_elements.push(data);
        let idx = self.push_node(
            syntax_kind_ext::BINDING_ELEMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(property_name, idx);
        self.set_parent(name, idx);
        self.set_parent(initializer, idx);
        idx
    }

    /// Array or object literal.
    pub fn add_literal_expression(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        elements: NodeList,
    ) -> NodeIndex {
        let data_index = self.lists.len() as u32;
        let list = elements.clone();
        self.lists.push(ListData { elements });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent_list(&list, idx);
        idx
    }

    /// `PROPERTY_ASSIGNMENT` or `PROPERTY_DECLARATION`.
    pub fn add_property_assignment(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.property_assignments.len() as u32;
        self.property_assignments
            .push(PropertyAssignmentData { name, initializer });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(name, idx);
        self.set_parent(initializer, idx);
        idx
    }

    pub fn add_shorthand_property(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.shorthand_properties.len() as u32;
        self.shorthand_properties
            .push(ShorthandPropertyData { name, initializer });
        let idx = self.push_node(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(name, idx);
        self.set_parent(initializer, idx);
        idx
    }

    pub fn add_binary_expr(
        &mut self,
        pos: u32,
        end: u32,
        operator: u16,
        left: NodeIndex,
        right: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(BinaryExprData {
            left,
            operator,
            right,
        });
        let idx = self.push_node(
            syntax_kind_ext::BINARY_EXPRESSION,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(left, idx);
        self.set_parent(right, idx);
        idx
    }

    /// Prefix/postfix unary, `yield`, `await`, `typeof`, `void`, `delete`.
    pub fn add_unary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        flags: u16,
        operator: u16,
        operand: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(UnaryExprData { operator, operand });
        let idx = self.push_node(kind, pos, end, flags, data_index);
        self.set_parent(operand, idx);
        idx
    }

    /// `CALL_EXPRESSION` or `NEW_EXPRESSION`.
    pub fn add_call_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        flags: u16,
        expression: NodeIndex,
        arguments: NodeList,
    ) -> NodeIndex {
        let data_index = self.call_exprs.len() as u32;
        let list = arguments.clone();
        self.call_exprs.push(CallExprData {
            expression,
            arguments,
        });
        let idx = self.push_node(kind, pos, end, flags, data_index);
        self.set_parent(expression, idx);
        self.set_parent_list(&list, idx);
        idx
    }

    /// Property access, element access, or tagged template.
    pub fn add_access_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        flags: u16,
        expression: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(AccessExprData { expression, name });
        let idx = self.push_node(kind, pos, end, flags, data_index);
        self.set_parent(expression, idx);
        self.set_parent(name, idx);
        idx
    }

    pub fn add_conditional_expr(
        &mut self,
        pos: u32,
        end: u32,
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.conditional_exprs.len() as u32;
        self.conditional_exprs.push(ConditionalExprData {
            condition,
            when_true,
            when_false,
        });
        let idx = self.push_node(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(condition, idx);
        self.set_parent(when_true, idx);
        self.set_parent(when_false, idx);
        idx
    }

    /// Single-expression wrapper nodes (parens, spreads, expression
    /// statements, `return`/`throw`, computed property names).
    pub fn add_wrapped_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        expression: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.wrapped_exprs.len() as u32;
        self.wrapped_exprs.push(WrappedExprData { expression });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(expression, idx);
        idx
    }

    pub fn add_template_expr(
        &mut self,
        pos: u32,
        end: u32,
        head: NodeIndex,
        spans: NodeList,
    ) -> NodeIndex {
        let data_index = self.template_exprs.len() as u32;
        let list = spans.clone();
        self.template_exprs.push(TemplateExprData { head, spans });
        let idx = self.push_node(
            syntax_kind_ext::TEMPLATE_EXPRESSION,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(head, idx);
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_template_span(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        literal: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.template_spans.len() as u32;
        self.template_spans
            .push(TemplateSpanData { expression, literal });
        let idx = self.push_node(
            syntax_kind_ext::TEMPLATE_SPAN,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(expression, idx);
        self.set_parent(literal, idx);
        idx
    }

    pub fn add_if_statement(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(IfStatementData {
            expression,
            then_statement,
            else_statement,
        });
        let idx = self.push_node(
            syntax_kind_ext::IF_STATEMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(expression, idx);
        self.set_parent(then_statement, idx);
        self.set_parent(else_statement, idx);
        idx
    }

    /// `FOR_STATEMENT`, `WHILE_STATEMENT`, or `DO_STATEMENT`.
    pub fn add_loop(&mut self, kind: u16, pos: u32, end: u32, data: LoopData) -> NodeIndex {
        let LoopData {
            initializer,
            condition,
            incrementor,
            statement,
        } = data;
        let data_index = self.loops.len() as u32;
        self.loops.push(LoopData {
            initializer,
            condition,
            incrementor,
            statement,
        });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(initializer, idx);
        self.set_parent(condition, idx);
        self.set_parent(incrementor, idx);
        self.set_parent(statement, idx);
        idx
    }

    /// `FOR_IN_STATEMENT` or `FOR_OF_STATEMENT`.
    pub fn add_for_in_of(&mut self, kind: u16, pos: u32, end: u32, data: ForInOfData) -> NodeIndex {
        let ForInOfData {
            initializer,
            expression,
            statement,
        } = data;
        let data_index = self.for_in_of.len() as u32;
        self.for_in_of.push(ForInOfData {
            initializer,
            expression,
            statement,
        });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(initializer, idx);
        self.set_parent(expression, idx);
        self.set_parent(statement, idx);
        idx
    }

    pub fn add_try(&mut self, pos: u32, end: u32, data: TryData) -> NodeIndex {
        let TryData {
            try_block,
            catch_clause,
            finally_block,
        } = data;
        let data_index = self.try_data.len() as u32;
        self.try_data.push(TryData {
            try_block,
            catch_clause,
            finally_block,
        });
        let idx = self.push_node(
            syntax_kind_ext::TRY_STATEMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(try_block, idx);
        self.set_parent(catch_clause, idx);
        self.set_parent(finally_block, idx);
        idx
    }

    pub fn add_catch_clause(
        &mut self,
        pos: u32,
        end: u32,
        binding: NodeIndex,
        block: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.catch_clauses.len() as u32;
        self.catch_clauses.push(CatchClauseData { binding, block });
        let idx = self.push_node(
            syntax_kind_ext::CATCH_CLAUSE,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(binding, idx);
        self.set_parent(block, idx);
        idx
    }

    pub fn add_switch(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        clauses: NodeList,
    ) -> NodeIndex {
        let data_index = self.switch_data.len() as u32;
        let list = clauses.clone();
        self.switch_data.push(SwitchData {
            expression,
            clauses,
        });
        let idx = self.push_node(
            syntax_kind_ext::SWITCH_STATEMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(expression, idx);
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_case_clause(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        statements: NodeList,
    ) -> NodeIndex {
        let data_index = self.case_clauses.len() as u32;
        let list = statements.clone();
        self.case_clauses.push(CaseClauseData {
            expression,
            statements,
        });
        let idx = self.push_node(
            syntax_kind_ext::CASE_CLAUSE,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(expression, idx);
        self.set_parent_list(&list, idx);
        idx
    }

    pub fn add_labeled(
        &mut self,
        pos: u32,
        end: u32,
        label: NodeIndex,
        statement: NodeIndex,
    ) -> NodeIndex {
        let data_index = self.labeled_data.len() as u32;
        self.labeled_data.push(LabeledData { label, statement });
        let idx = self.push_node(
            syntax_kind_ext::LABELED_STATEMENT,
            pos,
            end,
            node_flags::NONE,
            data_index,
        );
        self.set_parent(label, idx);
        self.set_parent(statement, idx);
        idx
    }

    /// `BREAK_STATEMENT` or `CONTINUE_STATEMENT`.
    pub fn add_jump(&mut self, kind: u16, pos: u32, end: u32, label: NodeIndex) -> NodeIndex {
        let data_index = self.jump_data.len() as u32;
        self.jump_data.push(JumpData { label });
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(label, idx);
        idx
    }

    /// `CLASS_DECLARATION` or `CLASS_EXPRESSION`.
    pub fn add_class(&mut self, kind: u16, pos: u32, end: u32, data: ClassData) -> NodeIndex {
        let name = data.name;
        let heritage = data.heritage;
        let members = data.members.clone();
        let data_index = self.classes.len() as u32;
        self.classes.push(data);
        let idx = self.push_node(kind, pos, end, node_flags::NONE, data_index);
        self.set_parent(name, idx);
        self.set_parent(heritage, idx);
        self.set_parent_list(&members, idx);
        idx
    }
}
