//! NodeArena access methods and node kind utilities.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext;
use maxarity_scanner::SyntaxKind;

impl NodeArena {
    /// Get a thin node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node.
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Structural parent of a node, or `NONE` for the root.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Get identifier data for a node (identifiers and private identifiers).
    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data()
            && (node.kind == SyntaxKind::Identifier as u16
                || node.kind == SyntaxKind::PrivateIdentifier as u16)
        {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Identifier text by index, if the node is an identifier.
    pub fn identifier_text_at(&self, index: NodeIndex) -> Option<&str> {
        self.get(index)
            .and_then(|node| self.get_identifier(node))
            .map(|data| data.escaped_text.as_str())
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && matches!(node.kind,
                k if k == SyntaxKind::StringLiteral as u16
                    || k == SyntaxKind::NumericLiteral as u16
                    || k == SyntaxKind::BigIntLiteral as u16
                    || k == SyntaxKind::RegularExpressionLiteral as u16
                    || k == SyntaxKind::NoSubstitutionTemplateLiteral as u16
                    || k == SyntaxKind::TemplateHead as u16
                    || k == SyntaxKind::TemplateMiddle as u16
                    || k == SyntaxKind::TemplateTail as u16)
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get function data for any callable-definition node.
    #[inline]
    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data() && syntax_kind_ext::is_function_like(node.kind) {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_function_at(&self, index: NodeIndex) -> Option<&FunctionData> {
        self.get(index).and_then(|node| self.get_function(node))
    }

    #[inline]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == syntax_kind_ext::PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_parameter_at(&self, index: NodeIndex) -> Option<&ParameterData> {
        self.get(index).and_then(|node| self.get_parameter(node))
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == syntax_kind_ext::BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_block_at(&self, index: NodeIndex) -> Option<&BlockData> {
        self.get(index).and_then(|node| self.get_block(node))
    }

    #[inline]
    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == syntax_kind_ext::VARIABLE_STATEMENT {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == syntax_kind_ext::VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binding_element(&self, node: &Node) -> Option<&BindingElementData> {
        if node.has_data() && node.kind == syntax_kind_ext::BINDING_ELEMENT {
            self.binding_elements.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Element list of array/object literals and binding patterns.
    #[inline]
    pub fn get_list(&self, node: &Node) -> Option<&ListData> {
        if node.has_data()
            && matches!(
                node.kind,
                k if k == syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
                    || k == syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
                    || k == syntax_kind_ext::OBJECT_BINDING_PATTERN
                    || k == syntax_kind_ext::ARRAY_BINDING_PATTERN
            )
        {
            self.lists.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_property_assignment(&self, node: &Node) -> Option<&PropertyAssignmentData> {
        if node.has_data()
            && (node.kind == syntax_kind_ext::PROPERTY_ASSIGNMENT
                || node.kind == syntax_kind_ext::PROPERTY_DECLARATION)
        {
            self.property_assignments.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_shorthand_property(&self, node: &Node) -> Option<&ShorthandPropertyData> {
        if node.has_data() && node.kind == syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT {
            self.shorthand_properties.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == syntax_kind_ext::BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_unary_expr(&self, node: &Node) -> Option<&UnaryExprData> {
        if node.has_data()
            && matches!(
                node.kind,
                k if k == syntax_kind_ext::PREFIX_UNARY_EXPRESSION
                    || k == syntax_kind_ext::POSTFIX_UNARY_EXPRESSION
                    || k == syntax_kind_ext::YIELD_EXPRESSION
            )
        {
            self.unary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data()
            && (node.kind == syntax_kind_ext::CALL_EXPRESSION
                || node.kind == syntax_kind_ext::NEW_EXPRESSION)
        {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data()
            && matches!(
                node.kind,
                k if k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                    || k == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                    || k == syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION
            )
        {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_conditional_expr(&self, node: &Node) -> Option<&ConditionalExprData> {
        if node.has_data() && node.kind == syntax_kind_ext::CONDITIONAL_EXPRESSION {
            self.conditional_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Data of single-expression wrapper nodes.
    #[inline]
    pub fn get_wrapped_expr(&self, node: &Node) -> Option<&WrappedExprData> {
        if node.has_data()
            && matches!(
                node.kind,
                k if k == syntax_kind_ext::PARENTHESIZED_EXPRESSION
                    || k == syntax_kind_ext::SPREAD_ELEMENT
                    || k == syntax_kind_ext::EXPRESSION_STATEMENT
                    || k == syntax_kind_ext::RETURN_STATEMENT
                    || k == syntax_kind_ext::THROW_STATEMENT
                    || k == syntax_kind_ext::COMPUTED_PROPERTY_NAME
            )
        {
            self.wrapped_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_template_expr(&self, node: &Node) -> Option<&TemplateExprData> {
        if node.has_data() && node.kind == syntax_kind_ext::TEMPLATE_EXPRESSION {
            self.template_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_template_span(&self, node: &Node) -> Option<&TemplateSpanData> {
        if node.has_data() && node.kind == syntax_kind_ext::TEMPLATE_SPAN {
            self.template_spans.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_if_statement(&self, node: &Node) -> Option<&IfStatementData> {
        if node.has_data() && node.kind == syntax_kind_ext::IF_STATEMENT {
            self.if_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_loop(&self, node: &Node) -> Option<&LoopData> {
        if node.has_data()
            && matches!(
                node.kind,
                k if k == syntax_kind_ext::FOR_STATEMENT
                    || k == syntax_kind_ext::WHILE_STATEMENT
                    || k == syntax_kind_ext::DO_STATEMENT
            )
        {
            self.loops.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_for_in_of(&self, node: &Node) -> Option<&ForInOfData> {
        if node.has_data()
            && (node.kind == syntax_kind_ext::FOR_IN_STATEMENT
                || node.kind == syntax_kind_ext::FOR_OF_STATEMENT)
        {
            self.for_in_of.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_try(&self, node: &Node) -> Option<&TryData> {
        if node.has_data() && node.kind == syntax_kind_ext::TRY_STATEMENT {
            self.try_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_catch_clause(&self, node: &Node) -> Option<&CatchClauseData> {
        if node.has_data() && node.kind == syntax_kind_ext::CATCH_CLAUSE {
            self.catch_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_catch_clause_at(&self, index: NodeIndex) -> Option<&CatchClauseData> {
        self.get(index).and_then(|node| self.get_catch_clause(node))
    }

    #[inline]
    pub fn get_switch(&self, node: &Node) -> Option<&SwitchData> {
        if node.has_data() && node.kind == syntax_kind_ext::SWITCH_STATEMENT {
            self.switch_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_case_clause(&self, node: &Node) -> Option<&CaseClauseData> {
        if node.has_data() && node.kind == syntax_kind_ext::CASE_CLAUSE {
            self.case_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_labeled(&self, node: &Node) -> Option<&LabeledData> {
        if node.has_data() && node.kind == syntax_kind_ext::LABELED_STATEMENT {
            self.labeled_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_jump(&self, node: &Node) -> Option<&JumpData> {
        if node.has_data()
            && (node.kind == syntax_kind_ext::BREAK_STATEMENT
                || node.kind == syntax_kind_ext::CONTINUE_STATEMENT)
        {
            self.jump_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_class(&self, node: &Node) -> Option<&ClassData> {
        if node.has_data() && syntax_kind_ext::is_class_like(node.kind) {
            self.classes.get(node.data_index as usize)
        } else {
            None
        }
    }
}
