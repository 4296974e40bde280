//! Scope crawl: node dispatch, callable binding, and reference recording.

use maxarity_parser::parser::node::{FunctionFlags, Node, NodeArena, node_flags};
use maxarity_parser::parser::syntax_kind_ext;
use maxarity_parser::{NodeIndex, ParsedCallable};
use tracing::debug;

use crate::state::{BinderState, ContainerKind, ScopeId};

/// Build the scope graph for a parsed callable. Returns the binder state and
/// the root callable's own scope.
pub fn bind_callable(parsed: &ParsedCallable) -> (BinderState, ScopeId) {
    let mut state = BinderState::new();
    let root_scope = state.bind_function_like(&parsed.arena, parsed.root);
    debug_assert!(state.scope_stack.is_empty());
    debug!(
        scopes = state.scope_count(),
        "scope graph crawl complete"
    );
    (state, root_scope)
}

impl BinderState {
    /// Bind a callable definition: enter its scope, pre-register the
    /// implicit `arguments` binding (non-arrow only), declare parameters,
    /// hoist, and crawl the body.
    pub(crate) fn bind_function_like(&mut self, arena: &NodeArena, idx: NodeIndex) -> ScopeId {
        let func = arena.get(idx).and_then(|node| arena.get_function(node));
        let is_arrow = func.is_some_and(|f| f.flags.contains(FunctionFlags::ARROW));
        let kind = if is_arrow {
            ContainerKind::Arrow
        } else {
            ContainerKind::Function
        };
        let scope = self.enter_scope(kind, idx);
        let Some(func) = func else {
            self.exit_scope();
            return scope;
        };

        // Pre-register the implicit binding before any declarations so a
        // later explicit declaration of the same name overwrites it.
        if !is_arrow {
            self.declare_arguments_symbol();
        }

        // Named function expressions bind their own name in their scope.
        if let Some(node) = arena.get(idx)
            && node.kind == syntax_kind_ext::FUNCTION_EXPRESSION
            && let Some(name) = arena.identifier_text_at(func.name)
        {
            self.declare_symbol(name, idx);
        }

        for &param_idx in &func.parameters.nodes {
            if let Some(param) = arena.get_parameter_at(param_idx) {
                self.declare_binding_names(arena, param.name);
            }
        }

        self.hoist_from_body(arena, func.body);
        if let Some(block) = arena.get_block_at(func.body) {
            self.declare_lexical_names(arena, &block.statements);
        }

        // Parameter defaults and computed pattern keys evaluate inside the
        // callable's scope.
        for &param_idx in &func.parameters.nodes {
            if let Some(param) = arena.get_parameter_at(param_idx) {
                self.bind_pattern_expressions(arena, param.name);
                self.bind_node(arena, param.initializer);
            }
        }

        if let Some(block) = arena.get_block_at(func.body) {
            for &stmt_idx in &block.statements.nodes {
                self.bind_node(arena, stmt_idx);
            }
        } else {
            self.bind_node(arena, func.body);
        }

        self.exit_scope();
        scope
    }

    /// Crawl dispatch. Only reference-position identifiers reach the
    /// `IDENTIFIER` arm; declaration names, member names, and property keys
    /// are consumed structurally by their owners.
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        if idx.is_none() {
            return;
        }
        let Some(node) = arena.get(idx) else { return };
        match node.kind {
            k if k == syntax_kind_ext::IDENTIFIER => {
                if let Some(data) = arena.get_identifier(node) {
                    self.resolve_reference(&data.escaped_text, idx);
                }
            }
            k if syntax_kind_ext::is_function_like(k) => {
                self.bind_function_like(arena, idx);
            }
            k if syntax_kind_ext::is_class_like(k) => {
                self.bind_class(arena, node, idx);
            }
            k if k == syntax_kind_ext::BLOCK => {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(block) = arena.get_block(node) {
                    self.declare_lexical_names(arena, &block.statements);
                    for &stmt_idx in &block.statements.nodes {
                        self.bind_node(arena, stmt_idx);
                    }
                }
                self.exit_scope();
            }
            k if k == syntax_kind_ext::VARIABLE_STATEMENT => {
                // Names were pre-declared (hoisting or lexical pre-pass);
                // only pattern expressions and initializers remain.
                if let Some(var_stmt) = arena.get_variable(node) {
                    for &decl_idx in &var_stmt.declarations.nodes {
                        if let Some(decl_node) = arena.get(decl_idx)
                            && let Some(decl) = arena.get_variable_declaration(decl_node)
                        {
                            self.bind_pattern_expressions(arena, decl.name);
                            self.bind_node(arena, decl.initializer);
                        }
                    }
                }
            }
            k if k == syntax_kind_ext::EXPRESSION_STATEMENT
                || k == syntax_kind_ext::RETURN_STATEMENT
                || k == syntax_kind_ext::THROW_STATEMENT
                || k == syntax_kind_ext::PARENTHESIZED_EXPRESSION
                || k == syntax_kind_ext::SPREAD_ELEMENT
                || k == syntax_kind_ext::COMPUTED_PROPERTY_NAME =>
            {
                if let Some(wrapped) = arena.get_wrapped_expr(node) {
                    self.bind_node(arena, wrapped.expression);
                }
            }
            k if k == syntax_kind_ext::BINARY_EXPRESSION => {
                if let Some(binary) = arena.get_binary_expr(node) {
                    self.bind_node(arena, binary.left);
                    self.bind_node(arena, binary.right);
                }
            }
            k if k == syntax_kind_ext::PREFIX_UNARY_EXPRESSION
                || k == syntax_kind_ext::POSTFIX_UNARY_EXPRESSION
                || k == syntax_kind_ext::YIELD_EXPRESSION =>
            {
                if let Some(unary) = arena.get_unary_expr(node) {
                    self.bind_node(arena, unary.operand);
                }
            }
            k if k == syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                if let Some(cond) = arena.get_conditional_expr(node) {
                    self.bind_node(arena, cond.condition);
                    self.bind_node(arena, cond.when_true);
                    self.bind_node(arena, cond.when_false);
                }
            }
            k if k == syntax_kind_ext::CALL_EXPRESSION || k == syntax_kind_ext::NEW_EXPRESSION => {
                if let Some(call) = arena.get_call_expr(node) {
                    self.bind_node(arena, call.expression);
                    for &arg_idx in &call.arguments.nodes {
                        self.bind_node(arena, arg_idx);
                    }
                }
            }
            k if k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                // The member name is not a reference.
                if let Some(access) = arena.get_access_expr(node) {
                    self.bind_node(arena, access.expression);
                }
            }
            k if k == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                || k == syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION =>
            {
                if let Some(access) = arena.get_access_expr(node) {
                    self.bind_node(arena, access.expression);
                    self.bind_node(arena, access.name);
                }
            }
            k if k == syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
                || k == syntax_kind_ext::ARRAY_LITERAL_EXPRESSION =>
            {
                if let Some(list) = arena.get_list(node) {
                    for &element_idx in &list.elements.nodes {
                        // Computed member names of methods evaluate in the
                        // enclosing scope, before the method's own scope.
                        if let Some(element_node) = arena.get(element_idx)
                            && syntax_kind_ext::is_function_like(element_node.kind)
                            && let Some(member) = arena.get_function(element_node)
                            && let Some(name_node) = arena.get(member.name)
                            && name_node.kind == syntax_kind_ext::COMPUTED_PROPERTY_NAME
                        {
                            self.bind_node(arena, member.name);
                        }
                        self.bind_node(arena, element_idx);
                    }
                }
            }
            k if k == syntax_kind_ext::PROPERTY_ASSIGNMENT
                || k == syntax_kind_ext::PROPERTY_DECLARATION =>
            {
                if let Some(property) = arena.get_property_assignment(node) {
                    if let Some(name_node) = arena.get(property.name)
                        && name_node.kind == syntax_kind_ext::COMPUTED_PROPERTY_NAME
                    {
                        self.bind_node(arena, property.name);
                    }
                    self.bind_node(arena, property.initializer);
                }
            }
            k if k == syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT => {
                // The shorthand name is a live reference.
                if let Some(shorthand) = arena.get_shorthand_property(node) {
                    self.bind_node(arena, shorthand.name);
                    self.bind_node(arena, shorthand.initializer);
                }
            }
            k if k == syntax_kind_ext::TEMPLATE_EXPRESSION => {
                if let Some(template) = arena.get_template_expr(node) {
                    for &span_idx in &template.spans.nodes {
                        self.bind_node(arena, span_idx);
                    }
                }
            }
            k if k == syntax_kind_ext::TEMPLATE_SPAN => {
                if let Some(span) = arena.get_template_span(node) {
                    self.bind_node(arena, span.expression);
                }
            }
            k if k == syntax_kind_ext::IF_STATEMENT => {
                if let Some(if_stmt) = arena.get_if_statement(node) {
                    self.bind_node(arena, if_stmt.expression);
                    self.bind_node(arena, if_stmt.then_statement);
                    self.bind_node(arena, if_stmt.else_statement);
                }
            }
            k if k == syntax_kind_ext::FOR_STATEMENT
                || k == syntax_kind_ext::WHILE_STATEMENT
                || k == syntax_kind_ext::DO_STATEMENT =>
            {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(loop_data) = arena.get_loop(node) {
                    self.declare_loop_head_lexicals(arena, loop_data.initializer);
                    self.bind_node(arena, loop_data.initializer);
                    self.bind_node(arena, loop_data.condition);
                    self.bind_node(arena, loop_data.incrementor);
                    self.bind_node(arena, loop_data.statement);
                }
                self.exit_scope();
            }
            k if k == syntax_kind_ext::FOR_IN_STATEMENT
                || k == syntax_kind_ext::FOR_OF_STATEMENT =>
            {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(for_data) = arena.get_for_in_of(node) {
                    self.declare_loop_head_lexicals(arena, for_data.initializer);
                    self.bind_node(arena, for_data.initializer);
                    self.bind_node(arena, for_data.expression);
                    self.bind_node(arena, for_data.statement);
                }
                self.exit_scope();
            }
            k if k == syntax_kind_ext::TRY_STATEMENT => {
                if let Some(try_data) = arena.get_try(node) {
                    self.bind_node(arena, try_data.try_block);
                    self.bind_node(arena, try_data.catch_clause);
                    self.bind_node(arena, try_data.finally_block);
                }
            }
            k if k == syntax_kind_ext::CATCH_CLAUSE => {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(catch) = arena.get_catch_clause(node) {
                    self.declare_binding_names(arena, catch.binding);
                    self.bind_pattern_expressions(arena, catch.binding);
                    self.bind_node(arena, catch.block);
                }
                self.exit_scope();
            }
            k if k == syntax_kind_ext::SWITCH_STATEMENT => {
                if let Some(switch_data) = arena.get_switch(node) {
                    self.bind_node(arena, switch_data.expression);
                    // The case block is one lexical scope shared by all
                    // clauses.
                    self.enter_scope(ContainerKind::Block, idx);
                    for &clause_idx in &switch_data.clauses.nodes {
                        if let Some(clause_node) = arena.get(clause_idx)
                            && let Some(clause) = arena.get_case_clause(clause_node)
                        {
                            self.declare_lexical_names(arena, &clause.statements);
                        }
                    }
                    for &clause_idx in &switch_data.clauses.nodes {
                        if let Some(clause_node) = arena.get(clause_idx)
                            && let Some(clause) = arena.get_case_clause(clause_node)
                        {
                            self.bind_node(arena, clause.expression);
                            for &stmt_idx in &clause.statements.nodes {
                                self.bind_node(arena, stmt_idx);
                            }
                        }
                    }
                    self.exit_scope();
                }
            }
            k if k == syntax_kind_ext::LABELED_STATEMENT => {
                // The label is not a reference.
                if let Some(labeled) = arena.get_labeled(node) {
                    self.bind_node(arena, labeled.statement);
                }
            }
            // Literals, `this`/`super`, jumps, and empty statements bind
            // nothing.
            _ => {}
        }
    }

    fn bind_class(&mut self, arena: &NodeArena, node: &Node, idx: NodeIndex) {
        let Some(class) = arena.get_class(node) else {
            return;
        };
        self.bind_node(arena, class.heritage);
        self.enter_scope(ContainerKind::Block, idx);
        // Class expressions see their own name inside the body; class
        // declarations were already declared in the enclosing scope.
        if node.kind == syntax_kind_ext::CLASS_EXPRESSION
            && let Some(name) = arena.identifier_text_at(class.name)
        {
            self.declare_symbol(name, idx);
        }
        for &member_idx in &class.members.nodes {
            if let Some(member_node) = arena.get(member_idx)
                && syntax_kind_ext::is_function_like(member_node.kind)
                && let Some(member) = arena.get_function(member_node)
                && let Some(name_node) = arena.get(member.name)
                && name_node.kind == syntax_kind_ext::COMPUTED_PROPERTY_NAME
            {
                self.bind_node(arena, member.name);
            }
            self.bind_node(arena, member_idx);
        }
        self.exit_scope();
    }

    /// Declare `let`/`const` names of a loop-head declaration list into the
    /// loop's own scope.
    fn declare_loop_head_lexicals(&mut self, arena: &NodeArena, initializer: NodeIndex) {
        if let Some(init_node) = arena.get(initializer)
            && init_node.kind == syntax_kind_ext::VARIABLE_STATEMENT
            && init_node.flags & (node_flags::LET | node_flags::CONST) != 0
        {
            self.declare_variable_statement_names(arena, init_node);
        }
    }

    /// Bind the expressions hidden inside a binding pattern: computed keys
    /// and default initializers. Bound names themselves are declarations and
    /// are skipped.
    pub(crate) fn bind_pattern_expressions(&mut self, arena: &NodeArena, name: NodeIndex) {
        let Some(node) = arena.get(name) else { return };
        if !syntax_kind_ext::is_binding_pattern(node.kind) {
            return;
        }
        let Some(list) = arena.get_list(node) else {
            return;
        };
        for &element_idx in &list.elements.nodes {
            if let Some(element_node) = arena.get(element_idx)
                && let Some(element) = arena.get_binding_element(element_node)
            {
                if let Some(key_node) = arena.get(element.property_name)
                    && key_node.kind == syntax_kind_ext::COMPUTED_PROPERTY_NAME
                {
                    self.bind_node(arena, element.property_name);
                }
                self.bind_pattern_expressions(arena, element.name);
                self.bind_node(arena, element.initializer);
            }
        }
    }
}
