//! Hoisted declaration collection.
//!
//! `var` and function declarations are declared into the function scope
//! before the body is crawled, so that references anywhere in the body
//! (including ones textually before the declaration) resolve to them. The
//! walk recurses through statement structure but never into nested
//! callables, which hoist into their own scopes.

use maxarity_parser::parser::node::{Node, NodeArena, node_flags};
use maxarity_parser::parser::syntax_kind_ext;
use maxarity_parser::{NodeIndex, NodeList};

use crate::state::BinderState;

impl BinderState {
    pub(crate) fn hoist_from_body(&mut self, arena: &NodeArena, body: NodeIndex) {
        if let Some(block) = arena.get_block_at(body) {
            self.collect_hoisted_declarations(arena, &block.statements);
        }
        // Concise arrow bodies have no statements to hoist.
    }

    pub(crate) fn collect_hoisted_declarations(&mut self, arena: &NodeArena, statements: &NodeList) {
        for &stmt_idx in &statements.nodes {
            self.collect_hoisted_from_node(arena, stmt_idx);
        }
    }

    fn collect_hoisted_from_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else { return };
        match node.kind {
            k if k == syntax_kind_ext::VARIABLE_STATEMENT => {
                // Only `var` hoists; lexical declarations stay block-scoped.
                if node.flags & (node_flags::LET | node_flags::CONST) == 0 {
                    self.declare_variable_statement_names(arena, node);
                }
            }
            k if k == syntax_kind_ext::FUNCTION_DECLARATION => {
                if let Some(func) = arena.get_function(node)
                    && let Some(name) = arena.identifier_text_at(func.name)
                {
                    self.declare_symbol(name, idx);
                }
            }
            k if k == syntax_kind_ext::BLOCK => {
                if let Some(block) = arena.get_block(node) {
                    self.collect_hoisted_declarations(arena, &block.statements);
                }
            }
            k if k == syntax_kind_ext::IF_STATEMENT => {
                if let Some(if_stmt) = arena.get_if_statement(node) {
                    self.collect_hoisted_from_node(arena, if_stmt.then_statement);
                    self.collect_hoisted_from_node(arena, if_stmt.else_statement);
                }
            }
            k if k == syntax_kind_ext::FOR_STATEMENT
                || k == syntax_kind_ext::WHILE_STATEMENT
                || k == syntax_kind_ext::DO_STATEMENT =>
            {
                if let Some(loop_data) = arena.get_loop(node) {
                    self.collect_hoisted_from_node(arena, loop_data.initializer);
                    self.collect_hoisted_from_node(arena, loop_data.statement);
                }
            }
            k if k == syntax_kind_ext::FOR_IN_STATEMENT
                || k == syntax_kind_ext::FOR_OF_STATEMENT =>
            {
                if let Some(for_data) = arena.get_for_in_of(node) {
                    self.collect_hoisted_from_node(arena, for_data.initializer);
                    self.collect_hoisted_from_node(arena, for_data.statement);
                }
            }
            k if k == syntax_kind_ext::TRY_STATEMENT => {
                if let Some(try_data) = arena.get_try(node) {
                    self.collect_hoisted_from_node(arena, try_data.try_block);
                    if let Some(catch_data) = arena.get_catch_clause_at(try_data.catch_clause) {
                        self.collect_hoisted_from_node(arena, catch_data.block);
                    }
                    self.collect_hoisted_from_node(arena, try_data.finally_block);
                }
            }
            k if k == syntax_kind_ext::SWITCH_STATEMENT => {
                if let Some(switch_data) = arena.get_switch(node) {
                    for &clause_idx in &switch_data.clauses.nodes {
                        if let Some(clause_node) = arena.get(clause_idx)
                            && let Some(clause) = arena.get_case_clause(clause_node)
                        {
                            self.collect_hoisted_declarations(arena, &clause.statements);
                        }
                    }
                }
            }
            k if k == syntax_kind_ext::LABELED_STATEMENT => {
                if let Some(label_data) = arena.get_labeled(node) {
                    self.collect_hoisted_from_node(arena, label_data.statement);
                }
            }
            _ => {}
        }
    }

    /// Declare every name bound by a (var) variable statement.
    pub(crate) fn declare_variable_statement_names(&mut self, arena: &NodeArena, node: &Node) {
        if let Some(var_stmt) = arena.get_variable(node) {
            for &decl_idx in &var_stmt.declarations.nodes {
                if let Some(decl_node) = arena.get(decl_idx)
                    && let Some(decl) = arena.get_variable_declaration(decl_node)
                {
                    self.declare_binding_names(arena, decl.name);
                }
            }
        }
    }

    /// Recursively declare identifiers bound by a binding name (identifier
    /// or destructuring pattern). Renamed and shorthand fields both count;
    /// this is what makes a destructured `arguments` shadow the implicit
    /// binding.
    pub(crate) fn declare_binding_names(&mut self, arena: &NodeArena, name: NodeIndex) {
        let Some(node) = arena.get(name) else { return };
        if node.kind == syntax_kind_ext::IDENTIFIER {
            if let Some(data) = arena.get_identifier(node) {
                self.declare_symbol(&data.escaped_text, name);
            }
            return;
        }
        if syntax_kind_ext::is_binding_pattern(node.kind)
            && let Some(list) = arena.get_list(node)
        {
            for &element_idx in &list.elements.nodes {
                if let Some(element_node) = arena.get(element_idx)
                    && let Some(element) = arena.get_binding_element(element_node)
                {
                    self.declare_binding_names(arena, element.name);
                }
            }
        }
    }

    /// Declare the lexical (`let`/`const`/`class`) names of a statement
    /// list into the current scope, before any of its statements are
    /// crawled.
    pub(crate) fn declare_lexical_names(&mut self, arena: &NodeArena, statements: &NodeList) {
        for &stmt_idx in &statements.nodes {
            let Some(node) = arena.get(stmt_idx) else {
                continue;
            };
            match node.kind {
                k if k == syntax_kind_ext::VARIABLE_STATEMENT => {
                    if node.flags & (node_flags::LET | node_flags::CONST) != 0 {
                        self.declare_variable_statement_names(arena, node);
                    }
                }
                k if k == syntax_kind_ext::CLASS_DECLARATION => {
                    if let Some(class) = arena.get_class(node)
                        && let Some(name) = arena.identifier_text_at(class.name)
                    {
                        self.declare_symbol(name, stmt_idx);
                    }
                }
                _ => {}
            }
        }
    }
}
