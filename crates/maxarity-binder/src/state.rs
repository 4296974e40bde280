//! Binder state: scopes, binding records, and scope-stack management.

use maxarity_parser::NodeIndex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingId(pub u32);

/// What kind of node owns a scope. Only `Function` scopes can host the
/// implicit `arguments` binding; `Arrow` scopes defer it outward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Function,
    Arrow,
    Block,
}

/// A lexical scope: owner node, parent link, and its bindings by name.
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub container: NodeIndex,
    pub kind: ContainerKind,
    pub bindings: FxHashMap<String, BindingId>,
}

/// A name bound in exactly one scope.
#[derive(Debug)]
pub struct Binding {
    pub name: String,
    /// Declaring node; `NodeIndex::NONE` marks the injected implicit
    /// `arguments` binding while it remains un-shadowed.
    pub declaration: NodeIndex,
    /// Reference sites, in crawl order.
    pub references: Vec<NodeIndex>,
}

impl Binding {
    /// Whether this is the implicit binding (no explicit declaration).
    pub fn is_implicit(&self) -> bool {
        self.declaration.is_none()
    }

    pub fn is_referenced(&self) -> bool {
        !self.references.is_empty()
    }
}

/// Scope graph under construction and its crawl state.
#[derive(Default)]
pub struct BinderState {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) scope_stack: SmallVec<[ScopeId; 8]>,
    pub(crate) node_scopes: FxHashMap<u32, ScopeId>,
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState::default()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Scope owned by a container node (callable definition or block).
    pub fn scope_of(&self, container: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&container.0).copied()
    }

    /// Binding declared directly in `scope` (no parent walk).
    pub fn binding_in_scope(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        let id = self.scopes.get(scope.0 as usize)?.bindings.get(name)?;
        self.bindings.get(id.0 as usize)
    }

    // Crawl-side operations

    pub(crate) fn current_scope(&self) -> ScopeId {
        *self
            .scope_stack
            .last()
            .expect("binder crawl outside any scope")
    }

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, container: NodeIndex) -> ScopeId {
        let parent = self.scope_stack.last().copied();
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            container,
            kind,
            bindings: FxHashMap::default(),
        });
        self.scope_stack.push(id);
        if container.is_some() {
            self.node_scopes.insert(container.0, id);
        }
        trace!(scope = id.0, ?kind, "enter scope");
        id
    }

    pub(crate) fn exit_scope(&mut self) {
        let left = self.scope_stack.pop();
        trace!(scope = ?left.map(|s| s.0), "exit scope");
    }

    /// Declare `name` in the current scope. Redeclaration keeps the binding
    /// record but replaces its declaring node; in particular, an explicit
    /// declaration overwrites the pre-registered implicit `arguments`
    /// placeholder, hiding the implicit binding from every reference.
    pub(crate) fn declare_symbol(&mut self, name: &str, declaration: NodeIndex) -> BindingId {
        let scope_id = self.current_scope();
        let scope = &mut self.scopes[scope_id.0 as usize];
        if let Some(&existing) = scope.bindings.get(name) {
            if declaration.is_some() {
                self.bindings[existing.0 as usize].declaration = declaration;
            }
            return existing;
        }
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(Binding {
            name: name.to_string(),
            declaration,
            references: Vec::new(),
        });
        scope.bindings.insert(name.to_string(), id);
        id
    }

    /// Pre-register the implicit `arguments` binding in a function scope.
    pub(crate) fn declare_arguments_symbol(&mut self) {
        self.declare_symbol("arguments", NodeIndex::NONE);
    }

    /// Resolve a reference site by walking scopes outward; the first scope
    /// binding the name wins. Unresolved names are globals and are not
    /// recorded.
    pub(crate) fn resolve_reference(&mut self, name: &str, site: NodeIndex) {
        for &scope_id in self.scope_stack.iter().rev() {
            if let Some(&binding_id) = self.scopes[scope_id.0 as usize].bindings.get(name) {
                self.bindings[binding_id.0 as usize].references.push(site);
                return;
            }
        }
        trace!(name, "unresolved reference (global)");
    }
}
