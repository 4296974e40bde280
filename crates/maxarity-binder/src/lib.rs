//! Lexical scope graph builder for the maxarity analyzer.
//!
//! One full crawl over a parsed callable produces, for every scope, a map of
//! binding name to binding record (declaring node plus reference sites).
//! Function scopes pre-register the implicit `arguments` binding on entry;
//! an explicit declaration of the same name later in the crawl overwrites
//! the placeholder, which is exactly the lexical shadowing rule. Arrow
//! scopes host no implicit binding, so their `arguments` references resolve
//! outward to the nearest enclosing function scope.

pub mod state;
mod state_binding;
mod state_hoisting;

pub use state::{Binding, BindingId, BinderState, ContainerKind, Scope, ScopeId};
pub use state_binding::bind_callable;
