//! Effective-arity analysis for JavaScript callable values.
//!
//! A callable's declared parameter count is only a lower bound on how many
//! positional arguments can affect its behavior: the body may read the
//! implicit `arguments` object, or a trailing `...rest` parameter may be
//! referenced. [`guess_max_arity`] runs a lexical pre-screen, a grammar
//! context classification, a full parse, and a scope-graph crawl to decide
//! between a finite arity and the conservative [`Arity::Unbounded`] verdict.
//!
//! ```
//! use maxarity::{Arity, CallableDescriptor, GuessOptions, guess_max_arity};
//!
//! let fixed = CallableDescriptor::new(2, "function (a, b) { return a + b; }");
//! let verdict = guess_max_arity(&fixed, &GuessOptions::default()).unwrap();
//! assert_eq!(verdict, Arity::Finite(2));
//!
//! let variadic = CallableDescriptor::new(0, "function () { return arguments; }");
//! let verdict = guess_max_arity(&variadic, &GuessOptions::default()).unwrap();
//! assert_eq!(verdict, Arity::Unbounded);
//! ```

mod arity;
mod callable;
mod engine;
mod error;
mod probe;

pub use arity::Arity;
pub use callable::{Callable, CallableDescriptor, GuessOptions, HostCapabilities};
pub use engine::guess_max_arity;
// Alias matching the package-style name, for callers that prefer it.
pub use engine::guess_max_arity as guess_function_max_arity;
pub use error::ArityError;
pub use maxarity_common::EcmaVersion;
