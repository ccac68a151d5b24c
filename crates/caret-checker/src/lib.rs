//! Type inference for the caret completion engine.
//!
//! - `chain` - Splitting the text before the cursor into a head and
//!   member/index/call steps
//! - `inference` - `TypeInference`, typing an access chain against a bound
//!   scope tree
//! - `members` - `MemberInfo` and member enumeration for a type
//! - `heuristics` - Name-based best guesses, used only when inference gives
//!   up

pub mod chain;
pub use chain::{AccessChain, ChainSegment, split_access_chain, strip_call_arguments};

pub mod inference;
pub use inference::{InferenceOptions, TypeInference};

pub mod members;
pub use members::{MemberInfo, sort_order};

pub mod heuristics;
