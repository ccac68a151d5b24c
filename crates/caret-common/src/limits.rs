//! Centralized limits and defaults for the completion engine.
//!
//! Every recursive or iterative algorithm in the pipeline is bounded by one of
//! these constants so that pathological input (a thousand nested parentheses,
//! a chain of a thousand `.member` steps) degrades to "no information" instead
//! of overflowing the stack while the user is typing.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for the recursive-descent parser.
///
/// Every call into `parse_assignment_expression` or `parse_statement` counts
/// one level. Exceeding it produces `ParseError::NestingTooDeep`.
///
/// ```javascript
/// const x = ((((((((((((((((((( /* ... 200 levels ... */ 1 )))))))))))))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 200;

/// Maximum depth when evaluating the type of a nested AST expression.
///
/// Object literals nested deeper than this get an `Unknown` value type.
pub const MAX_TYPE_EVAL_DEPTH: u32 = 32;

/// Maximum number of `extends` hops followed when collecting class members.
pub const MAX_INHERITANCE_DEPTH: u32 = 16;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Maximum iterations for any parent-chain walk over the scope tree.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of segments considered in a member-access chain.
pub const MAX_CHAIN_SEGMENTS: usize = 64;

/// Maximum number of characters scanned backwards when extracting the
/// expression in front of the cursor.
pub const MAX_EXPRESSION_SCAN: usize = 2_000;

// =============================================================================
// Completion Defaults
// =============================================================================

/// Default cap on the number of completion candidates returned.
pub const DEFAULT_MAX_COMPLETIONS: usize = 100;

/// Default number of recently accepted labels remembered for ranking.
pub const DEFAULT_RECENCY_CAPACITY: usize = 32;
