//! # docsieve - Filter Tree
//!
//! This module defines the in-memory form of a where-clause before it is
//! compiled into a document-store predicate.
//!
//! ## Architecture Overview
//!
//! - **[operators]** - The closed operator catalog (families, arity, null policy)
//! - **[filter]** - Filter tree nodes (field conditions, `and`, `or`)
//!
//! ## Quick Start
//!
//! ```text
//! { objectId: { gte: "6124e80f3f5fc839830c1f69", lt: "6124e80f3f5fc839830c1f6b" } }
//! ```
//!
//! This where-clause keeps records whose `objectId` lies in a half-open range.
//!
//! ## Core Concepts
//!
//! ### Implicit conjunction
//!
//! Fields listed side by side, and operators listed under the same field, are
//! all required to hold. `and` / `or` lists nest arbitrarily.
//!
//! ### Null literals
//!
//! Every operator accepts `null`, but what it means depends on the operator
//! family; see [`NullPolicy`].
//!
//! - `eq: null` keeps null-valued records, `neq: null` drops them
//! - `gt: null` (and the other orderings) keeps nothing
//! - `ngt: null` (and the other negated orderings) keeps everything
//! - `in: [null, ...]` keeps null-valued records, `nin: [null, ...]` drops them
pub mod filter;
pub mod operators;

pub use filter::{Condition, FieldFilter, FilterNode, FilterTree};
pub use operators::{Arity, Comparison, NullPolicy, Operator, OperatorFamily};
