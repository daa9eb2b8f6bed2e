pub mod ast;
pub mod cli;
pub mod coercion;
pub mod compiler;
pub mod error;
pub mod object_id;
pub mod parser;
pub mod predicate;
pub mod schema;
pub mod store;
pub mod value;

pub use ast::{FieldFilter, FilterNode, FilterTree, Operator};
pub use compiler::{Compiler, compile};
pub use error::{CompileError, ParseError, StoreError};
pub use object_id::ObjectId;
pub use parser::{WhereParser, parse_where};
pub use predicate::{FieldOp, Predicate};
pub use schema::{FieldDescriptor, FieldType, Schema};
pub use store::MemoryCollection;
pub use value::{Literal, Scalar};
