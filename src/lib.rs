pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod record;
pub mod sql;
pub mod value;

pub use ast::{Expr, Filtering, LogicalOp, NumberOp, StringOp, Token};
pub use evaluator::{EvalError, Evaluator, filter, filter_records};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseOptions, Parser, parse, parse_with};
pub use record::{Matcher, Record};
pub use sql::{CompileError, SqlCompiler, SqlDialect, to_sql};
pub use value::{Kind, Value};
