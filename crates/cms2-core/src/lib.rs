//! Semantic core for the CMS-2 language server: lexical pre-processing,
//! statement classification, declaration parsing, the semantic model, and
//! positional queries over it.
//!
//! Grounded throughout on `original_source/cms2_semantic_parser.py` (see
//! `DESIGN.md` for the file-by-file ledger).

pub mod classifier;
pub mod collections;
pub mod keywords;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod query;

pub use model::SemanticModel;
pub use parser::parse;
