/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The statement and expression enums and the program root
/// - expressions: One struct per expression kind
/// - statements: One struct per statement kind
/// - types: The static types of the language
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
