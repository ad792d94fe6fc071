/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` trait and the `Stmt`/`Expr` variants
/// - expressions: Definitions for the expression node types
/// - statements: Definitions for the program and statement node types
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
