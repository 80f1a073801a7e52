/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the closed `Stmt` / `Expr` sum types
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
