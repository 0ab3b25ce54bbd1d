//! Statement records.

use crate::codec::tree::{TreeDecoder, TreeEncoder, unexpected};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    Block, CatchClause, ForInOfBinding, ForInOfLeft, ForInOfStatement, ForInit, ForStatement,
    IfStatement, LabelledStatement, Statement, SwitchCase, SwitchDefault, SwitchStatement,
    SwitchStatementWithDefault, TryCatchStatement, TryFinallyStatement, VariableDeclaration,
    VariableDeclarator, WhileStatement, WithStatement,
};
use crate::registry::NodeKind;

// =============================================================================
// ENCODING
// =============================================================================

impl<'t> TreeEncoder<'t> {
    pub(crate) fn encode_statement(&mut self, stmt: &'t Statement<'_>) -> Result<(), EncodeError> {
        self.nested(|enc| enc.encode_statement_record(stmt))
    }

    fn encode_statement_record(&mut self, stmt: &'t Statement<'_>) -> Result<(), EncodeError> {
        match stmt {
            Statement::Block(block) => self.encode_block(block),
            Statement::Break { label } => {
                self.write_kind(NodeKind::BreakStatement)?;
                self.write_maybe_atom(label.as_deref())
            }
            Statement::Continue { label } => {
                self.write_kind(NodeKind::ContinueStatement)?;
                self.write_maybe_atom(label.as_deref())
            }
            Statement::ClassDeclaration(class) => self.encode_class_declaration(class),
            Statement::Debugger => self.write_kind(NodeKind::DebuggerStatement),
            Statement::Empty => self.write_kind(NodeKind::EmptyStatement),
            Statement::Expression(expression) => {
                self.write_kind(NodeKind::ExpressionStatement)?;
                self.encode_expression(expression)
            }
            Statement::FunctionDeclaration(function) => self.encode_function_declaration(function),
            Statement::If(stmt) => self.encode_if(stmt),
            Statement::DoWhile(stmt) => self.encode_while(NodeKind::DoWhileStatement, stmt),
            Statement::While(stmt) => self.encode_while(NodeKind::WhileStatement, stmt),
            Statement::ForIn(stmt) => self.encode_for_in_of(NodeKind::ForInStatement, stmt),
            Statement::ForOf(stmt) => self.encode_for_in_of(NodeKind::ForOfStatement, stmt),
            Statement::For(stmt) => self.encode_for(stmt),
            Statement::Labelled(stmt) => {
                self.write_kind(NodeKind::LabelledStatement)?;
                self.write_atom(&stmt.label)?;
                self.encode_statement(&stmt.body)
            }
            Statement::Return { expression } => {
                self.write_kind(NodeKind::ReturnStatement)?;
                self.write_optional(expression.as_ref(), |enc, e| enc.encode_expression(e))
            }
            Statement::Switch(stmt) => {
                self.write_kind(NodeKind::SwitchStatement)?;
                self.encode_expression(&stmt.discriminant)?;
                self.write_list(&stmt.cases, |enc, case| enc.encode_switch_case(case))
            }
            Statement::SwitchWithDefault(stmt) => self.encode_switch_with_default(stmt),
            Statement::Throw { expression } => {
                self.write_kind(NodeKind::ThrowStatement)?;
                self.encode_expression(expression)
            }
            Statement::TryCatch(stmt) => {
                self.write_kind(NodeKind::TryCatchStatement)?;
                self.encode_block(&stmt.body)?;
                self.encode_catch_clause(&stmt.catch_clause)
            }
            Statement::TryFinally(stmt) => {
                self.write_kind(NodeKind::TryFinallyStatement)?;
                self.encode_block(&stmt.body)?;
                self.write_optional(stmt.catch_clause.as_ref(), |enc, c| {
                    enc.encode_catch_clause(c)
                })?;
                self.encode_block(&stmt.finalizer)
            }
            Statement::VariableDeclaration(decl) => self.encode_variable_declaration(decl),
            Statement::With(stmt) => {
                self.write_kind(NodeKind::WithStatement)?;
                self.encode_expression(&stmt.object)?;
                self.encode_statement(&stmt.body)
            }
        }
    }

    pub(crate) fn encode_block(&mut self, block: &'t Block<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::Block)?;
        self.encode_declared_scope(NodeKind::AssertedBlockScope, &block.scope)?;
        self.write_list(&block.statements, |enc, stmt| enc.encode_statement(stmt))
    }

    fn encode_if(&mut self, stmt: &'t IfStatement<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::IfStatement)?;
        self.encode_expression(&stmt.test)?;
        self.encode_statement(&stmt.consequent)?;
        self.write_optional(stmt.alternate.as_deref(), |enc, s| enc.encode_statement(s))
    }

    fn encode_while(
        &mut self,
        kind: NodeKind,
        stmt: &'t WhileStatement<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(kind)?;
        self.encode_expression(&stmt.test)?;
        self.encode_statement(&stmt.body)
    }

    fn encode_for_in_of(
        &mut self,
        kind: NodeKind,
        stmt: &'t ForInOfStatement<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(kind)?;
        match &stmt.left {
            ForInOfLeft::Binding(binding) => {
                self.write_kind(NodeKind::ForInOfBinding)?;
                self.write_variant(binding.kind)?;
                self.encode_binding(&binding.binding)?;
            }
            ForInOfLeft::Target(target) => self.encode_assignment_target(target)?,
        }
        self.encode_expression(&stmt.right)?;
        self.encode_statement(&stmt.body)
    }

    fn encode_for(&mut self, stmt: &'t ForStatement<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::ForStatement)?;
        self.write_optional(stmt.init.as_ref(), |enc, init| match init {
            ForInit::VariableDeclaration(decl) => enc.encode_variable_declaration(decl),
            ForInit::Expression(expression) => enc.encode_expression(expression),
        })?;
        self.write_optional(stmt.test.as_ref(), |enc, e| enc.encode_expression(e))?;
        self.write_optional(stmt.update.as_ref(), |enc, e| enc.encode_expression(e))?;
        self.encode_statement(&stmt.body)
    }

    fn encode_switch_case(&mut self, case: &'t SwitchCase<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::SwitchCase)?;
        self.encode_expression(&case.test)?;
        self.write_list(&case.consequent, |enc, stmt| enc.encode_statement(stmt))
    }

    fn encode_switch_with_default(
        &mut self,
        stmt: &'t SwitchStatementWithDefault<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::SwitchStatementWithDefault)?;
        self.encode_expression(&stmt.discriminant)?;
        self.write_list(&stmt.pre_default_cases, |enc, case| enc.encode_switch_case(case))?;
        self.write_kind(NodeKind::SwitchDefault)?;
        self.write_list(&stmt.default_case.consequent, |enc, s| enc.encode_statement(s))?;
        self.write_list(&stmt.post_default_cases, |enc, case| enc.encode_switch_case(case))
    }

    fn encode_catch_clause(&mut self, clause: &'t CatchClause<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::CatchClause)?;
        self.encode_bound_names_scope(&clause.binding_scope)?;
        self.encode_binding(&clause.binding)?;
        self.encode_block(&clause.body)
    }

    pub(crate) fn encode_variable_declaration(
        &mut self,
        decl: &'t VariableDeclaration<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::VariableDeclaration)?;
        self.write_variant(decl.kind)?;
        self.write_list(&decl.declarators, |enc, declarator| {
            enc.write_kind(NodeKind::VariableDeclarator)?;
            enc.encode_binding(&declarator.binding)?;
            enc.write_optional(declarator.init.as_ref(), |enc, e| enc.encode_expression(e))
        })
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl<'a> TreeDecoder<'a> {
    pub(crate) fn decode_statement(&mut self) -> Result<Statement<'a>, DecodeError> {
        self.nested(|dec| dec.decode_statement_record())
    }

    // Each arm calls out so that only the taken branch holds stack space.
    fn decode_statement_record(&mut self) -> Result<Statement<'a>, DecodeError> {
        // Records with their own entry points check the tag themselves.
        match self.peek_kind()? {
            NodeKind::Block => return self.decode_block_statement(),
            NodeKind::ClassDeclaration => return self.decode_class_declaration_statement(),
            NodeKind::EagerFunctionDeclaration | NodeKind::LazyFunctionDeclaration => {
                return self.decode_function_declaration_statement();
            }
            NodeKind::VariableDeclaration => return self.decode_variable_declaration_statement(),
            _ => {}
        }

        match self.read_kind()? {
            NodeKind::BreakStatement => Ok(Statement::Break {
                label: self.read_maybe_atom("label")?,
            }),
            NodeKind::ContinueStatement => Ok(Statement::Continue {
                label: self.read_maybe_atom("label")?,
            }),
            NodeKind::DebuggerStatement => Ok(Statement::Debugger),
            NodeKind::EmptyStatement => Ok(Statement::Empty),
            NodeKind::ExpressionStatement => self.decode_expression().map(Statement::Expression),
            NodeKind::IfStatement => self.decode_if_fields(),
            NodeKind::DoWhileStatement => self.decode_while_fields().map(Statement::DoWhile),
            NodeKind::WhileStatement => self.decode_while_fields().map(Statement::While),
            NodeKind::ForInStatement => self.decode_for_in_of_fields().map(Statement::ForIn),
            NodeKind::ForOfStatement => self.decode_for_in_of_fields().map(Statement::ForOf),
            NodeKind::ForStatement => self.decode_for_fields(),
            NodeKind::LabelledStatement => self.decode_labelled_fields(),
            NodeKind::ReturnStatement => self.decode_return_fields(),
            NodeKind::SwitchStatement => self.decode_switch_fields(),
            NodeKind::SwitchStatementWithDefault => self.decode_switch_with_default_fields(),
            NodeKind::ThrowStatement => self.decode_throw_fields(),
            NodeKind::TryCatchStatement => self.decode_try_catch_fields(),
            NodeKind::TryFinallyStatement => self.decode_try_finally_fields(),
            NodeKind::WithStatement => self.decode_with_fields(),
            found => Err(unexpected("Statement", found)),
        }
    }

    fn decode_boxed_statement(&mut self) -> Result<Box<Statement<'a>>, DecodeError> {
        self.decode_statement().map(Box::new)
    }

    fn decode_block_statement(&mut self) -> Result<Statement<'a>, DecodeError> {
        Ok(Statement::Block(self.decode_block()?))
    }

    fn decode_class_declaration_statement(&mut self) -> Result<Statement<'a>, DecodeError> {
        Ok(Statement::ClassDeclaration(self.decode_class_declaration()?))
    }

    fn decode_function_declaration_statement(&mut self) -> Result<Statement<'a>, DecodeError> {
        Ok(Statement::FunctionDeclaration(self.decode_function_declaration()?))
    }

    fn decode_variable_declaration_statement(&mut self) -> Result<Statement<'a>, DecodeError> {
        Ok(Statement::VariableDeclaration(self.decode_variable_declaration()?))
    }

    fn decode_if_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let test = self.decode_expression()?;
        let consequent = self.decode_boxed_statement()?;
        let alternate = self.read_optional(|dec| dec.decode_boxed_statement())?;
        Ok(Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn decode_for_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let init = self.read_optional(|dec| {
            if dec.peek_kind()? == NodeKind::VariableDeclaration {
                dec.decode_variable_declaration().map(ForInit::VariableDeclaration)
            } else {
                dec.decode_expression().map(ForInit::Expression)
            }
        })?;
        let test = self.read_optional(|dec| dec.decode_expression())?;
        let update = self.read_optional(|dec| dec.decode_expression())?;
        let body = self.decode_boxed_statement()?;
        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn decode_labelled_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let label = self.read_atom("label")?;
        let body = self.decode_boxed_statement()?;
        Ok(Statement::Labelled(LabelledStatement { label, body }))
    }

    fn decode_return_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let expression = self.read_optional(|dec| dec.decode_expression())?;
        Ok(Statement::Return { expression })
    }

    fn decode_switch_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let discriminant = self.decode_expression()?;
        let cases = self.read_list("cases", |dec| dec.decode_switch_case())?;
        Ok(Statement::Switch(SwitchStatement { discriminant, cases }))
    }

    fn decode_switch_with_default_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let discriminant = self.decode_expression()?;
        let pre_default_cases =
            self.read_list("pre_default_cases", |dec| dec.decode_switch_case())?;
        self.expect_kind(NodeKind::SwitchDefault)?;
        let consequent = self.read_list("consequent", |dec| dec.decode_statement())?;
        let post_default_cases =
            self.read_list("post_default_cases", |dec| dec.decode_switch_case())?;
        Ok(Statement::SwitchWithDefault(SwitchStatementWithDefault {
            discriminant,
            pre_default_cases,
            default_case: SwitchDefault { consequent },
            post_default_cases,
        }))
    }

    fn decode_throw_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let expression = self.decode_expression()?;
        Ok(Statement::Throw { expression })
    }

    fn decode_try_catch_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let body = self.decode_block()?;
        let catch_clause = self.decode_catch_clause()?;
        Ok(Statement::TryCatch(TryCatchStatement { body, catch_clause }))
    }

    fn decode_try_finally_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let body = self.decode_block()?;
        let catch_clause = self.read_optional(|dec| dec.decode_catch_clause())?;
        let finalizer = self.decode_block()?;
        Ok(Statement::TryFinally(TryFinallyStatement {
            body,
            catch_clause,
            finalizer,
        }))
    }

    fn decode_with_fields(&mut self) -> Result<Statement<'a>, DecodeError> {
        let object = self.decode_expression()?;
        let body = self.decode_boxed_statement()?;
        Ok(Statement::With(WithStatement { object, body }))
    }

    pub(crate) fn decode_block(&mut self) -> Result<Block<'a>, DecodeError> {
        self.expect_kind(NodeKind::Block)?;
        let scope = self.decode_declared_scope(NodeKind::AssertedBlockScope)?;
        let statements = self.read_list("statements", |dec| dec.decode_statement())?;
        Ok(Block { scope, statements })
    }

    fn decode_while_fields(&mut self) -> Result<WhileStatement<'a>, DecodeError> {
        let test = self.decode_expression()?;
        let body = self.decode_boxed_statement()?;
        Ok(WhileStatement { test, body })
    }

    fn decode_for_in_of_fields(&mut self) -> Result<ForInOfStatement<'a>, DecodeError> {
        let left = if self.peek_kind()? == NodeKind::ForInOfBinding {
            self.read_kind()?;
            let kind = self.read_variant("declaration_kind")?;
            let binding = self.decode_binding()?;
            ForInOfLeft::Binding(ForInOfBinding { kind, binding })
        } else {
            ForInOfLeft::Target(self.decode_assignment_target()?)
        };
        let right = self.decode_expression()?;
        let body = self.decode_boxed_statement()?;
        Ok(ForInOfStatement { left, right, body })
    }

    fn decode_switch_case(&mut self) -> Result<SwitchCase<'a>, DecodeError> {
        self.expect_kind(NodeKind::SwitchCase)?;
        let test = self.decode_expression()?;
        let consequent = self.read_list("consequent", |dec| dec.decode_statement())?;
        Ok(SwitchCase { test, consequent })
    }

    fn decode_catch_clause(&mut self) -> Result<CatchClause<'a>, DecodeError> {
        self.expect_kind(NodeKind::CatchClause)?;
        let binding_scope = self.decode_bound_names_scope()?;
        let binding = self.decode_binding()?;
        let body = self.decode_block()?;
        Ok(CatchClause {
            binding_scope,
            binding,
            body,
        })
    }

    pub(crate) fn decode_variable_declaration(
        &mut self,
    ) -> Result<VariableDeclaration<'a>, DecodeError> {
        self.expect_kind(NodeKind::VariableDeclaration)?;
        let kind = self.read_variant("declaration_kind")?;
        let declarators = self.read_list("declarators", |dec| {
            dec.expect_kind(NodeKind::VariableDeclarator)?;
            let binding = dec.decode_binding()?;
            let init = dec.read_optional(|dec| dec.decode_expression())?;
            Ok(VariableDeclarator { binding, init })
        })?;
        Ok(VariableDeclaration { kind, declarators })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tree::testing::{decode_fragment, encode_fragment};
    use crate::codec::tables::WireTables;
    use crate::limits::DEFAULT_MAX_NESTING_DEPTH;
    use crate::model::{AssertedBoundNamesScope, AssignmentTarget, Binding, Expression};
    use crate::registry::VariableDeclarationKind;
    use std::borrow::Cow;

    fn roundtrip(stmt: &Statement<'_>) {
        let (tables, body) = encode_fragment(|enc| enc.encode_statement(stmt));
        let decoded = decode_fragment(tables, &body, |dec| dec.decode_statement());
        assert_eq!(&decoded, stmt);
    }

    fn declare(
        kind: VariableDeclarationKind,
        name: &'static str,
        init: Option<Expression<'static>>,
    ) -> VariableDeclaration<'static> {
        VariableDeclaration {
            kind,
            declarators: vec![VariableDeclarator {
                binding: Binding::identifier(name),
                init,
            }],
        }
    }

    #[test]
    fn test_control_flow_roundtrip() {
        let loop_body = Statement::Block(Block {
            scope: Default::default(),
            statements: vec![
                Statement::Continue { label: None },
                Statement::Break {
                    label: Some(Cow::Borrowed("outer")),
                },
            ],
        });
        let stmt = Statement::Labelled(LabelledStatement {
            label: Cow::Borrowed("outer"),
            body: Box::new(Statement::For(ForStatement {
                init: Some(ForInit::VariableDeclaration(declare(
                    VariableDeclarationKind::Let,
                    "i",
                    Some(Expression::LiteralNumeric(0.0)),
                ))),
                test: Some(Expression::identifier("i")),
                update: None,
                body: Box::new(loop_body),
            })),
        });
        roundtrip(&stmt);
    }

    #[test]
    fn test_if_without_alternate_roundtrip() {
        let stmt = Statement::If(IfStatement {
            test: Expression::LiteralBoolean(true),
            consequent: Box::new(Statement::Empty),
            alternate: None,
        });
        roundtrip(&stmt);

        let stmt = Statement::If(IfStatement {
            test: Expression::LiteralBoolean(false),
            consequent: Box::new(Statement::Debugger),
            alternate: Some(Box::new(Statement::Return { expression: None })),
        });
        roundtrip(&stmt);
    }

    #[test]
    fn test_for_in_of_roundtrip() {
        roundtrip(&Statement::ForIn(ForInOfStatement {
            left: ForInOfLeft::Binding(ForInOfBinding {
                kind: VariableDeclarationKind::Const,
                binding: Binding::identifier("key"),
            }),
            right: Expression::identifier("object"),
            body: Box::new(Statement::Empty),
        }));
        roundtrip(&Statement::ForOf(ForInOfStatement {
            left: ForInOfLeft::Target(AssignmentTarget::identifier("item")),
            right: Expression::identifier("items"),
            body: Box::new(Statement::Empty),
        }));
    }

    #[test]
    fn test_switch_and_try_roundtrip() {
        roundtrip(&Statement::SwitchWithDefault(SwitchStatementWithDefault {
            discriminant: Expression::identifier("x"),
            pre_default_cases: vec![SwitchCase {
                test: Expression::LiteralNumeric(1.0),
                consequent: vec![Statement::Break { label: None }],
            }],
            default_case: SwitchDefault {
                consequent: vec![Statement::Throw {
                    expression: Expression::LiteralString(Cow::Borrowed("bad")),
                }],
            },
            post_default_cases: Vec::new(),
        }));
        roundtrip(&Statement::TryFinally(TryFinallyStatement {
            body: Block::default(),
            catch_clause: Some(CatchClause {
                binding_scope: AssertedBoundNamesScope::default(),
                binding: Binding::identifier("e"),
                body: Block::default(),
            }),
            finalizer: Block::default(),
        }));
        roundtrip(&Statement::With(WithStatement {
            object: Expression::This,
            body: Box::new(Statement::DoWhile(WhileStatement {
                test: Expression::LiteralNull,
                body: Box::new(Statement::Empty),
            })),
        }));
    }

    #[test]
    fn test_expression_in_statement_position_rejected() {
        // A bare expression record where a statement is required.
        let tables = WireTables {
            kinds: vec![NodeKind::ThisExpression],
            atoms: Vec::new(),
        };
        let body = [0x00];
        let mut decoder = TreeDecoder::new(&body, tables, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(
            decoder.decode_statement(),
            Err(DecodeError::UnexpectedKindInPosition {
                position: "Statement",
                found: NodeKind::ThisExpression,
            })
        );
    }

    #[test]
    fn test_module_record_is_unsupported() {
        let tables = WireTables {
            kinds: vec![NodeKind::Export],
            atoms: Vec::new(),
        };
        let body = [0x00];
        let mut decoder = TreeDecoder::new(&body, tables, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(
            decoder.decode_statement(),
            Err(DecodeError::UnsupportedProduction { kind: NodeKind::Export })
        );
    }
}
