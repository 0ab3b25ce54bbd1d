//! Expression records.

use crate::codec::tree::{TreeDecoder, TreeEncoder, unexpected};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression,
    CompoundAssignmentExpression, ComputedMemberExpression, ConditionalExpression, Expression,
    ExpressionOrSuper, IdentifierExpression, LiteralRegExpExpression, NewExpression,
    ObjectExpression, SpreadOrExpression, StaticMemberExpression, UnaryExpression,
    UpdateExpression,
};
use crate::registry::NodeKind;

// =============================================================================
// ENCODING
// =============================================================================

impl<'t> TreeEncoder<'t> {
    pub(crate) fn encode_expression(
        &mut self,
        expression: &'t Expression<'_>,
    ) -> Result<(), EncodeError> {
        self.nested(|enc| enc.encode_expression_record(expression))
    }

    fn encode_expression_record(
        &mut self,
        expression: &'t Expression<'_>,
    ) -> Result<(), EncodeError> {
        match expression {
            Expression::LiteralBoolean(value) => {
                self.write_kind(NodeKind::LiteralBooleanExpression)?;
                self.write_bool(*value);
                Ok(())
            }
            Expression::LiteralNull => self.write_kind(NodeKind::LiteralNullExpression),
            Expression::LiteralNumeric(value) => {
                self.write_kind(NodeKind::LiteralNumericExpression)?;
                self.write_f64(*value);
                Ok(())
            }
            Expression::LiteralString(value) => {
                self.write_kind(NodeKind::LiteralStringExpression)?;
                self.write_atom(value)
            }
            Expression::LiteralRegExp(regexp) => {
                self.write_kind(NodeKind::LiteralRegExpExpression)?;
                self.write_atom(&regexp.pattern)?;
                self.write_atom(&regexp.flags)
            }
            Expression::Array(array) => {
                self.write_kind(NodeKind::ArrayExpression)?;
                self.write_list(&array.elements, |enc, element| {
                    enc.write_optional(element.as_ref(), |enc, e| {
                        enc.encode_spread_or_expression(e)
                    })
                })
            }
            Expression::Arrow(arrow) => self.encode_arrow(arrow),
            Expression::Assignment(assignment) => {
                self.write_kind(NodeKind::AssignmentExpression)?;
                self.encode_assignment_target(&assignment.binding)?;
                self.encode_expression(&assignment.expression)
            }
            Expression::Binary(binary) => {
                self.write_kind(NodeKind::BinaryExpression)?;
                self.write_variant(binary.operator)?;
                self.encode_expression(&binary.left)?;
                self.encode_expression(&binary.right)
            }
            Expression::Call(call) => {
                self.write_kind(NodeKind::CallExpression)?;
                self.encode_expression_or_super(&call.callee)?;
                self.write_list(&call.arguments, |enc, arg| enc.encode_spread_or_expression(arg))
            }
            Expression::CompoundAssignment(assignment) => {
                self.write_kind(NodeKind::CompoundAssignmentExpression)?;
                self.write_variant(assignment.operator)?;
                self.encode_simple_assignment_target(&assignment.binding)?;
                self.encode_expression(&assignment.expression)
            }
            Expression::ComputedMember(member) => {
                self.write_kind(NodeKind::ComputedMemberExpression)?;
                self.encode_expression_or_super(&member.object)?;
                self.encode_expression(&member.expression)
            }
            Expression::Conditional(conditional) => {
                self.write_kind(NodeKind::ConditionalExpression)?;
                self.encode_expression(&conditional.test)?;
                self.encode_expression(&conditional.consequent)?;
                self.encode_expression(&conditional.alternate)
            }
            Expression::Class(class) => self.encode_class_expression(class),
            Expression::Function(function) => self.encode_function_expression(function),
            Expression::Identifier(identifier) => self.encode_identifier_expression(identifier),
            Expression::New(new) => {
                self.write_kind(NodeKind::NewExpression)?;
                self.encode_expression(&new.callee)?;
                self.write_list(&new.arguments, |enc, arg| enc.encode_spread_or_expression(arg))
            }
            Expression::NewTarget => self.write_kind(NodeKind::NewTargetExpression),
            Expression::Object(object) => {
                self.write_kind(NodeKind::ObjectExpression)?;
                self.write_list(&object.properties, |enc, property| {
                    enc.encode_object_property(property)
                })
            }
            Expression::Unary(unary) => {
                self.write_kind(NodeKind::UnaryExpression)?;
                self.write_variant(unary.operator)?;
                self.encode_expression(&unary.operand)
            }
            Expression::StaticMember(member) => {
                self.write_kind(NodeKind::StaticMemberExpression)?;
                self.encode_expression_or_super(&member.object)?;
                self.write_atom(&member.property)
            }
            Expression::This => self.write_kind(NodeKind::ThisExpression),
            Expression::Update(update) => {
                self.write_kind(NodeKind::UpdateExpression)?;
                self.write_bool(update.is_prefix);
                self.write_variant(update.operator)?;
                self.encode_simple_assignment_target(&update.operand)
            }
            Expression::Yield { expression } => {
                self.write_kind(NodeKind::YieldExpression)?;
                self.write_optional(expression.as_deref(), |enc, e| enc.encode_expression(e))
            }
            Expression::YieldStar { expression } => {
                self.write_kind(NodeKind::YieldStarExpression)?;
                self.encode_expression(expression)
            }
            Expression::Await { expression } => {
                self.write_kind(NodeKind::AwaitExpression)?;
                self.encode_expression(expression)
            }
        }
    }

    pub(crate) fn encode_identifier_expression(
        &mut self,
        identifier: &'t IdentifierExpression<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::IdentifierExpression)?;
        self.write_atom(&identifier.name)
    }

    pub(crate) fn encode_expression_or_super(
        &mut self,
        object: &'t ExpressionOrSuper<'_>,
    ) -> Result<(), EncodeError> {
        match object {
            ExpressionOrSuper::Expression(expression) => self.encode_expression(expression),
            ExpressionOrSuper::Super => self.write_kind(NodeKind::Super),
        }
    }

    fn encode_spread_or_expression(
        &mut self,
        element: &'t SpreadOrExpression<'_>,
    ) -> Result<(), EncodeError> {
        match element {
            SpreadOrExpression::Spread(expression) => {
                self.write_kind(NodeKind::SpreadElement)?;
                self.encode_expression(expression)
            }
            SpreadOrExpression::Expression(expression) => self.encode_expression(expression),
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl<'a> TreeDecoder<'a> {
    pub(crate) fn decode_expression(&mut self) -> Result<Expression<'a>, DecodeError> {
        self.nested(|dec| dec.decode_expression_record())
    }

    // Each arm calls out so that only the taken branch holds stack space.
    fn decode_expression_record(&mut self) -> Result<Expression<'a>, DecodeError> {
        match self.peek_kind()? {
            NodeKind::EagerArrowExpressionWithFunctionBody
            | NodeKind::LazyArrowExpressionWithFunctionBody
            | NodeKind::EagerArrowExpressionWithExpression
            | NodeKind::LazyArrowExpressionWithExpression => return self.decode_arrow_expression(),
            NodeKind::ClassExpression => return self.decode_class_expression_record(),
            NodeKind::EagerFunctionExpression | NodeKind::LazyFunctionExpression => {
                return self.decode_function_expression_record();
            }
            NodeKind::IdentifierExpression => return self.decode_identifier_expression_record(),
            _ => {}
        }

        match self.read_kind()? {
            NodeKind::LiteralBooleanExpression => {
                Ok(Expression::LiteralBoolean(self.read_bool("boolean_literal")?))
            }
            NodeKind::LiteralNullExpression => Ok(Expression::LiteralNull),
            NodeKind::LiteralNumericExpression => {
                Ok(Expression::LiteralNumeric(self.read_f64("numeric_literal")?))
            }
            NodeKind::LiteralStringExpression => {
                Ok(Expression::LiteralString(self.read_atom("string_literal")?))
            }
            NodeKind::LiteralRegExpExpression => self.decode_regexp_fields(),
            NodeKind::ArrayExpression => self.decode_array_fields(),
            NodeKind::AssignmentExpression => self.decode_assignment_fields(),
            NodeKind::BinaryExpression => self.decode_binary_fields(),
            NodeKind::CallExpression => self.decode_call_fields(),
            NodeKind::CompoundAssignmentExpression => self.decode_compound_assignment_fields(),
            NodeKind::ComputedMemberExpression => self.decode_computed_member_fields(),
            NodeKind::ConditionalExpression => self.decode_conditional_fields(),
            NodeKind::NewExpression => self.decode_new_fields(),
            NodeKind::NewTargetExpression => Ok(Expression::NewTarget),
            NodeKind::ObjectExpression => self.decode_object_fields(),
            NodeKind::UnaryExpression => self.decode_unary_fields(),
            NodeKind::StaticMemberExpression => self.decode_static_member_fields(),
            NodeKind::ThisExpression => Ok(Expression::This),
            NodeKind::UpdateExpression => self.decode_update_fields(),
            NodeKind::YieldExpression => self.decode_yield_fields(),
            NodeKind::YieldStarExpression => Ok(Expression::YieldStar {
                expression: self.decode_boxed_expression()?,
            }),
            NodeKind::AwaitExpression => Ok(Expression::Await {
                expression: self.decode_boxed_expression()?,
            }),
            found => Err(unexpected("Expression", found)),
        }
    }

    fn decode_boxed_expression(&mut self) -> Result<Box<Expression<'a>>, DecodeError> {
        self.decode_expression().map(Box::new)
    }

    fn decode_arrow_expression(&mut self) -> Result<Expression<'a>, DecodeError> {
        Ok(Expression::Arrow(self.decode_arrow()?))
    }

    fn decode_class_expression_record(&mut self) -> Result<Expression<'a>, DecodeError> {
        Ok(Expression::Class(self.decode_class_expression()?))
    }

    fn decode_function_expression_record(&mut self) -> Result<Expression<'a>, DecodeError> {
        Ok(Expression::Function(self.decode_function_expression()?))
    }

    fn decode_identifier_expression_record(&mut self) -> Result<Expression<'a>, DecodeError> {
        Ok(Expression::Identifier(self.decode_identifier_expression()?))
    }

    fn decode_regexp_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let pattern = self.read_atom("regexp_pattern")?;
        let flags = self.read_atom("regexp_flags")?;
        Ok(Expression::LiteralRegExp(LiteralRegExpExpression { pattern, flags }))
    }

    fn decode_array_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let elements = self.read_list("elements", |dec| {
            dec.read_optional(|dec| dec.decode_spread_or_expression())
        })?;
        Ok(Expression::Array(ArrayExpression { elements }))
    }

    fn decode_assignment_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let binding = self.decode_assignment_target()?;
        let expression = self.decode_boxed_expression()?;
        Ok(Expression::Assignment(AssignmentExpression { binding, expression }))
    }

    fn decode_binary_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let operator = self.read_variant("binary_operator")?;
        let left = self.decode_boxed_expression()?;
        let right = self.decode_boxed_expression()?;
        Ok(Expression::Binary(BinaryExpression { operator, left, right }))
    }

    fn decode_call_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let callee = self.decode_expression_or_super()?;
        let arguments = self.read_list("arguments", |dec| dec.decode_spread_or_expression())?;
        Ok(Expression::Call(CallExpression { callee, arguments }))
    }

    fn decode_compound_assignment_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let operator = self.read_variant("compound_assignment_operator")?;
        let binding = self.decode_simple_assignment_target()?;
        let expression = self.decode_boxed_expression()?;
        Ok(Expression::CompoundAssignment(CompoundAssignmentExpression {
            operator,
            binding,
            expression,
        }))
    }

    fn decode_computed_member_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let object = self.decode_expression_or_super()?;
        let expression = self.decode_boxed_expression()?;
        Ok(Expression::ComputedMember(ComputedMemberExpression { object, expression }))
    }

    fn decode_conditional_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let test = self.decode_boxed_expression()?;
        let consequent = self.decode_boxed_expression()?;
        let alternate = self.decode_boxed_expression()?;
        Ok(Expression::Conditional(ConditionalExpression {
            test,
            consequent,
            alternate,
        }))
    }

    fn decode_new_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let callee = self.decode_boxed_expression()?;
        let arguments = self.read_list("arguments", |dec| dec.decode_spread_or_expression())?;
        Ok(Expression::New(NewExpression { callee, arguments }))
    }

    fn decode_object_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let properties = self.read_list("properties", |dec| dec.decode_object_property())?;
        Ok(Expression::Object(ObjectExpression { properties }))
    }

    fn decode_unary_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let operator = self.read_variant("unary_operator")?;
        let operand = self.decode_boxed_expression()?;
        Ok(Expression::Unary(UnaryExpression { operator, operand }))
    }

    fn decode_static_member_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let object = self.decode_expression_or_super()?;
        let property = self.read_atom("property")?;
        Ok(Expression::StaticMember(StaticMemberExpression { object, property }))
    }

    fn decode_update_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let is_prefix = self.read_bool("is_prefix")?;
        let operator = self.read_variant("update_operator")?;
        let operand = self.decode_simple_assignment_target()?;
        Ok(Expression::Update(UpdateExpression {
            is_prefix,
            operator,
            operand,
        }))
    }

    fn decode_yield_fields(&mut self) -> Result<Expression<'a>, DecodeError> {
        let expression = self.read_optional(|dec| dec.decode_boxed_expression())?;
        Ok(Expression::Yield { expression })
    }

    pub(crate) fn decode_identifier_expression(
        &mut self,
    ) -> Result<IdentifierExpression<'a>, DecodeError> {
        self.expect_kind(NodeKind::IdentifierExpression)?;
        Ok(IdentifierExpression {
            name: self.read_atom("identifier")?,
        })
    }

    pub(crate) fn decode_expression_or_super(
        &mut self,
    ) -> Result<ExpressionOrSuper<'a>, DecodeError> {
        if self.peek_kind()? == NodeKind::Super {
            self.read_kind()?;
            Ok(ExpressionOrSuper::Super)
        } else {
            self.decode_boxed_expression().map(ExpressionOrSuper::Expression)
        }
    }

    fn decode_spread_or_expression(&mut self) -> Result<SpreadOrExpression<'a>, DecodeError> {
        if self.peek_kind()? == NodeKind::SpreadElement {
            self.read_kind()?;
            self.decode_expression().map(SpreadOrExpression::Spread)
        } else {
            self.decode_expression().map(SpreadOrExpression::Expression)
        }
    }
}
