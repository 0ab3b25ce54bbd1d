//! Functions, arrows, methods, classes and object literal members.
//!
//! Each function-like record comes in an eager and a lazy kind with identical
//! fields. The encoder picks the kind from [`BodyMode`]; the decoder maps it
//! back.

use crate::codec::tree::{TreeDecoder, TreeEncoder, mode_kind, unexpected};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    ArrowBody, ArrowExpression, ArrowExpressionContentsWithExpression,
    ArrowExpressionContentsWithFunctionBody, ArrowFunctionBody, BodyMode, ClassDeclaration,
    ClassElement, ClassExpression, DataProperty, FormalParameters, FunctionBody,
    FunctionDeclaration, FunctionExpression, FunctionExpressionContents, FunctionOrMethodContents,
    Getter, GetterContents, Method, MethodDefinition, ObjectProperty, PropertyName, Setter,
    SetterContents, ShorthandProperty,
};
use crate::registry::NodeKind;

// =============================================================================
// ENCODING
// =============================================================================

impl<'t> TreeEncoder<'t> {
    pub(crate) fn encode_function_declaration(
        &mut self,
        function: &'t FunctionDeclaration<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(mode_kind(
            function.mode,
            NodeKind::EagerFunctionDeclaration,
            NodeKind::LazyFunctionDeclaration,
        ))?;
        self.write_bool(function.is_async);
        self.write_bool(function.is_generator);
        self.encode_binding_identifier(&function.name)?;
        self.write_u32(function.length)?;
        self.encode_directives(&function.directives)?;
        self.encode_function_or_method_contents(&function.contents)
    }

    pub(crate) fn encode_function_expression(
        &mut self,
        function: &'t FunctionExpression<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(mode_kind(
            function.mode,
            NodeKind::EagerFunctionExpression,
            NodeKind::LazyFunctionExpression,
        ))?;
        self.write_bool(function.is_async);
        self.write_bool(function.is_generator);
        self.write_optional(function.name.as_ref(), |enc, name| {
            enc.encode_binding_identifier(name)
        })?;
        self.write_u32(function.length)?;
        self.encode_directives(&function.directives)?;
        self.encode_function_expression_contents(&function.contents)
    }

    fn encode_function_or_method_contents(
        &mut self,
        contents: &'t FunctionOrMethodContents<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::FunctionOrMethodContents)?;
        self.write_bool(contents.is_this_captured);
        self.encode_parameter_scope(&contents.parameter_scope)?;
        self.encode_formal_parameters(&contents.params)?;
        self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
        self.encode_function_body(&contents.body)
    }

    fn encode_function_expression_contents(
        &mut self,
        contents: &'t FunctionExpressionContents<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::FunctionExpressionContents)?;
        self.write_bool(contents.is_function_name_captured);
        self.write_bool(contents.is_this_captured);
        self.encode_parameter_scope(&contents.parameter_scope)?;
        self.encode_formal_parameters(&contents.params)?;
        self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
        self.encode_function_body(&contents.body)
    }

    fn encode_formal_parameters(
        &mut self,
        params: &'t FormalParameters<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::FormalParameters)?;
        self.write_list(&params.items, |enc, param| enc.encode_parameter(param))?;
        self.write_optional(params.rest.as_ref(), |enc, rest| enc.encode_binding(rest))
    }

    fn encode_function_body(&mut self, body: &'t FunctionBody<'_>) -> Result<(), EncodeError> {
        self.write_list(body, |enc, stmt| enc.encode_statement(stmt))
    }

    pub(crate) fn encode_arrow(
        &mut self,
        arrow: &'t ArrowExpression<'_>,
    ) -> Result<(), EncodeError> {
        match &arrow.body {
            ArrowBody::FunctionBody(body) => {
                self.write_kind(mode_kind(
                    arrow.mode,
                    NodeKind::EagerArrowExpressionWithFunctionBody,
                    NodeKind::LazyArrowExpressionWithFunctionBody,
                ))?;
                self.write_bool(arrow.is_async);
                self.write_u32(arrow.length)?;
                self.encode_directives(&body.directives)?;

                let contents = &body.contents;
                self.write_kind(NodeKind::ArrowExpressionContentsWithFunctionBody)?;
                self.encode_parameter_scope(&contents.parameter_scope)?;
                self.encode_formal_parameters(&contents.params)?;
                self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
                self.encode_function_body(&contents.body)
            }
            ArrowBody::Expression(contents) => {
                self.write_kind(mode_kind(
                    arrow.mode,
                    NodeKind::EagerArrowExpressionWithExpression,
                    NodeKind::LazyArrowExpressionWithExpression,
                ))?;
                self.write_bool(arrow.is_async);
                self.write_u32(arrow.length)?;

                self.write_kind(NodeKind::ArrowExpressionContentsWithExpression)?;
                self.encode_parameter_scope(&contents.parameter_scope)?;
                self.encode_formal_parameters(&contents.params)?;
                self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
                self.encode_expression(&contents.body)
            }
        }
    }

    fn encode_method_definition(
        &mut self,
        method: &'t MethodDefinition<'_>,
    ) -> Result<(), EncodeError> {
        match method {
            MethodDefinition::Method(method) => {
                self.write_kind(mode_kind(
                    method.mode,
                    NodeKind::EagerMethod,
                    NodeKind::LazyMethod,
                ))?;
                self.write_bool(method.is_async);
                self.write_bool(method.is_generator);
                self.encode_property_name(&method.name)?;
                self.write_u32(method.length)?;
                self.encode_directives(&method.directives)?;
                self.encode_function_or_method_contents(&method.contents)
            }
            MethodDefinition::Getter(getter) => {
                self.write_kind(mode_kind(
                    getter.mode,
                    NodeKind::EagerGetter,
                    NodeKind::LazyGetter,
                ))?;
                self.encode_property_name(&getter.name)?;
                self.encode_directives(&getter.directives)?;

                let contents = &getter.contents;
                self.write_kind(NodeKind::GetterContents)?;
                self.write_bool(contents.is_this_captured);
                self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
                self.encode_function_body(&contents.body)
            }
            MethodDefinition::Setter(setter) => {
                self.write_kind(mode_kind(
                    setter.mode,
                    NodeKind::EagerSetter,
                    NodeKind::LazySetter,
                ))?;
                self.encode_property_name(&setter.name)?;
                self.write_u32(setter.length)?;
                self.encode_directives(&setter.directives)?;

                let contents = &setter.contents;
                self.write_kind(NodeKind::SetterContents)?;
                self.write_bool(contents.is_this_captured);
                self.encode_parameter_scope(&contents.parameter_scope)?;
                self.encode_parameter(&contents.param)?;
                self.encode_declared_scope(NodeKind::AssertedVarScope, &contents.body_scope)?;
                self.encode_function_body(&contents.body)
            }
        }
    }

    pub(crate) fn encode_class_declaration(
        &mut self,
        class: &'t ClassDeclaration<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::ClassDeclaration)?;
        self.encode_binding_identifier(&class.name)?;
        self.write_optional(class.super_class.as_ref(), |enc, sup| enc.encode_expression(sup))?;
        self.write_list(&class.elements, |enc, element| enc.encode_class_element(element))
    }

    pub(crate) fn encode_class_expression(
        &mut self,
        class: &'t ClassExpression<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::ClassExpression)?;
        self.write_optional(class.name.as_ref(), |enc, name| enc.encode_binding_identifier(name))?;
        self.write_optional(class.super_class.as_deref(), |enc, sup| enc.encode_expression(sup))?;
        self.write_list(&class.elements, |enc, element| enc.encode_class_element(element))
    }

    fn encode_class_element(&mut self, element: &'t ClassElement<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::ClassElement)?;
        self.write_bool(element.is_static);
        self.encode_method_definition(&element.method)
    }

    pub(crate) fn encode_property_name(
        &mut self,
        name: &'t PropertyName<'_>,
    ) -> Result<(), EncodeError> {
        match name {
            PropertyName::Computed(expression) => {
                self.write_kind(NodeKind::ComputedPropertyName)?;
                self.encode_expression(expression)
            }
            PropertyName::Literal(value) => {
                self.write_kind(NodeKind::LiteralPropertyName)?;
                self.write_atom(value)
            }
        }
    }

    pub(crate) fn encode_object_property(
        &mut self,
        property: &'t ObjectProperty<'_>,
    ) -> Result<(), EncodeError> {
        match property {
            ObjectProperty::Method(method) => self.encode_method_definition(method),
            ObjectProperty::Data(data) => {
                self.write_kind(NodeKind::DataProperty)?;
                self.encode_property_name(&data.name)?;
                self.encode_expression(&data.expression)
            }
            ObjectProperty::Shorthand(shorthand) => {
                self.write_kind(NodeKind::ShorthandProperty)?;
                self.encode_identifier_expression(&shorthand.name)
            }
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl<'a> TreeDecoder<'a> {
    /// Consumes an eager or lazy kind and returns the matching mode.
    fn read_body_mode(&mut self, eager: NodeKind, lazy: NodeKind) -> Result<BodyMode, DecodeError> {
        match self.read_kind()? {
            kind if kind == eager => Ok(BodyMode::Eager),
            kind if kind == lazy => Ok(BodyMode::Lazy),
            kind if kind.is_unsupported() => Err(DecodeError::UnsupportedProduction { kind }),
            found => Err(DecodeError::UnexpectedKind { expected: eager, found }),
        }
    }

    pub(crate) fn decode_function_declaration(
        &mut self,
    ) -> Result<FunctionDeclaration<'a>, DecodeError> {
        let mode = self.read_body_mode(
            NodeKind::EagerFunctionDeclaration,
            NodeKind::LazyFunctionDeclaration,
        )?;
        let is_async = self.read_bool("is_async")?;
        let is_generator = self.read_bool("is_generator")?;
        let name = self.decode_binding_identifier()?;
        let length = self.read_u32("length")?;
        let directives = self.decode_directives()?;
        let contents = self.decode_function_or_method_contents()?;
        Ok(FunctionDeclaration {
            mode,
            is_async,
            is_generator,
            name,
            length,
            directives,
            contents,
        })
    }

    pub(crate) fn decode_function_expression(
        &mut self,
    ) -> Result<FunctionExpression<'a>, DecodeError> {
        let mode = self.read_body_mode(
            NodeKind::EagerFunctionExpression,
            NodeKind::LazyFunctionExpression,
        )?;
        let is_async = self.read_bool("is_async")?;
        let is_generator = self.read_bool("is_generator")?;
        let name = self.read_optional(|dec| dec.decode_binding_identifier())?;
        let length = self.read_u32("length")?;
        let directives = self.decode_directives()?;
        let contents = self.decode_function_expression_contents()?;
        Ok(FunctionExpression {
            mode,
            is_async,
            is_generator,
            name,
            length,
            directives,
            contents,
        })
    }

    fn decode_function_or_method_contents(
        &mut self,
    ) -> Result<FunctionOrMethodContents<'a>, DecodeError> {
        self.expect_kind(NodeKind::FunctionOrMethodContents)?;
        let is_this_captured = self.read_bool("is_this_captured")?;
        let parameter_scope = self.decode_parameter_scope()?;
        let params = self.decode_formal_parameters()?;
        let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
        let body = self.decode_function_body()?;
        Ok(FunctionOrMethodContents {
            is_this_captured,
            parameter_scope,
            params,
            body_scope,
            body,
        })
    }

    fn decode_function_expression_contents(
        &mut self,
    ) -> Result<FunctionExpressionContents<'a>, DecodeError> {
        self.expect_kind(NodeKind::FunctionExpressionContents)?;
        let is_function_name_captured = self.read_bool("is_function_name_captured")?;
        let is_this_captured = self.read_bool("is_this_captured")?;
        let parameter_scope = self.decode_parameter_scope()?;
        let params = self.decode_formal_parameters()?;
        let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
        let body = self.decode_function_body()?;
        Ok(FunctionExpressionContents {
            is_function_name_captured,
            is_this_captured,
            parameter_scope,
            params,
            body_scope,
            body,
        })
    }

    fn decode_formal_parameters(&mut self) -> Result<FormalParameters<'a>, DecodeError> {
        self.expect_kind(NodeKind::FormalParameters)?;
        let items = self.read_list("params", |dec| dec.decode_parameter())?;
        let rest = self.read_optional(|dec| dec.decode_binding())?;
        Ok(FormalParameters { items, rest })
    }

    fn decode_function_body(&mut self) -> Result<FunctionBody<'a>, DecodeError> {
        self.read_list("body", |dec| dec.decode_statement())
    }

    pub(crate) fn decode_arrow(&mut self) -> Result<ArrowExpression<'a>, DecodeError> {
        let (mode, with_body) = match self.read_kind()? {
            NodeKind::EagerArrowExpressionWithFunctionBody => (BodyMode::Eager, true),
            NodeKind::LazyArrowExpressionWithFunctionBody => (BodyMode::Lazy, true),
            NodeKind::EagerArrowExpressionWithExpression => (BodyMode::Eager, false),
            NodeKind::LazyArrowExpressionWithExpression => (BodyMode::Lazy, false),
            found => return Err(unexpected("ArrowExpression", found)),
        };
        let is_async = self.read_bool("is_async")?;
        let length = self.read_u32("length")?;

        let body = if with_body {
            let directives = self.decode_directives()?;
            self.expect_kind(NodeKind::ArrowExpressionContentsWithFunctionBody)?;
            let parameter_scope = self.decode_parameter_scope()?;
            let params = self.decode_formal_parameters()?;
            let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
            let body = self.decode_function_body()?;
            ArrowBody::FunctionBody(ArrowFunctionBody {
                directives,
                contents: ArrowExpressionContentsWithFunctionBody {
                    parameter_scope,
                    params,
                    body_scope,
                    body,
                },
            })
        } else {
            self.expect_kind(NodeKind::ArrowExpressionContentsWithExpression)?;
            let parameter_scope = self.decode_parameter_scope()?;
            let params = self.decode_formal_parameters()?;
            let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
            let body = Box::new(self.decode_expression()?);
            ArrowBody::Expression(ArrowExpressionContentsWithExpression {
                parameter_scope,
                params,
                body_scope,
                body,
            })
        };

        Ok(ArrowExpression {
            mode,
            is_async,
            length,
            body,
        })
    }

    /// Reads the fields of a method, getter or setter whose kind was already
    /// consumed.
    fn decode_method_fields(
        &mut self,
        kind: NodeKind,
        position: &'static str,
    ) -> Result<MethodDefinition<'a>, DecodeError> {
        let mode = match kind {
            NodeKind::EagerMethod | NodeKind::EagerGetter | NodeKind::EagerSetter => {
                BodyMode::Eager
            }
            NodeKind::LazyMethod | NodeKind::LazyGetter | NodeKind::LazySetter => BodyMode::Lazy,
            found => return Err(unexpected(position, found)),
        };

        match kind {
            NodeKind::EagerMethod | NodeKind::LazyMethod => {
                let is_async = self.read_bool("is_async")?;
                let is_generator = self.read_bool("is_generator")?;
                let name = self.decode_property_name()?;
                let length = self.read_u32("length")?;
                let directives = self.decode_directives()?;
                let contents = self.decode_function_or_method_contents()?;
                Ok(MethodDefinition::Method(Method {
                    mode,
                    is_async,
                    is_generator,
                    name,
                    length,
                    directives,
                    contents,
                }))
            }
            NodeKind::EagerGetter | NodeKind::LazyGetter => {
                let name = self.decode_property_name()?;
                let directives = self.decode_directives()?;
                self.expect_kind(NodeKind::GetterContents)?;
                let is_this_captured = self.read_bool("is_this_captured")?;
                let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
                let body = self.decode_function_body()?;
                Ok(MethodDefinition::Getter(Getter {
                    mode,
                    name,
                    directives,
                    contents: GetterContents {
                        is_this_captured,
                        body_scope,
                        body,
                    },
                }))
            }
            _ => {
                let name = self.decode_property_name()?;
                let length = self.read_u32("length")?;
                let directives = self.decode_directives()?;
                self.expect_kind(NodeKind::SetterContents)?;
                let is_this_captured = self.read_bool("is_this_captured")?;
                let parameter_scope = self.decode_parameter_scope()?;
                let param = self.decode_parameter()?;
                let body_scope = self.decode_declared_scope(NodeKind::AssertedVarScope)?;
                let body = self.decode_function_body()?;
                Ok(MethodDefinition::Setter(Setter {
                    mode,
                    name,
                    length,
                    directives,
                    contents: SetterContents {
                        is_this_captured,
                        parameter_scope,
                        param,
                        body_scope,
                        body,
                    },
                }))
            }
        }
    }

    pub(crate) fn decode_class_declaration(&mut self) -> Result<ClassDeclaration<'a>, DecodeError> {
        self.expect_kind(NodeKind::ClassDeclaration)?;
        let name = self.decode_binding_identifier()?;
        let super_class = self.read_optional(|dec| dec.decode_expression())?;
        let elements = self.read_list("elements", |dec| dec.decode_class_element())?;
        Ok(ClassDeclaration {
            name,
            super_class,
            elements,
        })
    }

    pub(crate) fn decode_class_expression(&mut self) -> Result<ClassExpression<'a>, DecodeError> {
        self.expect_kind(NodeKind::ClassExpression)?;
        let name = self.read_optional(|dec| dec.decode_binding_identifier())?;
        let super_class = self.read_optional(|dec| dec.decode_expression())?.map(Box::new);
        let elements = self.read_list("elements", |dec| dec.decode_class_element())?;
        Ok(ClassExpression {
            name,
            super_class,
            elements,
        })
    }

    fn decode_class_element(&mut self) -> Result<ClassElement<'a>, DecodeError> {
        self.expect_kind(NodeKind::ClassElement)?;
        let is_static = self.read_bool("is_static")?;
        let kind = self.read_kind()?;
        let method = self.decode_method_fields(kind, "MethodDefinition")?;
        Ok(ClassElement { is_static, method })
    }

    pub(crate) fn decode_property_name(&mut self) -> Result<PropertyName<'a>, DecodeError> {
        match self.read_kind()? {
            NodeKind::ComputedPropertyName => {
                Ok(PropertyName::Computed(Box::new(self.decode_expression()?)))
            }
            NodeKind::LiteralPropertyName => {
                Ok(PropertyName::Literal(self.read_atom("property_name")?))
            }
            found => Err(unexpected("PropertyName", found)),
        }
    }

    pub(crate) fn decode_object_property(&mut self) -> Result<ObjectProperty<'a>, DecodeError> {
        match self.read_kind()? {
            NodeKind::DataProperty => {
                let name = self.decode_property_name()?;
                let expression = self.decode_expression()?;
                Ok(ObjectProperty::Data(DataProperty { name, expression }))
            }
            NodeKind::ShorthandProperty => {
                let name = self.decode_identifier_expression()?;
                Ok(ObjectProperty::Shorthand(ShorthandProperty { name }))
            }
            kind => self.decode_method_fields(kind, "ObjectProperty").map(ObjectProperty::Method),
        }
    }
}
