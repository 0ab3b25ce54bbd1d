//! Binding patterns and assignment targets.

use crate::codec::tree::{TreeDecoder, TreeEncoder, unexpected};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    ArrayAssignmentTarget, ArrayBinding, AssignmentTarget, AssignmentTargetIdentifier,
    AssignmentTargetMaybeDefault, AssignmentTargetProperty, AssignmentTargetPropertyIdentifier,
    AssignmentTargetPropertyProperty, AssignmentTargetWithInitializer, Binding, BindingIdentifier,
    BindingProperty, BindingPropertyIdentifier, BindingPropertyProperty, BindingWithInitializer,
    ComputedMemberAssignmentTarget, ObjectAssignmentTarget, ObjectBinding, Parameter,
    SimpleAssignmentTarget, StaticMemberAssignmentTarget,
};
use crate::registry::NodeKind;

// =============================================================================
// ENCODING
// =============================================================================

impl<'t> TreeEncoder<'t> {
    pub(crate) fn encode_binding(&mut self, binding: &'t Binding<'_>) -> Result<(), EncodeError> {
        self.nested(|enc| match binding {
            Binding::Identifier(identifier) => enc.encode_binding_identifier(identifier),
            Binding::Object(object) => {
                enc.write_kind(NodeKind::ObjectBinding)?;
                enc.write_list(&object.properties, |enc, property| {
                    enc.encode_binding_property(property)
                })
            }
            Binding::Array(array) => {
                enc.write_kind(NodeKind::ArrayBinding)?;
                enc.write_list(&array.elements, |enc, element| {
                    enc.write_optional(element.as_ref(), |enc, p| enc.encode_parameter(p))
                })?;
                enc.write_optional(array.rest.as_deref(), |enc, rest| enc.encode_binding(rest))
            }
        })
    }

    pub(crate) fn encode_binding_identifier(
        &mut self,
        identifier: &'t BindingIdentifier<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::BindingIdentifier)?;
        self.write_atom(&identifier.name)
    }

    fn encode_binding_property(
        &mut self,
        property: &'t BindingProperty<'_>,
    ) -> Result<(), EncodeError> {
        match property {
            BindingProperty::Identifier(property) => {
                self.write_kind(NodeKind::BindingPropertyIdentifier)?;
                self.encode_binding_identifier(&property.binding)?;
                self.write_optional(property.init.as_ref(), |enc, init| enc.encode_expression(init))
            }
            BindingProperty::Property(property) => {
                self.write_kind(NodeKind::BindingPropertyProperty)?;
                self.encode_property_name(&property.name)?;
                self.encode_parameter(&property.binding)
            }
        }
    }

    pub(crate) fn encode_parameter(
        &mut self,
        parameter: &'t Parameter<'_>,
    ) -> Result<(), EncodeError> {
        match parameter {
            Parameter::Binding(binding) => self.encode_binding(binding),
            Parameter::WithInitializer(param) => {
                self.write_kind(NodeKind::BindingWithInitializer)?;
                self.encode_binding(&param.binding)?;
                self.encode_expression(&param.init)
            }
        }
    }

    pub(crate) fn encode_simple_assignment_target(
        &mut self,
        target: &'t SimpleAssignmentTarget<'_>,
    ) -> Result<(), EncodeError> {
        match target {
            SimpleAssignmentTarget::Identifier(identifier) => {
                self.encode_assignment_target_identifier(identifier)
            }
            SimpleAssignmentTarget::ComputedMember(member) => {
                self.write_kind(NodeKind::ComputedMemberAssignmentTarget)?;
                self.encode_expression_or_super(&member.object)?;
                self.encode_expression(&member.expression)
            }
            SimpleAssignmentTarget::StaticMember(member) => {
                self.write_kind(NodeKind::StaticMemberAssignmentTarget)?;
                self.encode_expression_or_super(&member.object)?;
                self.write_atom(&member.property)
            }
        }
    }

    fn encode_assignment_target_identifier(
        &mut self,
        identifier: &'t AssignmentTargetIdentifier<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::AssignmentTargetIdentifier)?;
        self.write_atom(&identifier.name)
    }

    pub(crate) fn encode_assignment_target(
        &mut self,
        target: &'t AssignmentTarget<'_>,
    ) -> Result<(), EncodeError> {
        self.nested(|enc| match target {
            AssignmentTarget::Simple(simple) => enc.encode_simple_assignment_target(simple),
            AssignmentTarget::Object(object) => {
                enc.write_kind(NodeKind::ObjectAssignmentTarget)?;
                enc.write_list(&object.properties, |enc, property| {
                    enc.encode_assignment_target_property(property)
                })
            }
            AssignmentTarget::Array(array) => {
                enc.write_kind(NodeKind::ArrayAssignmentTarget)?;
                enc.write_list(&array.elements, |enc, element| {
                    enc.write_optional(element.as_ref(), |enc, e| {
                        enc.encode_assignment_target_maybe_default(e)
                    })
                })?;
                enc.write_optional(array.rest.as_deref(), |enc, rest| {
                    enc.encode_assignment_target(rest)
                })
            }
        })
    }

    fn encode_assignment_target_property(
        &mut self,
        property: &'t AssignmentTargetProperty<'_>,
    ) -> Result<(), EncodeError> {
        match property {
            AssignmentTargetProperty::Identifier(property) => {
                self.write_kind(NodeKind::AssignmentTargetPropertyIdentifier)?;
                self.encode_assignment_target_identifier(&property.binding)?;
                self.write_optional(property.init.as_ref(), |enc, init| enc.encode_expression(init))
            }
            AssignmentTargetProperty::Property(property) => {
                self.write_kind(NodeKind::AssignmentTargetPropertyProperty)?;
                self.encode_property_name(&property.name)?;
                self.encode_assignment_target_maybe_default(&property.binding)
            }
        }
    }

    fn encode_assignment_target_maybe_default(
        &mut self,
        target: &'t AssignmentTargetMaybeDefault<'_>,
    ) -> Result<(), EncodeError> {
        match target {
            AssignmentTargetMaybeDefault::Target(target) => self.encode_assignment_target(target),
            AssignmentTargetMaybeDefault::WithInitializer(target) => {
                self.write_kind(NodeKind::AssignmentTargetWithInitializer)?;
                self.encode_assignment_target(&target.binding)?;
                self.encode_expression(&target.init)
            }
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl<'a> TreeDecoder<'a> {
    pub(crate) fn decode_binding(&mut self) -> Result<Binding<'a>, DecodeError> {
        self.nested(|dec| match dec.read_kind()? {
            NodeKind::BindingIdentifier => Ok(Binding::Identifier(BindingIdentifier {
                name: dec.read_atom("binding_name")?,
            })),
            NodeKind::ObjectBinding => {
                let properties = dec.read_list("properties", |dec| dec.decode_binding_property())?;
                Ok(Binding::Object(ObjectBinding { properties }))
            }
            NodeKind::ArrayBinding => {
                let elements = dec.read_list("elements", |dec| {
                    dec.read_optional(|dec| dec.decode_parameter())
                })?;
                let rest = dec.read_optional(|dec| dec.decode_binding())?.map(Box::new);
                Ok(Binding::Array(ArrayBinding { elements, rest }))
            }
            found => Err(unexpected("Binding", found)),
        })
    }

    pub(crate) fn decode_binding_identifier(
        &mut self,
    ) -> Result<BindingIdentifier<'a>, DecodeError> {
        self.expect_kind(NodeKind::BindingIdentifier)?;
        Ok(BindingIdentifier {
            name: self.read_atom("binding_name")?,
        })
    }

    fn decode_binding_property(&mut self) -> Result<BindingProperty<'a>, DecodeError> {
        match self.read_kind()? {
            NodeKind::BindingPropertyIdentifier => {
                let binding = self.decode_binding_identifier()?;
                let init = self.read_optional(|dec| dec.decode_expression())?;
                Ok(BindingProperty::Identifier(BindingPropertyIdentifier { binding, init }))
            }
            NodeKind::BindingPropertyProperty => {
                let name = self.decode_property_name()?;
                let binding = self.decode_parameter()?;
                Ok(BindingProperty::Property(BindingPropertyProperty { name, binding }))
            }
            found => Err(unexpected("BindingProperty", found)),
        }
    }

    pub(crate) fn decode_parameter(&mut self) -> Result<Parameter<'a>, DecodeError> {
        if self.peek_kind()? == NodeKind::BindingWithInitializer {
            self.read_kind()?;
            let binding = self.decode_binding()?;
            let init = self.decode_expression()?;
            Ok(Parameter::WithInitializer(BindingWithInitializer { binding, init }))
        } else {
            self.decode_binding().map(Parameter::Binding)
        }
    }

    pub(crate) fn decode_simple_assignment_target(
        &mut self,
    ) -> Result<SimpleAssignmentTarget<'a>, DecodeError> {
        let kind = self.read_kind()?;
        self.decode_simple_assignment_target_fields(kind, "SimpleAssignmentTarget")
    }

    /// Reads the fields of a simple target whose kind was already consumed.
    fn decode_simple_assignment_target_fields(
        &mut self,
        kind: NodeKind,
        position: &'static str,
    ) -> Result<SimpleAssignmentTarget<'a>, DecodeError> {
        match kind {
            NodeKind::AssignmentTargetIdentifier => Ok(SimpleAssignmentTarget::Identifier(
                AssignmentTargetIdentifier {
                    name: self.read_atom("target_name")?,
                },
            )),
            NodeKind::ComputedMemberAssignmentTarget => {
                let object = self.decode_expression_or_super()?;
                let expression = Box::new(self.decode_expression()?);
                Ok(SimpleAssignmentTarget::ComputedMember(ComputedMemberAssignmentTarget {
                    object,
                    expression,
                }))
            }
            NodeKind::StaticMemberAssignmentTarget => {
                let object = self.decode_expression_or_super()?;
                let property = self.read_atom("property")?;
                Ok(SimpleAssignmentTarget::StaticMember(StaticMemberAssignmentTarget {
                    object,
                    property,
                }))
            }
            found => Err(unexpected(position, found)),
        }
    }

    fn decode_assignment_target_identifier(
        &mut self,
    ) -> Result<AssignmentTargetIdentifier<'a>, DecodeError> {
        self.expect_kind(NodeKind::AssignmentTargetIdentifier)?;
        Ok(AssignmentTargetIdentifier {
            name: self.read_atom("target_name")?,
        })
    }

    pub(crate) fn decode_assignment_target(&mut self) -> Result<AssignmentTarget<'a>, DecodeError> {
        self.nested(|dec| match dec.read_kind()? {
            NodeKind::ObjectAssignmentTarget => {
                let properties =
                    dec.read_list("properties", |dec| dec.decode_assignment_target_property())?;
                Ok(AssignmentTarget::Object(ObjectAssignmentTarget { properties }))
            }
            NodeKind::ArrayAssignmentTarget => {
                let elements = dec.read_list("elements", |dec| {
                    dec.read_optional(|dec| dec.decode_assignment_target_maybe_default())
                })?;
                let rest = dec.read_optional(|dec| dec.decode_assignment_target())?.map(Box::new);
                Ok(AssignmentTarget::Array(ArrayAssignmentTarget { elements, rest }))
            }
            kind => dec
                .decode_simple_assignment_target_fields(kind, "AssignmentTarget")
                .map(AssignmentTarget::Simple),
        })
    }

    fn decode_assignment_target_property(
        &mut self,
    ) -> Result<AssignmentTargetProperty<'a>, DecodeError> {
        match self.read_kind()? {
            NodeKind::AssignmentTargetPropertyIdentifier => {
                let binding = self.decode_assignment_target_identifier()?;
                let init = self.read_optional(|dec| dec.decode_expression())?;
                Ok(AssignmentTargetProperty::Identifier(AssignmentTargetPropertyIdentifier {
                    binding,
                    init,
                }))
            }
            NodeKind::AssignmentTargetPropertyProperty => {
                let name = self.decode_property_name()?;
                let binding = self.decode_assignment_target_maybe_default()?;
                Ok(AssignmentTargetProperty::Property(AssignmentTargetPropertyProperty {
                    name,
                    binding,
                }))
            }
            found => Err(unexpected("AssignmentTargetProperty", found)),
        }
    }

    fn decode_assignment_target_maybe_default(
        &mut self,
    ) -> Result<AssignmentTargetMaybeDefault<'a>, DecodeError> {
        if self.peek_kind()? == NodeKind::AssignmentTargetWithInitializer {
            self.read_kind()?;
            let binding = self.decode_assignment_target()?;
            let init = self.decode_expression()?;
            Ok(AssignmentTargetMaybeDefault::WithInitializer(AssignmentTargetWithInitializer {
                binding,
                init,
            }))
        } else {
            self.decode_assignment_target().map(AssignmentTargetMaybeDefault::Target)
        }
    }
}
