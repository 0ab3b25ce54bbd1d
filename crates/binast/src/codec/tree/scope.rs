//! Scope assertion records.

use crate::codec::tree::{TreeDecoder, TreeEncoder, unexpected};
use crate::error::{DecodeError, EncodeError};
use crate::model::{
    AssertedBoundName, AssertedBoundNamesScope, AssertedDeclaredName,
    AssertedMaybePositionalParameterName, AssertedParameterScope, DeclaredScope,
};
use crate::registry::NodeKind;

impl<'t> TreeEncoder<'t> {
    /// Writes a block, script-global or var scope under `kind`.
    pub(crate) fn encode_declared_scope(
        &mut self,
        kind: NodeKind,
        scope: &'t DeclaredScope<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(kind)?;
        self.write_list(&scope.declared_names, |enc, declared| {
            enc.write_kind(NodeKind::AssertedDeclaredName)?;
            enc.write_atom(&declared.name)?;
            enc.write_variant(declared.kind)?;
            enc.write_bool(declared.is_captured);
            Ok(())
        })?;
        self.write_bool(scope.has_direct_eval);
        Ok(())
    }

    pub(crate) fn encode_parameter_scope(
        &mut self,
        scope: &'t AssertedParameterScope<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::AssertedParameterScope)?;
        self.write_list(&scope.param_names, |enc, param| match param {
            AssertedMaybePositionalParameterName::Positional {
                index,
                name,
                is_captured,
            } => {
                enc.write_kind(NodeKind::AssertedPositionalParameterName)?;
                enc.write_u32(*index)?;
                enc.write_atom(name)?;
                enc.write_bool(*is_captured);
                Ok(())
            }
            AssertedMaybePositionalParameterName::Rest { name, is_captured } => {
                enc.write_kind(NodeKind::AssertedRestParameterName)?;
                enc.write_atom(name)?;
                enc.write_bool(*is_captured);
                Ok(())
            }
            AssertedMaybePositionalParameterName::Parameter { name, is_captured } => {
                enc.write_kind(NodeKind::AssertedParameterName)?;
                enc.write_atom(name)?;
                enc.write_bool(*is_captured);
                Ok(())
            }
        })?;
        self.write_bool(scope.has_direct_eval);
        self.write_bool(scope.is_simple_parameter_list);
        Ok(())
    }

    pub(crate) fn encode_bound_names_scope(
        &mut self,
        scope: &'t AssertedBoundNamesScope<'_>,
    ) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::AssertedBoundNamesScope)?;
        self.write_list(&scope.bound_names, |enc, bound| {
            enc.write_kind(NodeKind::AssertedBoundName)?;
            enc.write_atom(&bound.name)?;
            enc.write_bool(bound.is_captured);
            Ok(())
        })?;
        self.write_bool(scope.has_direct_eval);
        Ok(())
    }
}

impl<'a> TreeDecoder<'a> {
    pub(crate) fn decode_declared_scope(
        &mut self,
        kind: NodeKind,
    ) -> Result<DeclaredScope<'a>, DecodeError> {
        self.expect_kind(kind)?;
        let declared_names = self.read_list("declared_names", |dec| {
            dec.expect_kind(NodeKind::AssertedDeclaredName)?;
            let name = dec.read_atom("declared_name")?;
            let kind = dec.read_variant("declared_kind")?;
            let is_captured = dec.read_bool("is_captured")?;
            Ok(AssertedDeclaredName {
                name,
                kind,
                is_captured,
            })
        })?;
        let has_direct_eval = self.read_bool("has_direct_eval")?;
        Ok(DeclaredScope {
            declared_names,
            has_direct_eval,
        })
    }

    pub(crate) fn decode_parameter_scope(
        &mut self,
    ) -> Result<AssertedParameterScope<'a>, DecodeError> {
        self.expect_kind(NodeKind::AssertedParameterScope)?;
        let param_names = self.read_list("param_names", |dec| {
            match dec.read_kind()? {
                NodeKind::AssertedPositionalParameterName => {
                    let index = dec.read_u32("param_index")?;
                    let name = dec.read_atom("param_name")?;
                    let is_captured = dec.read_bool("is_captured")?;
                    Ok(AssertedMaybePositionalParameterName::Positional {
                        index,
                        name,
                        is_captured,
                    })
                }
                NodeKind::AssertedRestParameterName => {
                    let name = dec.read_atom("param_name")?;
                    let is_captured = dec.read_bool("is_captured")?;
                    Ok(AssertedMaybePositionalParameterName::Rest { name, is_captured })
                }
                NodeKind::AssertedParameterName => {
                    let name = dec.read_atom("param_name")?;
                    let is_captured = dec.read_bool("is_captured")?;
                    Ok(AssertedMaybePositionalParameterName::Parameter { name, is_captured })
                }
                found => Err(unexpected("AssertedMaybePositionalParameterName", found)),
            }
        })?;
        let has_direct_eval = self.read_bool("has_direct_eval")?;
        let is_simple_parameter_list = self.read_bool("is_simple_parameter_list")?;
        Ok(AssertedParameterScope {
            param_names,
            has_direct_eval,
            is_simple_parameter_list,
        })
    }

    pub(crate) fn decode_bound_names_scope(
        &mut self,
    ) -> Result<AssertedBoundNamesScope<'a>, DecodeError> {
        self.expect_kind(NodeKind::AssertedBoundNamesScope)?;
        let bound_names = self.read_list("bound_names", |dec| {
            dec.expect_kind(NodeKind::AssertedBoundName)?;
            let name = dec.read_atom("bound_name")?;
            let is_captured = dec.read_bool("is_captured")?;
            Ok(AssertedBoundName { name, is_captured })
        })?;
        let has_direct_eval = self.read_bool("has_direct_eval")?;
        Ok(AssertedBoundNamesScope {
            bound_names,
            has_direct_eval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tree::testing::{decode_fragment, encode_fragment};
    use crate::limits::DEFAULT_MAX_NESTING_DEPTH;
    use crate::registry::AssertedDeclaredKind;
    use std::borrow::Cow;

    #[test]
    fn test_declared_scope_roundtrip() {
        let scope = DeclaredScope {
            declared_names: vec![
                AssertedDeclaredName {
                    name: Cow::Borrowed("a"),
                    kind: AssertedDeclaredKind::Var,
                    is_captured: true,
                },
                AssertedDeclaredName {
                    name: Cow::Borrowed("b"),
                    kind: AssertedDeclaredKind::ConstLexical,
                    is_captured: false,
                },
            ],
            has_direct_eval: true,
        };

        let (tables, body) =
            encode_fragment(|enc| enc.encode_declared_scope(NodeKind::AssertedVarScope, &scope));
        let decoded = decode_fragment(tables, &body, |dec| {
            dec.decode_declared_scope(NodeKind::AssertedVarScope)
        });
        assert_eq!(decoded, scope);
    }

    #[test]
    fn test_declared_scope_kind_must_match() {
        let scope = DeclaredScope::default();
        let (tables, body) =
            encode_fragment(|enc| enc.encode_declared_scope(NodeKind::AssertedBlockScope, &scope));

        let mut decoder = TreeDecoder::new(&body, tables, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(
            decoder.decode_declared_scope(NodeKind::AssertedVarScope),
            Err(DecodeError::UnexpectedKind {
                expected: NodeKind::AssertedVarScope,
                found: NodeKind::AssertedBlockScope,
            })
        );
    }

    #[test]
    fn test_parameter_scope_roundtrip() {
        let scope = AssertedParameterScope {
            param_names: vec![
                AssertedMaybePositionalParameterName::Positional {
                    index: 0,
                    name: Cow::Borrowed("a"),
                    is_captured: false,
                },
                AssertedMaybePositionalParameterName::Parameter {
                    name: Cow::Borrowed("b"),
                    is_captured: true,
                },
                AssertedMaybePositionalParameterName::Rest {
                    name: Cow::Borrowed("rest"),
                    is_captured: false,
                },
            ],
            has_direct_eval: false,
            is_simple_parameter_list: false,
        };

        let (tables, body) = encode_fragment(|enc| enc.encode_parameter_scope(&scope));
        let decoded = decode_fragment(tables, &body, |dec| dec.decode_parameter_scope());
        assert_eq!(decoded, scope);
    }

    #[test]
    fn test_bound_names_scope_roundtrip() {
        let scope = AssertedBoundNamesScope {
            bound_names: vec![AssertedBoundName {
                name: Cow::Borrowed("e"),
                is_captured: true,
            }],
            has_direct_eval: false,
        };

        let (tables, body) = encode_fragment(|enc| enc.encode_bound_names_scope(&scope));
        let decoded = decode_fragment(tables, &body, |dec| dec.decode_bound_names_scope());
        assert_eq!(decoded, scope);
    }
}
