//! End-to-end container tests: round-trips, byte stability and rejection of
//! corrupted input.

use std::borrow::Cow;

use binast::codec::Writer;
use binast::limits::{DEFAULT_MAX_NESTING_DEPTH, GRAMMAR_SECTION, STRINGS_SECTION, TREE_SECTION};
use binast::model::*;
use binast::registry::{
    AssertedDeclaredKind, BinaryOperator, CompoundAssignmentOperator, UnaryOperator,
    UpdateOperator, VariableDeclarationKind,
};
use binast::{
    decode_script, decode_script_with_options, encode_script, encode_script_with_options,
    read_container, DecodeError, DecodeOptions, EncodeError, EncodeOptions, NodeKind,
};
use proptest::prelude::*;

// =============================================================================
// TREE BUILDERS
// =============================================================================

fn ident(name: &'static str) -> Expression<'static> {
    Expression::identifier(name)
}

fn num(value: f64) -> Expression<'static> {
    Expression::LiteralNumeric(value)
}

fn boxed(expression: Expression<'static>) -> Box<Expression<'static>> {
    Box::new(expression)
}

fn object(name: &'static str) -> ExpressionOrSuper<'static> {
    ExpressionOrSuper::Expression(boxed(ident(name)))
}

fn empty() -> Box<Statement<'static>> {
    Box::new(Statement::Empty)
}

fn block(statements: Vec<Statement<'static>>) -> Block<'static> {
    Block {
        scope: DeclaredScope::default(),
        statements,
    }
}

fn var_x_equals_1() -> Script<'static> {
    Script::new(vec![Statement::VariableDeclaration(VariableDeclaration {
        kind: VariableDeclarationKind::Var,
        declarators: vec![VariableDeclarator {
            binding: Binding::identifier("x"),
            init: Some(num(1.0)),
        }],
    })])
}

fn parameter_scope() -> AssertedParameterScope<'static> {
    AssertedParameterScope {
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
                name: Cow::Borrowed("c"),
                is_captured: false,
            },
        ],
        has_direct_eval: false,
        is_simple_parameter_list: false,
    }
}

fn method(mode: BodyMode, name: &'static str) -> Method<'static> {
    Method {
        mode,
        is_async: false,
        is_generator: false,
        name: PropertyName::literal(name),
        length: 0,
        directives: Vec::new(),
        contents: FunctionOrMethodContents::default(),
    }
}

fn getter(mode: BodyMode, name: PropertyName<'static>) -> Getter<'static> {
    Getter {
        mode,
        name,
        directives: Vec::new(),
        contents: GetterContents {
            is_this_captured: true,
            body_scope: DeclaredScope::default(),
            body: vec![Statement::Return {
                expression: Some(Expression::This),
            }],
        },
    }
}

fn setter(mode: BodyMode, name: &'static str) -> Setter<'static> {
    Setter {
        mode,
        name: PropertyName::literal(name),
        length: 1,
        directives: Vec::new(),
        contents: SetterContents {
            is_this_captured: false,
            parameter_scope: AssertedParameterScope::default(),
            param: Parameter::Binding(Binding::identifier("v")),
            body_scope: DeclaredScope::default(),
            body: Vec::new(),
        },
    }
}

fn arrow_with_body(mode: BodyMode) -> Expression<'static> {
    Expression::Arrow(ArrowExpression {
        mode,
        is_async: false,
        length: 0,
        body: ArrowBody::FunctionBody(ArrowFunctionBody {
            directives: Vec::new(),
            contents: ArrowExpressionContentsWithFunctionBody {
                parameter_scope: AssertedParameterScope::default(),
                params: FormalParameters::default(),
                body_scope: DeclaredScope::default(),
                body: vec![Statement::Empty],
            },
        }),
    })
}

fn arrow_with_expression(mode: BodyMode) -> Expression<'static> {
    Expression::Arrow(ArrowExpression {
        mode,
        is_async: true,
        length: 0,
        body: ArrowBody::Expression(ArrowExpressionContentsWithExpression {
            parameter_scope: AssertedParameterScope::default(),
            params: FormalParameters::default(),
            body_scope: DeclaredScope::default(),
            body: boxed(Expression::This),
        }),
    })
}

fn function_expression(mode: BodyMode, name: Option<&'static str>) -> Expression<'static> {
    Expression::Function(FunctionExpression {
        mode,
        is_async: false,
        is_generator: false,
        name: name.map(|name| BindingIdentifier::new(name)),
        length: 0,
        directives: Vec::new(),
        contents: FunctionExpressionContents {
            is_function_name_captured: name.is_some(),
            ..Default::default()
        },
    })
}

fn catch_clause() -> CatchClause<'static> {
    CatchClause {
        binding_scope: AssertedBoundNamesScope {
            bound_names: vec![AssertedBoundName {
                name: Cow::Borrowed("err"),
                is_captured: false,
            }],
            has_direct_eval: false,
        },
        binding: Binding::identifier("err"),
        body: block(Vec::new()),
    }
}

fn declarations() -> Vec<Statement<'static>> {
    vec![
        // var x = 1, { a = null, b: [c = 1, , ...d] } = source;
        Statement::VariableDeclaration(VariableDeclaration {
            kind: VariableDeclarationKind::Var,
            declarators: vec![
                VariableDeclarator {
                    binding: Binding::identifier("x"),
                    init: Some(num(1.0)),
                },
                VariableDeclarator {
                    binding: Binding::Object(ObjectBinding {
                        properties: vec![
                            BindingProperty::Identifier(BindingPropertyIdentifier {
                                binding: BindingIdentifier::new("a"),
                                init: Some(Expression::LiteralNull),
                            }),
                            BindingProperty::Property(BindingPropertyProperty {
                                name: PropertyName::literal("b"),
                                binding: Parameter::Binding(Binding::Array(ArrayBinding {
                                    elements: vec![
                                        Some(Parameter::WithInitializer(BindingWithInitializer {
                                            binding: Binding::identifier("c"),
                                            init: num(1.0),
                                        })),
                                        None,
                                    ],
                                    rest: Some(Box::new(Binding::identifier("d"))),
                                })),
                            }),
                        ],
                    }),
                    init: Some(ident("source")),
                },
            ],
        }),
        Statement::ClassDeclaration(ClassDeclaration {
            name: BindingIdentifier::new("Point"),
            super_class: Some(ident("Base")),
            elements: vec![
                ClassElement {
                    is_static: true,
                    method: MethodDefinition::Method(method(BodyMode::Eager, "create")),
                },
                ClassElement {
                    is_static: false,
                    method: MethodDefinition::Method(method(BodyMode::Lazy, "move")),
                },
                ClassElement {
                    is_static: false,
                    method: MethodDefinition::Getter(getter(
                        BodyMode::Eager,
                        PropertyName::literal("x"),
                    )),
                },
                ClassElement {
                    is_static: false,
                    method: MethodDefinition::Getter(getter(
                        BodyMode::Lazy,
                        PropertyName::Computed(boxed(Expression::LiteralString(Cow::Borrowed(
                            "y",
                        )))),
                    )),
                },
                ClassElement {
                    is_static: false,
                    method: MethodDefinition::Setter(setter(BodyMode::Eager, "x")),
                },
                ClassElement {
                    is_static: false,
                    method: MethodDefinition::Setter(setter(BodyMode::Lazy, "y")),
                },
            ],
        }),
        // function* gen(a, b = 2, ...c) { "use asm"; yield; yield a; return yield* b; }
        Statement::FunctionDeclaration(FunctionDeclaration {
            mode: BodyMode::Eager,
            is_async: false,
            is_generator: true,
            name: BindingIdentifier::new("gen"),
            length: 1,
            directives: vec![Directive::new("use asm")],
            contents: FunctionOrMethodContents {
                is_this_captured: false,
                parameter_scope: parameter_scope(),
                params: FormalParameters {
                    items: vec![
                        Parameter::Binding(Binding::identifier("a")),
                        Parameter::WithInitializer(BindingWithInitializer {
                            binding: Binding::identifier("b"),
                            init: num(2.0),
                        }),
                    ],
                    rest: Some(Binding::identifier("c")),
                },
                body_scope: DeclaredScope::default(),
                body: vec![
                    Statement::Expression(Expression::Yield { expression: None }),
                    Statement::Expression(Expression::Yield {
                        expression: Some(boxed(ident("a"))),
                    }),
                    Statement::Return {
                        expression: Some(Expression::YieldStar {
                            expression: boxed(ident("b")),
                        }),
                    },
                ],
            },
        }),
        // async function later() { await job; }
        Statement::FunctionDeclaration(FunctionDeclaration {
            mode: BodyMode::Lazy,
            is_async: true,
            is_generator: false,
            name: BindingIdentifier::new("later"),
            length: 0,
            directives: Vec::new(),
            contents: FunctionOrMethodContents {
                body: vec![Statement::Expression(Expression::Await {
                    expression: boxed(ident("job")),
                })],
                ..Default::default()
            },
        }),
    ]
}

fn control_flow() -> Vec<Statement<'static>> {
    vec![
        Statement::Block(Block {
            scope: DeclaredScope {
                declared_names: vec![AssertedDeclaredName {
                    name: Cow::Borrowed("y"),
                    kind: AssertedDeclaredKind::NonConstLexical,
                    is_captured: true,
                }],
                has_direct_eval: false,
            },
            statements: vec![
                Statement::Break { label: None },
                Statement::Continue {
                    label: Some(Cow::Borrowed("outer")),
                },
                Statement::Debugger,
                Statement::Empty,
            ],
        }),
        Statement::If(IfStatement {
            test: Expression::LiteralBoolean(true),
            consequent: empty(),
            alternate: Some(Box::new(Statement::Debugger)),
        }),
        Statement::DoWhile(WhileStatement {
            test: ident("more"),
            body: empty(),
        }),
        Statement::While(WhileStatement {
            test: ident("more"),
            body: empty(),
        }),
        Statement::ForIn(ForInOfStatement {
            left: ForInOfLeft::Binding(ForInOfBinding {
                kind: VariableDeclarationKind::Const,
                binding: Binding::identifier("key"),
            }),
            right: ident("table"),
            body: empty(),
        }),
        // for ({ p, q: r = 0 } of rows);
        Statement::ForOf(ForInOfStatement {
            left: ForInOfLeft::Target(AssignmentTarget::Object(ObjectAssignmentTarget {
                properties: vec![
                    AssignmentTargetProperty::Identifier(AssignmentTargetPropertyIdentifier {
                        binding: AssignmentTargetIdentifier::new("p"),
                        init: None,
                    }),
                    AssignmentTargetProperty::Property(AssignmentTargetPropertyProperty {
                        name: PropertyName::literal("q"),
                        binding: AssignmentTargetMaybeDefault::WithInitializer(
                            AssignmentTargetWithInitializer {
                                binding: AssignmentTarget::identifier("r"),
                                init: num(0.0),
                            },
                        ),
                    }),
                ],
            })),
            right: ident("rows"),
            body: empty(),
        }),
        // for (let i = 0; i < 10; i++);
        Statement::For(ForStatement {
            init: Some(ForInit::VariableDeclaration(VariableDeclaration {
                kind: VariableDeclarationKind::Let,
                declarators: vec![VariableDeclarator {
                    binding: Binding::identifier("i"),
                    init: Some(num(0.0)),
                }],
            })),
            test: Some(Expression::Binary(BinaryExpression {
                operator: BinaryOperator::LessThan,
                left: boxed(ident("i")),
                right: boxed(num(10.0)),
            })),
            update: Some(Expression::Update(UpdateExpression {
                is_prefix: false,
                operator: UpdateOperator::Increment,
                operand: SimpleAssignmentTarget::Identifier(AssignmentTargetIdentifier::new("i")),
            })),
            body: empty(),
        }),
        Statement::Labelled(LabelledStatement {
            label: Cow::Borrowed("outer"),
            body: empty(),
        }),
        Statement::Switch(SwitchStatement {
            discriminant: ident("x"),
            cases: vec![SwitchCase {
                test: num(1.0),
                consequent: vec![Statement::Break { label: None }],
            }],
        }),
        Statement::SwitchWithDefault(SwitchStatementWithDefault {
            discriminant: ident("x"),
            pre_default_cases: vec![SwitchCase {
                test: num(1.0),
                consequent: Vec::new(),
            }],
            default_case: SwitchDefault {
                consequent: vec![Statement::Empty],
            },
            post_default_cases: Vec::new(),
        }),
        Statement::Throw {
            expression: Expression::New(NewExpression {
                callee: boxed(ident("Error")),
                arguments: vec![SpreadOrExpression::Expression(Expression::LiteralString(
                    Cow::Borrowed("boom"),
                ))],
            }),
        },
        Statement::TryCatch(TryCatchStatement {
            body: block(Vec::new()),
            catch_clause: catch_clause(),
        }),
        Statement::TryFinally(TryFinallyStatement {
            body: block(Vec::new()),
            catch_clause: Some(catch_clause()),
            finalizer: block(vec![Statement::Empty]),
        }),
        Statement::With(WithStatement {
            object: ident("scope"),
            body: empty(),
        }),
    ]
}

fn expressions() -> Vec<Expression<'static>> {
    vec![
        // [1, , ...rest]
        Expression::Array(ArrayExpression {
            elements: vec![
                Some(SpreadOrExpression::Expression(num(1.0))),
                None,
                Some(SpreadOrExpression::Spread(ident("rest"))),
            ],
        }),
        arrow_with_body(BodyMode::Eager),
        arrow_with_body(BodyMode::Lazy),
        arrow_with_expression(BodyMode::Eager),
        arrow_with_expression(BodyMode::Lazy),
        // [list[0], , ...super.tail] = pair
        Expression::Assignment(AssignmentExpression {
            binding: AssignmentTarget::Array(ArrayAssignmentTarget {
                elements: vec![
                    Some(AssignmentTargetMaybeDefault::Target(AssignmentTarget::Simple(
                        SimpleAssignmentTarget::ComputedMember(ComputedMemberAssignmentTarget {
                            object: object("list"),
                            expression: boxed(num(0.0)),
                        }),
                    ))),
                    None,
                ],
                rest: Some(Box::new(AssignmentTarget::Simple(
                    SimpleAssignmentTarget::StaticMember(StaticMemberAssignmentTarget {
                        object: ExpressionOrSuper::Super,
                        property: Cow::Borrowed("tail"),
                    }),
                ))),
            }),
            expression: boxed(ident("pair")),
        }),
        Expression::Call(CallExpression {
            callee: ExpressionOrSuper::Super,
            arguments: vec![SpreadOrExpression::Expression(ident("a"))],
        }),
        Expression::CompoundAssignment(CompoundAssignmentExpression {
            operator: CompoundAssignmentOperator::AddAssign,
            binding: SimpleAssignmentTarget::Identifier(AssignmentTargetIdentifier::new("total")),
            expression: boxed(num(1.0)),
        }),
        // list[0] ? list.length : !false
        Expression::Conditional(ConditionalExpression {
            test: boxed(Expression::ComputedMember(ComputedMemberExpression {
                object: object("list"),
                expression: boxed(num(0.0)),
            })),
            consequent: boxed(Expression::StaticMember(StaticMemberExpression {
                object: object("list"),
                property: Cow::Borrowed("length"),
            })),
            alternate: boxed(Expression::Unary(UnaryExpression {
                operator: UnaryOperator::Not,
                operand: boxed(Expression::LiteralBoolean(false)),
            })),
        }),
        Expression::Class(ClassExpression {
            name: None,
            super_class: Some(boxed(ident("Base"))),
            elements: Vec::new(),
        }),
        function_expression(BodyMode::Eager, Some("named")),
        function_expression(BodyMode::Lazy, None),
        Expression::NewTarget,
        // ({ k: /a+/g, k, run() {} })
        Expression::Object(ObjectExpression {
            properties: vec![
                ObjectProperty::Data(DataProperty {
                    name: PropertyName::literal("k"),
                    expression: Expression::LiteralRegExp(LiteralRegExpExpression {
                        pattern: Cow::Borrowed("a+"),
                        flags: Cow::Borrowed("g"),
                    }),
                }),
                ObjectProperty::Shorthand(ShorthandProperty {
                    name: IdentifierExpression::new("k"),
                }),
                ObjectProperty::Method(MethodDefinition::Method(method(BodyMode::Eager, "run"))),
            ],
        }),
    ]
}

/// A script that uses every node kind the tree codec supports.
fn every_kind_script() -> Script<'static> {
    let mut statements = declarations();
    statements.extend(control_flow());
    statements.extend(expressions().into_iter().map(Statement::Expression));

    Script {
        scope: DeclaredScope {
            declared_names: vec![AssertedDeclaredName {
                name: Cow::Borrowed("x"),
                kind: AssertedDeclaredKind::Var,
                is_captured: false,
            }],
            has_direct_eval: false,
        },
        directives: vec![Directive::new("use strict")],
        statements,
    }
}

// =============================================================================
// BYTE HELPERS
// =============================================================================

fn find(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
        .unwrap()
}

/// Assembles a container by hand from a grammar table, no strings and a raw
/// tree body.
fn handmade_container(kinds: &[&str], tree: &[u8]) -> Vec<u8> {
    let mut grammar = Writer::new();
    grammar.write_len(kinds.len()).unwrap();
    for kind in kinds {
        grammar.write_len(kind.len()).unwrap();
        grammar.write_bytes(kind.as_bytes());
    }

    let mut writer = Writer::new();
    writer.write_bytes(b"BINJS");
    writer.write_varint(1).unwrap();
    for (tag, content) in [
        (GRAMMAR_SECTION, grammar.as_bytes()),
        (STRINGS_SECTION, &[0x00][..]),
        (TREE_SECTION, tree),
    ] {
        writer.write_bytes(tag.as_bytes());
        writer.write_bytes(b"identity;");
        writer.write_len(content.len()).unwrap();
        writer.write_bytes(content);
    }
    writer.into_bytes()
}

// =============================================================================
// ROUND-TRIPS
// =============================================================================

#[test]
fn test_var_declaration_scenario() {
    let script = var_x_equals_1();

    let bytes = encode_script(&script).unwrap();
    let decoded = decode_script(&bytes).unwrap();
    assert_eq!(decoded, script);
    assert!(decoded.scope.declared_names.is_empty());
    assert!(!decoded.scope.has_direct_eval);

    let reencoded = encode_script(&decoded).unwrap();
    assert_eq!(reencoded, bytes);
}

#[test]
fn test_every_supported_kind_roundtrips() {
    let script = every_kind_script();
    let bytes = encode_script(&script).unwrap();

    let container = read_container(&bytes).unwrap();
    for kind in NodeKind::ALL {
        if !kind.is_unsupported() {
            assert!(container.tables.kinds.contains(kind), "{kind} was never written");
        }
    }

    let decoded = decode_script(&bytes).unwrap();
    assert_eq!(decoded, script);
}

#[test]
fn test_reencoding_is_byte_identical() {
    let bytes = encode_script(&every_kind_script()).unwrap();
    let decoded = decode_script(&bytes).unwrap();
    assert_eq!(encode_script(&decoded).unwrap(), bytes);
}

#[test]
fn test_repeated_identifier_interned_once() {
    let script = Script::new(vec![
        Statement::Expression(ident("x")),
        Statement::Expression(ident("x")),
        Statement::Expression(ident("x")),
    ]);
    let bytes = encode_script(&script).unwrap();

    let container = read_container(&bytes).unwrap();
    assert_eq!(container.tables.atoms, vec![Some("x")]);
    // Three statements of `ExpressionStatement IdentifierExpression 0`.
    let statement = [0x04, 0x06, 0x00];
    assert!(container.tree.ends_with(&statement.repeat(3)));
}

#[test]
fn test_empty_string_sentinel() {
    let script = Script::new(vec![Statement::Expression(Expression::LiteralString(
        Cow::Borrowed(""),
    ))]);
    let bytes = encode_script(&script).unwrap();

    let container = read_container(&bytes).unwrap();
    assert_eq!(container.tables.atoms, vec![Some("")]);
    // One entry, length 2, sentinel payload.
    let strings_start = find(&bytes, b"[STRINGS]identity;") + b"[STRINGS]identity;".len();
    assert_eq!(&bytes[strings_start..strings_start + 5], &[0x08, 0x02, 0x04, 0xFF, 0x00]);

    assert_eq!(decode_script(&bytes).unwrap(), script);
}

#[test]
fn test_label_absent_differs_from_empty() {
    let script = Script::new(vec![
        Statement::Break { label: None },
        Statement::Break {
            label: Some(Cow::Borrowed("")),
        },
    ]);
    let bytes = encode_script(&script).unwrap();
    let container = read_container(&bytes).unwrap();
    assert_eq!(container.tables.atoms, vec![None, Some("")]);
    assert_eq!(decode_script(&bytes).unwrap(), script);
}

// =============================================================================
// REJECTION
// =============================================================================

#[test]
fn test_strings_length_plus_one_rejected() {
    let mut bytes = encode_script(&var_x_equals_1()).unwrap();
    let at = find(&bytes, b"[STRINGS]identity;") + b"[STRINGS]identity;".len();
    let declared = usize::from(bytes[at] >> 1);
    // Single-byte varint: value n is stored as n << 1.
    assert_eq!(bytes[at] & 0x01, 0);
    bytes[at] += 2;

    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::SectionLengthMismatch {
            section: STRINGS_SECTION,
            declared: declared + 1,
            actual: declared,
        }
    );
}

#[test]
fn test_unknown_kind_rejected() {
    let mut bytes = encode_script(&Script::new(vec![Statement::Empty])).unwrap();
    let at = find(&bytes, b"EmptyStatement");
    bytes[at + "EmptyStatement".len() - 1] = b'X';

    assert_eq!(
        read_container(&bytes).unwrap_err(),
        DecodeError::UnknownKind {
            name: "EmptyStatemenX".to_string()
        }
    );
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = encode_script(&var_x_equals_1()).unwrap();
    bytes.push(0x00);
    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::TrailingBytes { count: 1 }
    );
}

#[test]
fn test_bad_magic_rejected() {
    let mut bytes = encode_script(&var_x_equals_1()).unwrap();
    bytes[0] = b'X';
    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::InvalidMagic {
            found: b"XINJS".to_vec()
        }
    );
}

#[test]
fn test_bad_version_rejected() {
    let mut bytes = encode_script(&var_x_equals_1()).unwrap();
    bytes[5] = 0x04;
    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::UnsupportedVersion { version: 2 }
    );
}

#[test]
fn test_bad_compression_rejected() {
    let mut bytes = encode_script(&var_x_equals_1()).unwrap();
    let at = find(&bytes, b"identity;");
    bytes[at + 7] = b'x';
    let err = decode_script(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnsupportedCompression {
            section: GRAMMAR_SECTION,
            found: "identitx;".to_string(),
        }
    );
    assert_eq!(err.class().code(), "E002");
}

#[test]
fn test_module_root_unsupported() {
    let bytes = handmade_container(&["Module"], &[0x00]);
    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::UnsupportedProduction {
            kind: NodeKind::Module
        }
    );
}

#[test]
fn test_handmade_empty_script() {
    // Script, AssertedScriptGlobalScope [] false, [] directives, [] statements.
    let bytes = handmade_container(
        &["Script", "AssertedScriptGlobalScope"],
        &[0x00, 0x02, 0x00, 0x00, 0x00, 0x00],
    );
    assert_eq!(decode_script(&bytes).unwrap(), Script::default());
}

#[test]
fn test_tree_leftover_rejected() {
    let bytes = handmade_container(
        &["Script", "AssertedScriptGlobalScope"],
        &[0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00],
    );
    assert_eq!(
        decode_script(&bytes).unwrap_err(),
        DecodeError::SectionLengthMismatch {
            section: TREE_SECTION,
            declared: 7,
            actual: 6,
        }
    );
}

#[test]
fn test_truncated_tree_rejected() {
    let bytes = encode_script(&var_x_equals_1()).unwrap();
    let truncated = &bytes[..bytes.len() - 1];
    assert!(matches!(
        decode_script(truncated).unwrap_err(),
        DecodeError::UnexpectedEof { .. }
    ));
}

// =============================================================================
// NESTING
// =============================================================================

fn deeply_negated(depth: usize) -> Script<'static> {
    let mut expression = Expression::LiteralBoolean(true);
    for _ in 0..depth {
        expression = Expression::Unary(UnaryExpression {
            operator: UnaryOperator::Not,
            operand: boxed(expression),
        });
    }
    Script::new(vec![Statement::Expression(expression)])
}

#[test]
fn test_decode_depth_limit() {
    let bytes = encode_script(&deeply_negated(20)).unwrap();

    let options = DecodeOptions::new().with_max_nesting_depth(10);
    assert_eq!(
        decode_script_with_options(&bytes, options).unwrap_err(),
        DecodeError::NestingTooDeep { max: 10 }
    );
    assert!(decode_script(&bytes).is_ok());
}

#[test]
fn test_encode_depth_limit() {
    let options = EncodeOptions::new().with_max_nesting_depth(10);
    assert_eq!(
        encode_script_with_options(&deeply_negated(20), options).unwrap_err(),
        EncodeError::NestingTooDeep { max: 10 }
    );
}

/// An expression statement holding `levels - 1` nested array literals.
fn nested_arrays(levels: usize) -> Script<'static> {
    let mut expression = Expression::Array(ArrayExpression::default());
    for _ in 2..levels {
        expression = Expression::Array(ArrayExpression {
            elements: vec![Some(SpreadOrExpression::Expression(expression))],
        });
    }
    Script::new(vec![Statement::Expression(expression)])
}

/// `(function () { (function () { ... }); })` nesting, two levels per
/// function.
fn nested_functions(levels: usize) -> Script<'static> {
    let mut body = Vec::new();
    for _ in 0..levels / 2 {
        let function = Expression::Function(FunctionExpression {
            mode: BodyMode::Eager,
            is_async: false,
            is_generator: false,
            name: None,
            length: 0,
            directives: Vec::new(),
            contents: FunctionExpressionContents {
                body,
                ..Default::default()
            },
        });
        body = vec![Statement::Expression(function)];
    }
    Script::new(body)
}

#[test]
fn test_default_depth_decodes_on_default_stack() {
    for script in [
        nested_arrays(DEFAULT_MAX_NESTING_DEPTH),
        nested_functions(DEFAULT_MAX_NESTING_DEPTH),
    ] {
        let bytes = encode_script(&script).unwrap();
        // Spawned threads get the 2 MiB default stack.
        let matches =
            std::thread::spawn(move || decode_script(&bytes).map(|decoded| decoded == script))
                .join()
                .unwrap();
        assert_eq!(matches, Ok(true));
    }
}

#[test]
fn test_one_past_default_depth_rejected() {
    let deeper = EncodeOptions::new().with_max_nesting_depth(DEFAULT_MAX_NESTING_DEPTH + 2);
    for script in [
        nested_arrays(DEFAULT_MAX_NESTING_DEPTH + 1),
        nested_functions(DEFAULT_MAX_NESTING_DEPTH + 2),
    ] {
        assert_eq!(
            encode_script(&script).unwrap_err(),
            EncodeError::NestingTooDeep {
                max: DEFAULT_MAX_NESTING_DEPTH
            }
        );
        let bytes = encode_script_with_options(&script, deeper).unwrap();
        assert_eq!(
            decode_script(&bytes).unwrap_err(),
            DecodeError::NestingTooDeep {
                max: DEFAULT_MAX_NESTING_DEPTH
            }
        );
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_string_atoms_roundtrip(values in proptest::collection::vec(".*", 0..8)) {
        let script = Script::new(
            values
                .iter()
                .map(|value| {
                    Statement::Expression(Expression::LiteralString(Cow::Borrowed(value.as_str())))
                })
                .collect(),
        );
        let bytes = encode_script(&script).unwrap();
        let decoded = decode_script(&bytes).unwrap();
        prop_assert_eq!(decoded, script);
    }
}
