//! Node kinds and their grammar-table names.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

wire_enum! {
    /// One grammar production. Every tree record starts with a reference to
    /// one of these through the grammar table.
    pub enum NodeKind {
        /// Absence marker for optional fields.
        Null => "_Null",
        ArrayAssignmentTarget => "ArrayAssignmentTarget",
        ArrayBinding => "ArrayBinding",
        ArrayExpression => "ArrayExpression",
        ArrowExpressionContentsWithExpression => "ArrowExpressionContentsWithExpression",
        ArrowExpressionContentsWithFunctionBody => "ArrowExpressionContentsWithFunctionBody",
        AssertedBlockScope => "AssertedBlockScope",
        AssertedBoundName => "AssertedBoundName",
        AssertedBoundNamesScope => "AssertedBoundNamesScope",
        AssertedDeclaredName => "AssertedDeclaredName",
        AssertedParameterName => "AssertedParameterName",
        AssertedParameterScope => "AssertedParameterScope",
        AssertedPositionalParameterName => "AssertedPositionalParameterName",
        AssertedRestParameterName => "AssertedRestParameterName",
        AssertedScriptGlobalScope => "AssertedScriptGlobalScope",
        AssertedVarScope => "AssertedVarScope",
        AssignmentExpression => "AssignmentExpression",
        AssignmentTargetIdentifier => "AssignmentTargetIdentifier",
        AssignmentTargetPropertyIdentifier => "AssignmentTargetPropertyIdentifier",
        AssignmentTargetPropertyProperty => "AssignmentTargetPropertyProperty",
        AssignmentTargetWithInitializer => "AssignmentTargetWithInitializer",
        AwaitExpression => "AwaitExpression",
        BinaryExpression => "BinaryExpression",
        BindingIdentifier => "BindingIdentifier",
        BindingPropertyIdentifier => "BindingPropertyIdentifier",
        BindingPropertyProperty => "BindingPropertyProperty",
        BindingWithInitializer => "BindingWithInitializer",
        Block => "Block",
        BreakStatement => "BreakStatement",
        CallExpression => "CallExpression",
        CatchClause => "CatchClause",
        ClassDeclaration => "ClassDeclaration",
        ClassElement => "ClassElement",
        ClassExpression => "ClassExpression",
        CompoundAssignmentExpression => "CompoundAssignmentExpression",
        ComputedMemberAssignmentTarget => "ComputedMemberAssignmentTarget",
        ComputedMemberExpression => "ComputedMemberExpression",
        ComputedPropertyName => "ComputedPropertyName",
        ConditionalExpression => "ConditionalExpression",
        ContinueStatement => "ContinueStatement",
        DataProperty => "DataProperty",
        DebuggerStatement => "DebuggerStatement",
        Directive => "Directive",
        DoWhileStatement => "DoWhileStatement",
        EagerArrowExpressionWithExpression => "EagerArrowExpressionWithExpression",
        EagerArrowExpressionWithFunctionBody => "EagerArrowExpressionWithFunctionBody",
        EagerFunctionDeclaration => "EagerFunctionDeclaration",
        EagerFunctionExpression => "EagerFunctionExpression",
        EagerGetter => "EagerGetter",
        EagerMethod => "EagerMethod",
        EagerSetter => "EagerSetter",
        EmptyStatement => "EmptyStatement",
        Export => "Export",
        ExportAllFrom => "ExportAllFrom",
        ExportDefault => "ExportDefault",
        ExportFrom => "ExportFrom",
        ExportFromSpecifier => "ExportFromSpecifier",
        ExportLocalSpecifier => "ExportLocalSpecifier",
        ExportLocals => "ExportLocals",
        ExpressionStatement => "ExpressionStatement",
        ForInOfBinding => "ForInOfBinding",
        ForInStatement => "ForInStatement",
        ForOfStatement => "ForOfStatement",
        ForStatement => "ForStatement",
        FormalParameters => "FormalParameters",
        FunctionExpressionContents => "FunctionExpressionContents",
        FunctionOrMethodContents => "FunctionOrMethodContents",
        GetterContents => "GetterContents",
        IdentifierExpression => "IdentifierExpression",
        IfStatement => "IfStatement",
        Import => "Import",
        ImportNamespace => "ImportNamespace",
        ImportSpecifier => "ImportSpecifier",
        LabelledStatement => "LabelledStatement",
        LazyArrowExpressionWithExpression => "LazyArrowExpressionWithExpression",
        LazyArrowExpressionWithFunctionBody => "LazyArrowExpressionWithFunctionBody",
        LazyFunctionDeclaration => "LazyFunctionDeclaration",
        LazyFunctionExpression => "LazyFunctionExpression",
        LazyGetter => "LazyGetter",
        LazyMethod => "LazyMethod",
        LazySetter => "LazySetter",
        LiteralBooleanExpression => "LiteralBooleanExpression",
        LiteralInfinityExpression => "LiteralInfinityExpression",
        LiteralNullExpression => "LiteralNullExpression",
        LiteralNumericExpression => "LiteralNumericExpression",
        LiteralPropertyName => "LiteralPropertyName",
        LiteralRegExpExpression => "LiteralRegExpExpression",
        LiteralStringExpression => "LiteralStringExpression",
        Module => "Module",
        NewExpression => "NewExpression",
        NewTargetExpression => "NewTargetExpression",
        ObjectAssignmentTarget => "ObjectAssignmentTarget",
        ObjectBinding => "ObjectBinding",
        ObjectExpression => "ObjectExpression",
        ReturnStatement => "ReturnStatement",
        Script => "Script",
        SetterContents => "SetterContents",
        ShorthandProperty => "ShorthandProperty",
        SpreadElement => "SpreadElement",
        StaticMemberAssignmentTarget => "StaticMemberAssignmentTarget",
        StaticMemberExpression => "StaticMemberExpression",
        Super => "Super",
        SwitchCase => "SwitchCase",
        SwitchDefault => "SwitchDefault",
        SwitchStatement => "SwitchStatement",
        SwitchStatementWithDefault => "SwitchStatementWithDefault",
        TemplateElement => "TemplateElement",
        TemplateExpression => "TemplateExpression",
        ThisExpression => "ThisExpression",
        ThrowStatement => "ThrowStatement",
        TryCatchStatement => "TryCatchStatement",
        TryFinallyStatement => "TryFinallyStatement",
        UnaryExpression => "UnaryExpression",
        UpdateExpression => "UpdateExpression",
        VariableDeclaration => "VariableDeclaration",
        VariableDeclarator => "VariableDeclarator",
        WhileStatement => "WhileStatement",
        WithStatement => "WithStatement",
        YieldExpression => "YieldExpression",
        YieldStarExpression => "YieldStarExpression",
    }
}

lazy_static! {
    static ref KINDS_BY_NAME: FxHashMap<&'static str, NodeKind> =
        NodeKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect();
}

impl NodeKind {
    /// Looks up a kind by its grammar-table name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        KINDS_BY_NAME.get(name).copied()
    }

    /// Returns true for productions that are registered but rejected by the
    /// tree codec (module records, templates, the infinity literal).
    pub fn is_unsupported(self) -> bool {
        matches!(
            self,
            NodeKind::Module
                | NodeKind::Import
                | NodeKind::ImportNamespace
                | NodeKind::ImportSpecifier
                | NodeKind::Export
                | NodeKind::ExportAllFrom
                | NodeKind::ExportDefault
                | NodeKind::ExportFrom
                | NodeKind::ExportFromSpecifier
                | NodeKind::ExportLocalSpecifier
                | NodeKind::ExportLocals
                | NodeKind::TemplateExpression
                | NodeKind::TemplateElement
                | NodeKind::LiteralInfinityExpression
        )
    }
}
