//! Unit tests for the semantic checker.
//!
//! Programs are written as source text, run through the lexer and parser,
//! and then checked; assertions look at the error name or at the
//! annotations left on the tree.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{CompUnit, Item, NodeId},
        expressions::{Expr, ExprKind},
        statements::{BlockItem, FuncDef, Stmt, StmtKind},
        types::{BasicType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    Position,
};

use super::{
    operators::Operator,
    registry::{FunctionId, ScopeId, Symbol, SymbolRegistry},
    type_checker::{type_check, CheckingContext, TypeCheckOptions, TypeChecker},
};

fn check_with(source: &str, options: &TypeCheckOptions) -> (CompUnit, TypeChecker, Option<Error>) {
    let tokens = tokenize(source.to_string(), Some("test.cact".to_string())).unwrap();
    let (_, ast) = parse(tokens, Rc::new("test.cact".to_string()));
    let mut ast = ast.unwrap();

    let (type_checker, error) = type_check(&mut ast, options);
    (ast, type_checker, error)
}

fn check(source: &str) -> (CompUnit, TypeChecker, Option<Error>) {
    check_with(source, &TypeCheckOptions::default())
}

fn assert_ok(source: &str) {
    let (_, _, error) = check(source);
    if let Some(error) = error {
        panic!("expected {:?} to check, got {}", source, error);
    }
}

fn assert_error(source: &str, name: &str) {
    let (_, _, error) = check(source);
    match error {
        Some(error) => assert_eq!(error.get_error_name(), name, "for {:?}", source),
        None => panic!("expected {} for {:?}", name, source),
    }
}

fn function<'a>(ast: &'a CompUnit, name: &str) -> &'a FuncDef {
    ast.items
        .iter()
        .find_map(|item| match item {
            Item::FuncDef(func) if func.name == name => Some(func),
            _ => None,
        })
        .unwrap()
}

fn stmts(func: &FuncDef) -> Vec<&Stmt> {
    func.body
        .items
        .iter()
        .filter_map(|item| match item {
            BlockItem::Stmt(stmt) => Some(stmt),
            BlockItem::Decl(_) => None,
        })
        .collect()
}

fn returned<'a>(stmt: &'a Stmt) -> &'a Expr {
    match &stmt.kind {
        StmtKind::Return { value: Some(value), .. } => value,
        other => panic!("expected a return with a value, found {:?}", other),
    }
}

// Registry

#[test]
fn test_registry_shadowing_and_lookup() {
    let mut registry = SymbolRegistry::new();
    let global = registry.create_global_scope();
    let inner = registry.new_scope(global);

    let outer_x = registry
        .register_variable(global, "x", Symbol::variable("x", Type::scalar(BasicType::Int32)))
        .unwrap();
    let inner_x = registry
        .register_variable(inner, "x", Symbol::variable("x", Type::scalar(BasicType::Float)))
        .unwrap();

    assert_eq!(registry.lookup_variable(inner, "x").unwrap(), inner_x);
    assert_eq!(registry.lookup_variable(global, "x").unwrap(), outer_x);
    assert_eq!(registry.scope(inner).parent, Some(global));
    assert_eq!(registry.scope(inner).len(), 1);
}

#[test]
fn test_registry_duplicate_in_same_scope() {
    let mut registry = SymbolRegistry::new();
    let global = registry.create_global_scope();
    let ty = Type::scalar(BasicType::Bool);

    registry.register_variable(global, "flag", Symbol::variable("flag", ty.clone())).unwrap();
    let error = registry
        .register_variable(global, "flag", Symbol::variable("flag", ty))
        .unwrap_err();

    assert_eq!(error, ErrorImpl::DuplicateSymbol { name: "flag".to_string() });
}

#[test]
fn test_registry_functions_share_global_namespace() {
    let mut registry = SymbolRegistry::new();
    let global = registry.create_global_scope();
    let inner = registry.new_scope(global);

    registry.new_function("f", BasicType::Void).unwrap();

    assert!(registry
        .register_variable(global, "f", Symbol::variable("f", Type::scalar(BasicType::Int32)))
        .is_err());
    assert!(registry
        .register_variable(inner, "f", Symbol::variable("f", Type::scalar(BasicType::Int32)))
        .is_ok());

    registry
        .register_variable(global, "g", Symbol::variable("g", Type::scalar(BasicType::Int32)))
        .unwrap();
    assert!(registry.new_function("g", BasicType::Int32).is_err());
    assert!(registry.new_function("f", BasicType::Int32).is_err());
}

#[test]
fn test_registry_missing_names() {
    let mut registry = SymbolRegistry::new();
    let global = registry.create_global_scope();

    assert!(registry.lookup_variable(global, "nope").is_err());
    assert!(registry.lookup_function("nope").is_err());
    assert!(registry.scope(global).is_empty());
}

#[test]
fn test_registry_global_scope_created_once() {
    let mut registry = SymbolRegistry::new();
    assert_eq!(registry.global_scope(), None);

    let first = registry.create_global_scope();
    let second = registry.create_global_scope();

    assert_eq!(first, second);
    assert_eq!(registry.scopes().len(), 1);
}

#[test]
fn test_builtins_are_registered_by_default() {
    let (_, type_checker, error) = check("");
    assert!(error.is_none());

    let id = type_checker.registry.lookup_function("print_int").unwrap();
    let signature = type_checker.registry.function(id);
    assert!(signature.is_builtin);
    assert_eq!(signature.parameters[0].ty, Type::scalar(BasicType::Int32));

    let (_, type_checker, _) = check_with("", &TypeCheckOptions { register_builtins: false });
    assert!(type_checker.registry.functions().is_empty());
}

// Declarations and scopes

#[test]
fn test_scope_shadowing_in_nested_block() {
    let (ast, type_checker, error) = check(
        "int32 x; float f() { float x = 1.0f; { bool x = true; } return x; }",
    );
    assert!(error.is_none());

    let func = function(&ast, "f");
    let value = returned(stmts(func)[1]);
    assert_eq!(value.ty(), Some(&Type::scalar(BasicType::Float)));

    let ExprKind::LValue(lvalue) = &value.kind else {
        panic!("expected an lvalue");
    };
    let symbol = type_checker.registry.symbol(lvalue.symbol.unwrap());
    assert_eq!(symbol.ty, Type::scalar(BasicType::Float));
}

#[test]
fn test_nested_block_resolves_to_inner_declaration() {
    // The inner `bool x` hides the outer `int32 x` for the rest of the block
    assert_error("void f() { int32 x; { bool x = true; x = 1; } }", "TypeMismatch");
    assert_ok("void f() { int32 x; { bool x = true; x = false; } x = 1; }");

    let (ast, _, error) = check("void f() { int32 x = 1; { bool x = true; x = false; } x = 2; }");
    assert!(error.is_none());

    let func = function(&ast, "f");
    let body = stmts(func);
    let StmtKind::Block(inner) = &body[0].kind else {
        panic!("expected a nested block");
    };
    let inner_target = inner
        .items
        .iter()
        .find_map(|item| match item {
            BlockItem::Stmt(Stmt { kind: StmtKind::Assign { target, .. }, .. }) => target.symbol,
            _ => None,
        })
        .unwrap();
    let StmtKind::Assign { target: outer, .. } = &body[1].kind else {
        panic!("expected an assignment");
    };

    assert_ne!(Some(inner_target), outer.symbol);
}

#[test]
fn test_duplicate_in_same_scope_fails() {
    assert_error("int32 a; float a;", "DuplicateSymbol");
    assert_error("void f() { int32 a; bool a; }", "DuplicateSymbol");
    assert_error("void f(int32 a, int32 a) { }", "DuplicateSymbol");
}

#[test]
fn test_body_may_shadow_parameter() {
    assert_ok("int32 f(int32 a) { float a = 2.0f; return 1; }");
}

#[test]
fn test_function_and_global_collide() {
    assert_error("int32 f; void f() { }", "DuplicateSymbol");
    assert_error("void f() { } int32 f;", "DuplicateSymbol");
    assert_error("void f() { } void f() { }", "DuplicateSymbol");
    assert_error("void print_int(int32 v) { }", "DuplicateSymbol");
}

#[test]
fn test_undeclared_symbol() {
    assert_error("void f() { x = 1; }", "UndeclaredSymbol");
    assert_error("void f() { { int32 y; } y = 1; }", "UndeclaredSymbol");
}

#[test]
fn test_invalid_array_dimension() {
    assert_error("int32 a[0];", "InvalidArrayDimension");
    assert_error("int32 a[-2];", "InvalidArrayDimension");
    assert_error("void f(int32 a[][0]) { }", "InvalidArrayDimension");
    assert_ok("int32 a[0x10];");
}

#[test]
fn test_declaration_annotations() {
    let (ast, type_checker, error) = check("const int32 N = 3; double grid[2][4];");
    assert!(error.is_none());

    let Item::Decl(decl) = &ast.items[1] else {
        panic!("expected a declaration");
    };
    let symbol = type_checker.registry.symbol(decl.defs[0].symbol.unwrap());
    assert_eq!(symbol.ty, Type::array(BasicType::Double, vec![2, 4]));
    assert!(!symbol.is_constant);
    assert!(!symbol.is_initialized);

    let Item::Decl(decl) = &ast.items[0] else {
        panic!("expected a declaration");
    };
    let symbol = type_checker.registry.symbol(decl.defs[0].symbol.unwrap());
    assert!(symbol.is_constant);
    assert!(symbol.is_initialized);
}

// Initializers

#[test]
fn test_nested_initializer_matches_shape() {
    assert_ok("int32 a[2][3] = {{1, 2, 3}, {4, 5, 6}};");
    assert_ok("int32 a[2][3] = {{1, 2}, {4, 5, 6}};");
    assert_error("int32 a[2][3] = {{1, 2, 3}};", "ArrayDimensionMismatch");
    assert_error("int32 a[2][3] = {{1, 2, 3, 4}, {5}};", "ArrayDimensionMismatch");
    assert_ok("int32 a[2][2][2] = {{{1, 2}, {3}}, {{5}, {}}};");
    assert_error("int32 a[2][2][2] = {{{1, 2}}, {{5}, {6}}};", "ArrayDimensionMismatch");
}

#[test]
fn test_flat_initializer_requires_outer_count() {
    assert_ok("int32 a[2][3] = {1, 2};");
    assert_error("int32 a[2][3] = {1, 2, 3, 4, 5, 6};", "ArrayDimensionMismatch");
}

#[test]
fn test_innermost_dimension_may_be_under_filled() {
    assert_ok("int32 a[3] = {1, 2};");
    assert_ok("int32 a[3] = {};");
    assert_error("int32 a[3] = {1, 2, 3, 4};", "ArrayDimensionMismatch");
}

#[test]
fn test_initializer_nesting_depth() {
    assert_error("int32 a[2] = {{1}, {2}};", "ArrayDimensionMismatch");
    assert_error("int32 a[2][2] = 1;", "ArrayDimensionMismatch");
    assert_error("int32 x = {1};", "ArrayDimensionMismatch");
    assert_error("int32 a[2][2] = {{1, 2}, 3};", "ArrayDimensionMismatch");
}

#[test]
fn test_initializer_element_types() {
    assert_ok("float a[2] = {1.0f, 2.0f};");
    assert_error("float a[2] = {1.0f, 2.0};", "TypeMismatch");
    assert_error("int32 x = true;", "TypeMismatch");
    assert_ok("bool b = !false;");
}

#[test]
fn test_initializer_must_be_constant() {
    assert_ok("int32 x = 1 + 2 * -3;");
    assert_error("int32 x = 1; int32 y = x;", "NonConstantInitializer");
    assert_error("int32 x = get_int();", "NonConstantInitializer");
}

// Operator table

fn scalar(basic_type: BasicType) -> Type {
    Type::scalar(basic_type)
}

#[test]
fn test_arithmetic_requires_identical_numeric_operands() {
    let int = scalar(BasicType::Int32);
    let float = scalar(BasicType::Float);

    assert!(Operator::Add.check_operands(&int, &int).is_ok());
    assert!(Operator::Mul.check_operands(&float, &float).is_ok());
    assert!(Operator::Add.check_operands(&int, &float).is_err());
    assert!(Operator::Sub
        .check_operands(&scalar(BasicType::Bool), &scalar(BasicType::Bool))
        .is_err());
    assert_eq!(Operator::Div.result_type(&float), float);
}

#[test]
fn test_mod_is_integer_only() {
    assert!(Operator::Mod
        .check_operands(&scalar(BasicType::Int32), &scalar(BasicType::Int32))
        .is_ok());
    assert!(Operator::Mod
        .check_operands(&scalar(BasicType::Double), &scalar(BasicType::Double))
        .is_err());
}

#[test]
fn test_comparisons_yield_bool() {
    let double = scalar(BasicType::Double);
    let boolean = scalar(BasicType::Bool);

    assert!(Operator::Less.check_operands(&double, &double).is_ok());
    assert!(Operator::Less.check_operands(&boolean, &boolean).is_err());
    assert!(Operator::Equal.check_operands(&boolean, &boolean).is_ok());
    assert_eq!(Operator::GreaterEqual.result_type(&double), boolean);
    assert_eq!(Operator::NotEqual.result_type(&double), boolean);
}

#[test]
fn test_logical_operators_require_bool() {
    let boolean = scalar(BasicType::Bool);
    let int = scalar(BasicType::Int32);

    assert!(Operator::And.check_operands(&boolean, &boolean).is_ok());
    assert!(Operator::Or.check_operands(&int, &int).is_err());
    assert!(Operator::Not.check_operand(&boolean).is_ok());
    assert!(Operator::Not.check_operand(&int).is_err());
}

#[test]
fn test_arrays_are_never_operands() {
    let array = Type::array(BasicType::Int32, vec![3]);

    assert!(Operator::Neg.check_operand(&array).is_err());
    assert!(Operator::Equal.check_operands(&array, &array).is_err());
    assert!(Operator::Add.check_operands(&array, &array).is_err());
}

#[test]
fn test_nop_passes_type_through() {
    let array = Type::array(BasicType::Float, vec![2, 2]);

    assert!(Operator::Nop.check_operand(&array).is_ok());
    assert_eq!(Operator::Nop.result_type(&array), array);
}

#[test]
fn test_unary_sign_rejects_bool() {
    assert!(Operator::Neg.check_operand(&scalar(BasicType::Bool)).is_err());
    assert!(Operator::Plus.check_operand(&scalar(BasicType::Float)).is_ok());
    assert!(Operator::Add.check_operand(&scalar(BasicType::Int32)).is_err());
}

#[test]
fn test_token_mapping() {
    assert_eq!(Operator::from_prefix_token(TokenKind::Dash), Some(Operator::Neg));
    assert_eq!(Operator::from_infix_token(TokenKind::Dash), Some(Operator::Sub));
    assert_eq!(Operator::from_infix_token(TokenKind::Or), Some(Operator::Or));
    assert_eq!(Operator::from_infix_token(TokenKind::Not), None);
}

// Expressions

#[test]
fn test_expression_types_follow_operators() {
    let (ast, _, error) = check(
        "bool f(int32 a, int32 b) { return a + b * 2 < a % 3 == (1 > 0); }",
    );
    assert!(error.is_none());

    let value = returned(stmts(function(&ast, "f"))[0]);
    assert_eq!(value.ty(), Some(&Type::scalar(BasicType::Bool)));

    let ExprKind::Binary { left, .. } = &value.kind else {
        panic!("expected a binary expression");
    };
    let ExprKind::Binary { left, right, .. } = &left.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(left.ty(), Some(&Type::scalar(BasicType::Int32)));
    assert_eq!(right.ty(), Some(&Type::scalar(BasicType::Int32)));
}

#[test]
fn test_no_implicit_numeric_conversion() {
    assert_error("float f(float x) { return x + 1; }", "InvalidOperandType");
    assert_error("double f(double x) { return x * 2.0f; }", "InvalidOperandType");
    assert_ok("double f(double x) { return x * 2.0; }");
}

#[test]
fn test_operator_operand_rules() {
    assert_error("bool f(bool a) { return -a; }", "InvalidOperandType");
    assert_error("bool f(int32 a) { return !a; }", "InvalidOperandType");
    assert_error("bool f(int32 a, int32 b) { return a && b; }", "InvalidOperandType");
    assert_error("float f(float a) { return a % a; }", "InvalidOperandType");
    assert_error("bool f(int32 a[3]) { return a == a; }", "InvalidOperandType");
    assert_ok("bool f(bool a, bool b) { return a == b || !a && b; }");
}

#[test]
fn test_indexing() {
    assert_ok("int32 f(int32 a[2][3]) { return a[1][2]; }");
    assert_error("int32 f(int32 a) { return a[0]; }", "ScalarIndexing");
    assert_error("int32 f(int32 a[2]) { return a[0][1]; }", "ScalarIndexing");
    assert_error("int32 f(int32 a[2]) { return a[1.0]; }", "InvalidArrayIndexType");
    assert_error("int32 f(int32 a[2], bool i) { return a[i]; }", "InvalidArrayIndexType");
}

#[test]
fn test_partial_indexing_yields_subarray() {
    let (ast, _, error) = check("void g(int32 r[3]) { } void f(int32 a[2][3]) { g(a[1]); }");
    assert!(error.is_none());

    let body = stmts(function(&ast, "f"));
    let StmtKind::Expr(Some(call)) = &body[0].kind else {
        panic!("expected an expression statement");
    };
    let ExprKind::Call { arguments, .. } = &call.kind else {
        panic!("expected a call");
    };
    assert_eq!(arguments[0].ty(), Some(&Type::array(BasicType::Int32, vec![3])));
}

#[test]
fn test_integer_literal_range() {
    assert_ok("int32 x = 2147483647;");
    assert_ok("int32 x = -2147483648;");
    assert_error("int32 x = 4294967296;", "NumberParseError");
}

#[test]
fn test_int_min_magnitude_needs_direct_negation() {
    assert_error("int32 x = 2147483648;", "NumberParseError");
    assert_error("int32 x = -(2147483648);", "NumberParseError");
    assert_error("int32 x = 1 + 2147483648;", "NumberParseError");
    assert_ok("int32 x = -0x80000000;");
}

#[test]
fn test_floating_literal_overflow() {
    assert_ok("float x = 3.4e38f;");
    assert_error("float x = 1e50f;", "NumberParseError");
    assert_ok("double x = 1e300;");
    assert_error("double x = 1e400;", "NumberParseError");
}

// Assignment

#[test]
fn test_assignment_types_must_match() {
    assert_ok("void f() { int32 a[4]; a[2] = 7; }");
    assert_error("void f() { int32 a; a = 1.0; }", "TypeMismatch");
    assert_error("void f() { int32 a[4]; a[2] = true; }", "TypeMismatch");
    assert_ok("void f(int32 a[4], int32 b[4]) { a = b; }");
}

#[test]
fn test_assignment_to_constant_always_fails() {
    assert_error("const int32 N = 1; void f() { N = 2; }", "InvalidAssignmentTarget");
    assert_error("const int32 N = 1; void f() { N = 2.0; }", "InvalidAssignmentTarget");
    assert_error(
        "const int32 A[2] = {1, 2}; void f() { A[0] = 3; }",
        "InvalidAssignmentTarget",
    );
}

// Control flow

#[test]
fn test_conditions_must_be_bool() {
    assert_error("void f(int32 a) { if (a) { } }", "TypeMismatch");
    assert_error("void f(int32 a) { while (a) { } }", "TypeMismatch");
    assert_ok("void f(int32 a) { if (a != 0) { } while (a > 0) { a = a - 1; } }");
}

#[test]
fn test_if_without_else_is_never_complete() {
    let (ast, _, error) = check("int32 f(bool c) { if (c) { return 1; } }");
    assert!(error.is_none());

    let func = function(&ast, "f");
    assert!(!stmts(func)[0].has_return);
    assert!(!func.body.has_return);
}

#[test]
fn test_if_with_else_is_complete_when_both_branches_are() {
    let (ast, _, _) = check("int32 f(bool c) { if (c) { return 1; } else { return 2; } }");
    let func = function(&ast, "f");
    assert!(stmts(func)[0].has_return);
    assert!(func.body.has_return);

    let (ast, _, _) = check("int32 f(bool c) { if (c) { return 1; } else { } return 0; }");
    let func = function(&ast, "f");
    assert!(!stmts(func)[0].has_return);
    assert!(func.body.has_return);
}

#[test]
fn test_while_is_never_complete() {
    let (ast, _, error) = check("int32 f() { while (true) { return 1; } }");
    assert!(error.is_none());

    let func = function(&ast, "f");
    assert!(!stmts(func)[0].has_return);
}

#[test]
fn test_break_and_continue_outside_loop() {
    assert_error("void f() { break; }", "ControlFlowOutsideLoop");
    assert_error("void f(bool c) { if (c) continue; }", "ControlFlowOutsideLoop");
    assert_error("void f(bool c) { while (c) { } break; }", "ControlFlowOutsideLoop");
}

#[test]
fn test_break_links_to_enclosing_loop() {
    let (ast, _, error) = check(
        "void f(bool c) { while (c) { if (c) { break; } while (c) { continue; } break; } }",
    );
    assert!(error.is_none());

    let func = function(&ast, "f");
    let outer = stmts(func)[0];
    let StmtKind::While { body, .. } = &outer.kind else {
        panic!("expected a while loop");
    };
    let StmtKind::Block(block) = &body.kind else {
        panic!("expected a block");
    };
    let inner: Vec<&Stmt> = block
        .items
        .iter()
        .filter_map(|item| match item {
            BlockItem::Stmt(stmt) => Some(stmt),
            BlockItem::Decl(_) => None,
        })
        .collect();

    // break inside an if resolves to the outer loop
    let StmtKind::If { then_branch, .. } = &inner[0].kind else {
        panic!("expected an if statement");
    };
    let StmtKind::Block(then_block) = &then_branch.kind else {
        panic!("expected a block");
    };
    let Some(BlockItem::Stmt(brk)) = then_block.items.first() else {
        panic!("expected a statement");
    };
    assert!(matches!(brk.kind, StmtKind::Break { target: Some(id) } if id == outer.id));

    // continue inside the nested loop resolves to the nested loop
    let nested = inner[1];
    let StmtKind::While { body, .. } = &nested.kind else {
        panic!("expected a while loop");
    };
    let StmtKind::Block(nested_block) = &body.kind else {
        panic!("expected a block");
    };
    let Some(BlockItem::Stmt(cont)) = nested_block.items.first() else {
        panic!("expected a statement");
    };
    assert!(matches!(cont.kind, StmtKind::Continue { target: Some(id) } if id == nested.id));

    // break after the nested loop resolves to the outer loop again
    assert!(matches!(inner[2].kind, StmtKind::Break { target: Some(id) } if id == outer.id));
}

#[test]
fn test_return_types() {
    assert_ok("void f() { return; }");
    assert_error("void f() { return 1; }", "ReturnTypeMismatch");
    assert_error("int32 f() { return; }", "ReturnTypeMismatch");
    assert_error("int32 f() { return 1.0f; }", "ReturnTypeMismatch");
    assert_error("int32 f(int32 a[2]) { return a; }", "ReturnTypeMismatch");
    assert_ok("bool f() { return 1 < 2; }");
}

#[test]
fn test_return_is_annotated_with_function() {
    let (ast, type_checker, error) = check("double f() { return 0.5; }");
    assert!(error.is_none());

    let func = function(&ast, "f");
    let body = stmts(func);
    let StmtKind::Return { function: Some(id), .. } = &body[0].kind else {
        panic!("expected an annotated return");
    };
    assert_eq!(Some(*id), func.function);
    assert_eq!(type_checker.registry.function(*id).name, "f");
}

// Calls

#[test]
fn test_call_arity_and_types() {
    let header = "int32 f(int32 a, int32 b) { return a + b; } ";

    assert_error(&format!("{}int32 g() {{ return f(1); }}", header), "TooFewArguments");
    assert_error(&format!("{}int32 g() {{ return f(1, 2, 3); }}", header), "TooManyArguments");
    assert_error(
        &format!("{}int32 g() {{ return f(1, true); }}", header),
        "ArgumentTypeMismatch",
    );

    let (ast, _, error) = check(&format!("{}int32 g() {{ return f(1, 2); }}", header));
    assert!(error.is_none());
    let value = returned(stmts(function(&ast, "g"))[0]);
    assert_eq!(value.ty(), Some(&Type::scalar(BasicType::Int32)));
    assert!(matches!(&value.kind, ExprKind::Call { function: Some(_), .. }));
}

#[test]
fn test_call_resolution_order() {
    assert_error("int32 g() { return f(); } int32 f() { return 1; }", "UndeclaredFunction");
    assert_ok("int32 fact(int32 n) { if (n <= 1) { return 1; } return n * fact(n - 1); }");
}

#[test]
fn test_array_arguments() {
    let header = "int32 sum(int32 a[][3], int32 n) { return a[0][0]; } ";

    assert_ok(&format!("{}void f() {{ int32 m[5][3]; sum(m, 5); }}", header));
    assert_error(
        &format!("{}void f() {{ int32 m[5][4]; sum(m, 5); }}", header),
        "ArgumentTypeMismatch",
    );
    assert_error(
        &format!("{}void f() {{ int32 m[3]; sum(m, 3); }}", header),
        "ArgumentTypeMismatch",
    );
    assert_error("void g(int32 a[4]) { } void f() { int32 m[5]; g(m); }", "ArgumentTypeMismatch");
}

#[test]
fn test_builtin_calls() {
    assert_ok("void main() { int32 x; x = get_int(); print_int(x); print_bool(x > 0); }");
    assert_error("void main() { print_float(1.0); }", "ArgumentTypeMismatch");

    let (_, _, error) = check_with(
        "void main() { print_int(1); }",
        &TypeCheckOptions { register_builtins: false },
    );
    assert_eq!(error.unwrap().get_error_name(), "UndeclaredFunction");
}

#[test]
fn test_error_points_at_offending_node() {
    let source = "void f() {\n  int32 x;\n  x = 1.5;\n}";
    let (_, _, error) = check(source);
    let error = error.unwrap();

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert!(error.get_node().is_some());
    assert_eq!(error.get_position().0 as usize, source.find("1.5").unwrap());
}

#[test]
fn test_error_inside_nested_blocks() {
    let (_, type_checker, error) = check("void f() { { { int32 y = z; } } }");
    assert_eq!(error.unwrap().get_error_name(), "UndeclaredSymbol");

    // Global, function, body and two nested blocks were all allocated.
    assert_eq!(type_checker.registry.scopes().len(), 5);
}

#[test]
fn test_context_restored_after_failure() {
    let mut type_checker = TypeChecker::new();
    let global = type_checker.registry.create_global_scope();
    let mut ctx = CheckingContext::new(global);

    let result: Result<(ScopeId, ()), Error> = type_checker.in_scope(&mut ctx, |type_checker, ctx| {
        type_checker.in_function(ctx, FunctionId(0), |type_checker, ctx| {
            type_checker.in_loop(ctx, NodeId(7), |type_checker, ctx| {
                type_checker.in_scope(ctx, |_, ctx| {
                    assert_eq!(ctx.loop_stack, vec![NodeId(7)]);
                    assert_eq!(ctx.current_function, Some(FunctionId(0)));
                    assert_ne!(ctx.current_scope, global);

                    Err::<(), _>(Error::new(
                        ErrorImpl::ControlFlowOutsideLoop {
                            statement: "break".to_string(),
                        },
                        Position(0, Rc::new("test.cact".to_string())),
                    ))
                })
                .map(|(_, value)| value)
            })
        })
    });

    assert_eq!(result.unwrap_err().get_error_name(), "ControlFlowOutsideLoop");
    assert_eq!(ctx.current_scope, global);
    assert!(ctx.loop_stack.is_empty());
    assert!(ctx.current_function.is_none());
    assert_eq!(type_checker.registry.scopes().len(), 3);
}
