use crate::{
    ast::{
        ast::NodeId,
        expressions::{Expr, ExprInfo, ExprKind, LValue, NumberKind},
        types::{BasicType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    operators::Operator,
    registry::FunctionId,
    type_checker::{parse_integer_literal, CheckingContext, TypeChecker},
};

/// Largest integer literal. `2147483648` is only valid directly under a
/// unary minus, where it spells `i32::MIN`.
const MAX_INTEGER_LITERAL: i64 = i32::MAX as i64;

fn check_number(
    text: &str,
    kind: NumberKind,
    negated: bool,
    id: NodeId,
    span: &Span,
) -> Result<Type, Error> {
    let limit = if negated {
        MAX_INTEGER_LITERAL + 1
    } else {
        MAX_INTEGER_LITERAL
    };

    // Out-of-range floating literals parse to infinity rather than failing
    let valid = match kind {
        NumberKind::Integer => {
            matches!(parse_integer_literal(text), Some(value) if value <= limit)
        }
        NumberKind::Float => text
            .trim_end_matches(['f', 'F'])
            .parse::<f32>()
            .is_ok_and(f32::is_finite),
        NumberKind::Double => text.parse::<f64>().is_ok_and(f64::is_finite),
    };

    if !valid {
        return Err(Error::at_node(
            ErrorImpl::NumberParseError {
                token: text.to_string(),
            },
            id,
            span,
        ));
    }

    Ok(Type::scalar(match kind {
        NumberKind::Integer => BasicType::Int32,
        NumberKind::Float => BasicType::Float,
        NumberKind::Double => BasicType::Double,
    }))
}

/// Resolves an lvalue and returns its type after indexing.
pub fn check_lvalue(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    lvalue: &mut LValue,
) -> Result<Type, Error> {
    let symbol_id = type_checker
        .registry
        .lookup_variable(ctx.current_scope, &lvalue.name)
        .map_err(|error| Error::at_node(error, lvalue.id, &lvalue.span))?;
    let symbol = type_checker.registry.symbol(symbol_id).clone();

    if lvalue.indices.len() > symbol.ty.dim() {
        return Err(Error::at_node(
            ErrorImpl::ScalarIndexing {
                variable: lvalue.name.clone(),
                dimensions: symbol.ty.dim(),
                indices: lvalue.indices.len(),
            },
            lvalue.id,
            &lvalue.span,
        ));
    }

    for index in lvalue.indices.iter_mut() {
        let info = check_expr(type_checker, ctx, index)?;

        if !info.ty.is_valid_array_index() {
            return Err(Error::at_node(
                ErrorImpl::InvalidArrayIndexType {
                    received: info.ty.to_string(),
                },
                index.id,
                &index.span,
            ));
        }
    }

    lvalue.symbol = Some(symbol_id);
    lvalue.assignable = symbol.is_valid_lvalue();

    Ok(symbol.ty.indexed(lvalue.indices.len()))
}

fn check_call(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    callee: &str,
    arguments: &mut [Expr],
    id: NodeId,
    span: &Span,
) -> Result<(FunctionId, Type), Error> {
    let function_id = type_checker
        .registry
        .lookup_function(callee)
        .map_err(|error| Error::at_node(error, id, span))?;
    let signature = type_checker.registry.function(function_id).clone();

    let expected = signature.parameters.len();
    let received = arguments.len();
    if received > expected {
        return Err(Error::at_node(
            ErrorImpl::TooManyArguments {
                function: callee.to_string(),
                expected,
                received,
            },
            arguments[expected].id,
            &arguments[expected].span,
        ));
    } else if received < expected {
        return Err(Error::at_node(
            ErrorImpl::TooFewArguments {
                function: callee.to_string(),
                expected,
                received,
            },
            id,
            span,
        ));
    }

    for (index, (argument, parameter)) in arguments
        .iter_mut()
        .zip(signature.parameters.iter())
        .enumerate()
    {
        let info = check_expr(type_checker, ctx, argument)?;

        if !parameter.ty.accepts_argument(&info.ty) {
            return Err(Error::at_node(
                ErrorImpl::ArgumentTypeMismatch {
                    function: callee.to_string(),
                    index,
                    expected: parameter.ty.to_string(),
                    received: info.ty.to_string(),
                },
                argument.id,
                &argument.span,
            ));
        }
    }

    Ok((function_id, signature.return_type))
}

/// Checks `expr` bottom-up, stores the facts on the node and returns them.
pub fn check_expr(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    expr: &mut Expr,
) -> Result<ExprInfo, Error> {
    check_expr_inner(type_checker, ctx, expr, false)
}

/// `negated` is set when `expr` is the direct operand of a unary minus.
fn check_expr_inner(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    expr: &mut Expr,
    negated: bool,
) -> Result<ExprInfo, Error> {
    let id = expr.id;
    let span = expr.span.clone();
    let operator_error = |error: ErrorImpl| Error::at_node(error, id, &span);

    let info = match &mut expr.kind {
        ExprKind::Number { text, kind } => ExprInfo {
            ty: check_number(text, *kind, negated, id, &span)?,
            is_constant: true,
            is_assignable: false,
        },
        ExprKind::Bool(_) => ExprInfo {
            ty: Type::scalar(BasicType::Bool),
            is_constant: true,
            is_assignable: false,
        },
        ExprKind::LValue(lvalue) => {
            let ty = check_lvalue(type_checker, ctx, lvalue)?;
            ExprInfo {
                ty,
                is_constant: false,
                is_assignable: lvalue.assignable,
            }
        }
        ExprKind::Paren(inner) => {
            let inner = check_expr(type_checker, ctx, inner)?;
            Operator::Nop
                .check_operand(&inner.ty)
                .map_err(operator_error)?;
            ExprInfo {
                ty: Operator::Nop.result_type(&inner.ty),
                is_constant: inner.is_constant,
                is_assignable: false,
            }
        }
        ExprKind::Unary { operator, operand } => {
            let negated = *operator == Operator::Neg;
            let operand = check_expr_inner(type_checker, ctx, operand, negated)?;
            operator.check_operand(&operand.ty).map_err(operator_error)?;
            ExprInfo {
                ty: operator.result_type(&operand.ty),
                is_constant: operand.is_constant,
                is_assignable: false,
            }
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left = check_expr(type_checker, ctx, left)?;
            let right = check_expr(type_checker, ctx, right)?;
            operator
                .check_operands(&left.ty, &right.ty)
                .map_err(operator_error)?;
            ExprInfo {
                ty: operator.result_type(&left.ty),
                is_constant: left.is_constant && right.is_constant,
                is_assignable: false,
            }
        }
        ExprKind::Call {
            callee,
            arguments,
            function,
        } => {
            let (function_id, return_type) =
                check_call(type_checker, ctx, callee, arguments, id, &span)?;
            *function = Some(function_id);
            ExprInfo {
                ty: return_type,
                is_constant: false,
                is_assignable: false,
            }
        }
    };

    expr.info = Some(info.clone());
    Ok(info)
}
