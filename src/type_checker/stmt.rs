use crate::{
    ast::{
        ast::NodeId,
        expressions::Expr,
        statements::{Block, BlockItem, Stmt, StmtKind},
        types::{BasicType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    expr::{check_expr, check_lvalue},
    type_checker::{check_decl, CheckingContext, TypeChecker},
};

fn check_condition(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    condition: &mut Expr,
) -> Result<(), Error> {
    let info = check_expr(type_checker, ctx, condition)?;
    let expected = Type::scalar(BasicType::Bool);

    if info.ty != expected {
        return Err(Error::at_node(
            ErrorImpl::TypeMismatch {
                expected: expected.to_string(),
                received: info.ty.to_string(),
            },
            condition.id,
            &condition.span,
        ));
    }

    Ok(())
}

fn loop_target(ctx: &CheckingContext, statement: &str, id: NodeId, span: &Span) -> Result<NodeId, Error> {
    ctx.loop_stack.last().copied().ok_or_else(|| {
        Error::at_node(
            ErrorImpl::ControlFlowOutsideLoop {
                statement: statement.to_string(),
            },
            id,
            span,
        )
    })
}

fn check_return(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    value: Option<&mut Expr>,
    id: NodeId,
    span: &Span,
) -> Result<(), Error> {
    // The parser only produces returns inside function bodies.
    let Some(function) = ctx.current_function else {
        return Err(Error::at_node(
            ErrorImpl::UnexpectedTokenDetailed {
                token: String::from("return"),
                message: String::from("return outside of a function"),
            },
            id,
            span,
        ));
    };
    let expected = type_checker.registry.function(function).return_type.clone();

    let mismatch = |received: String, id: NodeId, span: &Span| {
        Error::at_node(
            ErrorImpl::ReturnTypeMismatch {
                expected: expected.to_string(),
                received,
            },
            id,
            span,
        )
    };

    match value {
        None if expected.basic_type == BasicType::Void => Ok(()),
        None => Err(mismatch(String::from("void"), id, span)),
        Some(value) => {
            let info = check_expr(type_checker, ctx, value)?;

            if expected.basic_type == BasicType::Void || info.ty != expected {
                return Err(mismatch(info.ty.to_string(), value.id, &value.span));
            }
            Ok(())
        }
    }
}

/// Checks a statement and returns whether it returns on every path.
pub fn check_stmt(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    stmt: &mut Stmt,
) -> Result<bool, Error> {
    let id = stmt.id;
    let span = stmt.span.clone();

    let has_return = match &mut stmt.kind {
        StmtKind::Assign { target, value } => {
            let target_type = check_lvalue(type_checker, ctx, target)?;

            if !target.assignable {
                return Err(Error::at_node(
                    ErrorImpl::InvalidAssignmentTarget {
                        variable: target.name.clone(),
                    },
                    target.id,
                    &target.span,
                ));
            }

            let info = check_expr(type_checker, ctx, value)?;
            if info.ty != target_type {
                return Err(Error::at_node(
                    ErrorImpl::TypeMismatch {
                        expected: target_type.to_string(),
                        received: info.ty.to_string(),
                    },
                    value.id,
                    &value.span,
                ));
            }

            false
        }
        StmtKind::Expr(expr) => {
            if let Some(expr) = expr {
                check_expr(type_checker, ctx, expr)?;
            }
            false
        }
        StmtKind::Block(block) => check_block(type_checker, ctx, block)?,
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            check_condition(type_checker, ctx, condition)?;
            let then_returns = check_stmt(type_checker, ctx, then_branch)?;

            match else_branch {
                Some(else_branch) => {
                    let else_returns = check_stmt(type_checker, ctx, else_branch)?;
                    then_returns && else_returns
                }
                None => false,
            }
        }
        StmtKind::While { condition, body } => {
            check_condition(type_checker, ctx, condition)?;

            tracing::trace!(%id, "enter loop");
            type_checker.in_loop(ctx, id, |type_checker, ctx| {
                check_stmt(type_checker, ctx, body)
            })?;
            tracing::trace!(%id, "leave loop");

            false
        }
        StmtKind::Break { target } => {
            let loop_id = loop_target(ctx, "break", id, &span)?;
            *target = Some(loop_id);
            tracing::debug!(%id, target = %loop_id, "linked break");
            false
        }
        StmtKind::Continue { target } => {
            let loop_id = loop_target(ctx, "continue", id, &span)?;
            *target = Some(loop_id);
            tracing::debug!(%id, target = %loop_id, "linked continue");
            false
        }
        StmtKind::Return { value, function } => {
            check_return(type_checker, ctx, value.as_mut(), id, &span)?;
            *function = ctx.current_function;
            true
        }
    };

    stmt.has_return = has_return;
    Ok(has_return)
}

/// Checks a block in a fresh child scope.
///
/// A block returns on every path when any of its statements does.
pub fn check_block(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    block: &mut Block,
) -> Result<bool, Error> {
    let (scope, has_return) = type_checker.in_scope(ctx, |type_checker, ctx| {
        let mut has_return = false;

        for item in block.items.iter_mut() {
            match item {
                BlockItem::Decl(decl) => check_decl(type_checker, ctx, decl)?,
                BlockItem::Stmt(stmt) => has_return |= check_stmt(type_checker, ctx, stmt)?,
            }
        }

        Ok(has_return)
    })?;

    block.scope = Some(scope);
    block.has_return = has_return;
    Ok(has_return)
}
