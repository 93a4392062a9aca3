//! Aggregate initializer validation.
//!
//! An initializer is checked against the declared type one dimension at a
//! time, starting from the outermost. Two spellings are accepted for an
//! array `T[d0][d1]...[dk-1]`:
//!
//! - properly nested lists, one brace level per dimension, where every
//!   outer list has exactly `d` entries and the innermost list may have
//!   fewer (the rest are zero);
//! - a flat list at the outermost level holding exactly `d0` scalars,
//!   which fill consecutive element slots.
//!
//! Partial flattening below the outermost level is rejected.

use crate::{
    ast::{
        ast::NodeId,
        statements::{InitVal, InitValKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    expr::check_expr,
    type_checker::{CheckingContext, TypeChecker},
};

fn mismatch(id: NodeId, span: &Span, depth: usize, reason: String) -> Error {
    Error::at_node(ErrorImpl::ArrayDimensionMismatch { depth, reason }, id, span)
}

/// Validates `init` against `target`, with `current_dim` dimensions
/// already consumed by enclosing braces.
pub fn check_initializer(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    init: &mut InitVal,
    target: &Type,
    current_dim: usize,
) -> Result<(), Error> {
    let type_dim = target.dim();
    let id = init.id;
    let span = init.span.clone();

    let children = match &mut init.kind {
        InitValKind::Expr(expr) => {
            if current_dim != type_dim {
                return Err(mismatch(
                    id,
                    &span,
                    current_dim,
                    format!("expected a braced list for `{}`, found a scalar", target),
                ));
            }

            let info = check_expr(type_checker, ctx, expr)?;

            let expected = Type::scalar(target.basic_type);
            if info.ty != expected {
                return Err(Error::at_node(
                    ErrorImpl::TypeMismatch {
                        expected: expected.to_string(),
                        received: info.ty.to_string(),
                    },
                    expr.id,
                    &expr.span,
                ));
            }
            if !info.is_constant {
                return Err(Error::at_node(ErrorImpl::NonConstantInitializer, expr.id, &expr.span));
            }

            return Ok(());
        }
        InitValKind::List(children) => children,
    };

    if current_dim >= type_dim {
        return Err(mismatch(
            id,
            &span,
            current_dim,
            format!("found a braced list where a `{}` scalar is expected", target.basic_type),
        ));
    }

    let count = children.len();
    let width = target.array_dims[current_dim] as usize;

    let flat = current_dim == 0 && count == width && children.iter().all(InitVal::is_scalar);

    let child_dim = if flat {
        type_dim
    } else {
        let too_many = count > width;
        let wrong_outer_width = current_dim + 1 < type_dim && count != width;

        if too_many || wrong_outer_width {
            let expected = if wrong_outer_width {
                format!("exactly {}", width)
            } else {
                format!("at most {}", width)
            };
            return Err(mismatch(
                id,
                &span,
                current_dim,
                format!("expected {} elements, found {}", expected, count),
            ));
        }

        current_dim + 1
    };

    for child in children.iter_mut() {
        check_initializer(type_checker, ctx, child, target, child_dim)?;
    }

    Ok(())
}
