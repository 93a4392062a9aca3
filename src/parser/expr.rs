use crate::{
    ast::expressions::{Expr, ExprKind, LValue, NumberKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    type_checker::operators::Operator,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("expected an expression")),
    };

    let mut left = nud(parser)?;

    // Keep extending the left side while the next operator binds tighter
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => break,
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::IntegerConstant => NumberKind::Integer,
        TokenKind::FloatConstant => NumberKind::Float,
        TokenKind::DoubleConstant => NumberKind::Double,
        _ => {
            return Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Number {
            text: token.value,
            kind,
        },
        token.span,
    ))
}

pub fn parse_bool_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Bool(token.kind == TokenKind::True),
        token.span,
    ))
}

/// `name`, `name[i]...` or `name(args...)`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.advance().clone();

    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();

        let mut arguments = vec![];
        if parser.current_token_kind() != TokenKind::CloseParen {
            loop {
                arguments.push(parse_expr(parser, BindingPower::Default)?);

                if parser.current_token_kind() != TokenKind::Comma {
                    break;
                }
                parser.advance();
            }
        }

        parser.expect(TokenKind::CloseParen)?;

        return Ok(Expr::new(
            parser.advance_id(),
            ExprKind::Call {
                callee: name.value,
                arguments,
                function: None,
            },
            parser.span_from(name.span.start),
        ));
    }

    let mut indices = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        indices.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect(TokenKind::CloseBracket)?;
    }

    let span = parser.span_from(name.span.start);
    let lvalue = LValue::new(parser.advance_id(), name.value, indices, span.clone());

    Ok(Expr::new(parser.advance_id(), ExprKind::LValue(lvalue), span))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = Operator::from_prefix_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        parser.span_from(operator_token.span.start),
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Paren(Box::new(inner)),
        parser.span_from(start),
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = Operator::from_infix_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;
    let span = Span::between(&left.span, &right.span);

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}
