use crate::{
    ast::{
        ast::Item,
        expressions::{Expr, ExprKind},
        statements::{
            Block, BlockItem, Decl, DimLiteral, FuncDef, FuncParam, InitVal, InitValKind, Stmt,
            StmtKind, VarDef,
        },
        types::BasicType,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

fn parse_basic_type(parser: &mut Parser, allow_void: bool) -> Result<BasicType, Error> {
    let basic_type = match parser.current_token_kind() {
        TokenKind::Int32 => BasicType::Int32,
        TokenKind::Bool => BasicType::Bool,
        TokenKind::Float => BasicType::Float,
        TokenKind::Double => BasicType::Double,
        TokenKind::Void if allow_void => BasicType::Void,
        _ => return Err(parser.unexpected("expected a type")),
    };

    parser.advance();
    Ok(basic_type)
}

fn parse_identifier(parser: &mut Parser, context: &str) -> Result<String, Error> {
    let error = parser.unexpected(&format!("expected identifier {}", context));
    Ok(parser.expect_error(TokenKind::Identifier, Some(error))?.value)
}

/// A top-level declaration or function definition.
pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    let kind = parser.current_token_kind();

    let is_function = kind == TokenKind::Void
        || (kind.is_data_type()
            && parser.peek_kind(1) == TokenKind::Identifier
            && parser.peek_kind(2) == TokenKind::OpenParen);

    if is_function {
        Ok(Item::FuncDef(parse_func_def(parser)?))
    } else if kind == TokenKind::Const || kind.is_data_type() {
        Ok(Item::Decl(parse_decl(parser)?))
    } else {
        Err(parser.unexpected("expected a declaration or function definition"))
    }
}

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.get_position();

    let is_constant = parser.current_token_kind() == TokenKind::Const;
    if is_constant {
        parser.advance();
    }

    let basic_type = parse_basic_type(parser, false)?;

    let mut defs = vec![parse_var_def(parser, is_constant)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        defs.push(parse_var_def(parser, is_constant)?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Decl {
        id: parser.advance_id(),
        is_constant,
        basic_type,
        defs,
        span: parser.span_from(start),
    })
}

fn parse_var_def(parser: &mut Parser, is_constant: bool) -> Result<VarDef, Error> {
    let start = parser.get_position();
    let name = parse_identifier(parser, "during variable declaration")?;

    let mut dims = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        dims.push(parse_dim_literal(parser)?);
        parser.expect(TokenKind::CloseBracket)?;
    }

    let init = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_init_val(parser)?)
    } else if is_constant {
        return Err(parser.unexpected("expected rhs in constant definition"));
    } else {
        None
    };

    Ok(VarDef {
        id: parser.advance_id(),
        name,
        dims,
        init,
        span: parser.span_from(start),
        symbol: None,
    })
}

/// An integer literal between brackets, optionally negated.
fn parse_dim_literal(parser: &mut Parser) -> Result<DimLiteral, Error> {
    let start = parser.get_position();

    let negative = parser.current_token_kind() == TokenKind::Dash;
    if negative {
        parser.advance();
    }

    if parser.current_token_kind() != TokenKind::IntegerConstant {
        return Err(parser.unexpected("array dimensions must be integer literals"));
    }
    let digits = parser.advance().value.clone();

    Ok(DimLiteral {
        text: if negative { format!("-{}", digits) } else { digits },
        span: parser.span_from(start),
    })
}

pub fn parse_init_val(parser: &mut Parser) -> Result<InitVal, Error> {
    let start = parser.get_position();

    let kind = if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.advance();

        let mut children = vec![];
        if parser.current_token_kind() != TokenKind::CloseCurly {
            loop {
                children.push(parse_init_val(parser)?);

                if parser.current_token_kind() != TokenKind::Comma {
                    break;
                }
                parser.advance();
            }
        }

        parser.expect(TokenKind::CloseCurly)?;
        InitValKind::List(children)
    } else {
        InitValKind::Expr(parse_expr(parser, BindingPower::Default)?)
    };

    Ok(InitVal {
        id: parser.advance_id(),
        kind,
        span: parser.span_from(start),
    })
}

pub fn parse_func_def(parser: &mut Parser) -> Result<FuncDef, Error> {
    let start = parser.get_position();

    let return_type = parse_basic_type(parser, true)?;
    let name = parse_identifier(parser, "after function return type")?;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parse_func_param(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FuncDef {
        id: parser.advance_id(),
        name,
        return_type,
        params,
        body,
        span: parser.span_from(start),
        function: None,
        scope: None,
    })
}

fn parse_func_param(parser: &mut Parser) -> Result<FuncParam, Error> {
    let start = parser.get_position();

    let basic_type = parse_basic_type(parser, false)?;
    let name = parse_identifier(parser, "in parameter list")?;

    let mut unsized_first_dim = false;
    let mut dims = vec![];

    // Only the first bracket pair may be left empty
    if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseBracket {
            unsized_first_dim = true;
        } else {
            dims.push(parse_dim_literal(parser)?);
        }
        parser.expect(TokenKind::CloseBracket)?;

        while parser.current_token_kind() == TokenKind::OpenBracket {
            parser.advance();
            dims.push(parse_dim_literal(parser)?);
            parser.expect(TokenKind::CloseBracket)?;
        }
    }

    Ok(FuncParam {
        id: parser.advance_id(),
        name,
        basic_type,
        unsized_first_dim,
        dims,
        span: parser.span_from(start),
        symbol: None,
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let mut items = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        let kind = parser.current_token_kind();

        if kind == TokenKind::Const || kind.is_data_type() {
            items.push(BlockItem::Decl(parse_decl(parser)?));
        } else {
            items.push(BlockItem::Stmt(parse_stmt(parser)?));
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        id: parser.advance_id(),
        items,
        span: parser.span_from(start),
        scope: None,
        has_return: false,
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => parse_expr_stmt(parser),
    }
}

/// `expr;` or `lvalue = expr;`.
fn parse_expr_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Stmt::new(
            parser.advance_id(),
            StmtKind::Expr(Some(expr)),
            parser.span_from(start),
        ));
    }

    let target = match expr.kind {
        ExprKind::LValue(lvalue) => lvalue,
        _ => return Err(parser.unexpected("left side of an assignment must be a variable")),
    };
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Assign { target, value },
        parser.span_from(start),
    ))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Expr(None),
        parser.span_from(start),
    ))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let block = parse_block(parser)?;

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Block(block),
        parser.span_from(start),
    ))
}

fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let then_branch = Box::new(parse_stmt(parser)?);

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        },
        parser.span_from(start),
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::While { condition, body },
        parser.span_from(start),
    ))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Break { target: None },
        parser.span_from(start),
    ))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Continue { target: None },
        parser.span_from(start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        parser.advance_id(),
        StmtKind::Return {
            value,
            function: None,
        },
        parser.span_from(start),
    ))
}
