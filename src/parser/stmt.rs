use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            BlockStmt, EmptyStmt, ExpressionStmt, ForStmt, IfStmt, ReadStmt, VarDeclStmt,
            WhileStmt, WriteStmt,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expr.get_span().start.clone(),
            end: parser.get_previous_end(),
        },
        expression: expr,
    }))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    Ok(Stmt::Empty(EmptyStmt { span }))
}

/// Parses a comma separated, non-empty list of identifiers.
fn parse_identifier_list(parser: &mut Parser, context: &str) -> Result<Vec<String>, Error> {
    let mut identifiers = vec![];

    loop {
        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: format!("expected identifier during {}", context),
            },
            parser.get_position(),
        );
        identifiers.push(parser.expect_error(TokenKind::Identifier, Some(error))?.value);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(identifiers)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();
    let var_type = match start_token.kind {
        TokenKind::Int => Type::Int,
        TokenKind::Float => Type::Float,
        TokenKind::Bool => Type::Bool,
        _ => Type::String,
    };

    let identifiers = parse_identifier_list(parser, "variable declaration")?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.get_previous_end()
        },
        var_type,
        identifiers,
    }))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let identifiers = parse_identifier_list(parser, "read")?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Read(ReadStmt {
        identifiers,
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut expressions = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        expressions.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Write(WriteStmt {
        expressions,
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(Error::new(ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected `}` to close the block")
            }, parser.get_position()));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Block(BlockStmt {
        body: statements,
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}

/// Parses `( expression )` as used by `if` and `while`.
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body: Box::new(then_body),
        else_body,
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let init = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let step = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::For(ForStmt {
        init,
        condition,
        step,
        body: Box::new(body),
        span: Span {
            start,
            end: parser.get_previous_end()
        }
    }))
}
