use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, BinaryOperator, BooleanExpr, FloatExpr, GroupingExpr,
            IntegerExpr, PrefixExpr, PrefixOperator, StringExpr, SymbolExpr, TernaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() },
                    parser.get_position(),
                ))
            }
        };

        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Integer => {
            let value = token.value.parse::<i32>().map_err(|_| {
                Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())
            })?;
            parser.advance();
            Ok(Expr::Integer(IntegerExpr { value, span: token.span }))
        }
        TokenKind::FloatLiteral => {
            let value = token.value.parse::<f32>().map_err(|_| {
                Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())
            })?;
            parser.advance();
            Ok(Expr::Float(FloatExpr { value, text: token.value, span: token.span }))
        }
        TokenKind::True | TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(BooleanExpr { value: token.kind == TokenKind::True, span: token.span }))
        }
        TokenKind::String => {
            parser.advance();
            Ok(Expr::String(StringExpr { value: token.value, span: token.span }))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::Symbol(SymbolExpr { value: token.value, span: token.span }))
        }
        _ => Err(Error::new(ErrorImpl::UnexpectedToken { token: token.value }, token.span.start)),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Dash => Some(BinaryOperator::Subtract),
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Percent => Some(BinaryOperator::Modulo),
        TokenKind::Dot => Some(BinaryOperator::Concat),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::Equals => Some(BinaryOperator::Equal),
        TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = binary_operator(operator_token.kind).ok_or_else(|| {
        Error::new(ErrorImpl::UnexpectedToken { token: operator_token.value.clone() }, operator_token.span.start.clone())
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone()
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = if operator_token.kind == TokenKind::Not {
        PrefixOperator::Not
    } else {
        PrefixOperator::Minus
    };
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone()
        },
        operator,
        right_expr: Box::new(rhs)
    }))
}

/// Assignment is right associative, so the value is parsed below assignment precedence.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let assignee = match &left {
        Expr::Symbol(symbol) => symbol.value.clone(),
        _ => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget { target: left.to_string() },
                left.get_span().start.clone(),
            ))
        }
    };

    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: rhs.get_span().end.clone()
        },
        assignee,
        value: Box::new(rhs),
    }))
}

/// `condition ? then : else`, right associative.
pub fn parse_ternary_expr(parser: &mut Parser, condition: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let then_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let else_expr = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::Ternary(TernaryExpr {
        span: Span {
            start: condition.get_span().start.clone(),
            end: else_expr.get_span().end.clone()
        },
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseParen)?.span.end;

    Ok(Expr::Grouping(GroupingExpr {
        expression: Box::new(expression),
        span: Span { start, end },
    }))
}
