//! Sandboxed arithmetic evaluator.
//!
//! This is an allow-list interpreter, not a filter in front of a general
//! evaluator: the tokenizer and parser can only produce numeric literals,
//! parentheses, and a fixed operator set, so no attacker-controlled input
//! can ever reach a general-purpose evaluation primitive. Everything else
//! fails closed.
//!
//! Accepted constructs:
//! - binary arithmetic: `+ - * / // % **`
//! - bitwise: `| & ^ << >>`
//! - unary: `+ -`
//! - integer and float literals, parentheses
//!
//! Semantics follow the conventional school-calculator rules: `/` is true
//! division (always float), `//` and `%` floor toward negative infinity,
//! `**` is right-associative and binds tighter than unary minus on its
//! left (`-2**2 == -4`). Division by zero, integer overflow, and bitwise
//! operations on floats surface as [`EvalError::Arithmetic`]; the solve
//! pipeline recovers those into a textual non-answer.
//!
//! Parser recursion is capped at [`MAX_DEPTH`] so adversarial nesting
//! cannot exhaust the stack.

use std::fmt;

use crate::error::EvalError;

/// Maximum parenthesis/operator nesting depth accepted by the parser.
pub const MAX_DEPTH: usize = 100;

/// A computed numeric value, integer where possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a float, for mixed-type arithmetic.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(&self) -> bool {
        match *self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            // Keep a trailing ".0" on whole floats so the answer reads as
            // the float it is (true division never collapses back to int).
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{:.1}", v)
            }
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    Pipe,
    Amp,
    Caret,
    Shl,
    Shr,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Num(parse_number(&literal)?));
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::StarStar);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    tokens.push(Token::SlashSlash);
                } else {
                    tokens.push(Token::Slash);
                }
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'<') {
                    chars.next();
                    tokens.push(Token::Shl);
                } else {
                    return Err(EvalError::UnsupportedOp("comparison".to_string()));
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'>') {
                    chars.next();
                    tokens.push(Token::Shr);
                } else {
                    return Err(EvalError::UnsupportedOp("comparison".to_string()));
                }
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '&' => {
                chars.next();
                tokens.push(Token::Amp);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(EvalError::UnsupportedToken(other.to_string())),
        }
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Number, EvalError> {
    if literal.contains('.') {
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| EvalError::UnsupportedToken(literal.to_string()))
    } else if let Ok(i) = literal.parse::<i64>() {
        Ok(Number::Int(i))
    } else {
        // Integer literal wider than i64: fall back to float magnitude.
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| EvalError::UnsupportedToken(literal.to_string()))
    }
}

// ============================================================================
// Parser
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy)]
enum UnaryOp {
    Pos,
    Neg,
}

/// Private syntax tree; only allow-listed shapes are constructible.
#[derive(Debug)]
enum Expr {
    Num(Number),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn check_depth(depth: usize) -> Result<(), EvalError> {
        if depth > MAX_DEPTH {
            Err(EvalError::TooDeep)
        } else {
            Ok(())
        }
    }

    // Precedence, loosest first: | ^ & shifts +- */ unary ** atom.

    fn parse_expr(&mut self, depth: usize) -> Result<Expr, EvalError> {
        Self::check_depth(depth)?;
        let mut lhs = self.parse_xor(depth)?;
        while self.eat(Token::Pipe) {
            let rhs = self.parse_xor(depth)?;
            lhs = Expr::Binary(BinOp::BitOr, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_xor(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_and(depth)?;
        while self.eat(Token::Caret) {
            let rhs = self.parse_and(depth)?;
            lhs = Expr::Binary(BinOp::BitXor, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_shift(depth)?;
        while self.eat(Token::Amp) {
            let rhs = self.parse_shift(depth)?;
            lhs = Expr::Binary(BinOp::BitAnd, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_shift(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_additive(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Shl) => BinOp::Shl,
                Some(Token::Shr) => BinOp::Shr,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_additive(depth)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_term(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term(depth)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_unary(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::SlashSlash) => BinOp::FloorDiv,
                Some(Token::Percent) => BinOp::Mod,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary(depth)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self, depth: usize) -> Result<Expr, EvalError> {
        Self::check_depth(depth)?;
        match self.peek() {
            Some(Token::Plus) => {
                self.bump();
                let operand = self.parse_unary(depth + 1)?;
                Ok(Expr::Unary(UnaryOp::Pos, Box::new(operand)))
            }
            Some(Token::Minus) => {
                self.bump();
                let operand = self.parse_unary(depth + 1)?;
                Ok(Expr::Unary(UnaryOp::Neg, Box::new(operand)))
            }
            _ => self.parse_power(depth),
        }
    }

    fn parse_power(&mut self, depth: usize) -> Result<Expr, EvalError> {
        let base = self.parse_atom(depth)?;
        if self.eat(Token::StarStar) {
            // Right-associative; the exponent may carry its own unary sign.
            let exponent = self.parse_unary(depth + 1)?;
            Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn parse_atom(&mut self, depth: usize) -> Result<Expr, EvalError> {
        match self.bump() {
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::LParen) => {
                let inner = self.parse_expr(depth + 1)?;
                if self.eat(Token::RParen) {
                    Ok(inner)
                } else {
                    Err(EvalError::UnsupportedOp("unbalanced parenthesis".to_string()))
                }
            }
            Some(other) => Err(EvalError::UnsupportedOp(format!(
                "unexpected {:?} where a value was required",
                other
            ))),
            None => Err(EvalError::UnsupportedOp(
                "expression ended where a value was required".to_string(),
            )),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

fn arithmetic<T>(msg: &str) -> Result<T, EvalError> {
    Err(EvalError::Arithmetic(msg.to_string()))
}

fn both_ints(a: Number, b: Number) -> Option<(i64, i64)> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Some((x, y)),
        _ => None,
    }
}

fn eval_binary(op: BinOp, a: Number, b: Number) -> Result<Number, EvalError> {
    match op {
        BinOp::Add => match both_ints(a, b) {
            Some((x, y)) => x
                .checked_add(y)
                .map(Number::Int)
                .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string())),
            None => Ok(Number::Float(a.as_f64() + b.as_f64())),
        },
        BinOp::Sub => match both_ints(a, b) {
            Some((x, y)) => x
                .checked_sub(y)
                .map(Number::Int)
                .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string())),
            None => Ok(Number::Float(a.as_f64() - b.as_f64())),
        },
        BinOp::Mul => match both_ints(a, b) {
            Some((x, y)) => x
                .checked_mul(y)
                .map(Number::Int)
                .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string())),
            None => Ok(Number::Float(a.as_f64() * b.as_f64())),
        },
        BinOp::Div => {
            if b.is_zero() {
                return arithmetic("division by zero");
            }
            Ok(Number::Float(a.as_f64() / b.as_f64()))
        }
        BinOp::FloorDiv => {
            if b.is_zero() {
                return arithmetic("division by zero");
            }
            match both_ints(a, b) {
                Some((x, y)) => {
                    let q = x
                        .checked_div(y)
                        .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string()))?;
                    let r = x % y;
                    // Floor toward negative infinity, not toward zero.
                    if r != 0 && (r < 0) != (y < 0) {
                        Ok(Number::Int(q - 1))
                    } else {
                        Ok(Number::Int(q))
                    }
                }
                None => Ok(Number::Float((a.as_f64() / b.as_f64()).floor())),
            }
        }
        BinOp::Mod => {
            if b.is_zero() {
                return arithmetic("modulo by zero");
            }
            match both_ints(a, b) {
                Some((x, y)) => {
                    if x == i64::MIN && y == -1 {
                        return arithmetic("integer overflow");
                    }
                    let r = x % y;
                    // Result takes the sign of the divisor.
                    if r != 0 && (r < 0) != (y < 0) {
                        Ok(Number::Int(r + y))
                    } else {
                        Ok(Number::Int(r))
                    }
                }
                None => {
                    let (x, y) = (a.as_f64(), b.as_f64());
                    Ok(Number::Float(x - y * (x / y).floor()))
                }
            }
        }
        BinOp::Pow => eval_pow(a, b),
        BinOp::BitOr => match both_ints(a, b) {
            Some((x, y)) => Ok(Number::Int(x | y)),
            None => arithmetic("bitwise operator requires integers"),
        },
        BinOp::BitXor => match both_ints(a, b) {
            Some((x, y)) => Ok(Number::Int(x ^ y)),
            None => arithmetic("bitwise operator requires integers"),
        },
        BinOp::BitAnd => match both_ints(a, b) {
            Some((x, y)) => Ok(Number::Int(x & y)),
            None => arithmetic("bitwise operator requires integers"),
        },
        BinOp::Shl => match both_ints(a, b) {
            Some((x, y)) => {
                if y < 0 {
                    return arithmetic("negative shift count");
                }
                if y >= 64 {
                    return arithmetic("shift overflow");
                }
                let shifted = x.wrapping_shl(y as u32);
                if (shifted >> y) != x {
                    return arithmetic("shift overflow");
                }
                Ok(Number::Int(shifted))
            }
            None => arithmetic("shift requires integers"),
        },
        BinOp::Shr => match both_ints(a, b) {
            Some((x, y)) => {
                if y < 0 {
                    return arithmetic("negative shift count");
                }
                if y >= 64 {
                    // All value bits shifted out; only the sign remains.
                    return Ok(Number::Int(if x < 0 { -1 } else { 0 }));
                }
                Ok(Number::Int(x >> y))
            }
            None => arithmetic("shift requires integers"),
        },
    }
}

fn eval_pow(base: Number, exp: Number) -> Result<Number, EvalError> {
    if let Some((b, e)) = both_ints(base, exp) {
        if e >= 0 {
            let e32 = u32::try_from(e)
                .map_err(|_| EvalError::Arithmetic("integer overflow".to_string()))?;
            return b
                .checked_pow(e32)
                .map(Number::Int)
                .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string()));
        }
        if b == 0 {
            return arithmetic("zero raised to a negative power");
        }
        return Ok(Number::Float((b as f64).powf(e as f64)));
    }

    if base.is_zero() && exp.as_f64() < 0.0 {
        return arithmetic("zero raised to a negative power");
    }
    Ok(Number::Float(base.as_f64().powf(exp.as_f64())))
}

fn eval_expr(expr: &Expr) -> Result<Number, EvalError> {
    match expr {
        Expr::Num(n) => Ok(*n),
        Expr::Unary(UnaryOp::Pos, inner) => eval_expr(inner),
        Expr::Unary(UnaryOp::Neg, inner) => match eval_expr(inner)? {
            Number::Int(i) => i
                .checked_neg()
                .map(Number::Int)
                .ok_or_else(|| EvalError::Arithmetic("integer overflow".to_string())),
            Number::Float(f) => Ok(Number::Float(-f)),
        },
        Expr::Binary(op, lhs, rhs) => {
            let a = eval_expr(lhs)?;
            let b = eval_expr(rhs)?;
            eval_binary(*op, a, b)
        }
    }
}

/// Evaluate an arithmetic expression under the allow-list rules.
///
/// # Example
///
/// ```
/// use studyforge_llm::solve::{evaluate, Number};
///
/// assert_eq!(evaluate("12+4*3").unwrap(), Number::Int(24));
/// ```
pub fn evaluate(expression: &str) -> Result<Number, EvalError> {
    if expression.trim().is_empty() {
        return Err(EvalError::Empty);
    }

    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let tree = parser.parse_expr(0)?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::UnsupportedOp(
            "trailing input after expression".to_string(),
        ));
    }
    eval_expr(&tree)
}
