//! Arithmetic argument expressions.
//!
//! Expressions are folded to a single `f64` when a command is built, so a
//! [`Command`](super::Command) only ever carries evaluated numbers.

use crate::errors::{Result, TurtilleError};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64> {
        Ok(match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => {
                if rhs == 0.0 {
                    return Err(TurtilleError::Arithmetic {
                        reason: "division by zero",
                    });
                }
                lhs / rhs
            }
        })
    }
}

impl TryFrom<&str> for Op {
    type Error = ();

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            "+" => Op::Add,
            "-" => Op::Sub,
            "*" => Op::Mul,
            "/" => Op::Div,
            _ => return Err(()),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary(Box<Expr>, Op, Box<Expr>),
}

impl Expr {
    pub fn binary(lhs: Expr, op: Op, rhs: Expr) -> Self {
        Expr::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    /// Every intermediate value must stay finite; `inf` has no spelling in the grammar.
    pub fn eval(&self) -> Result<f64> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Binary(lhs, op, rhs) => op.apply(lhs.eval()?, rhs.eval()?)?,
        };
        if !value.is_finite() {
            return Err(TurtilleError::Arithmetic { reason: "number out of range" });
        }
        Ok(value)
    }
}
