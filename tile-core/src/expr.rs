//! Expression engine
//!
//! Boolean expressions over input lanes. A tile evaluates its logic over the
//! three input sides (W, N, E); the lane index selects the physical wire but
//! not the evaluation input, so `w0` and `w1` both read the west input.

use std::fmt;

use crate::lane::Lane;

/// Boolean expression tree over input lanes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Input lane reference: `w0`
    Input(Lane),
    /// Negation: `~a`
    Not(Box<Expr>),
    /// Conjunction: `a & b`
    And(Box<Expr>, Box<Expr>),
    /// Disjunction: `a | b`
    Or(Box<Expr>, Box<Expr>),
    /// Exclusive or: `a ~= b`
    Xor(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn input(lane: Lane) -> Expr {
        Expr::Input(lane)
    }

    pub fn not(expr: Expr) -> Expr {
        Expr::Not(Box::new(expr))
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn xor(left: Expr, right: Expr) -> Expr {
        Expr::Xor(Box::new(left), Box::new(right))
    }

    /// Evaluate with `inputs` indexed by side: `[west, north, east]`.
    ///
    /// A south lane has no evaluation input and reads as false; validation
    /// rejects such expressions before they reach a tile.
    pub fn evaluate(&self, inputs: [bool; 3]) -> bool {
        match self {
            Expr::Input(lane) => lane
                .direction()
                .input_class()
                .map(|class| inputs[class])
                .unwrap_or(false),
            Expr::Not(inner) => !inner.evaluate(inputs),
            Expr::And(left, right) => left.evaluate(inputs) & right.evaluate(inputs),
            Expr::Or(left, right) => left.evaluate(inputs) | right.evaluate(inputs),
            Expr::Xor(left, right) => left.evaluate(inputs) != right.evaluate(inputs),
        }
    }

    /// Input lanes in first-occurrence order (left to right).
    ///
    /// Repeated references are kept as encountered.
    pub fn reachable_inputs(&self) -> Vec<Lane> {
        let mut lanes = Vec::new();
        self.collect_inputs(&mut lanes);
        lanes
    }

    fn collect_inputs(&self, lanes: &mut Vec<Lane>) {
        match self {
            Expr::Input(lane) => lanes.push(*lane),
            Expr::Not(inner) => inner.collect_inputs(lanes),
            Expr::And(left, right) | Expr::Or(left, right) | Expr::Xor(left, right) => {
                left.collect_inputs(lanes);
                right.collect_inputs(lanes);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Input(lane) => write!(f, "{}", lane),
            Expr::Not(inner) => write!(f, "~{}", inner),
            Expr::And(left, right) => write!(f, "({} & {})", left, right),
            Expr::Or(left, right) => write!(f, "({} | {})", left, right),
            Expr::Xor(left, right) => write!(f, "({} ~= {})", left, right),
        }
    }
}
