
use crate::{
    array::{
        Array,
        arith::{self, ArithOutput, Rhs},
    },
    error::IndexError,
    index::TypedIndex,
    scalar::Scalar,
};
use std::fmt;

///
/// ArithOp / CmpOp
///
/// The closed operator sets dispatched over indexes.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    DivMod,
}

impl ArithOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::FloorDiv => "floordiv",
            Self::Mod => "mod",
            Self::Pow => "pow",
            Self::DivMod => "divmod",
        }
    }

    /// Commutative operators may be re-rooted on the more specific operand.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CmpOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Ge => "ge",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Series
///
/// Named one-dimensional values; the aligned counterpart an index meets in
/// binary operations.
///

#[derive(Clone, Debug)]
pub struct Series {
    pub values: Array,
    pub name: Option<String>,
}

impl Series {
    #[must_use]
    pub const fn new(values: Array, name: Option<String>) -> Self {
        Self { values, name }
    }
}

///
/// Operand
///
/// Right-hand side of a binary operation rooted on an index.
///

#[derive(Clone, Debug)]
pub enum Operand {
    Index(TypedIndex),
    Series(Series),
    Array(Array),
    Scalar(Scalar),
}

///
/// ArithResult
///
/// Arithmetic yields one index, or the quotient/remainder pair for divmod.
///

#[derive(Clone, Debug)]
pub enum ArithResult {
    Index(TypedIndex),
    Pair(TypedIndex, TypedIndex),
}

/// Binary arithmetic rooted on an index. Resolution is two-phase: a
/// commutative operation against a strictly more specific arithmetic-capable
/// index is re-rooted on that operand; otherwise the left index must itself
/// support arithmetic. Evaluation is element-wise through the array kernel.
pub fn arithmetic(
    op: ArithOp,
    lhs: &TypedIndex,
    other: &Operand,
) -> Result<ArithResult, IndexError> {
    let rhs_index = match other {
        Operand::Index(ix) => Some(ix),
        _ => None,
    };

    let defer = rhs_index.is_some_and(|rhs| {
        op.is_commutative()
            && rhs.kind().specificity() > lhs.kind().specificity()
            && rhs.kind().supports_arithmetic()
    });

    if !defer && !lhs.kind().supports_arithmetic() {
        return Err(IndexError::UnsupportedOperation {
            op: op.as_str(),
            index_type: lhs.kind().type_name(),
        });
    }

    let output = if let (true, Some(rhs)) = (defer, rhs_index) {
        arith::arith(rhs.data(), op, &Rhs::Array(lhs.data()))
    } else {
        arith::arith(lhs.data(), op, &operand_rhs(other))
    }?;

    let name = result_name(lhs, other);
    Ok(match output {
        ArithOutput::One(a) => ArithResult::Index(wrap(a, name)),
        ArithOutput::Pair(a, b) => ArithResult::Pair(wrap(a, name.clone()), wrap(b, name)),
    })
}

/// Element-wise comparison rooted on an index. Always evaluates eagerly and
/// returns the raw mask; comparison never re-roots on the other operand.
pub fn compare(op: CmpOp, lhs: &TypedIndex, other: &Operand) -> Result<Vec<bool>, IndexError> {
    arith::compare(lhs.data(), op, &operand_rhs(other))
}

fn operand_rhs(other: &Operand) -> Rhs<'_> {
    match other {
        Operand::Index(ix) => Rhs::Array(ix.data()),
        Operand::Series(s) => Rhs::Array(&s.values),
        Operand::Array(a) => Rhs::Array(a),
        Operand::Scalar(s) => Rhs::Scalar(s),
    }
}

fn wrap(array: Array, name: Option<String>) -> TypedIndex {
    TypedIndex::from_array(array).rename(name)
}

/// Name reconciliation: named operands must agree for the name to survive;
/// bare arrays and scalars carry no name and leave the index's name intact.
fn result_name(lhs: &TypedIndex, other: &Operand) -> Option<String> {
    let other_name = match other {
        Operand::Index(ix) => ix.name(),
        Operand::Series(s) => s.name.as_deref(),
        Operand::Array(_) | Operand::Scalar(_) => return lhs.name().map(str::to_string),
    };

    match (lhs.name(), other_name) {
        (Some(a), Some(b)) if a == b => Some(a.to_string()),
        _ => None,
    }
}
