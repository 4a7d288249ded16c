/// Logical connectives joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

/// Comparisons available on string fields.
///
/// There is no "not equal" member: `!=` and `!~` are expressed by setting
/// `is_negative` on an `Eq` or `Match` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOp {
    /// Equal (`==`)
    Eq,
    /// Regular expression search (`~`)
    Match,
}

/// Comparisons available on numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOp {
    /// Equal (`==`)
    Eq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Ge,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Le,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

impl StringOp {
    /// Symbol for the operator, taking negation into account.
    pub fn symbol(self, negated: bool) -> &'static str {
        match (self, negated) {
            (StringOp::Eq, false) => "==",
            (StringOp::Eq, true) => "!=",
            (StringOp::Match, false) => "~",
            (StringOp::Match, true) => "!~",
        }
    }
}

impl NumberOp {
    pub fn symbol(self) -> &'static str {
        match self {
            NumberOp::Eq => "==",
            NumberOp::Gt => ">",
            NumberOp::Ge => ">=",
            NumberOp::Lt => "<",
            NumberOp::Le => "<=",
        }
    }

    /// Applies the comparison to two already-coerced numbers.
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            NumberOp::Eq => left == right,
            NumberOp::Gt => left > right,
            NumberOp::Ge => left >= right,
            NumberOp::Lt => left < right,
            NumberOp::Le => left <= right,
        }
    }
}
