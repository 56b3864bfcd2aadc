//! The grammar's rule table.
//!
//! Each variant is one production (or the close-paren marker match) of the
//! recognized grammar, numbered 1 through 18. The numbers are the stable
//! names reported to observers and trace output; [`Rule::production`]
//! gives the rewritten form for human eyes.

/// One rule application: a stack rewrite plus, for rules whose leftmost
/// symbol is the matched terminal, a token advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// 1: `expr → relation expr'`
    Expr,
    /// 2: `expr' → logical-op relation expr'`
    ExprChain,
    /// 3: `expr' → ε`
    ExprEnd,
    /// 4: `relation → sum relation'`
    Relation,
    /// 5: `relation' → relational-op sum relation'`
    RelationChain,
    /// 6: `relation' → ε`
    RelationEnd,
    /// 7: `sum → product sum'`
    Sum,
    /// 8: `sum' → (+|-) product sum'`
    SumChain,
    /// 9: `sum' → ε`
    SumEnd,
    /// 10: `product → power product'`
    Product,
    /// 11: `product' → (*|/) power product'`
    ProductChain,
    /// 12: `product' → ε`
    ProductEnd,
    /// 13: `power → factor power'`
    Power,
    /// 14: `power' → (^) factor power'`
    PowerChain,
    /// 15: `power' → ε`
    PowerEnd,
    /// 16: `factor → number | identifier`
    Atom,
    /// 17: `factor → "(" expr ")"`
    Group,
    /// 18: the pending `)` marker matches the current token
    GroupClose,
}

impl Rule {
    /// Stable diagnostic name: the rule number.
    pub fn name(self) -> &'static str {
        match self {
            Self::Expr => "1",
            Self::ExprChain => "2",
            Self::ExprEnd => "3",
            Self::Relation => "4",
            Self::RelationChain => "5",
            Self::RelationEnd => "6",
            Self::Sum => "7",
            Self::SumChain => "8",
            Self::SumEnd => "9",
            Self::Product => "10",
            Self::ProductChain => "11",
            Self::ProductEnd => "12",
            Self::Power => "13",
            Self::PowerChain => "14",
            Self::PowerEnd => "15",
            Self::Atom => "16",
            Self::Group => "17",
            Self::GroupClose => "18",
        }
    }

    /// The production in human-readable form, for trace output.
    pub fn production(self) -> &'static str {
        match self {
            Self::Expr => "expr → relation expr'",
            Self::ExprChain => "expr' → logical-op relation expr'",
            Self::ExprEnd => "expr' → ε",
            Self::Relation => "relation → sum relation'",
            Self::RelationChain => "relation' → relational-op sum relation'",
            Self::RelationEnd => "relation' → ε",
            Self::Sum => "sum → product sum'",
            Self::SumChain => "sum' → (+|-) product sum'",
            Self::SumEnd => "sum' → ε",
            Self::Product => "product → power product'",
            Self::ProductChain => "product' → (*|/) power product'",
            Self::ProductEnd => "product' → ε",
            Self::Power => "power → factor power'",
            Self::PowerChain => "power' → (^) factor power'",
            Self::PowerEnd => "power' → ε",
            Self::Atom => "factor → number | identifier",
            Self::Group => "factor → \"(\" expr \")\"",
            Self::GroupClose => "match \")\"",
        }
    }
}
