//! Binary operators and their precedence ranks.
//!
//! The table is a `const` array; nothing mutates it after compilation.
//!
//! | Rank | Operators            |
//! |------|----------------------|
//! | 1    | `\|\|`               |
//! | 2    | `&&`                 |
//! | 3    | `==` `!=`            |
//! | 4    | `<` `<=` `>` `>=`    |
//! | 5    | `+` `-`              |
//! | 6    | `*` `/` `%`          |
//!
//! [`Operator::Stop`] has rank 0. The precedence climber returns it when no
//! operator follows an operand, which ends every climb.

use std::fmt;

/// A binary operator, or the [`Stop`](Operator::Stop) sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    /// No operator found; a parsing boundary.
    Stop,

    // Logical
    Or,
    And,

    // Equality
    Equal,
    NotEqual,

    // Relational
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,

    // Additive
    Plus,
    Minus,

    // Multiplicative
    Times,
    Divide,
    Remainder,
}

impl Operator {
    /// Every real operator in scan order.
    ///
    /// A one-character operator that is a prefix of a two-character operator
    /// (`<` and `<=`) comes first, so a scan that matches both keeps the
    /// longer one.
    pub const ALL: [Operator; 13] = [
        Operator::Or,
        Operator::And,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessOrEqual,
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Divide,
        Operator::Remainder,
    ];

    /// Source-level symbol. Empty for [`Operator::Stop`].
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Stop => "",
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }

    /// Precedence rank; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Stop => 0,
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => 3,
            Self::Less | Self::LessOrEqual | Self::Greater | Self::GreaterOrEqual => 4,
            Self::Plus | Self::Minus => 5,
            Self::Times | Self::Divide | Self::Remainder => 6,
        }
    }

    /// Number of characters in the symbol (1 or 2; 0 for `Stop`).
    #[inline]
    pub const fn symbol_len(self) -> usize {
        self.symbol().len()
    }

    pub fn first_char(self) -> Option<char> {
        self.symbol().chars().next()
    }

    pub fn second_char(self) -> Option<char> {
        self.symbol().chars().nth(1)
    }

    /// Operators whose symbol starts with `c`, in [`Operator::ALL`] order.
    pub fn starting_with(c: char) -> impl Iterator<Item = Operator> {
        Self::ALL
            .into_iter()
            .filter(move |op| op.first_char() == Some(c))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
