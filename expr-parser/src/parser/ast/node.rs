use crate::parser::{
    ast::{iter::NodeIter, polynomial::Polynomial},
    fmt::{fmt_constant, fmt_constant_latex, fmt_pow, Latex},
    Precedence,
};
use std::{f64::consts::PI, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a node with exactly one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryKind {
    /// Negation, `-u`.
    Negate,

    /// Explicit parenthesization, `(u)`. Evaluates to its child; kept so that the tree displays
    /// the way it was written.
    Group,

    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,

    /// Base-10 logarithm.
    Log,

    /// Natural logarithm.
    Ln,

    /// Base-e exponential, `e^u`.
    Exp,

    Floor,
    Sqrt,
    Abs,

    /// `1/u`.
    Reciprocal,
}

impl UnaryKind {
    /// The function names recognized by the parser, paired with the kind they produce.
    pub const FUNCTIONS: [(&'static str, UnaryKind); 17] = [
        ("arcsin", UnaryKind::Asin),
        ("arccos", UnaryKind::Acos),
        ("arctan", UnaryKind::Atan),
        ("arccot", UnaryKind::Acot),
        ("arcsec", UnaryKind::Asec),
        ("arccsc", UnaryKind::Acsc),
        ("floor", UnaryKind::Floor),
        ("sqrt", UnaryKind::Sqrt),
        ("sin", UnaryKind::Sin),
        ("cos", UnaryKind::Cos),
        ("tan", UnaryKind::Tan),
        ("cot", UnaryKind::Cot),
        ("sec", UnaryKind::Sec),
        ("csc", UnaryKind::Csc),
        ("log", UnaryKind::Log),
        ("abs", UnaryKind::Abs),
        ("ln", UnaryKind::Ln),
    ];

    /// Returns the function with the given name, if there is one.
    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::FUNCTIONS
            .iter()
            .find(|(function, _)| *function == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns the name of this kind. For functions, this is the name used to call the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Negate => "neg",
            Self::Group => "group",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Asin => "arcsin",
            Self::Acos => "arccos",
            Self::Atan => "arctan",
            Self::Acot => "arccot",
            Self::Asec => "arcsec",
            Self::Acsc => "arccsc",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Floor => "floor",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Reciprocal => "recip",
        }
    }

    /// Returns the LaTeX command used to typeset this function, for the kinds that are written
    /// as `\name\left(u\right)`.
    fn latex_operator(self) -> Option<&'static str> {
        Some(match self {
            Self::Sin => "\\sin",
            Self::Cos => "\\cos",
            Self::Tan => "\\tan",
            Self::Cot => "\\cot",
            Self::Sec => "\\sec",
            Self::Csc => "\\csc",
            Self::Asin => "\\arcsin",
            Self::Acos => "\\arccos",
            Self::Atan => "\\arctan",
            Self::Acot => "\\operatorname{arccot}",
            Self::Asec => "\\operatorname{arcsec}",
            Self::Acsc => "\\operatorname{arccsc}",
            Self::Log => "\\log_{10}",
            Self::Ln => "\\ln",
            Self::Negate | Self::Group | Self::Exp | Self::Floor
                | Self::Sqrt | Self::Abs | Self::Reciprocal => return None,
        })
    }
}

/// The kind of a node with exactly two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryKind {
    Plus,
    Minus,
    Times,
    Div,
    Pow,
}

impl BinaryKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Plus | Self::Minus => Precedence::Term,
            Self::Times | Self::Div => Precedence::Factor,
            Self::Pow => Precedence::Exp,
        }
    }

    /// Returns the symbol used to display the operation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "×",
            Self::Div => "÷",
            Self::Pow => "^",
        }
    }
}

/// The kind tag of a [`Node`], flattened into a single enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Indeterminate,
    Constant,
    Error,
    Unary(UnaryKind),
    Binary(BinaryKind),
    Polynomial,
}

impl Kind {
    /// Returns the number of children a node of this kind has.
    pub fn arity(self) -> usize {
        match self {
            Self::Indeterminate | Self::Constant | Self::Error | Self::Polynomial => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// A node of an expression tree.
///
/// Trees are built by the parser, by differentiation, and by polynomial normalization. Once
/// built, a tree is never mutated; transformations always produce a new tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// The free variable of the expression, such as `x`.
    Indeterminate(String),

    /// A real constant.
    Constant(f64),

    /// A part of the source text that could not be parsed. Holds the offset (in the
    /// whitespace-stripped source) at which parsing failed.
    Error(usize),

    /// A node with one child.
    Unary(UnaryKind, Box<Node>),

    /// A node with two children: left, then right.
    Binary(BinaryKind, Box<Node>, Box<Node>),

    /// A polynomial in canonical, dense-coefficient form.
    Polynomial(Polynomial),
}

impl Node {
    /// Creates a node with one child.
    pub fn unary(kind: UnaryKind, child: Node) -> Self {
        Self::Unary(kind, Box::new(child))
    }

    /// Creates a node with two children.
    pub fn binary(kind: BinaryKind, lhs: Node, rhs: Node) -> Self {
        Self::Binary(kind, Box::new(lhs), Box::new(rhs))
    }

    /// Creates a node with two children, wrapping either child in a [`UnaryKind::Group`] if it
    /// binds more loosely than the operation, so that the displayed tree reads back the same
    /// way.
    pub fn binary_grouped(kind: BinaryKind, lhs: Node, rhs: Node) -> Self {
        let precedence = kind.precedence();
        let (lhs, rhs) = if kind == BinaryKind::Pow {
            // right-associative
            (lhs.group_unless(|p| p > precedence), rhs.group_unless(|p| p >= precedence))
        } else {
            (lhs.group_unless(|p| p >= precedence), rhs.group_unless(|p| p > precedence))
        };
        Self::binary(kind, lhs, rhs)
    }

    /// Creates the negation of the given node, grouping it if needed.
    pub fn negated(child: Node) -> Self {
        Self::unary(UnaryKind::Negate, child.group_unless(|p| p >= Precedence::Neg))
    }

    /// Wraps this node in a [`UnaryKind::Group`] unless its precedence satisfies the predicate.
    fn group_unless(self, keep: impl FnOnce(Precedence) -> bool) -> Self {
        if keep(self.precedence()) {
            self
        } else {
            Self::unary(UnaryKind::Group, self)
        }
    }

    /// Returns the kind tag of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Indeterminate(_) => Kind::Indeterminate,
            Self::Constant(_) => Kind::Constant,
            Self::Error(_) => Kind::Error,
            Self::Unary(kind, _) => Kind::Unary(*kind),
            Self::Binary(kind, _, _) => Kind::Binary(*kind),
            Self::Polynomial(_) => Kind::Polynomial,
        }
    }

    /// Returns the children of this node, in order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Indeterminate(_) | Self::Constant(_) | Self::Error(_) | Self::Polynomial(_) => vec![],
            Self::Unary(_, child) => vec![child.as_ref()],
            Self::Binary(_, lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
        }
    }

    /// Returns how tightly this node binds when displayed in plain text.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Binary(kind, _, _) => kind.precedence(),
            Self::Unary(UnaryKind::Negate, _) => Precedence::Neg,
            Self::Polynomial(poly) if poly.term_count() > 1 => Precedence::Term,
            Self::Polynomial(poly) if poly.degree() > 0 => Precedence::Factor,
            Self::Constant(value) if value.is_sign_negative() => Precedence::Neg,
            Self::Polynomial(poly) if poly.coefficients()[0] < 0.0 => Precedence::Neg,
            _ => Precedence::Primary,
        }
    }

    /// Returns the innermost node inside any number of [`UnaryKind::Group`]s.
    pub fn innermost(&self) -> &Node {
        let mut inner = self;
        while let Self::Unary(UnaryKind::Group, child) = inner {
            inner = child;
        }
        inner
    }

    /// Returns the node that is displayed first when this node is displayed.
    fn leftmost(&self) -> &Node {
        match self {
            Self::Binary(_, lhs, _) => lhs.leftmost(),
            _ => self,
        }
    }

    /// Returns `true` if this node is exactly the indeterminate, not wrapped in anything.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate(_))
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e.
    /// depth-first).
    pub fn post_order_iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Returns `true` if an [`Node::Error`] is reachable from this node.
    pub fn has_error(&self) -> bool {
        self.post_order_iter().any(|node| matches!(node, Self::Error(_)))
    }

    /// Returns the offsets held by every [`Node::Error`] in the tree, from left to right.
    pub fn error_offsets(&self) -> Vec<usize> {
        self.post_order_iter()
            .filter_map(|node| match node {
                Self::Error(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }
}

impl From<Polynomial> for Node {
    fn from(poly: Polynomial) -> Self {
        Self::Polynomial(poly)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Indeterminate(name) => write!(f, "{}", name),
            Self::Constant(value) => fmt_constant(f, *value),
            Self::Error(offset) => write!(f, "<error at {}>", offset),
            Self::Unary(kind, child) => match kind {
                UnaryKind::Negate => write!(f, "-{}", child),
                UnaryKind::Group => write!(f, "({})", child),
                UnaryKind::Exp => write!(f, "e^({})", child),
                UnaryKind::Reciprocal => write!(f, "1/({})", child),
                _ => write!(f, "{}({})", kind.name(), child),
            },
            Self::Binary(kind, lhs, rhs) => write!(f, "{} {} {}", lhs, kind.symbol(), rhs),
            Self::Polynomial(poly) => poly.fmt(f),
        }
    }
}

impl Latex for Node {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Indeterminate(name) => write!(f, "{}", name),
            Self::Constant(value) => fmt_constant_latex(f, *value),
            Self::Error(offset) => write!(f, "\\text{{error at {}}}", offset),
            Self::Unary(kind, child) => match kind {
                UnaryKind::Negate => {
                    let bare = match &**child {
                        Self::Unary(..) | Self::Indeterminate(_) => true,
                        Self::Constant(value) => !value.is_sign_negative(),
                        _ => false,
                    };
                    if bare {
                        write!(f, "-")?;
                        child.fmt_latex(f)
                    } else {
                        write!(f, "-\\left(")?;
                        child.fmt_latex(f)?;
                        write!(f, "\\right)")
                    }
                },
                UnaryKind::Group => {
                    write!(f, "\\left(")?;
                    child.fmt_latex(f)?;
                    write!(f, "\\right)")
                },
                UnaryKind::Exp => fmt_pow(f, None, child),
                UnaryKind::Reciprocal => {
                    write!(f, "\\frac{{1}}{{")?;
                    child.innermost().fmt_latex(f)?;
                    write!(f, "}}")
                },
                UnaryKind::Sqrt => {
                    write!(f, "\\sqrt{{")?;
                    child.innermost().fmt_latex(f)?;
                    write!(f, "}}")
                },
                UnaryKind::Floor => {
                    write!(f, "\\left\\lfloor ")?;
                    child.innermost().fmt_latex(f)?;
                    write!(f, " \\right\\rfloor")
                },
                UnaryKind::Abs => {
                    write!(f, "\\left| ")?;
                    child.innermost().fmt_latex(f)?;
                    write!(f, " \\right|")
                },
                _ => {
                    // every remaining kind has an operator name
                    write!(f, "{}\\left(", kind.latex_operator().unwrap_or(kind.name()))?;
                    child.innermost().fmt_latex(f)?;
                    write!(f, "\\right)")
                },
            },
            Self::Binary(kind, lhs, rhs) => match kind {
                BinaryKind::Plus => {
                    lhs.fmt_latex(f)?;
                    write!(f, " + ")?;
                    rhs.fmt_latex(f)
                },
                BinaryKind::Minus => {
                    lhs.fmt_latex(f)?;
                    write!(f, " - ")?;
                    rhs.fmt_latex(f)
                },
                BinaryKind::Times => {
                    lhs.fmt_latex(f)?;

                    // juxtaposed numbers would read as a single number
                    let starts_with_number = match rhs.leftmost() {
                        Self::Constant(value) => *value != PI,
                        Self::Polynomial(_) | Self::Unary(UnaryKind::Negate, _) => true,
                        _ => false,
                    };
                    if starts_with_number {
                        write!(f, " \\cdot ")?;
                    } else {
                        write!(f, " \\, ")?;
                    }
                    rhs.fmt_latex(f)
                },
                BinaryKind::Div => {
                    write!(f, "\\frac{{")?;
                    lhs.innermost().fmt_latex(f)?;
                    write!(f, "}}{{")?;
                    rhs.innermost().fmt_latex(f)?;
                    write!(f, "}}")
                },
                BinaryKind::Pow => fmt_pow(f, Some(lhs), rhs),
            },
            Self::Polynomial(poly) => poly.fmt_latex(f),
        }
    }
}
