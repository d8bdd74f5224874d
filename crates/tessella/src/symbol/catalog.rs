//! Built-in sample tilings.

use Category::*;

/// Family a sample belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    EuclideanRegular,
    EuclideanSemiregular,
    Platonic,
    Archimedean,
    Prism,
    Antiprism,
    HyperbolicRegular,
    HyperbolicSemiregular,
    /// Digon tilings: dihedra, hosohedra and friends.
    Degenerate,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Self::EuclideanRegular => "euclidean-regular",
            Self::EuclideanSemiregular => "euclidean-semiregular",
            Self::Platonic => "platonic",
            Self::Archimedean => "archimedean",
            Self::Prism => "prism",
            Self::Antiprism => "antiprism",
            Self::HyperbolicRegular => "hyperbolic-regular",
            Self::HyperbolicSemiregular => "hyperbolic-semiregular",
            Self::Degenerate => "degenerate",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    pub symbol: &'static str,
    pub category: Category,
}

const fn s(symbol: &'static str, category: Category) -> Sample {
    Sample { symbol, category }
}

static SAMPLES: &[Sample] = &[
    s("(3,3,3,3,3,3)", EuclideanRegular),
    s("(4,4,4,4)", EuclideanRegular),
    s("(6,6,6)", EuclideanRegular),
    s("(8,8,4)", EuclideanSemiregular),
    s("(4,6,12)", EuclideanSemiregular),
    s("(6,4,3,4)", EuclideanSemiregular),
    s("(3,6,3,6)", EuclideanSemiregular),
    s("(3,12,12)", EuclideanSemiregular),
    s("(4,4,3L,3L,3L) [3,4]", EuclideanSemiregular),
    s("(3,3,3,3,6) (1,2)(0,4)(3)", EuclideanSemiregular),
    s("(3,3,4,3,4) (0,4)(1)(2,3)", EuclideanSemiregular),
    s("(3,3,3)", Platonic),
    s("(3,3,3,3)", Platonic),
    s("(3,3,3,3,3)", Platonic),
    s("(4,4,4)", Platonic),
    s("(5,5,5)", Platonic),
    s("(3,6,6)", Archimedean),
    s("(3,4,3,4)", Archimedean),
    s("(3,8,8)", Archimedean),
    s("(4,6,6)", Archimedean),
    s("(3,4,4,4)", Archimedean),
    s("(4,6,8)", Archimedean),
    s("(3,3,3,3,4) (1,2)(0,4)(3)", Archimedean),
    s("(3,5,3,5)", Archimedean),
    s("(3,10,10)", Archimedean),
    s("(5,6,6)", Archimedean),
    s("(3,4,5,4)", Archimedean),
    s("(4,6,10)", Archimedean),
    s("(3,3,3,3,5) (1,2)(0,4)(3)", Archimedean),
    s("(3,4,4)", Prism),
    s("(5,4,4)", Prism),
    s("(6,4,4)", Prism),
    s("(7,4,4)", Prism),
    s("(3,3,3,4)(1)(2)", Antiprism),
    s("(3,3,3,5)(1)(2)", Antiprism),
    s("(3,3,3,6)(1)(2)", Antiprism),
    s("(3,3,3,7)(1)(2)", Antiprism),
    s("(3)^7", HyperbolicRegular),
    s("(4)^5", HyperbolicRegular),
    s("(4)^6", HyperbolicRegular),
    s("(5,5,5,5)", HyperbolicRegular),
    s("(7,7,7)", HyperbolicRegular),
    s("(8,8,8)", HyperbolicRegular),
    s("(7,6^2)", HyperbolicSemiregular),
    s("(4,6,14)", HyperbolicSemiregular),
    s("(3,4,7,4)", HyperbolicSemiregular),
    s("(6,6,4L,4L)", HyperbolicSemiregular),
    s("(8,8,4L,4L)", HyperbolicSemiregular),
    s("(3,3,3,3,7) (1,2)(0,4)(3)", HyperbolicSemiregular),
    s("(3H,6,6,6) (1,0)[2](3)", HyperbolicSemiregular),
    s("(3,6,6,6) (0 1)(2)(3)", HyperbolicSemiregular),
    s("(3,4,4L,4L,4)", HyperbolicSemiregular),
    s("(3l,4l,4,4,4) (0 1)[2 3](4)", HyperbolicSemiregular),
    s("(3,4,4,4,4) (0 1)(2)(3)(4)", HyperbolicSemiregular),
    s("(3,4,4L,4L,4L,4)", HyperbolicSemiregular),
    s("(6,6,3L,3L,3L) (0 2)(1)(3)(4)", HyperbolicSemiregular),
    s("(5,3,5,3,3) (0 1)(2 3)(4)", HyperbolicSemiregular),
    s("(4,3,3,3,3,3) (0 1)(2 3)(4 5)", HyperbolicSemiregular),
    s("(3l,5l,5,5,5,5) (0 1)[2 3](4)(5)", HyperbolicSemiregular),
    s("(3,5,5,5,5,5) (0 1)(2 4)(3 5)", HyperbolicSemiregular),
    s("(3l,5l,5,5,5,5) (0 1)(2 4)[3 5]", HyperbolicSemiregular),
    s("(3l,5l,5,5,5,5) (0 1)[2 4](3)(5)", HyperbolicSemiregular),
    s("(3,5,5,5,5,5) (0 1)(2)(3)(4)(5)", HyperbolicSemiregular),
    // Symmetry variants of regular tilings.
    s("(3,3,3,3,3,3) (0,1)(2,3)(4,5)", EuclideanRegular),
    s("(3,3H,3,3,3L,3L,3L) (0 4)(1 2)(3)(5)(6)", HyperbolicRegular),
    s("(3,3H,3,3,3L,3L,3L) (0 4)(1 2)(3)[5 6]", HyperbolicRegular),
    s("(3,3H,3,3L,3,3L,3L) [0 4](1 2)[3 5](6)", HyperbolicRegular),
    s("(2,3,3,3,3,3) (2,3)(4,5)", Degenerate),
    s("(6,6)", Degenerate),
    s("(2,2)", Degenerate),
    s("(2,2,2,2,2,2)", Degenerate),
    s("(6,6,2)", Degenerate),
    s("(6,2,6,2)", Degenerate),
];

/// All built-in samples, in presentation order.
pub fn catalog() -> &'static [Sample] {
    SAMPLES
}
