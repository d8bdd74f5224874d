//! Derived combinatorial properties: world size, valence, coloring support.

use std::fmt;

use crate::model::Geometry;

use super::build::gcd;
use super::types::Tiling;

/// Which cells of the tiling become graph nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variation {
    /// Faces only.
    Pure,
    /// Faces and vertices.
    #[default]
    Bitruncated,
    /// Vertices only.
    Dual,
}

impl Variation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Bitruncated => "bitruncated",
            Self::Dual => "dual",
        }
    }
}

impl std::str::FromStr for Variation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pure" => Ok(Self::Pure),
            "bitruncated" => Ok(Self::Bitruncated),
            "dual" => Ok(Self::Dual),
            other => Err(format!("unknown variation '{other}'")),
        }
    }
}

/// Cell count from the Euler characteristic, as an exact reduced fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldSize {
    /// Closed surface: exactly this many cells.
    Finite { num: i64, den: i64 },
    /// Euclidean plane.
    Infinite,
    /// Hyperbolic plane: `num/den` is the cell count per unit of `-χ`.
    Exponential { num: i64, den: i64 },
}

impl fmt::Display for WorldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = |f: &mut fmt::Formatter<'_>, num: i64, den: i64| {
            if den == 1 {
                write!(f, "{num}")
            } else {
                write!(f, "{num}/{den}")
            }
        };
        match *self {
            Self::Finite { num, den } => frac(f, num, den),
            Self::Infinite => f.write_str("∞"),
            Self::Exponential { num, den } => {
                frac(f, num, den)?;
                f.write_str(" exp(∞)")
            }
        }
    }
}

/// How well a coloring pattern fits the tiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Support {
    None,
    Partial,
    Full,
}

impl Tiling {
    /// Euler characteristic density `(nom/denom)` and cells-per-vertex `(anom/adenom)`,
    /// combined into a reduced fraction. Negative on hyperbolic tilings.
    fn euler_fraction(&self, variation: Variation) -> (i64, i64) {
        let mut nom = 2 - self.n() as i64;
        let mut denom = 2i64;
        for &f in &self.faces {
            let f = f as i64;
            let g = gcd(denom, f);
            nom = (nom * f + denom) / g;
            denom = denom / g * f;
        }
        let (mut anom, mut adenom) = match variation {
            Variation::Pure => (0i64, 1i64),
            Variation::Bitruncated | Variation::Dual => (1, 1),
        };
        if variation != Variation::Dual {
            for &f in &self.faces {
                let f = f as i64;
                let g = gcd(adenom, f);
                anom = (anom * f + adenom) / g;
                adenom = adenom / g * f;
            }
        }
        anom *= 2 * denom;
        adenom *= nom;
        let g = gcd(anom, adenom);
        if g != 0 {
            anom /= g;
            adenom /= g;
        }
        if adenom < 0 {
            anom = -anom;
            adenom = -adenom;
        }
        (anom, adenom)
    }

    /// Number of cells of the given variation, from the Euler characteristic.
    pub fn world_size(&self, variation: Variation) -> WorldSize {
        if self.geometry == Geometry::Euclidean {
            return WorldSize::Infinite;
        }
        let (num, den) = self.euler_fraction(variation);
        if den == 0 {
            WorldSize::Infinite
        } else if num < 0 {
            WorldSize::Exponential { num: -num, den }
        } else {
            WorldSize::Finite { num, den }
        }
    }

    /// Neighbor count of a typical cell. Dual cells vary; triangles win.
    pub fn valence(&self, variation: Variation) -> usize {
        match variation {
            Variation::Pure => self.n(),
            Variation::Bitruncated => 3,
            Variation::Dual => {
                if self.faces.contains(&3) {
                    3
                } else {
                    self.faces.iter().sum::<usize>() / self.n()
                }
            }
        }
    }

    fn all_inverted_triple(&self) -> bool {
        self.n() == 3 && self.invert.iter().all(|&b| b)
    }

    pub fn support_chessboard(&self) -> bool {
        self.n() % 2 == 0
    }

    pub fn support_threecolor(&self) -> Support {
        if self.all_inverted_triple() && self.faces.iter().all(|f| f % 2 == 0) {
            Support::Full
        } else if self.tilegroup[2 * self.n()].is_some_and(|g| g > 1) {
            Support::Partial
        } else {
            Support::None
        }
    }

    pub fn support_threecolor_bitruncated(&self) -> Support {
        if self.faces.iter().any(|f| f % 2 == 1) {
            Support::None
        } else {
            Support::Full
        }
    }

    pub fn support_football(&self) -> Support {
        if self.have_ph {
            Support::Partial
        } else if self.all_inverted_triple() && self.faces[1] % 2 == 0 && self.faces[2] % 2 == 0 {
            Support::Full
        } else {
            Support::None
        }
    }
}
