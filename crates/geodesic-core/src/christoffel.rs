// ─────────────────────────────────────────────────────────────────────
// SCPN Geodesic Core — Schwarzschild Christoffel Symbols
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form Christoffel symbols of the Schwarzschild metric.
//!
//! Coordinates `x^μ = (t, r, θ, φ)` with the coordinate time in time units,
//! so `c` appears explicitly:
//!   ds² = -(1 - r_s/r) c² dt² + (1 - r_s/r)⁻¹ dr² + r² dθ² + r² sin²θ dφ²
//!
//! Nonzero entries (and their lower-index mirrors):
//!   Γ⁰₀₁ = r_s / (2 r (r - r_s))
//!   Γ¹₀₀ = c² r_s (r - r_s) / (2 r³)
//!   Γ¹₁₁ = -r_s / (2 r (r - r_s))
//!   Γ¹₂₂ = r_s - r
//!   Γ¹₃₃ = (r_s - r) sin²θ
//!   Γ²₁₂ = Γ³₁₃ = 1 / r
//!   Γ²₃₃ = -sinθ cosθ
//!   Γ³₂₃ = cot θ

use geodesic_types::config::UnitSystem;

/// Γ^μ_{αβ} stored as `[μ][α][β]`, symmetric in `α, β`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChristoffelSymbols {
    gamma: [[[f64; 4]; 4]; 4],
}

impl ChristoffelSymbols {
    pub fn zeros() -> Self {
        ChristoffelSymbols {
            gamma: [[[0.0; 4]; 4]; 4],
        }
    }

    /// Γ^upper_{a b}. Panics if any index is ≥ 4.
    #[inline]
    pub fn get(&self, upper: usize, a: usize, b: usize) -> f64 {
        self.gamma[upper][a][b]
    }

    /// Set Γ^upper_{a b} and its mirror Γ^upper_{b a}.
    #[inline]
    fn set_symmetric(&mut self, upper: usize, a: usize, b: usize, value: f64) {
        self.gamma[upper][a][b] = value;
        self.gamma[upper][b][a] = value;
    }

    pub fn as_array(&self) -> &[[[f64; 4]; 4]; 4] {
        &self.gamma
    }
}

/// Index triples `(μ, α, β)` with `α ≤ β` that are nonzero for Schwarzschild.
pub const NONZERO_COMPONENTS: [(usize, usize, usize); 9] = [
    (0, 0, 1),
    (1, 0, 0),
    (1, 1, 1),
    (1, 2, 2),
    (1, 3, 3),
    (2, 1, 2),
    (2, 3, 3),
    (3, 1, 3),
    (3, 2, 3),
];

/// Whether `(μ, α, β)` is structurally nonzero in either lower-index order.
pub fn is_structurally_nonzero(upper: usize, a: usize, b: usize) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    NONZERO_COMPONENTS.contains(&(upper, lo, hi))
}

/// Christoffel symbols at `(r, θ)` around a mass `mass` in the given units.
///
/// Requires `r > 0` and `r ≠ r_s`; the poles θ ∈ {0, π} make Γ³₂₃ infinite.
pub fn schwarzschild_christoffels(
    r: f64,
    theta: f64,
    mass: f64,
    units: UnitSystem,
) -> ChristoffelSymbols {
    let c = units.speed_of_light();
    let c2 = c * c;
    let rs = units.schwarzschild_radius(mass);
    let (sin_t, cos_t) = theta.sin_cos();

    let mut chl = ChristoffelSymbols::zeros();

    let g111 = 0.5 * rs / (rs * r - r * r);
    chl.gamma[1][1][1] = g111;
    chl.set_symmetric(0, 0, 1, -g111);
    chl.gamma[1][0][0] = c2 * 0.5 * rs * (r - rs) / (r * r * r);
    chl.gamma[1][2][2] = rs - r;
    chl.gamma[1][3][3] = (rs - r) * sin_t * sin_t;

    let inv_r = 1.0 / r;
    chl.set_symmetric(2, 1, 2, inv_r);
    chl.set_symmetric(3, 1, 3, inv_r);

    chl.gamma[2][3][3] = -sin_t * cos_t;
    chl.set_symmetric(3, 2, 3, cos_t / sin_t);

    chl
}
