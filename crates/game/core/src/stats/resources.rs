//! Resource fractions (life, stamina, mana) derived from attribute vectors.

use super::{AttributeKind, Attributes};

/// Relative weight of each resource when several are folded into one number.
///
/// Life dominates, then stamina, then mana.
pub const RESOURCE_WEIGHTS: [(AttributeKind, f32); 3] = [
    (AttributeKind::Life, 4.0),
    (AttributeKind::Stamina, 2.0),
    (AttributeKind::Mana, 1.0),
];

/// `current / maximum` for one resource, with NaN normalised to zero.
///
/// A zero maximum produces `0/0` or `x/0`; both collapse to `0.0` so the
/// curves downstream never see NaN. Infinite ratios are clamped the same way.
pub fn fraction(current: f32, maximum: f32) -> f32 {
    let ratio = current / maximum;
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// Per-resource fractions of `current` against `maximum`.
pub fn fractions(current: &Attributes, maximum: &Attributes) -> [f32; 3] {
    RESOURCE_WEIGHTS.map(|(kind, _)| fraction(current[kind], maximum[kind]))
}

/// Weighted mean of the resource fractions in `[0, 1]`.
///
/// Resources with a non-positive maximum are left out. An actor without any
/// resource pool counts as fully healthy.
pub fn health(current: &Attributes, maximum: &Attributes) -> f32 {
    let (weighted, total) = RESOURCE_WEIGHTS
        .iter()
        .filter(|(kind, _)| maximum[*kind] > 0.0)
        .fold((0.0, 0.0), |(sum, total), &(kind, weight)| {
            let frac = fraction(current[kind], maximum[kind]).clamp(0.0, 1.0);
            (sum + frac * weight, total + weight)
        });

    if total > 0.0 { weighted / total } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maximum_is_not_nan() {
        assert_eq!(fraction(0.0, 0.0), 0.0);
        assert_eq!(fraction(5.0, 0.0), 0.0);
        assert_eq!(fraction(5.0, 10.0), 0.5);
    }

    #[test]
    fn health_weights_life_heaviest() {
        let max = Attributes::resources(100.0, 100.0, 100.0);
        let hurt = Attributes::resources(0.0, 100.0, 100.0);
        let drained = Attributes::resources(100.0, 100.0, 0.0);

        assert!((health(&hurt, &max) - 3.0 / 7.0).abs() < 1e-6);
        assert!((health(&drained, &max) - 6.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn health_skips_missing_pools() {
        let max = Attributes::resources(50.0, 0.0, 0.0);
        let cur = Attributes::resources(25.0, 0.0, 0.0);
        assert_eq!(health(&cur, &max), 0.5);
        assert_eq!(health(&Attributes::ZERO, &Attributes::ZERO), 1.0);
    }
}
