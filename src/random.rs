/// Uniform random source over closed numeric ranges.
pub trait RandomSource {
    /// Uniform integer in the inclusive range spanned by `a` and `b`.
    /// The bounds may be given in either order.
    fn int_in(&mut self, a: i32, b: i32) -> i32;

    /// Uniform float in `[min(a, b), max(a, b))`.
    fn float_in(&mut self, a: f32, b: f32) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn int_in(&mut self, a: i32, b: i32) -> i32 {
        self.i32(a.min(b)..=a.max(b))
    }

    fn float_in(&mut self, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        lo + self.f32() * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_range_is_inclusive() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..2000 {
            let v = rng.int_in(1, 4);
            assert!((1..=4).contains(&v));
            seen_lo |= v == 1;
            seen_hi |= v == 4;
        }
        assert!(seen_lo && seen_hi);
    }

    #[test]
    fn reversed_bounds() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..1000 {
            let v = rng.int_in(-200, -1000);
            assert!((-1000..=-200).contains(&v));
            let f = rng.float_in(0.9, 0.1);
            assert!((0.1..=0.9).contains(&f));
        }
    }

    #[test]
    fn degenerate_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        assert_eq!(rng.int_in(5, 5), 5);
        assert_eq!(rng.float_in(2.0, 2.0), 2.0);
    }
}
