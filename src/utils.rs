// --- File: utils.rs ---
// --- Helper Functions ---

/// Clamps a rate into `[0, 1]`; NaN collapses to 0 so a gate can never fire on it.
#[inline]
pub fn clamp_probability(rate: f32) -> f32 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}

/// Two distinct mutable elements of a slice, in argument order.
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut needs two distinct indices");
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

// --- End of File: utils.rs ---
