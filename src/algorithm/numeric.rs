//! Bounded numeric helpers shared by the sampler and the scorer.

/// Restrict `x` to the closed interval `[low, high]`
#[must_use]
pub fn clamp(x: f64, low: f64, high: f64) -> f64 {
    if x < low {
        low
    } else if x > high {
        high
    } else {
        x
    }
}

/// Standard logistic sigmoid, mapping an additive risk index to a probability in (0, 1)
#[must_use]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Body-mass index from height (cm) and weight (kg)
#[must_use]
pub fn bmi(height_cm: u16, weight_kg: u16) -> f64 {
    let height_m = f64::from(height_cm) / 100.0;
    f64::from(weight_kg) / (height_m * height_m)
}
