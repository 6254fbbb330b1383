use rand::Rng;

/// Metropolis-Hastings acceptance probability for a uniform independence proposal.
///
/// The proposal density cancels, leaving `min(1, exp(new - old))`. Returns
/// `NaN` when the log ratio is undefined (`-inf - -inf`, `inf - inf`, or a
/// `NaN` input); callers must treat that as a rejection. `f64::min` maps
/// `NaN` to its other operand, hence the explicit branches.
pub fn acceptance_probability(old_log_density: f64, new_log_density: f64) -> f64 {
    let log_ratio = new_log_density - old_log_density;
    if log_ratio.is_nan() {
        f64::NAN
    } else if log_ratio >= 0.0 {
        1.0
    } else {
        log_ratio.exp()
    }
}

/// Bernoulli draw with success probability `probability`.
///
/// Always consumes exactly one `f64` variate so seeded runs replay the same
/// stream whatever the probability. `NaN` never succeeds.
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    let draw: f64 = rng.gen();
    if probability.is_nan() {
        return false;
    }
    draw < probability
}
