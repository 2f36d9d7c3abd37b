/// Random sampling helpers shared by the board generator and the engine
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Uniform integer in `[min, max]` (both ends inclusive)
pub fn random_int<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd,
    R: Rng + ?Sized,
{
    rng.gen_range(min..=max)
}

/// Draw `count` distinct values from `[min, max)` without replacement
///
/// Partial Fisher-Yates: only the first `count` positions of the identity
/// range are shuffled, then the tail is dropped.
///
/// Panics if `count` exceeds the size of the range. Callers validate this
/// up front (see `SimConfig::validate`).
pub fn distinct_random_indices<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min: usize,
    max: usize,
) -> Vec<usize> {
    let range = max.saturating_sub(min);
    assert!(
        count <= range,
        "requested {} distinct indices from a range of {}",
        count,
        range
    );

    let mut values: Vec<usize> = (min..max).collect();
    for i in 0..count {
        let j = rng.gen_range(i..values.len());
        values.swap(i, j);
    }
    values.truncate(count);
    values
}
