//! Vector similarity helpers

/// Cosine similarity of two vectors
///
/// Returns `None` when the vectors are empty or differ in length, and
/// `Some(0.0)` when either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0_f32, 0.0_f32, 0.0_f32), |(dot, na, nb), (x, y)| {
            (x.mul_add(*y, dot), x.mul_add(*x, na), y.mul_add(*y, nb))
        });

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return Some(0.0);
    }

    Some(dot / magnitude)
}

/// Cosine distance, `1 - similarity`, in `[0, 2]` for valid input
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f32> {
    cosine_similarity(a, b).map(|similarity| 1.0 - similarity)
}
