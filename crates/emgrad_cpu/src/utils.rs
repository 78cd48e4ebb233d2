/// factors[d] = product of dims[d+1..], so that digit d of a linear index is
/// `(i / factors[d]) % dims[d]`.
pub fn compute_factors(dims: &[usize]) -> Vec<usize> {
    let mut factors = vec![1; dims.len()];
    for d in (0..dims.len().saturating_sub(1)).rev() {
        factors[d] = factors[d + 1] * dims[d + 1];
    }
    factors
}

/// Maps a linear index over `dims` to a storage offset under `strides`.
pub fn offset_for(i: usize, factors: &[usize], strides: &[usize]) -> usize {
    let mut offset = 0;
    let mut rem = i;
    for d in 0..factors.len() {
        let digit = rem / factors[d];
        offset += digit * strides[d];
        rem %= factors[d];
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_match_row_major_strides() {
        assert_eq!(compute_factors(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_factors(&[]), Vec::<usize>::new());
    }

    #[test]
    fn offset_respects_zero_strides() {
        // shape [3, 4] viewed from a broadcast [3, 1] operand
        let factors = compute_factors(&[3, 4]);
        let strides = [1, 0];
        assert_eq!(offset_for(0, &factors, &strides), 0);
        assert_eq!(offset_for(3, &factors, &strides), 0);
        assert_eq!(offset_for(5, &factors, &strides), 1);
    }
}
