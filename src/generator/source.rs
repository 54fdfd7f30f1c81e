use rand::{rngs::OsRng, TryRngCore};

use super::types::{GeneratorError, Range};

/// Supplier of raw 32-bit entropy for draws.
pub trait RandomSource {
    fn next_u32(&mut self) -> Result<u32, GeneratorError>;
}

/// Reads straight from the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn next_u32(&mut self) -> Result<u32, GeneratorError> {
        OsRng
            .try_next_u32()
            .map_err(|e| GeneratorError::Entropy(e.to_string()))
    }
}

/// Draws one integer in `[range.min, range.max]`.
///
/// The raw word is scaled as `floor(u / 2^32 * span) + min`, computed exactly
/// in integer arithmetic. The bias from dividing by `2^32` is accepted.
pub fn generate(source: &mut impl RandomSource, range: Range) -> Result<i64, GeneratorError> {
    let raw = source.next_u32()? as u128;
    let offset = (raw * range.span()) >> 32;
    Ok((range.min() as i128 + offset as i128) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(u32);

    impl RandomSource for FixedSource {
        fn next_u32(&mut self) -> Result<u32, GeneratorError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut source = OsRandomSource;
        let ranges = [(0, 1), (1, 6), (-50, 50), (1, 1_000_000), (i64::MIN, i64::MAX)];

        for _ in 0..10_000 {
            for &(min, max) in &ranges {
                let range = Range::new(min, max).unwrap();
                let value = generate(&mut source, range).unwrap();
                assert!(value >= min && value <= max, "{} outside [{}, {}]", value, min, max);
            }
        }
    }

    #[test]
    fn test_generate_distribution_is_uniform() {
        let mut source = OsRandomSource;
        let range = Range::new(0, 9).unwrap();
        let mut counts = [0u32; 10];

        for _ in 0..100_000 {
            let value = generate(&mut source, range).unwrap();
            counts[value as usize] += 1;
        }

        // Each bucket should hold roughly 10_000 samples (±5% tolerance)
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                count > 9_500 && count < 10_500,
                "Distribution skewed at bucket {}: {:?}",
                i,
                counts
            );
        }
    }

    #[test]
    fn test_generate_maps_extreme_words_to_bounds() {
        let range = Range::new(1, 6).unwrap();
        assert_eq!(generate(&mut FixedSource(0), range).unwrap(), 1);
        assert_eq!(generate(&mut FixedSource(u32::MAX), range).unwrap(), 6);
        // exactly half way lands in the upper half
        assert_eq!(generate(&mut FixedSource(1 << 31), range).unwrap(), 4);
    }

    #[test]
    fn test_generate_propagates_entropy_failure() {
        struct BrokenSource;
        impl RandomSource for BrokenSource {
            fn next_u32(&mut self) -> Result<u32, GeneratorError> {
                Err(GeneratorError::Entropy("unavailable".into()))
            }
        }

        let result = generate(&mut BrokenSource, Range::default());
        assert!(matches!(result, Err(GeneratorError::Entropy(_))));
    }
}
