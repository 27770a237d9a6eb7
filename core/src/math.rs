//! Small integer helpers shared by the subnetting code.

/// The smallest power of two greater than or equal to `n`; `1` for `n == 0`.
///
/// Translates "divide into N subnets" into a whole number of extra prefix
/// bits. Saturates at `u32::MAX` for inputs above `2^31`, where no larger
/// 32-bit power of two exists.
pub fn closest_larger_power_of_two(n: u32) -> u32 {
    n.max(1).checked_next_power_of_two().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_the_next_power_of_two() {
        let cases: &[(u32, u32)] = &[
            (0, 1),
            (1, 1),
            (2, 2),
            (3, 4),
            (4, 4),
            (5, 8),
            (7, 8),
            (8, 8),
            (9, 16),
            (15, 16),
            (16, 16),
            (17, 32),
            (32, 32),
            (33, 64),
            (64, 64),
            (65, 128),
            (100, 128),
            (128, 128),
            (129, 256),
            (255, 256),
            (256, 256),
        ];
        for &(input, expected) in cases {
            assert_eq!(closest_larger_power_of_two(input), expected, "n = {input}");
        }
    }

    #[test]
    fn idempotent_on_exact_powers_of_two() {
        for exp in 0..31 {
            let n = 1u32 << exp;
            assert_eq!(closest_larger_power_of_two(n), n);
        }
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut previous = 0;
        for n in 0..2048 {
            let result = closest_larger_power_of_two(n);
            assert!(result >= previous);
            previous = result;
        }
    }
}
