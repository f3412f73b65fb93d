//! Synthetic population figures
//!
//! The viewer has no census data; every time a feature is displayed it gets
//! a fresh uniformly drawn population inside the configured range.

use rand::Rng;

use crate::config::PopulationRange;

/// Draws synthetic populations from a fixed range
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationSynthesizer {
    range: PopulationRange,
}

impl PopulationSynthesizer {
    pub fn new(range: PopulationRange) -> Self {
        Self { range }
    }

    /// Draw a value from the configured range
    pub fn next(&self) -> u64 {
        Self::generate(self.range.min, self.range.max)
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn generate(min: u64, max: u64) -> u64 {
        Self::generate_with(min, max, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(min: u64, max: u64, rng: &mut R) -> u64 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        rng.gen_range(low..=high)
    }

    /// Same as [`format_population`]
    pub fn format(n: u64) -> String {
        format_population(n)
    }
}

/// Format an integer with `,` between every group of three digits.
///
/// # Examples
/// ```
/// use sm_core::format_population;
/// assert_eq!(format_population(12_345_678), "12,345,678");
/// assert_eq!(format_population(999), "999");
/// ```
pub fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_format_examples() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(500_000), "500,000");
        assert_eq!(format_population(1_000_000), "1,000,000");
        assert_eq!(format_population(12_345_678), "12,345,678");
        assert_eq!(format_population(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_groups_parse_back() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let n: u64 = rng.gen_range(0..10_000_000_000);
            let formatted = format_population(n);
            let groups: Vec<&str> = formatted.split(',').collect();

            assert!(!groups[0].is_empty() && groups[0].len() <= 3, "{formatted}");
            assert!(groups[1..].iter().all(|g| g.len() == 3), "{formatted}");
            assert_eq!(formatted.replace(',', "").parse::<u64>().ok(), Some(n));
        }
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let value = PopulationSynthesizer::generate_with(500_000, 50_000_000, &mut rng);
            assert!((500_000..=50_000_000).contains(&value));
        }
    }

    #[test]
    fn test_generate_degenerate_and_swapped_bounds() {
        assert_eq!(PopulationSynthesizer::generate(10, 10), 10);

        let value = PopulationSynthesizer::generate(20, 10);
        assert!((10..=20).contains(&value));
    }

    #[test]
    fn test_next_uses_configured_range() {
        let synth = PopulationSynthesizer::new(PopulationRange { min: 100, max: 200 });
        for _ in 0..100 {
            assert!((100..=200).contains(&synth.next()));
        }
    }
}
