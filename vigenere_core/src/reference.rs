use crate::frequency::FrequencyProfile;

/// Relative letter frequencies of English prose, in percent.
const ENGLISH_PERCENT: [(char, f64); 26] = [
    ('a', 8.167),
    ('b', 1.492),
    ('c', 2.782),
    ('d', 4.253),
    ('e', 12.702),
    ('f', 2.228),
    ('g', 2.015),
    ('h', 6.094),
    ('i', 6.966),
    ('j', 0.153),
    ('k', 0.772),
    ('l', 4.025),
    ('m', 2.406),
    ('n', 6.749),
    ('o', 7.507),
    ('p', 1.929),
    ('q', 0.095),
    ('r', 5.987),
    ('s', 6.327),
    ('t', 9.056),
    ('u', 2.758),
    ('v', 0.978),
    ('w', 2.360),
    ('x', 0.150),
    ('y', 1.974),
    ('z', 0.074),
];

impl FrequencyProfile {
    /// Reference distribution for English text.
    pub fn english() -> Self {
        let values = ENGLISH_PERCENT
            .iter()
            .map(|&(c, percent)| (c, percent / 100.0))
            .collect();
        FrequencyProfile::new("English", values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_alphabet_and_sums_to_one() {
        let english = FrequencyProfile::english();
        assert_eq!(english.values().len(), 26);
        let total: f64 = english.values().values().sum();
        assert!((total - 1.0).abs() < 1e-3, "total was {total}");
        assert!(english.get('e') > english.get('t'));
    }
}
