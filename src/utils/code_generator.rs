// utils/code_generator.rs
use rand::distr::Alphanumeric;
use rand::{rng, Rng};

/// Externally-visible listing identifier, e.g. `PROP-9F2C41D0`.
pub fn generate_listing_code() -> String {
    let mut rng = rng();
    let suffix: String = (0..8).map(|_| rng.sample(Alphanumeric) as char).collect();
    format!("PROP-{}", suffix.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_code_has_expected_shape() {
        let code = generate_listing_code();
        assert!(code.starts_with("PROP-"));
        assert_eq!(code.len(), 13);
        assert!(code[5..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(code, code.to_ascii_uppercase());
    }
}
