use rand::Rng;

/// Generate a six-digit case number, uniform in `[100000, 999999]`.
///
/// The store is not consulted: collisions are possible and accepted, the
/// caller decides whether an existing record is being updated.
pub fn generate_case_number() -> String {
    let case_number = rand::thread_rng().gen_range(100_000u32..=999_999).to_string();
    tracing::debug!(
        target: "casefile",
        event = "case_number_generated",
        case_number = %case_number
    );
    case_number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_six_digit_range() {
        for _ in 0..10_000 {
            let number = generate_case_number();
            assert_eq!(number.len(), 6);
            let parsed: u32 = number.parse().expect("decimal string");
            assert!((100_000..=999_999).contains(&parsed));
        }
    }
}
