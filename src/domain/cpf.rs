//! CPF validation
//!
//! A CPF is 11 decimal digits; the last two are check digits computed
//! from the preceding ones with descending weights, modulo 11.

/// Validate an 11-digit CPF.
///
/// Rejects anything that is not exactly 11 ASCII digits, and the
/// degenerate sequences where all digits are equal (`000.000.000-00`,
/// `111.111.111-11`, ...), which satisfy the checksum but are not issued.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = match cpf.chars().map(|c| c.to_digit(10)).collect::<Option<_>>() {
        Some(digits) => digits,
        None => {
            tracing::error!(cpf = %cpf, "Invalid CPF: non-digit characters");
            return false;
        }
    };

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        tracing::error!(cpf = %cpf, "Invalid CPF: wrong length or repeated digits");
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Check digit over `digits`, weighted from `len + 1` down to 2.
/// A remainder of 10 counts as 0.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top_weight - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        rest => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_cpfs() {
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("12345678909"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn test_flipped_check_digits_rejected() {
        // first check digit
        assert!(!is_valid_cpf("11144477745"));
        // second check digit
        assert!(!is_valid_cpf("11144477736"));
    }

    #[test]
    fn test_structurally_invalid_cpf_rejected() {
        assert!(!is_valid_cpf("12345678900"));
    }

    #[test]
    fn test_non_digit_characters_rejected() {
        assert!(!is_valid_cpf("1114447773a"));
        assert!(!is_valid_cpf("١١١٤٤٤٧٧٧٣٥"));
    }

    #[test]
    fn test_validation_is_deterministic() {
        for _ in 0..3 {
            assert!(is_valid_cpf("52998224725"));
            assert!(!is_valid_cpf("52998224726"));
        }
    }
}
