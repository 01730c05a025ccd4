//! CPF/CNPJ document number normalization and checksum validation

const CPF_LENGTH: usize = 11;

const CNPJ_LENGTH: usize = 14;

/// CNPJ weights for the second check digit. The first check digit uses the
/// same table without its leading `6`.
const CNPJ_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Which national registry a document number belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// CPF, 11 digits
    Individual,
    /// CNPJ, 14 digits
    Business,
}

impl DocumentKind {
    /// Classify a normalized, already validated document by its length
    pub fn of(digits: &str) -> Option<Self> {
        match digits.len() {
            CPF_LENGTH => Some(DocumentKind::Individual),
            CNPJ_LENGTH => Some(DocumentKind::Business),
            _ => None,
        }
    }
}

/// Strip every non-digit character, keeping digit order
///
/// `"233.838.290-06"` and `"23383829006"` both normalize to `"23383829006"`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `digits` is a valid CPF (11 digits) or CNPJ (14 digits)
///
/// Any other length, any non-digit character, or a run of one repeated digit
/// returns `false`.
pub fn validate(digits: &str) -> bool {
    let Some(values) = to_values(digits) else {
        return false;
    };

    if values.iter().all(|d| *d == values[0]) {
        return false;
    }

    match values.len() {
        CPF_LENGTH => {
            let first: Vec<u32> = (2..=10).rev().collect();
            let second: Vec<u32> = (2..=11).rev().collect();
            has_check_digits(&values, &first, &second)
        }
        CNPJ_LENGTH => has_check_digits(&values, &CNPJ_WEIGHTS[1..], &CNPJ_WEIGHTS),
        _ => false,
    }
}

fn to_values(digits: &str) -> Option<Vec<u32>> {
    digits.chars().map(|c| c.to_digit(10)).collect()
}

/// Verify the two trailing mod-11 check digits
fn has_check_digits(values: &[u32], first_weights: &[u32], second_weights: &[u32]) -> bool {
    let body = values.len() - 2;

    check_digit(&values[..body], first_weights) == values[body]
        && check_digit(&values[..=body], second_weights) == values[body + 1]
}

fn check_digit(values: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = values.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("233.838.290-06"), "23383829006");
        assert_eq!(normalize("23383829006"), "23383829006");
        assert_eq!(normalize("05.677.940/0001-33"), "05677940000133");
        assert_eq!(normalize("05.677.940.000133"), "05677940000133");
        assert_eq!(normalize("abc123"), "123");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_valid_cpf() {
        for cpf in ["23383829006", "66895932070", "27935572003"] {
            assert!(validate(cpf), "{} should be valid", cpf);
        }
    }

    #[test]
    fn test_valid_cnpj() {
        for cnpj in ["05677940000133", "24885962000133", "52987490000165"] {
            assert!(validate(cnpj), "{} should be valid", cnpj);
        }
    }

    #[test]
    fn test_wrong_check_digit() {
        assert!(!validate("23383829007"));
        assert!(!validate("05677940000134"));
    }

    #[test]
    fn test_wrong_length_or_characters() {
        assert!(!validate(""));
        assert!(!validate("123"));
        assert!(!validate("2338382900"));
        assert!(!validate("233838290066"));
        assert!(!validate("233.838.290-06"));
        assert!(!validate("2338382900a"));
    }

    #[test]
    fn test_repeated_digits_are_rejected() {
        for d in 0..=9 {
            assert!(!validate(&d.to_string().repeat(11)));
            assert!(!validate(&d.to_string().repeat(14)));
        }
    }

    #[test]
    fn test_document_kind() {
        assert_eq!(DocumentKind::of("23383829006"), Some(DocumentKind::Individual));
        assert_eq!(DocumentKind::of("05677940000133"), Some(DocumentKind::Business));
        assert_eq!(DocumentKind::of("123"), None);
    }

    /// Append both check digits to a 9-digit CPF body
    fn complete_cpf(body: &[u32]) -> String {
        let first: Vec<u32> = (2..=10).rev().collect();
        let second: Vec<u32> = (2..=11).rev().collect();

        let mut values = body.to_vec();
        values.push(check_digit(&values, &first));
        values.push(check_digit(&values, &second));
        values.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect()
    }

    proptest! {
        #[test]
        fn prop_generated_cpf_is_valid(body in proptest::collection::vec(0u32..10, 9)) {
            prop_assume!(body.iter().any(|d| *d != body[0]));
            let cpf = complete_cpf(&body);
            prop_assert!(validate(&cpf));
        }

        #[test]
        fn prop_single_digit_mutations_are_detected(
            body in proptest::collection::vec(0u32..10, 9),
        ) {
            prop_assume!(body.iter().any(|d| *d != body[0]));
            let cpf = complete_cpf(&body);

            let mut rejected = 0;
            for position in 0..cpf.len() {
                for replacement in '0'..='9' {
                    let mut mutated: Vec<char> = cpf.chars().collect();
                    if mutated[position] == replacement {
                        continue;
                    }
                    mutated[position] = replacement;
                    let mutated: String = mutated.into_iter().collect();
                    if !validate(&mutated) {
                        rejected += 1;
                    }
                }
            }
            prop_assert!(rejected > 0);

            // The last check digit is fully determined by the rest
            let mut last_changed: Vec<char> = cpf.chars().collect();
            last_changed[10] = if last_changed[10] == '0' { '1' } else { '0' };
            let last_changed: String = last_changed.into_iter().collect();
            prop_assert!(!validate(&last_changed));
        }

        #[test]
        fn prop_normalize_keeps_only_digits(raw in ".*") {
            let digits = normalize(&raw);
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(normalize(&digits), digits.clone());
        }
    }
}
