use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a public record code such as `ORD_1718000000000_k3j9x0a2b`.
///
/// The middle segment is the current Unix time in milliseconds and the suffix is nine
/// random base36 characters.
pub fn generate_code(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!(
        "{}_{}_{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prefix_millis_and_suffix() {
        let code = generate_code("CLI");
        let parts: Vec<&str> = code.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "CLI");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn codes_differ() {
        assert_ne!(generate_code("ORD"), generate_code("ORD"));
    }
}
