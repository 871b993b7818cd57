use uuid::Uuid;

/// Keeps a caller-chosen id, otherwise generates a time-ordered one.
pub fn id_or_generate(id: &Option<String>) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => Uuid::now_v7().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_given_ids() {
        assert_eq!(id_or_generate(&Some("u1".to_owned())), "u1");
    }

    #[test]
    fn generates_missing_ids() {
        let first = id_or_generate(&None);
        let second = id_or_generate(&Some(String::new()));

        assert_eq!(first.len(), 36);
        assert!(Uuid::parse_str(&second).is_ok());
        assert_ne!(first, second);
    }
}
