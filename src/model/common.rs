use uuid::Uuid;

/// Opaque record identifier (UUID formatted for records this service creates)
pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique_uuid() {
        let first = generate_id();
        let second = generate_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
