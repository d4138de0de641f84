use crate::search::SearchKey;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A by-ID or by-name lookup matched no parent row.
    #[error("resource of type '{resource}' with {key} not found")]
    NotFound {
        resource: &'static str,
        key: SearchKey,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_by_id() {
        let err = CoreError::NotFound {
            resource: "pokemon",
            key: SearchKey::Id(9999),
        };
        assert_eq!(
            err.to_string(),
            "resource of type 'pokemon' with ID '9999' not found"
        );
    }

    #[test]
    fn not_found_message_by_name() {
        let err = CoreError::NotFound {
            resource: "move",
            key: SearchKey::Name("Tackle".into()),
        };
        assert_eq!(
            err.to_string(),
            "resource of type 'move' with name 'Tackle' not found"
        );
    }
}
