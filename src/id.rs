//! Identifier generation for new nodes and cards.

use uuid::Uuid;

/// Fresh process-unique identifier (UUID v4)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
