use serde::{Deserialize, Serialize};

/// Physician identified by their CRM license number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Physician {
    pub crm: String,
    pub name: String,
    pub specialty: String,
}
