use serde::Serialize;

use crate::models::Crew;

/// Crew member as rendered by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<Crew> for CrewResponse {
    fn from(crew: Crew) -> Self {
        let full_name = crew.full_name();
        Self {
            id: crew.id,
            first_name: crew.first_name,
            last_name: crew.last_name,
            full_name,
        }
    }
}
