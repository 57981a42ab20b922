//! How two players at the table know each other

use serde::{Deserialize, Serialize};

/// Relationship kinds a question can be marked appropriate for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "Best Friends")]
    BestFriends,
    Colleagues,
    #[serde(rename = "New Acquaintances")]
    NewAcquaintances,
    Family,
    #[serde(rename = "Romantic Partners")]
    RomanticPartners,
    Roommates,
}

impl RelationshipType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationshipType::BestFriends => "Best Friends",
            RelationshipType::Colleagues => "Colleagues",
            RelationshipType::NewAcquaintances => "New Acquaintances",
            RelationshipType::Family => "Family",
            RelationshipType::RomanticPartners => "Romantic Partners",
            RelationshipType::Roommates => "Roommates",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
