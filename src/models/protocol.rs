use serde::{Deserialize, Serialize};

/// Category of a methodology protocol. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolCategory {
    Collection,
    Verification,
    Analysis,
    Risk,
    Output,
}

impl ProtocolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Verification => "Verification",
            Self::Analysis => "Analysis",
            Self::Risk => "Risk",
            Self::Output => "Output",
        }
    }
}

/// A fixed methodology document guiding the model's reasoning.
///
/// Protocols are static data: loaded once at process start and never
/// mutated. `key_points` is the ordered bullet summary shown in quick
/// views; `full_text` is the complete protocol document injected into
/// the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Protocol {
    pub id: &'static str,
    pub version: &'static str,
    pub title: &'static str,
    pub category: ProtocolCategory,
    pub key_points: &'static [&'static str],
    pub full_text: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_serde() {
        let json = serde_json::to_string(&ProtocolCategory::Verification).unwrap();
        assert_eq!(json, "\"Verification\"");
        let back: ProtocolCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProtocolCategory::Verification);
    }

    #[test]
    fn protocol_serializes_with_static_fields() {
        let protocol = Protocol {
            id: "demo",
            version: "V1.0",
            title: "Demo Protocol",
            category: ProtocolCategory::Analysis,
            key_points: &["first", "second"],
            full_text: "body",
        };
        let json = serde_json::to_value(&protocol).unwrap();
        assert_eq!(json["id"], "demo");
        assert_eq!(json["key_points"][1], "second");
        assert_eq!(json["category"], "Analysis");
    }

    #[test]
    fn category_as_str_matches_variant() {
        assert_eq!(ProtocolCategory::Risk.as_str(), "Risk");
        assert_eq!(ProtocolCategory::Output.as_str(), "Output");
    }
}
