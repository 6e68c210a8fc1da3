//! Declarative schema descriptor for the report record.
//!
//! The descriptor is serialized into the prompt so the model targets the
//! report shape, and it documents the contract the reconciler enforces
//! procedurally. It is not executable validation code. Property order is
//! preserved exactly as declared; the serialized schema must be stable
//! across runs for the prompt to be deterministic.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Value categories understood by the model's response-schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "OBJECT",
            Self::Array => "ARRAY",
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
        }
    }
}

/// One node of the recursively-typed schema descriptor.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    kind: SchemaType,
    description: Option<&'static str>,
    properties: Vec<(&'static str, SchemaNode)>,
    items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    fn new(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Object with ordered properties.
    pub fn object(properties: Vec<(&'static str, SchemaNode)>) -> Self {
        Self {
            properties,
            ..Self::new(SchemaType::Object)
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Attach a free-text hint for fields the model tends to get wrong.
    pub fn describe(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    /// Ordered property names (objects only).
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|(name, _)| *name)
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, node)| node)
    }

    /// Pretty-printed JSON in declared property order, as embedded in the
    /// prompt payload.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("schema serialization is infallible")
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.as_str())?;
        if let Some(text) = self.description {
            map.serialize_entry("description", text)?;
        }
        if self.kind == SchemaType::Object {
            map.serialize_entry("properties", &OrderedProperties(&self.properties))?;
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        map.end()
    }
}

/// Serializes property pairs as a JSON object in declaration order.
struct OrderedProperties<'a>(&'a [(&'static str, SchemaNode)]);

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

/// Full schema descriptor for [`crate::models::ResearchReport`].
pub fn report_schema() -> SchemaNode {
    SchemaNode::object(vec![
        ("name", SchemaNode::string()),
        ("ticker", SchemaNode::string()),
        (
            "oneSentenceThesis",
            SchemaNode::string().describe("The core logic of the project in one sentence."),
        ),
        (
            "meta",
            SchemaNode::object(vec![
                ("version", SchemaNode::string()),
                ("timestamp", SchemaNode::string()),
                ("transparencyScore", SchemaNode::integer()),
                (
                    "consistencyChecks",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("item", SchemaNode::string()),
                        ("status", SchemaNode::string()),
                        ("details", SchemaNode::string()),
                    ])),
                ),
                ("dataSources", SchemaNode::array(SchemaNode::string())),
            ]),
        ),
        (
            "collection",
            SchemaNode::object(vec![
                (
                    "identityLock",
                    SchemaNode::string().describe("Verified | Conflict | Pending"),
                ),
                (
                    "lockMethod",
                    SchemaNode::string()
                        .describe("The reasoning for lock (e.g. Mutual Links + Domain)"),
                ),
                ("mutualLinkCheck", SchemaNode::boolean()),
                ("missingInfoReason", SchemaNode::string()),
                (
                    "officialLinks",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("platform", SchemaNode::string()),
                        ("url", SchemaNode::string()),
                        ("status", SchemaNode::string()),
                    ])),
                ),
                (
                    "sourceLayers",
                    SchemaNode::object(vec![
                        ("t1_official", SchemaNode::array(SchemaNode::string())),
                        ("t2_authoritative", SchemaNode::array(SchemaNode::string())),
                        ("t3_community", SchemaNode::array(SchemaNode::string())),
                    ]),
                ),
                (
                    "secondaryCheck",
                    SchemaNode::object(vec![
                        ("passed", SchemaNode::boolean()),
                        ("flags", SchemaNode::array(SchemaNode::string())),
                    ]),
                ),
            ]),
        ),
        (
            "verification",
            SchemaNode::object(vec![
                (
                    "trustTier",
                    SchemaNode::string().describe("R1, R2, R3, R4, R5"),
                ),
                ("trustScore", SchemaNode::integer()),
                ("verdict", SchemaNode::string()),
                ("dataDecayWarning", SchemaNode::boolean()),
                (
                    "scannedLayers",
                    SchemaNode::object(vec![
                        ("T1_OnChain", SchemaNode::boolean()),
                        ("T2_Official", SchemaNode::boolean()),
                        ("T3_Database", SchemaNode::boolean()),
                        ("T4_Social", SchemaNode::boolean()),
                        ("T5_Sentiment", SchemaNode::boolean()),
                    ]),
                ),
                (
                    "modules",
                    SchemaNode::object(vec![
                        ("contractAuthenticity", SchemaNode::string()),
                        ("liquiditySafety", SchemaNode::string()),
                        ("teamIdentity", SchemaNode::string()),
                    ]),
                ),
                (
                    "conflicts",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("dataPoint", SchemaNode::string()),
                        ("source1", SchemaNode::string()),
                        ("source2", SchemaNode::string()),
                        ("resolution", SchemaNode::string()),
                    ])),
                ),
            ]),
        ),
        (
            "executiveSummary",
            SchemaNode::object(vec![
                ("grade", SchemaNode::string()),
                ("totalScore", SchemaNode::integer()),
                ("summary", SchemaNode::string()),
                ("antiFragilityScore", SchemaNode::integer()),
            ]),
        ),
        (
            "scoreMatrix",
            SchemaNode::array(SchemaNode::object(vec![
                ("category", SchemaNode::string()),
                ("score", SchemaNode::integer()),
                ("full", SchemaNode::integer()),
                ("isNegative", SchemaNode::boolean()),
            ])),
        ),
        (
            "fundamental",
            SchemaNode::object(vec![
                ("verdict", SchemaNode::string()),
                ("content", SchemaNode::string()),
            ]),
        ),
        (
            "techFeasibility",
            SchemaNode::object(vec![
                ("score", SchemaNode::integer()),
                ("grade", SchemaNode::string()),
                ("analysis", SchemaNode::string()),
                (
                    "githubAudit",
                    SchemaNode::object(vec![
                        ("repoActivity", SchemaNode::string()),
                        ("dependencyRisk", SchemaNode::string()),
                        ("isFake", SchemaNode::boolean()),
                        ("fakeReason", SchemaNode::string()),
                        ("notes", SchemaNode::string()),
                    ]),
                ),
                (
                    "dimensions",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("label", SchemaNode::string()),
                        ("score", SchemaNode::integer()),
                        ("confidence", SchemaNode::number()),
                    ])),
                ),
            ]),
        ),
        (
            "tokenomics",
            SchemaNode::object(vec![
                ("verdict", SchemaNode::string()),
                ("score", SchemaNode::integer()),
                ("details", SchemaNode::string()),
                ("demandLevel", SchemaNode::integer()),
                (
                    "unlockCliff",
                    SchemaNode::object(vec![
                        ("exists", SchemaNode::boolean()),
                        ("note", SchemaNode::string()),
                    ]),
                ),
                (
                    "reflexivity",
                    SchemaNode::object(vec![
                        (
                            "type",
                            SchemaNode::string().describe("Positive | Negative | Neutral"),
                        ),
                        (
                            "deathSpiralRisk",
                            SchemaNode::string().describe("Low | Medium | High | Critical"),
                        ),
                    ]),
                ),
                ("flags", SchemaNode::array(SchemaNode::string())),
            ]),
        ),
        (
            "marketStructure",
            SchemaNode::object(vec![
                ("vcCostBasis", SchemaNode::string()),
                ("liquidityStatus", SchemaNode::string()),
                ("holderStructure", SchemaNode::string()),
            ]),
        ),
        (
            "onchain",
            SchemaNode::object(vec![
                ("verdict", SchemaNode::string()),
                ("details", SchemaNode::string()),
                (
                    "fundsFlow",
                    SchemaNode::object(vec![
                        ("inflow", SchemaNode::string()),
                        ("outflow", SchemaNode::string()),
                        ("whaleBehavior", SchemaNode::string()),
                    ]),
                ),
                ("monitorTags", SchemaNode::array(SchemaNode::string())),
                ("grayAreaTags", SchemaNode::array(SchemaNode::string())),
            ]),
        ),
        (
            "riskAssessment",
            SchemaNode::object(vec![
                ("tier", SchemaNode::string()),
                ("riskTrend", SchemaNode::string()),
                ("mitigations", SchemaNode::array(SchemaNode::string())),
                (
                    "adversarialCheck",
                    SchemaNode::object(vec![
                        ("isForged", SchemaNode::boolean()),
                        (
                            "behaviorPattern",
                            SchemaNode::string().describe("Behavior Fingerprint Analysis"),
                        ),
                        ("details", SchemaNode::string()),
                    ]),
                ),
                (
                    "dimensions",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("label", SchemaNode::string()),
                        ("level", SchemaNode::string()),
                        ("score", SchemaNode::integer()),
                        ("note", SchemaNode::string()),
                    ])),
                ),
            ]),
        ),
        (
            "stressTest",
            SchemaNode::object(vec![
                ("survivalProb", SchemaNode::string()),
                ("deathSpiralProb", SchemaNode::string()),
                ("scenario", SchemaNode::string()),
                ("criticalParam", SchemaNode::string()),
                (
                    "timeToFailure",
                    SchemaNode::object(vec![
                        ("P10", SchemaNode::string()),
                        ("P50", SchemaNode::string()),
                        ("P90", SchemaNode::string()),
                    ]),
                ),
            ]),
        ),
        (
            "sentiment",
            SchemaNode::object(vec![
                ("quality", SchemaNode::string()),
                ("risk", SchemaNode::string()),
                ("details", SchemaNode::string()),
            ]),
        ),
        (
            "narrative",
            SchemaNode::object(vec![
                ("stage", SchemaNode::string()),
                ("heatScore", SchemaNode::integer()),
                ("position", SchemaNode::string()),
                ("strategy", SchemaNode::string()),
            ]),
        ),
        (
            "valuation",
            SchemaNode::object(vec![
                ("bearCase", SchemaNode::string()),
                ("baseCase", SchemaNode::string()),
                ("bullCase", SchemaNode::string()),
            ]),
        ),
        (
            "alignment",
            SchemaNode::object(vec![
                ("score", SchemaNode::integer()),
                ("deviationGrade", SchemaNode::integer()),
                ("verdict", SchemaNode::string()),
                (
                    "commitments",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("claim", SchemaNode::string()),
                        ("reality", SchemaNode::string()),
                        ("status", SchemaNode::string()),
                    ])),
                ),
                (
                    "mechanisms",
                    SchemaNode::array(SchemaNode::object(vec![
                        ("name", SchemaNode::string()),
                        ("status", SchemaNode::string()),
                    ])),
                ),
            ]),
        ),
        (
            "aiExplainability",
            SchemaNode::object(vec![
                ("evidenceChain", SchemaNode::array(SchemaNode::string())),
                ("logicPath", SchemaNode::string()),
            ]),
        ),
        (
            "finalVerdict",
            SchemaNode::object(vec![
                ("rating", SchemaNode::string()),
                ("advice", SchemaNode::string()),
            ]),
        ),
    ])
}
