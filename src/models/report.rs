//! The research report record, the pipeline's single data product.
//!
//! The shape mirrors the schema descriptor offered to the model
//! (`pipeline::schema`). The model is an external oracle, so every nested
//! section is optional and every closed-set field carries an `Unknown`
//! fallback: an off-schema string value must never fail the whole parse.
//! Consumers treat an absent section as "not rendered", not as an error.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Version tag stamped on synthesized metadata blocks.
pub const REPORT_META_VERSION: &str = "V3.0";

/// Neutral transparency fallback when the model supplied none (not a
/// measured value; keeps downstream display from showing a raw zero).
pub const TRANSPARENCY_FALLBACK: i64 = 50;

/// Death-spiral probability above this percentage triggers the
/// critical-alert display state downstream.
pub const DEATH_SPIRAL_CRITICAL_THRESHOLD: f64 = 40.0;

// ═══════════════════════════════════════════════════════════
// Closed-set fields
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdentityLock {
    Verified,
    Conflict,
    #[default]
    Pending,
    #[serde(other)]
    Unknown,
}

/// Source reliability tier, R1 (rug risk) through R5 (trusted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustTier {
    R1,
    R2,
    R3,
    R4,
    R5,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyStatus {
    Consistent,
    Deviation,
    Contradiction,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReflexivityType {
    Positive,
    Negative,
    Neutral,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTrend {
    Decreasing,
    Stable,
    Increasing,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitmentStatus {
    Aligned,
    Deviation,
    Fatal,
    #[serde(other)]
    Unknown,
}

// ═══════════════════════════════════════════════════════════
// Metadata
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyCheck {
    #[serde(default)]
    pub item: String,
    pub status: Option<ConsistencyStatus>,
    #[serde(default)]
    pub details: String,
}

/// Report metadata block. If the model omits it entirely, the reconciler
/// synthesizes one via [`ReportMeta::synthesized`] instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub transparency_score: i64,
    #[serde(default)]
    pub consistency_checks: Vec<ConsistencyCheck>,
    #[serde(default)]
    pub data_sources: Vec<String>,
}

impl ReportMeta {
    /// Default metadata block for responses that omitted `meta`.
    pub fn synthesized() -> Self {
        Self {
            version: REPORT_META_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            transparency_score: 0,
            consistency_checks: Vec::new(),
            data_sources: Vec::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Collection (Info Collection V4.0)
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OfficialLink {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: String,
}

/// Three-layer source classification from the collection protocol.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceLayers {
    #[serde(default)]
    pub t1_official: Vec<String>,
    #[serde(default)]
    pub t2_authoritative: Vec<String>,
    #[serde(default)]
    pub t3_community: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryCheck {
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSection {
    #[serde(default)]
    pub identity_lock: IdentityLock,
    pub lock_method: Option<String>,
    #[serde(default)]
    pub mutual_link_check: bool,
    pub missing_info_reason: Option<String>,
    #[serde(default)]
    pub official_links: Vec<OfficialLink>,
    pub source_layers: Option<SourceLayers>,
    pub secondary_check: Option<SecondaryCheck>,
}

// ═══════════════════════════════════════════════════════════
// Verification (Info Verification V6.0)
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScannedLayers {
    #[serde(default, rename = "T1_OnChain")]
    pub t1_on_chain: bool,
    #[serde(default, rename = "T2_Official")]
    pub t2_official: bool,
    #[serde(default, rename = "T3_Database")]
    pub t3_database: bool,
    #[serde(default, rename = "T4_Social")]
    pub t4_social: bool,
    #[serde(default, rename = "T5_Sentiment")]
    pub t5_sentiment: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerificationModules {
    #[serde(default)]
    pub contract_authenticity: String,
    #[serde(default)]
    pub liquidity_safety: String,
    #[serde(default)]
    pub team_identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceConflict {
    #[serde(default)]
    pub data_point: String,
    #[serde(default)]
    pub source1: String,
    #[serde(default)]
    pub source2: String,
    #[serde(default)]
    pub resolution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSection {
    pub trust_tier: Option<TrustTier>,
    #[serde(default)]
    pub trust_score: i64,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub data_decay_warning: bool,
    pub scanned_layers: Option<ScannedLayers>,
    pub modules: Option<VerificationModules>,
    #[serde(default)]
    pub conflicts: Vec<SourceConflict>,
}

// ═══════════════════════════════════════════════════════════
// Scoring & analysis sections
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub total_score: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub anti_fragility_score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMatrixEntry {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub full: i64,
    pub is_negative: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalSection {
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GithubAudit {
    #[serde(default)]
    pub repo_activity: String,
    #[serde(default)]
    pub dependency_risk: String,
    #[serde(default)]
    pub is_fake: bool,
    pub fake_reason: Option<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDimension {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TechFeasibilitySection {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub analysis: String,
    pub github_audit: Option<GithubAudit>,
    #[serde(default)]
    pub dimensions: Vec<ScoredDimension>,
}

// ═══════════════════════════════════════════════════════════
// Tokenomics (TIP V5.0) & market structure
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnlockCliff {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reflexivity {
    #[serde(rename = "type")]
    pub kind: Option<ReflexivityType>,
    pub death_spiral_risk: Option<SeverityLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenomicsSection {
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub details: String,
    /// Demand-side rating, 1 (pure speculation) through 5 (real exogenous
    /// revenue). Passed through as supplied.
    #[serde(default)]
    pub demand_level: i64,
    pub unlock_cliff: Option<UnlockCliff>,
    pub reflexivity: Option<Reflexivity>,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarketStructureSection {
    #[serde(default)]
    pub vc_cost_basis: String,
    #[serde(default)]
    pub liquidity_status: String,
    #[serde(default)]
    pub holder_structure: String,
}

// ═══════════════════════════════════════════════════════════
// On-chain monitoring & risk
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FundsFlow {
    #[serde(default)]
    pub inflow: String,
    #[serde(default)]
    pub outflow: String,
    #[serde(default)]
    pub whale_behavior: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OnchainSection {
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub details: String,
    pub funds_flow: Option<FundsFlow>,
    #[serde(default)]
    pub monitor_tags: Vec<String>,
    #[serde(default)]
    pub gray_area_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdversarialCheck {
    #[serde(default)]
    pub is_forged: bool,
    /// Behavior fingerprint, e.g. "similar to known rug patterns".
    #[serde(default)]
    pub behavior_pattern: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiskDimension {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub score: i64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentSection {
    #[serde(default)]
    pub tier: String,
    pub risk_trend: Option<RiskTrend>,
    #[serde(default)]
    pub mitigations: Vec<String>,
    pub adversarial_check: Option<AdversarialCheck>,
    #[serde(default)]
    pub dimensions: Vec<RiskDimension>,
}

// ═══════════════════════════════════════════════════════════
// Stress test (Stress V3.0)
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimeToFailure {
    #[serde(default, rename = "P10")]
    pub p10: String,
    #[serde(default, rename = "P50")]
    pub p50: String,
    #[serde(default, rename = "P90")]
    pub p90: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StressTestSection {
    #[serde(default)]
    pub survival_prob: String,
    /// Display string as supplied by the model, e.g. "35%" or "约 60%".
    #[serde(default)]
    pub death_spiral_prob: String,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub critical_param: String,
    pub time_to_failure: Option<TimeToFailure>,
}

impl StressTestSection {
    /// Numeric death-spiral probability, if one can be read out of the
    /// display string. Takes the first number found.
    pub fn death_spiral_percent(&self) -> Option<f64> {
        let s = &self.death_spiral_prob;
        let start = s.find(|c: char| c.is_ascii_digit())?;
        let rest = &s[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    }

    /// Whether the downstream critical-alert display state applies
    /// (probability above 40%).
    pub fn is_critical_alert(&self) -> bool {
        self.death_spiral_percent()
            .is_some_and(|p| p > DEATH_SPIRAL_CRITICAL_THRESHOLD)
    }
}

// ═══════════════════════════════════════════════════════════
// Sentiment, narrative, valuation, alignment, verdict
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSection {
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub risk: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSection {
    /// Narrative cycle stage, N1 (seed) through N6 (collapse).
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub heat_score: i64,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSection {
    #[serde(default)]
    pub bear_case: String,
    #[serde(default)]
    pub base_case: String,
    #[serde(default)]
    pub bull_case: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub reality: String,
    pub status: Option<CommitmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentMechanism {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentSection {
    #[serde(default)]
    pub score: i64,
    /// Whitepaper deviation grade 0 (none) through 4 (fatal).
    #[serde(default)]
    pub deviation_grade: i64,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub mechanisms: Vec<AlignmentMechanism>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiExplainability {
    #[serde(default)]
    pub evidence_chain: Vec<String>,
    #[serde(default)]
    pub logic_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub advice: String,
}

// ═══════════════════════════════════════════════════════════
// The report record
// ═══════════════════════════════════════════════════════════

/// Validated research report: created once per successful pipeline run,
/// immutable afterwards, never persisted.
///
/// `meta` is `Option` at parse time; the reconciler guarantees it is
/// populated on every record it returns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResearchReport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub one_sentence_thesis: String,
    pub meta: Option<ReportMeta>,
    pub collection: Option<CollectionSection>,
    pub verification: Option<VerificationSection>,
    pub executive_summary: Option<ExecutiveSummary>,
    #[serde(default)]
    pub score_matrix: Vec<ScoreMatrixEntry>,
    pub fundamental: Option<FundamentalSection>,
    pub tech_feasibility: Option<TechFeasibilitySection>,
    pub tokenomics: Option<TokenomicsSection>,
    pub market_structure: Option<MarketStructureSection>,
    pub onchain: Option<OnchainSection>,
    pub risk_assessment: Option<RiskAssessmentSection>,
    pub stress_test: Option<StressTestSection>,
    pub sentiment: Option<SentimentSection>,
    pub narrative: Option<NarrativeSection>,
    pub valuation: Option<ValuationSection>,
    pub alignment: Option<AlignmentSection>,
    pub ai_explainability: Option<AiExplainability>,
    pub final_verdict: Option<FinalVerdict>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Lenient parsing ─────────────────────────────────

    #[test]
    fn minimal_object_parses_with_defaults() {
        let report: ResearchReport = serde_json::from_str("{}").unwrap();
        assert!(report.name.is_empty());
        assert!(report.meta.is_none());
        assert!(report.collection.is_none());
        assert!(report.score_matrix.is_empty());
    }

    #[test]
    fn unknown_enum_value_does_not_fail_parse() {
        let json = r#"{
            "collection": { "identityLock": "SomethingNew" },
            "verification": { "trustTier": "R9" }
        }"#;
        let report: ResearchReport = serde_json::from_str(json).unwrap();
        assert_eq!(
            report.collection.unwrap().identity_lock,
            IdentityLock::Unknown
        );
        assert_eq!(
            report.verification.unwrap().trust_tier,
            Some(TrustTier::Unknown)
        );
    }

    #[test]
    fn known_enum_values_map_to_variants() {
        let json = r#"{
            "collection": { "identityLock": "Verified" },
            "tokenomics": {
                "reflexivity": { "type": "Negative", "deathSpiralRisk": "Critical" }
            }
        }"#;
        let report: ResearchReport = serde_json::from_str(json).unwrap();
        assert_eq!(
            report.collection.unwrap().identity_lock,
            IdentityLock::Verified
        );
        let reflexivity = report.tokenomics.unwrap().reflexivity.unwrap();
        assert_eq!(reflexivity.kind, Some(ReflexivityType::Negative));
        assert_eq!(reflexivity.death_spiral_risk, Some(SeverityLevel::Critical));
    }

    #[test]
    fn camel_case_wire_names_round_trip() {
        let json = r#"{
            "oneSentenceThesis": "A modular L2 with real revenue.",
            "executiveSummary": { "grade": "A", "totalScore": 82, "summary": "", "antiFragilityScore": 7 }
        }"#;
        let report: ResearchReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.one_sentence_thesis, "A modular L2 with real revenue.");
        assert_eq!(report.executive_summary.as_ref().unwrap().total_score, 82);

        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["oneSentenceThesis"], "A modular L2 with real revenue.");
        assert_eq!(out["executiveSummary"]["antiFragilityScore"], 7);
    }

    #[test]
    fn scanned_layers_use_upper_tier_names() {
        let json = r#"{ "T1_OnChain": true, "T4_Social": true }"#;
        let layers: ScannedLayers = serde_json::from_str(json).unwrap();
        assert!(layers.t1_on_chain);
        assert!(!layers.t2_official);
        assert!(layers.t4_social);
    }

    // ── Synthesized metadata ────────────────────────────

    #[test]
    fn synthesized_meta_has_version_and_timestamp() {
        let meta = ReportMeta::synthesized();
        assert_eq!(meta.version, REPORT_META_VERSION);
        assert!(!meta.timestamp.is_empty());
        assert_eq!(meta.transparency_score, 0);
        assert!(meta.consistency_checks.is_empty());
        assert!(meta.data_sources.is_empty());
    }

    // ── Death-spiral threshold ──────────────────────────

    #[test]
    fn death_spiral_percent_reads_plain_number() {
        let section = StressTestSection {
            death_spiral_prob: "35%".into(),
            ..Default::default()
        };
        assert_eq!(section.death_spiral_percent(), Some(35.0));
        assert!(!section.is_critical_alert());
    }

    #[test]
    fn death_spiral_percent_reads_embedded_number() {
        let section = StressTestSection {
            death_spiral_prob: "约 62.5% (高)".into(),
            ..Default::default()
        };
        assert_eq!(section.death_spiral_percent(), Some(62.5));
        assert!(section.is_critical_alert());
    }

    #[test]
    fn death_spiral_exactly_forty_is_not_critical() {
        let section = StressTestSection {
            death_spiral_prob: "40%".into(),
            ..Default::default()
        };
        assert!(!section.is_critical_alert());
    }

    #[test]
    fn death_spiral_without_number_is_not_critical() {
        let section = StressTestSection {
            death_spiral_prob: "Low".into(),
            ..Default::default()
        };
        assert_eq!(section.death_spiral_percent(), None);
        assert!(!section.is_critical_alert());
    }
}
