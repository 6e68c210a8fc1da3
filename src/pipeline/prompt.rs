//! Prompt composition: deterministic assembly of the instruction payload.
//!
//! Pure function of (query, corpus, schema, output language). The payload
//! order is fixed: role preamble, full protocol corpus, cross-cutting logic
//! constraints, execution-phase outline, output contract plus serialized
//! schema. Anything that moves here changes the request fingerprint, so
//! additions go at the end of their section.

use std::fmt::Write;

use super::schema::SchemaNode;
use super::AnalysisError;
use crate::corpus::ProtocolCorpus;

/// Role/identity preamble. The engine persona the model is told to adopt.
const ROLE_PREAMBLE: &str = "Role: You are \"Aura\", the ultimate Web3 Research Engine. \
You are a strict execution engine following 12 specific protocols provided in the context.";

/// Cross-cutting logic constraints. These override protocol text when the
/// two conflict, and are numbered in a fixed order.
const LOGIC_CONSTRAINTS: &[&str] = &[
    "[Score V3.0 RULE] IF Risk Tier is \"Tier 4\" (Critical) or \"Tier 3\" (High), the \
     \"totalScore\" MUST be capped at 60. DO NOT exceed 60 if risk is high.",
    "[WAP V3.0 RULE] For 'whaleBehavior', apply the 5-Step Filter: Check if address is \
     (1)Staking Pool (2)Exchange (3)Contract (4)Bot (5)Whitepaper-explained. Only if ALL \
     false, label \"Whale Risk\".",
    "[Monitor V3.0 RULE] Use specific tags: \"Dump risk\", \"Wash trading\", \
     \"Whale accumulation\", \"Flash-loan pattern\" if evidence matches.",
    "[Tech V3.0 RULE] If \"repoActivity\" is \"Fake/None\" or \"isFake\" is true, \
     \"techFeasibility.score\" MUST be < 40.",
    "[TIP V5.0 RULE] If \"Top 10 Holders\" > 80% AND not confirmed as Locked/Contract, \
     mark as High Concentration Risk.",
];

/// Numbered execution-phase outline mirroring the protocol categories.
const EXECUTION_PHASES: &str = r#"PHASE 0: META FRAMEWORK (V7.0)
- Generate a "One-Sentence Thesis".

PHASE 1: COLLECTION (V4.0) - IDENTITY LOCK ALGORITHM
- EXECUTE Identity Lock V4.0.
- TWO-CONDITION RULE: To label 'identityLock' as 'Verified', you MUST find at least TWO corroborating links.
- INTERNAL T1 RESOLUTION: If official sources conflict, PRIORITY is given to Github/Domain.
- OUTPUT 'lockMethod'.
- MISSING INFO MANDATE: If core info missing, fill 'missingInfoReason'.

PHASE 1.5: DEEP VERIFICATION (Verification V6.0)
- STRICTLY EXECUTE SIX-LAYER VERIFICATION.
- CHECK INFO DECAY.
- RUN MODULE CHECKS.

PHASE 2: ALIGNMENT & TECH (WAP V3.0 & Tech V3.0)
- EXECUTE WAP V3.0: Deviation Scoring (0-4).
- EXECUTE Tech V3.0: CHECK for FAKE CODEBASE.
- TECH SCORING WEIGHTS: Architecture(25%)+Team(20%)+Performance(20%)+Security(25%)+Deliverability(10%).

PHASE 3: NARRATIVE CYCLE ANALYSIS (NCP V7.0)
- Determine Stage (N1-N6) and Strategy.
- ENFORCE STRATEGY MAPPING: N1->Early Position, N2->Core Position, N3->Momentum, N4->Scale Out, N5->Reduce, N6->Clear.

PHASE 4: MONITORING & TOKENOMICS (Monitor V3.0 & TIP V5.0)
- Monitor V3.0: Populate "fundsFlow". Use standard monitor tags.
- TIP V5.0: Assign "demandLevel" (1-5). INFLATION THRESHOLD CHECK (>15% is High). Check "reflexivity".
- CLIFF DETECTION: Specifically identify if there is a massive unlock event ("Cliff") upcoming. Populate 'unlockCliff'.
- MSP V7.0: Populate "marketStructure" (VC Cost Basis, Liquidity Status).

PHASE 4.5: RISK V6.0 (5-PILLARS)
- Assess 5 Dimensions.
- DETERMINE "riskTrend".
- FINGERPRINT MATCHING: Check 'adversarialCheck.behaviorPattern'. Does funds flow/behavior match known rugs?
- EXECUTE "mitigation": Identify factors like Timelock > 48h, Audits, Multisig. List them in 'mitigations'.

PHASE 5: STRESS TEST & VALUATION (Stress V3.0 & Valuation V7.0)
- Bear/Base/Bull scenarios.
- ESTIMATE "timeToFailure" distribution (P10/P50/P90) based on burn rate and risks.

PHASE 6: SCORING & OUTPUT (Score V3.0 & Output V3.0)
- CALCULATE Anti-Fragility Score.
- NARRATIVE DISTORTION FORMULA (N4x0.85, N5/N6x1.2).
- CALCULATE TOTAL SCORE (Weighted) - APPLY CAP IF RISK IS HIGH.
- CALCULATE TRANSPARENCY SCORE (Output V3.0 Formula).
- GENERATE DETAILED CONSISTENCY CHECKS array (Chain vs Paper, Paper vs Social, etc.)."#;

/// Compose the full instruction payload for one analysis request.
///
/// The query must be non-empty after trimming. No side effects: the same
/// inputs always produce the same payload.
pub fn compose_prompt(
    query: &str,
    corpus: &ProtocolCorpus,
    schema: &SchemaNode,
    output_language: &str,
) -> Result<String, AnalysisError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AnalysisError::InvalidQuery);
    }

    let mut prompt = String::new();

    let _ = writeln!(prompt, "{ROLE_PREAMBLE}");
    let _ = writeln!(
        prompt,
        "Target: Analyze \"{query}\" based on real-time web data.\n"
    );

    let _ = writeln!(prompt, "--- YOUR LAWS (FULL PROTOCOL CONTEXT) ---");
    for protocol in corpus.iter() {
        let _ = writeln!(
            prompt,
            "\n>>> [PROTOCOL {}] {} RULES:\n{}",
            protocol.version, protocol.title, protocol.full_text
        );
    }
    let _ = writeln!(prompt, "------------------------------------\n");

    let _ = writeln!(prompt, "--- CRITICAL LOGIC CONSTRAINTS (MUST FOLLOW) ---");
    for (index, constraint) in LOGIC_CONSTRAINTS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {constraint}", index + 1);
    }

    let _ = writeln!(
        prompt,
        "\n--- EXECUTION WORKFLOW (AGENTIC CHAIN OF THOUGHT) ---\n\n{EXECUTION_PHASES}"
    );

    let _ = writeln!(
        prompt,
        "\n--- OUTPUT REQUIREMENT ---\n\
         Return ONLY raw JSON matching the schema below.\n\
         STRICTLY JSON. NO MARKDOWN. NO CODE BLOCKS.\n\
         Language: {output_language}.\n\n\
         JSON Schema:\n{}",
        schema.to_pretty_json()
    );

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::report_schema;

    fn compose(query: &str) -> Result<String, AnalysisError> {
        compose_prompt(
            query,
            &ProtocolCorpus::builtin(),
            &report_schema(),
            "Chinese (中文)",
        )
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(compose(""), Err(AnalysisError::InvalidQuery)));
        assert!(matches!(compose("   "), Err(AnalysisError::InvalidQuery)));
    }

    #[test]
    fn prompt_contains_query_and_preamble() {
        let prompt = compose("EtherLayer X").unwrap();
        assert!(prompt.contains("Analyze \"EtherLayer X\""));
        assert!(prompt.starts_with("Role: You are \"Aura\""));
    }

    #[test]
    fn query_is_trimmed() {
        let prompt = compose("  Solana  ").unwrap();
        assert!(prompt.contains("Analyze \"Solana\""));
    }

    #[test]
    fn every_protocol_rendered_with_version_tag() {
        let prompt = compose("X").unwrap();
        for protocol in ProtocolCorpus::builtin().iter() {
            let header = format!(">>> [PROTOCOL {}] {} RULES:", protocol.version, protocol.title);
            assert!(prompt.contains(&header), "missing header for {}", protocol.id);
        }
    }

    #[test]
    fn protocols_appear_in_corpus_order() {
        let prompt = compose("X").unwrap();
        let mut last = 0;
        for protocol in ProtocolCorpus::builtin().iter() {
            let pos = prompt
                .find(&format!("[PROTOCOL {}]", protocol.version))
                .unwrap();
            assert!(pos > last, "protocol {} out of order", protocol.id);
            last = pos;
        }
    }

    #[test]
    fn constraints_are_numbered_in_order() {
        let prompt = compose("X").unwrap();
        assert!(prompt.contains("1. [Score V3.0 RULE]"));
        assert!(prompt.contains("5. [TIP V5.0 RULE]"));
        let cap = prompt.find("capped at 60").unwrap();
        let whale = prompt.find("5-Step Filter").unwrap();
        assert!(cap < whale);
    }

    #[test]
    fn output_contract_names_language_and_schema() {
        let prompt = compose("X").unwrap();
        assert!(prompt.contains("Return ONLY raw JSON"));
        assert!(prompt.contains("NO MARKDOWN. NO CODE BLOCKS."));
        assert!(prompt.contains("Language: Chinese (中文)."));
        assert!(prompt.contains("\"oneSentenceThesis\""));
    }

    #[test]
    fn execution_phases_present() {
        let prompt = compose("X").unwrap();
        assert!(prompt.contains("PHASE 0: META FRAMEWORK"));
        assert!(prompt.contains("PHASE 6: SCORING & OUTPUT"));
        assert!(prompt.contains("TWO-CONDITION RULE"));
    }

    #[test]
    fn composition_is_deterministic() {
        assert_eq!(compose("Arbitrum").unwrap(), compose("Arbitrum").unwrap());
    }
}
