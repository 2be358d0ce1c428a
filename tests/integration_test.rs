//! Integration tests for Pitchcraft
//!
//! Real SQLite stores, scripted oracle:
//! - pitchcraft-store: schema, queries, seeding
//! - pitchcraft-core: data-query, estimation and proposal pipelines
//! - workflow: uniform message-in, message-out invocation

use std::sync::Arc;

use pitchcraft_core::prompts::PROPOSAL_SECTIONS;
use pitchcraft_core::{
    Agent, DataQueryAgent, Error, LeadDirectory, ProposalAgent, RateTable, Workflow,
    WorkflowState,
};
use pitchcraft_llm::{MockProvider, Oracle};
use pitchcraft_store::{generate_leads, LeadStore, NewLead};
use rand::{rngs::StdRng, SeedableRng};

// ============================================================================
// Scripted oracle
// ============================================================================

fn request_line(prompt: &str) -> &str {
    prompt
        .lines()
        .find_map(|l| l.strip_prefix("Request: "))
        .unwrap_or_default()
}

/// Answers each stage's prompt from the prompt text alone.
fn scripted_reply(prompt: &str) -> String {
    if prompt.contains("You are a SQL expert") {
        let id = request_line(prompt).rsplit(' ').next().unwrap_or_default();
        format!("```sql\n-- intent: listing\nSELECT * FROM sales_leads WHERE id = {id};\n```")
    } else if prompt.contains("presenting lead records") {
        prompt
            .lines()
            .filter(|l| l.starts_with('#') || l.contains("Total matches:"))
            .map(|l| l.trim_start_matches("Begin with this line: "))
            .collect::<Vec<_>>()
            .join("\n")
    } else if prompt.contains("Extract the lead ID") {
        format!(" {} ", request_line(prompt).rsplit(' ').next().unwrap_or_default())
    } else if prompt.contains("Break the following requirements") {
        "1. Project Overview\n2. Technical Requirements\n3. Phased Subtasks\n4. Technical Considerations".to_string()
    } else if prompt.contains("estimating delivery effort") {
        "Total effort: 90 man-days".to_string()
    } else if prompt.contains("project cost analyst") {
        "Total project cost: $72,000".to_string()
    } else if prompt.contains("sales proposal") {
        prompt
            .lines()
            .skip_while(|l| !l.ends_with("in this order:"))
            .skip(1)
            .filter_map(|l| l.split_once(". ").map(|(_, title)| format!("## {title}\n...")))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        String::new()
    }
}

fn scripted_oracle() -> (Arc<MockProvider>, Oracle) {
    let mock = Arc::new(MockProvider::new().with_responder(scripted_reply));
    (mock.clone(), Oracle::new(mock))
}

async fn seeded_store(count: usize) -> LeadStore {
    let store = LeadStore::in_memory().await.unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let leads = generate_leads(count, &mut rng, chrono::Utc::now());
    store.insert_leads(&leads).await.unwrap();
    store
}

// ============================================================================
// Proposal pipeline
// ============================================================================

#[tokio::test]
async fn test_proposal_for_existing_lead_has_all_sections() {
    let store = seeded_store(10).await;
    let (mock, oracle) = scripted_oracle();
    let agent = ProposalAgent::with_store(oracle, store, RateTable::standard());
    let workflow = Workflow::new(Arc::new(agent));

    let proposal = workflow.run("Generate a proposal for lead 7").await.unwrap();

    for section in PROPOSAL_SECTIONS {
        assert!(proposal.contains(&format!("## {section}")), "missing section {section}");
    }

    // extract, synthesize, format, breakdown, estimate, costs, assemble
    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 7);
    assert!(prompts[1].contains("Request: Give me all details for lead with id 7"));
    assert!(prompts[2].contains("#7: "));
    assert!(prompts[5].contains("Total effort: 90 man-days"));
    assert!(prompts[6].contains("Total project cost: $72,000"));
}

#[tokio::test]
async fn test_proposal_workflow_state() {
    let store = seeded_store(3).await;
    let (_, oracle) = scripted_oracle();
    let workflow = Workflow::new(Arc::new(ProposalAgent::with_store(
        oracle,
        store,
        RateTable::standard(),
    )));

    let state = workflow
        .invoke(WorkflowState::new("Generate a proposal for lead 2"))
        .await
        .unwrap();

    assert_eq!(state.messages.len(), 2);
    assert!(state.last_text().unwrap().contains("## Executive Summary"));
}

// ============================================================================
// Canned lead queries
// ============================================================================

#[tokio::test]
async fn test_search_reports_count_and_ids() {
    let store = LeadStore::in_memory().await.unwrap();
    let mut ids = Vec::new();
    for (name, company, needs) in [
        ("Ann Lee", "Acme Corp", "Cloud Migration"),
        ("Bo Chen", "Beta LLC", "Mobile App Development"),
        ("Cy Diaz", "Gamma Inc", "cloud migration and DevOps"),
        ("Di Evans", "Delta Group", "Security Audit"),
    ] {
        ids.push(store.insert_lead(&NewLead::new(name, company, needs)).await.unwrap());
    }
    let (_, oracle) = scripted_oracle();
    let agent = ProposalAgent::with_store(oracle, store, RateTable::standard());

    let text = agent.search_leads("cloud migration").await.unwrap();

    assert!(text.contains("Total matches: 2"));
    assert!(text.contains(&format!("#{}:", ids[0])));
    assert!(text.contains(&format!("#{}:", ids[2])));
    assert!(!text.contains(&format!("#{}:", ids[1])));
    assert!(!text.contains(&format!("#{}:", ids[3])));
}

#[tokio::test]
async fn test_search_without_match_reports_zero() {
    let store = seeded_store(5).await;
    let (_, oracle) = scripted_oracle();
    let agent = DataQueryAgent::new(store, oracle);

    let text = agent.search_by_term("no such thing anywhere").await.unwrap();
    assert_eq!(text, "Total matches: 0");
}

#[tokio::test]
async fn test_list_all_tracks_store_contents() {
    let store = seeded_store(12).await;
    let (_, oracle) = scripted_oracle();
    let agent = DataQueryAgent::new(store.clone(), oracle);

    let before = agent.list_all().await.unwrap();
    assert_eq!(before.lines().count() as i64, store.count_leads().await.unwrap());

    let listed: Vec<i64> = before
        .lines()
        .filter_map(|l| l.strip_prefix('#')?.split(':').next()?.parse().ok())
        .collect();
    let mut sorted = listed.clone();
    sorted.sort_unstable();
    assert_eq!(listed, sorted);

    let id = store
        .insert_lead(&NewLead::new("New Person", "Omega Ltd", "ERP Implementation"))
        .await
        .unwrap();
    let after = agent.list_all().await.unwrap();

    assert_eq!(after.lines().count(), before.lines().count() + 1);
    let new_lines: Vec<&str> = after.lines().filter(|l| !before.contains(*l)).collect();
    assert_eq!(new_lines, vec![format!("#{id}: Omega Ltd - ERP Implementation")]);
}

// ============================================================================
// Failure propagation
// ============================================================================

#[tokio::test]
async fn test_invalid_query_surfaces_store_error() {
    let store = seeded_store(3).await;
    let mock = Arc::new(MockProvider::new().with_responder(scripted_reply));
    mock.push_reply("SELEC id FROM sales_leads");
    let workflow = Workflow::new(Arc::new(DataQueryAgent::new(store, Oracle::new(mock.clone()))));

    let err = workflow.run("show me everything").await.unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    // no formatting call after the failed query
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_direct_store_rejects_bad_syntax() {
    let store = seeded_store(1).await;
    let err = store.execute("SELECT id FROM sales_leads WHERE").await.unwrap_err();
    assert!(err.is_query_failure());
}

#[tokio::test]
async fn test_oracle_failure_aborts_proposal() {
    let store = seeded_store(3).await;
    let mock = Arc::new(MockProvider::new().with_responder(scripted_reply));
    mock.push_error("service unavailable");
    let agent = ProposalAgent::with_store(Oracle::new(mock.clone()), store, RateTable::standard());

    let err = agent.run("Generate a proposal for lead 1").await.unwrap_err();

    assert!(matches!(err, Error::Llm(_)));
    assert_eq!(mock.call_count(), 1);
}

// ============================================================================
// Database files
// ============================================================================

#[tokio::test]
async fn test_seeded_file_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("leads.db");

    let created = LeadStore::create(&path).await.unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    created
        .insert_leads(&generate_leads(50, &mut rng, chrono::Utc::now()))
        .await
        .unwrap();
    created.close().await;

    let reopened = LeadStore::connect(&path).await.unwrap();
    assert_eq!(reopened.count_leads().await.unwrap(), 50);
}
