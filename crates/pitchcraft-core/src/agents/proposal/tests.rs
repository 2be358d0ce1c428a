use super::*;
use crate::prompts::PROPOSAL_SECTIONS;
use crate::Error;
use pitchcraft_llm::MockProvider;
use std::sync::Mutex;

type Log = Arc<Mutex<Vec<String>>>;

fn record(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

struct RecordingDirectory {
    log: Log,
}

#[async_trait]
impl Agent for RecordingDirectory {
    fn name(&self) -> &str {
        "lead"
    }

    async fn run(&self, input: &str) -> Result<String> {
        record(&self.log, format!("lookup:{input}"));
        Ok("LEAD DETAILS".to_string())
    }
}

#[async_trait]
impl LeadDirectory for RecordingDirectory {
    async fn list_all(&self) -> Result<String> {
        record(&self.log, "list");
        Ok("#1: Acme - Cloud Migration".to_string())
    }

    async fn search_by_term(&self, term: &str) -> Result<String> {
        record(&self.log, format!("search:{term}"));
        Ok("Total matches: 0".to_string())
    }
}

struct RecordingEstimator {
    log: Log,
    fail: bool,
}

#[async_trait]
impl Agent for RecordingEstimator {
    fn name(&self) -> &str {
        "engineer"
    }

    async fn run(&self, input: &str) -> Result<String> {
        record(&self.log, format!("estimate:{input}"));
        if self.fail {
            return Err(Error::Llm(pitchcraft_llm::Error::Api("estimator down".into())));
        }
        Ok("TECH REPORT".to_string())
    }
}

fn scripted_oracle(log: Log) -> (Arc<MockProvider>, Oracle) {
    let mock = Arc::new(MockProvider::new().with_responder(move |prompt| {
        if prompt.contains("Extract the lead ID") {
            record(&log, "extract");
            " 7 \n".to_string()
        } else if prompt.contains("project cost analyst") {
            record(&log, "costs");
            "COSTS".to_string()
        } else if prompt.contains("sales proposal") {
            record(&log, "assemble");
            PROPOSAL_SECTIONS
                .iter()
                .map(|s| format!("## {s}\n..."))
                .collect::<Vec<_>>()
                .join("\n\n")
        } else {
            record(&log, "unexpected");
            String::new()
        }
    }));
    (mock.clone(), Oracle::new(mock))
}

fn proposal_agent(log: &Log, estimator_fails: bool) -> (Arc<MockProvider>, ProposalAgent) {
    let (mock, oracle) = scripted_oracle(log.clone());
    let leads = Arc::new(RecordingDirectory { log: log.clone() });
    let estimator = Arc::new(RecordingEstimator {
        log: log.clone(),
        fail: estimator_fails,
    });
    let costs = CostCalculator::new(oracle.clone(), RateTable::standard());
    (mock, ProposalAgent::new(oracle, leads, estimator, costs))
}

#[tokio::test]
async fn test_stages_run_once_in_order() {
    let log: Log = Arc::default();
    let (_, agent) = proposal_agent(&log, false);

    agent.run("Generate a proposal for lead 7").await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "extract",
            "lookup:Give me all details for lead with id 7",
            "estimate:LEAD DETAILS",
            "costs",
            "assemble",
        ]
    );
}

#[tokio::test]
async fn test_outputs_flow_between_stages() {
    let log: Log = Arc::default();
    let (mock, agent) = proposal_agent(&log, false);

    let proposal = agent.run("Generate a proposal for lead 7").await.unwrap();

    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Request: Generate a proposal for lead 7"));
    assert!(prompts[1].contains("TECH REPORT"));
    assert!(prompts[1].contains("- Tech Lead: $1200/day"));
    assert!(prompts[2].contains("LEAD DETAILS"));
    assert!(prompts[2].contains("TECH REPORT"));
    assert!(prompts[2].contains("COSTS"));
    for section in PROPOSAL_SECTIONS {
        assert!(proposal.contains(&format!("## {section}")), "missing {section}");
    }
}

#[tokio::test]
async fn test_failure_stops_pipeline() {
    let log: Log = Arc::default();
    let (mock, agent) = proposal_agent(&log, true);

    let err = agent.run("Generate a proposal for lead 7").await.unwrap_err();

    assert!(matches!(err, Error::Llm(_)));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("estimate:LEAD DETAILS"));
    assert!(!log.lock().unwrap().iter().any(|e| e == "costs" || e == "assemble"));
}

#[tokio::test]
async fn test_list_and_search_pass_through() {
    let log: Log = Arc::default();
    let (mock, agent) = proposal_agent(&log, false);

    assert_eq!(agent.list_leads().await.unwrap(), "#1: Acme - Cloud Migration");
    assert_eq!(agent.search_leads("cloud").await.unwrap(), "Total matches: 0");

    assert_eq!(*log.lock().unwrap(), vec!["list", "search:cloud"]);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_lead_id_used_verbatim() {
    let mock = Arc::new(MockProvider::new());
    mock.push_reply("  lead-ABC  ");
    let log: Log = Arc::default();
    let agent = ProposalAgent::new(
        Oracle::new(mock.clone()),
        Arc::new(RecordingDirectory { log: log.clone() }),
        Arc::new(RecordingEstimator {
            log: log.clone(),
            fail: false,
        }),
        CostCalculator::new(Oracle::new(mock), RateTable::standard()),
    );

    assert_eq!(agent.extract_lead_id("proposal for lead-ABC").await.unwrap(), "lead-ABC");
}
