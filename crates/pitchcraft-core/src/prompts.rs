//! Prompt templates
//!
//! Each stage owns one template. Placeholders use `{name}` and are filled
//! in a single pass over the template, so inserted text is never scanned
//! for placeholders again.

use crate::rates::RateTable;
use pitchcraft_store::{LEADS_TABLE, LEAD_COLUMNS};

/// Section titles every proposal must carry, in document order
pub const PROPOSAL_SECTIONS: [&str; 8] = [
    "Executive Summary",
    "Project Understanding",
    "Proposed Solution",
    "Implementation Approach",
    "Timeline",
    "Team Composition",
    "Investment",
    "Terms and Conditions",
];

/// Heading of the combined estimation report
pub const REPORT_TITLE: &str = "# Project Analysis and Estimation";
/// Heading of the breakdown half of the report
pub const PLAN_HEADING: &str = "## Project Plan";
/// Heading of the estimate half of the report
pub const ESTIMATE_HEADING: &str = "## Effort Estimation";

/// Line marker the query synthesis template asks the model to lead with
pub const INTENT_MARKER: &str = "-- intent:";

const SQL_TEMPLATE: &str = r#"You are a SQL expert working with a SQLite database.

Table `{table}` has these columns:
{columns}

Write ONE SQL query that answers the request below.

Rules:
- Listing or search requests: always select id, customer_name, company and needs.
- Listing or search requests: always ORDER BY id ASC.
- Search requests: match text case-insensitively with LOWER(column) LIKE '%term%'.
- Statistical or aggregate requests: select only the computed columns, no id.
- Read-only: a single SELECT (or WITH ... SELECT) statement.

Start your answer with exactly one line naming the intent:
-- intent: listing
-- intent: search
-- intent: aggregate
Then write the query. No markdown, no explanation.

Request: {request}"#;

const LISTING_TEMPLATE: &str = r##"You are a sales assistant presenting lead records.

Original request: {request}

Query result:
{table}
{count}
Present the leads using exactly these lines, one per lead, in this order:
{lines}

Keep every line's "#<id>:" prefix unchanged. You may add one short closing sentence."##;

const SUMMARY_TEMPLATE: &str = r#"You are a sales analyst.

Original request: {request}

Query result:
{table}

Write a concise business summary that answers the request using only the
figures above. Mention concrete numbers."#;

const BREAKDOWN_TEMPLATE: &str = r#"You are a senior sales engineer. Break the following requirements into a project plan.

Requirements:
{requirements}

Structure your answer in exactly four sections:
1. Project Overview
2. Technical Requirements
3. Phased Subtasks
4. Technical Considerations"#;

const ESTIMATE_TEMPLATE: &str = r#"You are a senior sales engineer estimating delivery effort.

Project plan:
{plan}

Provide:
- Engineer headcount by role
- Duration of each phase
- Total effort in man-days
- Risk factors that could change the estimate"#;

const COST_TEMPLATE: &str = r#"You are a project cost analyst.

Daily rates (USD), use only these roles:
{rates}

Technical specification:
{spec}

Produce a cost breakdown:
1. Team composition and duration: which roles, how many of each, for how many days.
2. Cost per role: headcount x days x daily rate, using the rates above.
3. Total project cost: the sum of all role costs."#;

const LEAD_ID_TEMPLATE: &str = r#"Extract the lead ID from the request below.
Reply with the ID only, nothing else.

Request: {request}"#;

const LEAD_DETAILS_REQUEST: &str = "Give me all details for lead with id {id}";

const PROPOSAL_TEMPLATE: &str = r###"You are writing a sales proposal for a software project.

Lead details:
{lead}

Technical analysis:
{technical}

Cost breakdown:
{costs}

Write the proposal in markdown with these sections, each as a "## " heading, in this order:
{sections}"###;

/// Substitute `{name}` placeholders in one left-to-right pass.
///
/// Unknown `{...}` sequences are copied through unchanged.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Natural-language form of the canned "list all" query
pub const LIST_ALL_REQUEST: &str = "List all leads";

/// Natural-language form of the canned search query
#[must_use]
pub fn search_request(term: &str) -> String {
    format!("Search leads for \"{term}\"")
}

/// Schema description embedded in the SQL template
#[must_use]
pub fn schema_description() -> String {
    LEAD_COLUMNS
        .iter()
        .map(|(name, ty)| format!("- {name} ({ty})"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Query synthesis prompt
#[must_use]
pub fn sql_prompt(request: &str) -> String {
    fill(
        SQL_TEMPLATE,
        &[
            ("table", LEADS_TABLE),
            ("columns", schema_description().as_str()),
            ("request", request),
        ],
    )
}

/// Listing/search formatting prompt. `total` is set for searches.
#[must_use]
pub fn listing_prompt(request: &str, table: &str, lines: &[String], total: Option<usize>) -> String {
    let lines = if lines.is_empty() {
        "(no matching leads)".to_string()
    } else {
        lines.join("\n")
    };
    let count = total
        .map(|n| format!("\nBegin with this line: Total matches: {n}\n"))
        .unwrap_or_default();

    fill(
        LISTING_TEMPLATE,
        &[
            ("request", request),
            ("table", table),
            ("lines", lines.as_str()),
            ("count", count.as_str()),
        ],
    )
}

/// Aggregate formatting prompt
#[must_use]
pub fn summary_prompt(request: &str, table: &str) -> String {
    fill(SUMMARY_TEMPLATE, &[("request", request), ("table", table)])
}

/// Requirement breakdown prompt
#[must_use]
pub fn breakdown_prompt(requirements: &str) -> String {
    fill(BREAKDOWN_TEMPLATE, &[("requirements", requirements)])
}

/// Effort estimate prompt over a finished plan
#[must_use]
pub fn estimate_prompt(plan: &str) -> String {
    fill(ESTIMATE_TEMPLATE, &[("plan", plan)])
}

/// Cost prompt; embeds every rate table entry
#[must_use]
pub fn cost_prompt(spec: &str, rates: &RateTable) -> String {
    fill(COST_TEMPLATE, &[("rates", rates.render().as_str()), ("spec", spec)])
}

/// Lead identifier extraction prompt
#[must_use]
pub fn lead_id_prompt(request: &str) -> String {
    fill(LEAD_ID_TEMPLATE, &[("request", request)])
}

/// Data-query request used to fetch one lead
#[must_use]
pub fn lead_details_request(id: &str) -> String {
    fill(LEAD_DETAILS_REQUEST, &[("id", id)])
}

/// Final proposal assembly prompt
#[must_use]
pub fn proposal_prompt(lead: &str, technical: &str, costs: &str) -> String {
    let sections = PROPOSAL_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    fill(
        PROPOSAL_TEMPLATE,
        &[
            ("lead", lead),
            ("technical", technical),
            ("costs", costs),
            ("sections", sections.as_str()),
        ],
    )
}

/// Join the two estimation stages into one report
#[must_use]
pub fn compose_report(plan: &str, estimate: &str) -> String {
    format!("{REPORT_TITLE}\n\n{PLAN_HEADING}\n{plan}\n\n{ESTIMATE_HEADING}\n{estimate}\n")
}
