//! Synthetic leads for demos and local development

use crate::lead::NewLead;
use chrono::{DateTime, Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

/// Needs a generated lead can ask for
pub const BUSINESS_NEEDS: &[&str] = &[
    "Website redesign",
    "Mobile app development",
    "Cloud migration",
    "Digital marketing campaign",
    "E-commerce platform",
    "CRM implementation",
    "Data analytics solution",
    "Security assessment",
    "IT infrastructure upgrade",
    "AI/ML integration",
];

/// Budget range in dollars
const MIN_BUDGET: f64 = 10_000.0;
const MAX_BUDGET: f64 = 500_000.0;

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Generate `count` leads relative to `now`.
///
/// Budgets fall in 10k..500k rounded to cents, projects start within six
/// years and run 30..=365 days, and leads were created in the last ~3 months.
pub fn generate_leads<R: Rng + ?Sized>(count: usize, rng: &mut R, now: DateTime<Utc>) -> Vec<NewLead> {
    (0..count)
        .map(|_| {
            let created_at = now - Duration::seconds(rng.gen_range(0..=90 * 24 * 3600));
            let timeline_start = (now + Duration::days(rng.gen_range(0..=6 * 365))).date_naive();
            let timeline_end = timeline_start + Duration::days(rng.gen_range(30..=365));
            let budget = (rng.gen_range(MIN_BUDGET..MAX_BUDGET) * 100.0).round() / 100.0;
            let first: String = FirstName().fake_with_rng(rng);
            let last: String = LastName().fake_with_rng(rng);
            let customer_name = format!("{first} {last}");

            NewLead {
                customer_name,
                company: CompanyName().fake_with_rng(rng),
                needs: pick(rng, BUSINESS_NEEDS).to_string(),
                budget,
                timeline_start,
                timeline_end,
                created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_leads_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let leads = generate_leads(50, &mut rng, now);

        assert_eq!(leads.len(), 50);
        for lead in &leads {
            assert!(BUSINESS_NEEDS.contains(&lead.needs.as_str()));
            assert!(lead.budget >= MIN_BUDGET && lead.budget <= MAX_BUDGET);
            assert!(lead.created_at <= now);
            assert!(lead.created_at >= now - Duration::days(91));
            let span = (lead.timeline_end - lead.timeline_start).num_days();
            assert!((30..=365).contains(&span));
            assert!(!lead.customer_name.trim().is_empty());
            assert!(lead.customer_name.contains(' '));
            assert!(!lead.company.trim().is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_leads() {
        let now = Utc::now();
        let a = generate_leads(5, &mut StdRng::seed_from_u64(1), now);
        let b = generate_leads(5, &mut StdRng::seed_from_u64(1), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_names_and_companies_vary() {
        let leads = generate_leads(40, &mut StdRng::seed_from_u64(3), Utc::now());
        let names: std::collections::HashSet<_> = leads.iter().map(|l| &l.customer_name).collect();
        let companies: std::collections::HashSet<_> = leads.iter().map(|l| &l.company).collect();
        assert!(names.len() > 20);
        assert!(companies.len() > 20);
    }
}
