//! Pipeline stages
//!
//! A stage is one oracle call plus fixed templating around it.

mod costs;
mod formatting;
mod synthesis;

pub use costs::CostCalculator;
pub use formatting::{listing_lines, ResultFormatter};
pub use synthesis::{classify_sql, strip_code_fences, QueryIntent, QuerySynthesizer, SynthesizedQuery};
