//! Pricing engine for construction proposals.
//!
//! Provides the labor, equipment and markup formulas, the interactive
//! totals recalculation, and proposal pricing against the rate catalog.
//! Exposed over HTTP/JSON for the proposal editing front-end.

pub mod calculators;
pub mod editor;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_totals, round_money, TotalsLineInput, TotalsResult};
pub use editor::ProposalEditor;
pub use models::{EquipmentRate, FunctionRate, ProposalLine, ProposalTotals};
pub use routes::router;
pub use services::{price_proposal, PricedProposal, PricingError, ProposalInput};
