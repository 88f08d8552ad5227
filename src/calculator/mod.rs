//! Calculation engine for single and recurring investments
//!
//! Every function here is pure: results depend only on the arguments, so the
//! engine can be called from any number of threads without coordination.

mod results;
mod simple;
mod annuity;
mod schedule;
pub mod irr;

pub use results::{
    round_cents, round_to, EffectiveRateMethod, InvestmentResult, RecurringResult, SingleResult,
};
pub use simple::compute_single;
pub use annuity::{compute_recurring, future_value, monthly_rate, AnnuityCalculator};
pub use schedule::{
    generate_recurring_schedule, generate_schedule, generate_single_schedule, GrowthScheduleRow,
};
