/// Why a plan could not be analyzed or compared.
#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("plan `{plan_id}` has no positive base rate")]
    InvalidPlanData { plan_id: String },

    #[display("at least one plan is required for a comparison")]
    EmptyPlanSet,

    #[display("invalid analysis settings: {reason}")]
    InvalidSettings { reason: &'static str },
}
