mod contribution_profile;
mod fiscal_parameters;
mod legal_status;
mod reference_data;
mod simulation;
mod tax_bracket;

pub use contribution_profile::{ContributionClass, ContributionProfile};
pub use fiscal_parameters::{FiscalParameters, MicroParameters};
pub use legal_status::{
    CapitalRaisingFriction, DirectorRegime, LegalStatusMeta, MicroActivity, TaxRegime,
};
pub use reference_data::ReferenceData;
pub use simulation::{
    ComparisonReport, PayoutBreakdown, SimulationInput, SimulationProfile, SimulationResult,
};
pub use tax_bracket::{BracketTable, TaxBracket};
