mod household;
mod income;
mod ir_request;
mod ir_result;
pub mod lenient;
mod tax_bracket;
mod tax_year_settings;

pub use household::{Child, CustodyMode, Dependents, Household, HouseholdStatus, Location};
pub use income::{CapitalIncome, CapitalMode, DeclarantIncome, IncomeSet};
pub use ir_request::IrRequest;
pub use ir_result::{BracketDetail, CdhrDetails, DeclarantBreakdown, IrResult, SocialContributions};
pub use tax_bracket::{ScaleError, TaxBracket, TaxScale};
pub use tax_year_settings::{
    Abatement10Config, Abatement10Rules, CdhrConfig, CehrConfig, DecoteConfig, DomConfig,
    DomZoneConfig, PfuConfig, QuotientCapConfig, SocialConfig, TaxYearSettings, YearKey,
    YearRules,
};
