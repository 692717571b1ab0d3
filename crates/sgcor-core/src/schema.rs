//! Column names and literals of the SGCor production report.
//!
//! The upload has an open schema; these are the columns the pipeline and the
//! views know about. Names are kept in the source locale (Portuguese) because
//! that is what the export actually contains.

/// Net premium amount per policy.
pub const NET_PREMIUM: &str = "Prêmio Líquido";

/// Commission amount per policy.
pub const COMMISSION: &str = "Comissão";

/// Commission percentage.
pub const COMMISSION_PCT: &str = "% Comissão";

/// Agency (brokerage) percentage.
pub const AGENCY_PCT: &str = "% Agenciamento";

/// Number of installments.
pub const INSTALLMENTS: &str = "Parcelas";

/// Payment amount.
pub const PAYMENT: &str = "Pgto.";

/// Production (policy) identifier.
pub const PRODUCTION_ID: &str = "Id Produção";

/// Policy status column.
pub const STATUS: &str = "Status";

/// Date the policy's coverage period begins; the time axis for monthly
/// aggregation.
pub const EFFECTIVE_START: &str = "Data Vigência Inicial";

/// Negotiated-convention column driving the sidebar filter.
pub const CONVENTION: &str = "Convenção Negociada";

/// Insurance company column for the per-company registration view.
pub const COMPANY: &str = "Companhia";

/// Status literal marking a cancelled policy.
pub const CANCELLED_STATUS: &str = "Cancelada";

/// The monetary / percentage / count columns forced to numeric type.
pub const NUMERIC_COLUMNS: &[&str] = &[
    NET_PREMIUM,
    COMMISSION,
    COMMISSION_PCT,
    AGENCY_PCT,
    INSTALLMENTS,
    PAYMENT,
];

/// Substring identifying date-labelled columns.
pub const DATE_MARKER: &str = "Data";

/// Textual day/month/year format used by the export.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Month-key format; lexicographic order on these strings is chronological.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";
