//! Analysis prompt composition.

use crate::key::AnalysisKey;
use crate::symbols::SymbolDirectory;

/// Builds the provider-ready prompt for one analysis attempt.
///
/// Resolved company names are preferred as the subject; when no component of
/// the key resolves, the raw key itself is used as fallback context so the
/// backend still knows which tickers were asked about.
pub fn compose_analysis_prompt(key: &AnalysisKey, directory: &SymbolDirectory) -> String {
    let names = directory.resolve_names(key.as_str());
    let subject = if names.is_empty() {
        key.as_str().to_string()
    } else {
        names
    };
    format!(
        "Get the actual company's name of the stock ticker below and analyze it. {subject}. \
         Action: For each stock, analyze 2 bullet point of risks and opportunities. \
         Format: Ticker - Company's name then 2 risks, 2 opportunities. \
         Rules: Be concise and short. And use bullet point."
    )
}
