// =============================================================================
// Fundamental analysis — metric extraction from a fetched info map
// =============================================================================
//
// Pure extraction over the flattened quote-summary map produced by the data
// collaborator. Every field is optional: providers routinely omit metrics,
// and a missing key is simply `None`, never an error.
//
// Yahoo wraps most numbers as `{ "raw": 1.23, "fmt": "1.23" }`; plain JSON
// numbers are accepted too.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The flattened key → value info map for one ticker.
pub type InfoMap = Map<String, Value>;

/// Read a numeric field, unwrapping the provider's `{raw, fmt}` envelope
/// when present.
fn get_number(info: &InfoMap, key: &str) -> Option<f64> {
    let value = info.get(key)?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        _ => None,
    }
}

/// Valuation ratios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationRatios {
    pub pe_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub ev_to_revenue: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
}

pub fn valuation_ratios(info: &InfoMap) -> ValuationRatios {
    ValuationRatios {
        // Trailing P/E preferred, forward P/E as fallback.
        pe_ratio: get_number(info, "trailingPE").or_else(|| get_number(info, "forwardPE")),
        ps_ratio: get_number(info, "priceToSalesTrailing12Months"),
        pb_ratio: get_number(info, "priceToBook"),
        peg_ratio: get_number(info, "pegRatio"),
        ev_to_revenue: get_number(info, "enterpriseToRevenue"),
        ev_to_ebitda: get_number(info, "enterpriseToEbitda"),
    }
}

/// Profitability metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitabilityMetrics {
    pub eps: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
}

pub fn profitability_metrics(info: &InfoMap) -> ProfitabilityMetrics {
    ProfitabilityMetrics {
        eps: get_number(info, "trailingEps"),
        roe: get_number(info, "returnOnEquity"),
        roa: get_number(info, "returnOnAssets"),
        gross_margin: get_number(info, "grossMargins"),
        operating_margin: get_number(info, "operatingMargins"),
        net_margin: get_number(info, "profitMargins"),
    }
}

/// Balance-sheet health and cash-flow metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub debt_to_equity: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_cash: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub operating_cash_flow: Option<f64>,
}

pub fn financial_health(info: &InfoMap) -> FinancialHealth {
    FinancialHealth {
        debt_to_equity: get_number(info, "debtToEquity"),
        total_debt: get_number(info, "totalDebt"),
        total_cash: get_number(info, "totalCash"),
        current_ratio: get_number(info, "currentRatio"),
        quick_ratio: get_number(info, "quickRatio"),
        free_cash_flow: get_number(info, "freeCashflow"),
        operating_cash_flow: get_number(info, "operatingCashflow"),
    }
}

/// Revenue and earnings growth metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub quarterly_earnings_growth: Option<f64>,
    pub total_revenue: Option<f64>,
    pub revenue_per_share: Option<f64>,
}

pub fn growth_metrics(info: &InfoMap) -> GrowthMetrics {
    GrowthMetrics {
        revenue_growth: get_number(info, "revenueGrowth"),
        earnings_growth: get_number(info, "earningsGrowth"),
        quarterly_earnings_growth: get_number(info, "earningsQuarterlyGrowth"),
        total_revenue: get_number(info, "totalRevenue"),
        revenue_per_share: get_number(info, "revenuePerShare"),
    }
}

/// Dividend metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DividendMetrics {
    pub dividend_yield: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub five_year_avg_dividend_yield: Option<f64>,
}

pub fn dividend_metrics(info: &InfoMap) -> DividendMetrics {
    DividendMetrics {
        dividend_yield: get_number(info, "dividendYield"),
        dividend_rate: get_number(info, "dividendRate"),
        payout_ratio: get_number(info, "payoutRatio"),
        five_year_avg_dividend_yield: get_number(info, "fiveYearAvgDividendYield"),
    }
}

/// Everything at once, for report rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalSummary {
    pub valuation: ValuationRatios,
    pub profitability: ProfitabilityMetrics,
    pub health: FinancialHealth,
    pub growth: GrowthMetrics,
    pub dividends: DividendMetrics,
}

pub fn fundamental_summary(info: &InfoMap) -> FundamentalSummary {
    FundamentalSummary {
        valuation: valuation_ratios(info),
        profitability: profitability_metrics(info),
        health: financial_health(info),
        growth: growth_metrics(info),
        dividends: dividend_metrics(info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: Value) -> InfoMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn reads_plain_numbers() {
        let info = info(json!({ "trailingPE": 24.5, "returnOnEquity": 0.31 }));
        assert_eq!(valuation_ratios(&info).pe_ratio, Some(24.5));
        assert_eq!(profitability_metrics(&info).roe, Some(0.31));
    }

    #[test]
    fn reads_raw_fmt_envelopes() {
        let info = info(json!({
            "trailingPE": { "raw": 18.2, "fmt": "18.20" },
            "dividendYield": { "raw": 0.0065, "fmt": "0.65%" }
        }));
        assert_eq!(valuation_ratios(&info).pe_ratio, Some(18.2));
        assert_eq!(dividend_metrics(&info).dividend_yield, Some(0.0065));
    }

    #[test]
    fn pe_falls_back_to_forward() {
        let info = info(json!({ "forwardPE": 21.0 }));
        assert_eq!(valuation_ratios(&info).pe_ratio, Some(21.0));
    }

    #[test]
    fn missing_fields_are_none() {
        let empty = InfoMap::new();
        let summary = fundamental_summary(&empty);
        assert!(summary.valuation.pe_ratio.is_none());
        assert!(summary.health.current_ratio.is_none());
        assert!(summary.growth.revenue_growth.is_none());
    }

    #[test]
    fn non_numeric_values_are_none() {
        let info = info(json!({ "trailingPE": "n/a" }));
        assert!(valuation_ratios(&info).pe_ratio.is_none());
    }
}
