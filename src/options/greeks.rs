// =============================================================================
// Black-Scholes pricing and Greeks
// =============================================================================
//
// Closed-form European option price and first-order sensitivities over
// validated scalar inputs. Unit conventions, easy to get backward:
//
//   theta — per calendar DAY (annual theta / 365)
//   vega  — per 1 % change in implied volatility (raw vega / 100)
//   rho   — per 1 % change in the risk-free rate (raw rho / 100)
//
// At or past expiry (T <= 0) the price degenerates to intrinsic value; delta
// snaps to 1/0 (call) or -1/0 (put) by moneyness and every other Greek is 0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

use crate::error::{Error, Result};

/// Minimum time to expiration in years, so near-expiry quotes never divide
/// by zero.
pub const MIN_TIME_TO_EXPIRY: f64 = 0.001;

/// Standard normal distribution for CDF evaluation.
fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).unwrap()
}

/// Standard normal PDF: φ(x) = (1/√(2π)) · e^(-x²/2)
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF: Φ(x)
fn norm_cdf(x: f64) -> f64 {
    std_normal().cdf(x)
}

/// Option style (European call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Call,
    Put,
}

/// One option quote as supplied by an external chain fetch. Consumed
/// read-only by the pricing functions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionQuote {
    pub spot: f64,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub rate: f64,
    pub implied_vol: f64,
    pub option_type: OptionType,
}

/// Price and first-order sensitivities of one option. A pure value object —
/// no identity or lifecycle beyond the call that produced it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GreeksResult {
    pub delta: f64,
    pub gamma: f64,
    /// Per calendar day.
    pub theta: f64,
    /// Per 1 % change in implied volatility.
    pub vega: f64,
    /// Per 1 % change in the risk-free rate.
    pub rho: f64,
    pub theoretical_price: f64,
}

/// Time to expiration in years (days / 365), floored at
/// `MIN_TIME_TO_EXPIRY` so that pricing at or after the expiry date stays
/// finite.
pub fn time_to_expiry(expiry: NaiveDate, today: NaiveDate) -> f64 {
    let days = (expiry - today).num_days() as f64;
    (days / 365.0).max(MIN_TIME_TO_EXPIRY)
}

fn validate_inputs(spot: f64, strike: f64, vol: f64) -> Result<()> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "spot must be finite and > 0, got {spot}"
        )));
    }
    if !strike.is_finite() || strike <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "strike must be finite and > 0, got {strike}"
        )));
    }
    if !vol.is_finite() || vol <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "volatility must be finite and > 0, got {vol}"
        )));
    }
    Ok(())
}

fn intrinsic(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Degenerate result at or past expiry: intrinsic price, binary delta,
/// all other Greeks zero.
fn expired(spot: f64, strike: f64, option_type: OptionType) -> GreeksResult {
    let delta = match option_type {
        OptionType::Call => {
            if spot > strike {
                1.0
            } else {
                0.0
            }
        }
        OptionType::Put => {
            if spot < strike {
                -1.0
            } else {
                0.0
            }
        }
    };
    GreeksResult {
        delta,
        theoretical_price: intrinsic(spot, strike, option_type),
        ..Default::default()
    }
}

/// Black-Scholes theoretical price.
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    t_years: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> Result<f64> {
    if t_years <= 0.0 {
        return Ok(intrinsic(spot, strike, option_type));
    }
    validate_inputs(spot, strike, vol)?;

    let sqrt_t = t_years.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * t_years) / (vol * sqrt_t);
    let d2 = d1 - vol * sqrt_t;

    let price = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * (-rate * t_years).exp() * norm_cdf(d2),
        OptionType::Put => {
            strike * (-rate * t_years).exp() * norm_cdf(-d2) - spot * norm_cdf(-d1)
        }
    };
    Ok(price)
}

/// Compute price and all five first-order Greeks at once.
pub fn compute_greeks(
    spot: f64,
    strike: f64,
    t_years: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> Result<GreeksResult> {
    if t_years <= 0.0 {
        return Ok(expired(spot, strike, option_type));
    }
    validate_inputs(spot, strike, vol)?;

    let sqrt_t = t_years.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * t_years) / (vol * sqrt_t);
    let d2 = d1 - vol * sqrt_t;

    let nd1 = norm_cdf(d1);
    let nd2 = norm_cdf(d2);
    let pdf_d1 = norm_pdf(d1);
    let discount = (-rate * t_years).exp();

    let theoretical_price = match option_type {
        OptionType::Call => spot * nd1 - strike * discount * nd2,
        OptionType::Put => strike * discount * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };

    let delta = match option_type {
        OptionType::Call => nd1,
        OptionType::Put => nd1 - 1.0,
    };

    // Gamma and vega are identical for calls and puts.
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t / 100.0;

    let theta_annual = match option_type {
        OptionType::Call => {
            -spot * pdf_d1 * vol / (2.0 * sqrt_t) - rate * strike * discount * nd2
        }
        OptionType::Put => {
            -spot * pdf_d1 * vol / (2.0 * sqrt_t) + rate * strike * discount * norm_cdf(-d2)
        }
    };
    let theta = theta_annual / 365.0;

    let rho = match option_type {
        OptionType::Call => strike * t_years * discount * nd2 / 100.0,
        OptionType::Put => -strike * t_years * discount * norm_cdf(-d2) / 100.0,
    };

    Ok(GreeksResult {
        delta,
        gamma,
        theta,
        vega,
        rho,
        theoretical_price,
    })
}

/// Compute Greeks for a quote, deriving time-to-expiry from its calendar
/// expiration date.
pub fn greeks_for_quote(quote: &OptionQuote, today: NaiveDate) -> Result<GreeksResult> {
    let t = time_to_expiry(quote.expiry, today);
    compute_greeks(
        quote.spot,
        quote.strike,
        t,
        quote.rate,
        quote.implied_vol,
        quote.option_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_call_price() {
        // Textbook case: S=100, K=100, T=1, r=5%, sigma=20% => C ~ 10.4506.
        let price =
            black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call).unwrap();
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn known_put_price_via_parity() {
        // Put-call parity: C - P = S - K * e^{-rT}.
        let call =
            black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call).unwrap();
        let put = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Put).unwrap();
        let forward = 100.0 - 100.0 * (-0.05f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-9);
    }

    #[test]
    fn atm_call_greeks_sane() {
        let g = compute_greeks(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Call).unwrap();
        assert!(g.delta > 0.5 && g.delta < 0.65);
        assert!(g.gamma > 0.0);
        assert!(g.theta < 0.0);
        assert!(g.vega > 0.0);
        assert!(g.rho > 0.0);
    }

    #[test]
    fn atm_put_greeks_sane() {
        let g = compute_greeks(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Put).unwrap();
        assert!(g.delta < -0.35 && g.delta > -0.55);
        assert!(g.rho < 0.0);
    }

    #[test]
    fn put_call_delta_parity() {
        let call = compute_greeks(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Call).unwrap();
        let put = compute_greeks(100.0, 100.0, 0.25, 0.05, 0.20, OptionType::Put).unwrap();
        // Without a dividend yield the identity is exact.
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn gamma_and_vega_same_for_call_and_put() {
        let call = compute_greeks(100.0, 110.0, 0.5, 0.03, 0.25, OptionType::Call).unwrap();
        let put = compute_greeks(100.0, 110.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap();
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
    }

    #[test]
    fn expired_itm_call() {
        let g = compute_greeks(110.0, 100.0, 0.0, 0.05, 0.20, OptionType::Call).unwrap();
        assert_eq!(g.delta, 1.0);
        assert_eq!(g.theoretical_price, 10.0);
        assert_eq!(g.gamma, 0.0);
        assert_eq!(g.theta, 0.0);
        assert_eq!(g.vega, 0.0);
        assert_eq!(g.rho, 0.0);
    }

    #[test]
    fn expired_otm_call() {
        let g = compute_greeks(90.0, 100.0, -0.1, 0.05, 0.20, OptionType::Call).unwrap();
        assert_eq!(g.delta, 0.0);
        assert_eq!(g.theoretical_price, 0.0);
    }

    #[test]
    fn expired_put_deltas() {
        let itm = compute_greeks(90.0, 100.0, 0.0, 0.05, 0.20, OptionType::Put).unwrap();
        assert_eq!(itm.delta, -1.0);
        assert_eq!(itm.theoretical_price, 10.0);

        let otm = compute_greeks(110.0, 100.0, 0.0, 0.05, 0.20, OptionType::Put).unwrap();
        assert_eq!(otm.delta, 0.0);
    }

    #[test]
    fn near_expiry_itm_call_delta_approaches_one() {
        // T floored at 0.001 years: deep ITM delta is effectively 1 and the
        // non-delta Greeks are tiny.
        let g = compute_greeks(110.0, 100.0, MIN_TIME_TO_EXPIRY, 0.05, 0.20, OptionType::Call)
            .unwrap();
        assert!(g.delta > 0.999);
        assert!(g.vega.abs() < 1e-3);
        assert!(g.gamma.abs() < 1e-2);
    }

    #[test]
    fn bad_inputs_rejected() {
        assert!(compute_greeks(0.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
        assert!(compute_greeks(100.0, -5.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
        assert!(compute_greeks(100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call).is_err());
    }

    #[test]
    fn time_to_expiry_floor() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(time_to_expiry(past, today), MIN_TIME_TO_EXPIRY);

        let one_year = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_relative_eq!(time_to_expiry(one_year, today), 1.0, epsilon = 1e-2);
    }

    #[test]
    fn greeks_for_quote_uses_calendar_expiry() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let quote = OptionQuote {
            spot: 100.0,
            strike: 100.0,
            expiry: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            rate: 0.05,
            implied_vol: 0.20,
            option_type: OptionType::Call,
        };
        let g = greeks_for_quote(&quote, today).unwrap();
        assert!(g.theoretical_price > 0.0);
        assert!(g.delta > 0.5);
    }
}
