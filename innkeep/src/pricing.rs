//! Rate and discount arithmetic.
//!
//! [`compute_quote`] is pure: it never touches the store. The desk looks up
//! the room's nightly rate and passes it in.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::nights_between;
use crate::money::Money;

/// Inputs to a price quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Price of one night.
    pub nightly_rate: Money,
    /// Arrival date, if known yet.
    pub check_in: Option<NaiveDate>,
    /// Departure date, if known yet.
    pub check_out: Option<NaiveDate>,
    /// Whether the operator is entering a negotiated amount.
    pub discount: bool,
    /// The negotiated amount.
    pub entered_amount: Option<Money>,
    /// Never let a discounted amount exceed the base price.
    pub cap_at_base: bool,
}

impl QuoteRequest {
    /// A request with no dates and no discount.
    #[must_use]
    pub const fn new(nightly_rate: Money) -> Self {
        Self {
            nightly_rate,
            check_in: None,
            check_out: None,
            discount: false,
            entered_amount: None,
            cap_at_base: false,
        }
    }

    /// Sets both stay dates.
    #[must_use]
    pub const fn with_dates(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
        self
    }

    /// Turns the discount on with an optional negotiated amount.
    #[must_use]
    pub const fn with_discount(mut self, entered_amount: Option<Money>) -> Self {
        self.discount = true;
        self.entered_amount = entered_amount;
        self
    }

    /// Caps discounted amounts at the base price.
    #[must_use]
    pub const fn capped(mut self, cap_at_base: bool) -> Self {
        self.cap_at_base = cap_at_base;
        self
    }
}

/// The derived price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingQuote {
    /// Price of one night.
    pub nightly_rate: Money,
    /// Night count; `None` unless both dates were given.
    pub nights: Option<u32>,
    /// Rate times nights, or the bare rate when there are no nights.
    pub base_price: Money,
    /// Whether a discount was applied.
    pub discount: bool,
    /// The amount the guest pays.
    pub final_amount: Money,
    /// How far the final amount sits below the base.
    pub discount_value: Money,
    /// Discount as a percentage of the base. Negative when a discounted
    /// amount exceeds the base.
    pub discount_percent: f64,
}

/// Computes the price breakdown for a request.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{compute_quote, Money, QuoteRequest};
///
/// let request = QuoteRequest::new(Money::from_major(400))
///     .with_dates(
///         NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
///     )
///     .with_discount(Some(Money::from_major(1800)));
///
/// let quote = compute_quote(&request);
/// assert_eq!(quote.base_price, Money::from_major(2000));
/// assert_eq!(quote.discount_value, Money::from_major(200));
/// assert!((quote.discount_percent - 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_quote(request: &QuoteRequest) -> PricingQuote {
    let nights = match (request.check_in, request.check_out) {
        (Some(check_in), Some(check_out)) => {
            let days = nights_between(check_in, check_out).max(0);
            Some(u32::try_from(days).unwrap_or(u32::MAX))
        }
        _ => None,
    };

    let base_price = match nights {
        Some(n) if n > 0 => request.nightly_rate.times(n),
        _ => request.nightly_rate,
    };

    let final_amount = if request.discount {
        let entered = request.entered_amount.unwrap_or(base_price).non_negative();
        if request.cap_at_base {
            entered.min(base_price)
        } else {
            entered
        }
    } else {
        base_price
    };

    let discount_value = (base_price - final_amount).non_negative();

    #[allow(clippy::cast_precision_loss)]
    let discount_percent = if base_price.is_positive() {
        (base_price - final_amount).minor() as f64 / base_price.minor() as f64 * 100.0
    } else {
        0.0
    };

    PricingQuote {
        nightly_rate: request.nightly_rate,
        nights,
        base_price,
        discount: request.discount,
        final_amount,
        discount_value,
        discount_percent,
    }
}
