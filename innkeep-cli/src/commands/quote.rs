//! Quote command implementation.
//!
//! Quotes are read-only: nothing is booked and no amount is stored.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{open_desk, room_id, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{Money, PricingQuote};

/// Price a stay in a room.
#[derive(Args)]
pub struct QuoteCommand {
    /// Room number
    #[arg(long, value_name = "ROOM")]
    pub room: String,

    /// Arrival date
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<NaiveDate>,

    /// Departure date
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<NaiveDate>,

    /// Apply a discount
    #[arg(long)]
    pub discount: bool,

    /// Discounted total the guest agreed to
    #[arg(long, value_name = "AMOUNT", requires = "discount")]
    pub amount: Option<Money>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, desk) = open_desk(global, false)?;
        let room = room_id(&desk, &self.room)?;
        let quote =
            desk.compute_quote(room, self.check_in, self.check_out, self.discount, self.amount)?;

        quote_listing(&quote).print(resolve_format(self.format, &config), &quote)
    }
}

fn quote_listing(quote: &PricingQuote) -> Listing {
    let mut listing = Listing::new(&["field", "value"]);
    let nights = quote.nights.map(|n| n.to_string()).unwrap_or_default();
    let rows = [
        ("nightly_rate", quote.nightly_rate.to_string()),
        ("nights", nights),
        ("base_price", quote.base_price.to_string()),
        ("discount", quote.discount.to_string()),
        ("final_amount", quote.final_amount.to_string()),
        ("discount_value", quote.discount_value.to_string()),
        ("discount_percent", format!("{:.2}", quote.discount_percent)),
    ];
    for (field, value) in rows {
        listing.push(vec![field.to_string(), value]);
    }
    listing
}
