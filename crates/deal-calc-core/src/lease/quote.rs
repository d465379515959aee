use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::pricing::{LeaseInput, PaymentPass};
use super::residual::ResidualValue;
use crate::fees::MakeFees;
use crate::types::{round_cents, Money, Percent};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriveOffItemKind {
    Taxes,
    FirstMonth,
    AcquisitionFee,
    DownPayment,
    TotalFees,
}

impl DriveOffItemKind {
    pub fn label(self) -> &'static str {
        match self {
            DriveOffItemKind::Taxes => "Taxes",
            DriveOffItemKind::FirstMonth => "First month",
            DriveOffItemKind::AcquisitionFee => "Acquisition Fee",
            DriveOffItemKind::DownPayment => "Down Payment",
            DriveOffItemKind::TotalFees => "Dealer & Government Fees",
        }
    }
}

/// One line of the amount due at signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveOffItem {
    #[serde(rename = "type")]
    pub kind: DriveOffItemKind,
    pub label: String,
    pub amount: Money,
}

impl DriveOffItem {
    fn new(kind: DriveOffItemKind, amount: Money) -> Self {
        DriveOffItem {
            kind,
            label: kind.label().to_string(),
            amount,
        }
    }
}

/// Every reported lease figure, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseReport {
    pub monthly_payment: Money,
    pub monthly_payment_pre_tax: Money,
    pub base_monthly_payment: Money,
    pub rent_charge: Money,
    pub monthly_tax: Money,
    pub depreciation: Money,
    pub net_capitalized_cost: Money,
    pub residual_value: Money,
    pub residual_percent: Percent,
    pub apr: Percent,
    pub drive_off_payment: Money,
    pub drive_off_tax: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_off_breakdown: Option<Vec<DriveOffItem>>,
    pub total_tax: Money,
    pub total_interest: Money,
    pub total_lease_cost: Money,
    pub discount_off_msrp_percent: Option<Percent>,
    pub monthly_payment_to_msrp_percent: Percent,
    pub acquisition_fee: Money,
    pub disposition_fee: Money,
}

/// A priced lease.
///
/// Holds full-precision intermediate values; every accessor rounds at the
/// boundary and performs no further business logic.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseQuote {
    pub(crate) input: LeaseInput,
    pub(crate) fees: MakeFees,
    pub(crate) residual: ResidualValue,
    pub(crate) base_pass: PaymentPass,
    pub(crate) pass: PaymentPass,
    pub(crate) tax: Money,
    pub(crate) monthly_payment: Money,
    pub(crate) drive_off_tax: Money,
    pub(crate) implied_apr: Percent,
}

impl LeaseQuote {
    pub fn input(&self) -> &LeaseInput {
        &self.input
    }

    /// First payment pass, before any recapitalization.
    pub fn base_pass(&self) -> &PaymentPass {
        &self.base_pass
    }

    /// Payment pass the quote is reported from.
    pub fn final_pass(&self) -> &PaymentPass {
        &self.pass
    }

    pub fn residual(&self) -> &ResidualValue {
        &self.residual
    }

    pub fn residual_value(&self) -> Money {
        self.residual.reported_value()
    }

    pub fn residual_percent(&self) -> Percent {
        self.residual.reported_percent()
    }

    pub fn acquisition_fee(&self) -> Money {
        self.fees.acquisition_fee
    }

    pub fn disposition_fee(&self) -> Money {
        self.fees.disposition_fee
    }

    pub fn net_capitalized_cost(&self) -> Money {
        round_cents(self.pass.net_cap_cost)
    }

    pub fn depreciation(&self) -> Money {
        round_cents(self.pass.depreciation)
    }

    pub fn base_monthly_payment(&self) -> Money {
        round_cents(self.pass.base_payment)
    }

    /// Monthly rent charge ("monthly MF").
    pub fn rent_charge(&self) -> Money {
        round_cents(self.pass.rent_charge)
    }

    pub fn monthly_payment_pre_tax(&self) -> Money {
        round_cents(self.pass.pre_tax_payment)
    }

    pub fn monthly_payment(&self) -> Money {
        round_cents(self.monthly_payment)
    }

    /// Recurring tax per payment. Zero unless the policy taxes the payment.
    pub fn monthly_tax(&self) -> Money {
        if self.input.tax_policy.taxes_recurring_payment() {
            round_cents(self.tax)
        } else {
            Decimal::ZERO
        }
    }

    pub fn drive_off_tax(&self) -> Money {
        round_cents(self.drive_off_tax)
    }

    pub fn total_tax(&self) -> Money {
        if self.input.tax_policy.taxes_recurring_payment() {
            round_cents(self.tax * self.term() + self.drive_off_tax)
        } else {
            round_cents(self.drive_off_tax)
        }
    }

    /// Rent charges over the full term.
    pub fn total_interest(&self) -> Money {
        round_cents(self.pass.rent_charge * self.term())
    }

    pub fn apr(&self) -> Percent {
        round_cents(self.implied_apr)
    }

    /// Amount due at signing; zero under zero drive-off.
    pub fn drive_off_payment(&self) -> Money {
        if self.input.zero_driveoff {
            return Decimal::ZERO;
        }
        round_cents(
            self.drive_off_tax
                + self.input.down_payment
                + self.input.total_fees
                + self.monthly_payment
                + self.fees.acquisition_fee,
        )
    }

    pub fn drive_off_breakdown(&self) -> Option<Vec<DriveOffItem>> {
        if self.input.zero_driveoff {
            return None;
        }
        let mut items = vec![
            DriveOffItem::new(DriveOffItemKind::Taxes, self.drive_off_tax()),
            DriveOffItem::new(DriveOffItemKind::FirstMonth, self.monthly_payment()),
            DriveOffItem::new(DriveOffItemKind::AcquisitionFee, self.fees.acquisition_fee),
        ];
        if !self.input.down_payment.is_zero() {
            items.push(DriveOffItem::new(
                DriveOffItemKind::DownPayment,
                self.input.down_payment,
            ));
        }
        if !self.input.total_fees.is_zero() {
            items.push(DriveOffItem::new(
                DriveOffItemKind::TotalFees,
                self.input.total_fees,
            ));
        }
        Some(items)
    }

    /// Everything paid over the lease. The first payment is part of the
    /// drive-off amount, so only `term - 1` further payments are added.
    pub fn total_lease_cost(&self) -> Money {
        round_cents(
            self.monthly_payment * (self.term() - Decimal::ONE)
                + self.drive_off_payment()
                + self.fees.disposition_fee,
        )
    }

    /// Discount negotiated off MSRP, or `None` when there is none.
    pub fn discount_off_msrp_percent(&self) -> Option<Percent> {
        let msrp = self.input.msrp;
        let discount = round_cents((msrp - self.input.selling_price) / msrp * dec!(100));
        (discount > Decimal::ZERO).then_some(discount)
    }

    /// Monthly payment as a percentage of MSRP (the "1% rule").
    pub fn monthly_payment_to_msrp_percent(&self) -> Percent {
        round_cents(self.monthly_payment / self.input.msrp * dec!(100))
    }

    pub fn report(&self) -> LeaseReport {
        LeaseReport {
            monthly_payment: self.monthly_payment(),
            monthly_payment_pre_tax: self.monthly_payment_pre_tax(),
            base_monthly_payment: self.base_monthly_payment(),
            rent_charge: self.rent_charge(),
            monthly_tax: self.monthly_tax(),
            depreciation: self.depreciation(),
            net_capitalized_cost: self.net_capitalized_cost(),
            residual_value: self.residual_value(),
            residual_percent: self.residual_percent(),
            apr: self.apr(),
            drive_off_payment: self.drive_off_payment(),
            drive_off_tax: self.drive_off_tax(),
            drive_off_breakdown: self.drive_off_breakdown(),
            total_tax: self.total_tax(),
            total_interest: self.total_interest(),
            total_lease_cost: self.total_lease_cost(),
            discount_off_msrp_percent: self.discount_off_msrp_percent(),
            monthly_payment_to_msrp_percent: self.monthly_payment_to_msrp_percent(),
            acquisition_fee: self.acquisition_fee(),
            disposition_fee: self.disposition_fee(),
        }
    }

    fn term(&self) -> Decimal {
        Decimal::from(self.input.lease_term_months)
    }
}
