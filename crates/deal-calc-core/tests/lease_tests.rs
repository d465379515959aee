use deal_calc_core::fees::{FeeTable, MakeFeeEntry, NoFees};
use deal_calc_core::lease::{
    calculate_lease, calculate_lease_with, DriveOffItemKind, LeaseInput, LeaseQuote,
};
use deal_calc_core::tax::TaxPolicy;
use deal_calc_core::{round_cents, round_whole, DealError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// 2024 Toyota at 5% off MSRP, 60% residual, MF 0.00125 (3% APR), 9.5% tax.
fn toyota(policy: TaxPolicy) -> LeaseInput {
    LeaseInput {
        make: "Toyota".into(),
        msrp: dec!(40000),
        selling_price: dec!(38000),
        residual_value: dec!(60),
        is_residual_percent: true,
        money_factor: dec!(0.00125),
        lease_term_months: 36,
        sales_tax_percent: dec!(9.5),
        total_fees: dec!(1000),
        rebates: Decimal::ZERO,
        down_payment: Decimal::ZERO,
        tax_policy: policy,
        zero_driveoff: false,
    }
}

fn with_down(policy: TaxPolicy) -> LeaseInput {
    LeaseInput {
        down_payment: dec!(3000),
        rebates: dec!(500),
        ..toyota(policy)
    }
}

fn zero_driveoff(policy: TaxPolicy) -> LeaseInput {
    LeaseInput {
        zero_driveoff: true,
        ..toyota(policy)
    }
}

fn price(input: &LeaseInput) -> LeaseQuote {
    calculate_lease(input).unwrap()
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_missing_required_fields_name_the_field() {
    let cases = [
        (
            "MSRP",
            LeaseInput {
                msrp: Decimal::ZERO,
                ..toyota(TaxPolicy::OnMonthlyPayment)
            },
        ),
        (
            "Selling Price",
            LeaseInput {
                selling_price: Decimal::ZERO,
                ..toyota(TaxPolicy::OnMonthlyPayment)
            },
        ),
        (
            "Residual Value",
            LeaseInput {
                residual_value: Decimal::ZERO,
                ..toyota(TaxPolicy::OnMonthlyPayment)
            },
        ),
        (
            "Money Factor",
            LeaseInput {
                money_factor: Decimal::ZERO,
                ..toyota(TaxPolicy::OnMonthlyPayment)
            },
        ),
    ];

    for (field, input) in cases {
        match calculate_lease(&input) {
            Err(DealError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidInput for {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_field_in_json_is_a_validation_error() {
    let input: LeaseInput = serde_json::from_str(
        r#"{ "make": "Toyota", "msrp": 40000, "residual_value": 60, "money_factor": "0.00125" }"#,
    )
    .unwrap();
    let err = calculate_lease(&input).unwrap_err();
    assert_eq!(err.field(), Some("Selling Price"));
}

// ===========================================================================
// Fees and residual
// ===========================================================================

#[test]
fn test_fees_follow_make() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    assert_eq!(quote.acquisition_fee(), dec!(650));
    assert_eq!(quote.disposition_fee(), dec!(350));

    let unbranded = price(&LeaseInput {
        make: String::new(),
        ..toyota(TaxPolicy::OnMonthlyPayment)
    });
    assert_eq!(unbranded.acquisition_fee(), Decimal::ZERO);
    assert_eq!(unbranded.disposition_fee(), Decimal::ZERO);
}

#[test]
fn test_custom_fee_schedule() {
    let table = FeeTable {
        makes: vec![MakeFeeEntry {
            make: "Toyota".into(),
            acquisition_fee: dec!(800),
            disposition_fee: dec!(400),
        }],
    };
    let quote = calculate_lease_with(&toyota(TaxPolicy::OnMonthlyPayment), &table).unwrap();
    assert_eq!(quote.acquisition_fee(), dec!(800));
    assert_eq!(quote.disposition_fee(), dec!(400));
}

#[test]
fn test_residual_percent_and_value() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    assert_eq!(quote.residual_value(), dec!(24000.00));
    assert_eq!(quote.residual_percent(), dec!(60));
}

#[test]
fn test_absolute_residual_prices_like_percent_residual() {
    let by_percent = price(&toyota(TaxPolicy::OnMonthlyPayment));
    let by_value = price(&LeaseInput {
        residual_value: dec!(24000),
        is_residual_percent: false,
        ..toyota(TaxPolicy::OnMonthlyPayment)
    });
    assert_eq!(by_value.residual_percent(), dec!(60));
    assert_eq!(by_value.report(), by_percent.report());
}

// ===========================================================================
// Tax on monthly payment
// ===========================================================================

#[test]
fn test_monthly_policy_zero_down() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    assert_eq!(quote.net_capitalized_cost(), dec!(38000.00));
    assert_eq!(quote.depreciation(), dec!(14000.00));
    assert_eq!(quote.base_monthly_payment(), dec!(388.89));
    assert_eq!(quote.rent_charge(), dec!(77.50));
    assert_eq!(quote.monthly_payment_pre_tax(), dec!(466.39));
    assert_eq!(quote.monthly_tax(), dec!(44.31));
    assert_eq!(quote.monthly_payment(), dec!(510.70));
    assert_eq!(quote.apr(), dec!(3.00));
    assert_eq!(quote.discount_off_msrp_percent(), Some(dec!(5.00)));
    assert_eq!(quote.monthly_payment_to_msrp_percent(), dec!(1.28));
}

#[test]
fn test_monthly_policy_drive_off_and_totals() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    // (1000 fees + 650 acquisition) * 9.5%
    assert_eq!(quote.drive_off_tax(), dec!(156.75));
    assert_eq!(quote.drive_off_payment(), dec!(2317.45));
    assert_eq!(quote.total_tax(), dec!(1751.80));
    assert_eq!(quote.total_interest(), dec!(2790.00));
    assert_eq!(quote.total_lease_cost(), dec!(20541.80));
}

#[test]
fn test_monthly_policy_with_down_payment() {
    let quote = price(&with_down(TaxPolicy::OnMonthlyPayment));
    assert_eq!(quote.net_capitalized_cost(), dec!(34500.00));
    assert_eq!(quote.monthly_payment(), dec!(399.45));
    assert_eq!(quote.drive_off_tax(), dec!(489.25));
    assert_eq!(quote.drive_off_payment(), dec!(5538.70));
    assert_eq!(quote.total_lease_cost(), dec!(19869.34));
}

#[test]
fn test_monthly_policy_zero_driveoff() {
    let quote = price(&zero_driveoff(TaxPolicy::OnMonthlyPayment));
    assert_eq!(quote.net_capitalized_cost(), dec!(39700.04));
    assert_eq!(quote.monthly_payment_pre_tax(), dec!(528.20));
    assert_eq!(quote.monthly_tax(), dec!(50.04));
    assert_eq!(quote.monthly_payment(), dec!(578.38));
    assert_eq!(quote.drive_off_payment(), Decimal::ZERO);
    assert_eq!(quote.total_lease_cost(), dec!(20593.17));
}

#[test]
fn test_monthly_policy_zero_driveoff_ignores_down_payment() {
    let quote = price(&LeaseInput {
        zero_driveoff: true,
        ..with_down(TaxPolicy::OnMonthlyPayment)
    });
    // rebates reduce cap cost and are taxed with the payment; the down payment is not applied
    assert_eq!(quote.net_capitalized_cost(), dec!(39246.12));
    assert_eq!(quote.monthly_tax(), dec!(96.12));
    assert_eq!(quote.monthly_payment(), dec!(563.55));
    assert_eq!(quote.total_lease_cost(), dec!(20074.39));
}

// ===========================================================================
// Tax on sales price
// ===========================================================================

#[test]
fn test_sales_price_policy() {
    let quote = price(&toyota(TaxPolicy::OnSalesPrice));
    assert_eq!(quote.monthly_payment(), dec!(466.39));
    assert_eq!(quote.monthly_payment(), quote.monthly_payment_pre_tax());
    assert_eq!(quote.monthly_tax(), Decimal::ZERO);
    assert_eq!(quote.drive_off_tax(), dec!(3610.00));
    assert_eq!(quote.total_tax(), dec!(3610.00));
    assert_eq!(quote.drive_off_payment(), dec!(5726.39));
    assert_eq!(quote.total_lease_cost(), dec!(22400.00));
    assert_eq!(quote.monthly_payment_to_msrp_percent(), dec!(1.17));
}

#[test]
fn test_sales_price_policy_with_down_payment() {
    let quote = price(&with_down(TaxPolicy::OnSalesPrice));
    assert_eq!(quote.monthly_payment(), dec!(364.79));
    assert_eq!(quote.total_lease_cost(), dec!(21742.50));
}

#[test]
fn test_sales_price_policy_zero_driveoff_capitalizes_tax() {
    let quote = price(&zero_driveoff(TaxPolicy::OnSalesPrice));
    // 38000 + 1000 + 650 + 3610 tax
    assert_eq!(quote.net_capitalized_cost(), dec!(43260.00));
    assert_eq!(quote.monthly_payment_pre_tax(), dec!(634.36));
    assert_eq!(quote.monthly_payment(), dec!(634.36));
    assert_eq!(quote.drive_off_payment(), Decimal::ZERO);
}

// ===========================================================================
// Tax on total lease payment
// ===========================================================================

#[test]
fn test_total_lease_payment_policy() {
    let quote = price(&toyota(TaxPolicy::OnTotalLeasePayment));
    assert_eq!(quote.monthly_payment(), dec!(466.39));
    assert_eq!(quote.monthly_tax(), Decimal::ZERO);
    assert_eq!(quote.drive_off_tax(), dec!(1785.05));
    assert_eq!(quote.total_tax(), quote.drive_off_tax());
    assert_eq!(quote.drive_off_payment(), dec!(3901.44));
    assert_eq!(quote.total_lease_cost(), dec!(20575.05));
}

#[test]
fn test_total_lease_payment_policy_with_down_payment() {
    let quote = price(&with_down(TaxPolicy::OnTotalLeasePayment));
    assert_eq!(quote.monthly_payment(), dec!(364.79));
    assert_eq!(quote.drive_off_tax(), dec!(1770.09));
    assert_eq!(quote.total_lease_cost(), dec!(19902.59));
}

#[test]
fn test_total_lease_payment_policy_zero_driveoff() {
    let quote = price(&zero_driveoff(TaxPolicy::OnTotalLeasePayment));
    assert_eq!(quote.net_capitalized_cost(), dec!(41641.33));
    assert_eq!(quote.monthly_payment_pre_tax(), dec!(586.09));
    assert_eq!(quote.monthly_payment(), dec!(586.09));
    assert_eq!(quote.total_lease_cost(), dec!(20863.14));
}

// ===========================================================================
// Cross-field identities
// ===========================================================================

#[test]
fn test_base_payments_equal_depreciation() {
    for policy in TaxPolicy::ALL {
        let quote = price(&toyota(policy));
        let term = Decimal::from(quote.input().lease_term_months);
        assert_eq!(
            round_whole(quote.base_monthly_payment() * term),
            round_whole(quote.depreciation())
        );
    }
}

#[test]
fn test_base_plus_rent_equals_pre_tax_payment() {
    for policy in TaxPolicy::ALL {
        let quote = price(&toyota(policy));
        assert_eq!(
            round_cents(quote.base_monthly_payment() + quote.rent_charge()),
            quote.monthly_payment_pre_tax()
        );
    }
}

#[test]
fn test_base_plus_rent_plus_tax_equals_monthly_payment() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    assert_eq!(
        round_cents(quote.base_monthly_payment() + quote.rent_charge() + quote.monthly_tax()),
        quote.monthly_payment()
    );
}

#[test]
fn test_total_tax_is_monthly_tax_over_term_plus_drive_off_tax() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    let term = Decimal::from(quote.input().lease_term_months);
    let rebuilt = quote.monthly_tax() * term + quote.drive_off_tax();
    assert_eq!(round_whole(rebuilt), round_whole(quote.total_tax()));
}

#[test]
fn test_full_precision_pass_identity_holds_for_every_structure() {
    let inputs = TaxPolicy::ALL.into_iter().flat_map(|policy| {
        [toyota(policy), with_down(policy), zero_driveoff(policy)]
    });
    for input in inputs {
        let quote = price(&input);
        let pass = quote.final_pass();
        assert_eq!(pass.pre_tax_payment, pass.base_payment + pass.rent_charge);
        assert_eq!(pass.depreciation, pass.net_cap_cost - quote.residual().absolute);
        let pennies = (pass.base_payment * Decimal::from(input.amortization_months())
            - pass.depreciation)
            .abs();
        assert!(pennies < dec!(0.000001), "base payments drift from depreciation by {pennies}");
    }
}

#[test]
fn test_monthly_payment_rises_with_zero_driveoff() {
    for policy in TaxPolicy::ALL {
        let standard = price(&toyota(policy));
        let rolled = price(&zero_driveoff(policy));
        assert!(rolled.monthly_payment() > standard.monthly_payment());
    }
}

// ===========================================================================
// Drive-off
// ===========================================================================

#[test]
fn test_zero_driveoff_has_no_drive_off() {
    for policy in TaxPolicy::ALL {
        let quote = price(&zero_driveoff(policy));
        assert_eq!(quote.drive_off_payment(), Decimal::ZERO);
        assert!(quote.drive_off_breakdown().is_none());
    }
}

#[test]
fn test_drive_off_includes_every_payment_due_at_signing() {
    let quote = price(&with_down(TaxPolicy::OnMonthlyPayment));
    let expected = quote.drive_off_tax()
        + dec!(3000)
        + dec!(1000)
        + quote.monthly_payment()
        + quote.acquisition_fee();
    assert!((expected - quote.drive_off_payment()).abs() <= dec!(0.01));
}

#[test]
fn test_breakdown_lists_items_in_order() {
    let quote = price(&with_down(TaxPolicy::OnMonthlyPayment));
    let items = quote.drive_off_breakdown().unwrap();
    let kinds: Vec<DriveOffItemKind> = items.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DriveOffItemKind::Taxes,
            DriveOffItemKind::FirstMonth,
            DriveOffItemKind::AcquisitionFee,
            DriveOffItemKind::DownPayment,
            DriveOffItemKind::TotalFees,
        ]
    );
    assert_eq!(items[0].amount, dec!(489.25));
    assert_eq!(items[1].amount, dec!(399.45));
    assert_eq!(items[2].amount, dec!(650));
}

#[test]
fn test_breakdown_omits_zero_down_and_zero_fees() {
    let quote = calculate_lease_with(
        &LeaseInput {
            total_fees: Decimal::ZERO,
            ..toyota(TaxPolicy::OnMonthlyPayment)
        },
        &NoFees,
    )
    .unwrap();
    let items = quote.drive_off_breakdown().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].kind, DriveOffItemKind::AcquisitionFee);
    assert_eq!(items[2].amount, Decimal::ZERO);
}

// ===========================================================================
// Discount off MSRP
// ===========================================================================

#[test]
fn test_discount_absent_at_msrp() {
    let quote = price(&LeaseInput {
        selling_price: dec!(40000),
        ..toyota(TaxPolicy::OnMonthlyPayment)
    });
    assert_eq!(quote.discount_off_msrp_percent(), None);
}

#[test]
fn test_discount_absent_above_msrp() {
    let quote = price(&LeaseInput {
        selling_price: dec!(40001),
        ..toyota(TaxPolicy::OnMonthlyPayment)
    });
    assert_eq!(quote.discount_off_msrp_percent(), None);
}

// ===========================================================================
// Report
// ===========================================================================

#[test]
fn test_report_serializes_rounded_values() {
    let quote = price(&toyota(TaxPolicy::OnMonthlyPayment));
    let json = serde_json::to_value(quote.report()).unwrap();
    assert_eq!(json["monthly_payment"], "510.70");
    assert_eq!(json["residual_percent"], "60");
    assert_eq!(json["drive_off_breakdown"][0]["type"], "taxes");
}

#[test]
fn test_report_omits_breakdown_for_zero_driveoff() {
    let quote = price(&zero_driveoff(TaxPolicy::OnMonthlyPayment));
    let json = serde_json::to_value(quote.report()).unwrap();
    assert!(json.get("drive_off_breakdown").is_none());
    assert!(json["discount_off_msrp_percent"].is_string());
}
