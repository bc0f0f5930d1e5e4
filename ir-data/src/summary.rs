//! Plain-text rendering of computation results.

use ir_core::calculations::YearComparison;
use ir_core::{CapitalMode, IrResult};
use rust_decimal::Decimal;
use tabled::{Table, builder::Builder};

fn euros(amount: Decimal) -> String {
    format!("{} €", amount.round_dp(2).normalize())
}

fn percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

fn push_row(
    builder: &mut Builder,
    label: &str,
    value: String,
) {
    builder.push_record([label.to_string(), value]);
}

fn section(
    title: &str,
    builder: Builder,
) -> String {
    format!("\n{title}\n{}\n", Table::from(builder))
}

fn income_section(result: &IrResult) -> Builder {
    let mut builder = Builder::default();
    for (index, declarant) in result.declarants.iter().enumerate() {
        let abatement = if declarant.used_real_expenses {
            "  real expenses"
        } else {
            "  10% abatement"
        };
        push_row(
            &mut builder,
            &format!("Declarant {} salaries", index + 1),
            euros(declarant.salary_income),
        );
        push_row(&mut builder, abatement, euros(declarant.salary_abatement));
        push_row(&mut builder, "  pensions", euros(declarant.pensions));
        push_row(&mut builder, "  other income", euros(declarant.other_income));
    }
    push_row(&mut builder, "Pension abatement", euros(result.pension_abatement));
    push_row(&mut builder, "Capital income", euros(result.capital_total));
    push_row(&mut builder, "Taxable income", euros(result.taxable_income));
    push_row(&mut builder, "Reference income (RFR)", euros(result.rfr));
    builder
}

fn quotient_section(result: &IrResult) -> Builder {
    let mut builder = Builder::default();
    push_row(&mut builder, "Parts", result.parts.normalize().to_string());
    push_row(&mut builder, "Income per part", euros(result.income_per_part));
    push_row(&mut builder, "Marginal rate", percent(result.tmi_rate));
    if let Some(margin) = result.tmi_margin_global {
        push_row(&mut builder, "Margin in marginal bracket", euros(margin));
    }
    builder
}

fn income_tax_section(result: &IrResult) -> Builder {
    let mut builder = Builder::default();
    push_row(&mut builder, "Tax before capping", euros(result.ir_before_cap));
    if result.qf_is_capped {
        push_row(&mut builder, "Tax at base parts", euros(result.ir_base_parts));
        push_row(
            &mut builder,
            "Capped advantage",
            format!(
                "{} / {}",
                euros(result.qf_advantage),
                euros(result.qf_max_advantage)
            ),
        );
    }
    push_row(&mut builder, "Gross tax", euros(result.ir_gross));
    push_row(&mut builder, "Décote", euros(result.decote));
    if !result.dom_abatement.is_zero() {
        push_row(&mut builder, "Overseas abatement", euros(result.dom_abatement));
    }
    push_row(&mut builder, "Net income tax", euros(result.ir_net));
    builder
}

fn levies_section(result: &IrResult) -> Builder {
    let mut builder = Builder::default();
    if result.capital_mode == CapitalMode::Pfu {
        push_row(
            &mut builder,
            &format!(
                "Flat tax ({} IR + {} PS)",
                percent(result.pfu_rate_ir),
                percent(result.pfu_rate_ps)
            ),
            euros(result.pfu_ir),
        );
    }
    push_row(&mut builder, "CEHR", euros(result.cehr));
    push_row(&mut builder, "CDHR", euros(result.cdhr));
    push_row(&mut builder, "Social contributions", euros(result.ps.total));
    push_row(&mut builder, "Total tax", euros(result.total_tax));
    builder
}

fn bracket_section(result: &IrResult) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(["Bracket", "Base", "Rate", "Tax"]);
    for row in &result.brackets_details {
        builder.push_record([
            row.label.clone(),
            row.base.round_dp(2).normalize().to_string(),
            percent(row.rate),
            row.tax.to_string(),
        ]);
    }
    builder
}

/// Renders the full breakdown of one result.
pub fn render_summary(result: &IrResult) -> String {
    let mut out = if result.year_label.is_empty() {
        format!("Income tax ({:?})\n", result.year)
    } else {
        format!("Income tax {}\n", result.year_label)
    };

    out.push_str(&section("Income", income_section(result)));
    out.push_str(&section("Quotient familial", quotient_section(result)));
    out.push_str(&section("Income tax", income_tax_section(result)));
    out.push_str(&section("Other levies", levies_section(result)));
    if !result.brackets_details.is_empty() {
        out.push_str(&section("Brackets (per part)", bracket_section(result)));
    }

    out
}

/// Renders the key figures of both years side by side.
pub fn render_comparison(comparison: &YearComparison) -> String {
    let (current, previous) = (&comparison.current, &comparison.previous);

    let mut builder = Builder::default();
    builder.push_record([
        String::new(),
        current.year_label.clone(),
        previous.year_label.clone(),
    ]);
    let rows = [
        ("Taxable income", current.taxable_income, previous.taxable_income),
        ("Parts", current.parts, previous.parts),
        ("Gross tax", current.ir_gross, previous.ir_gross),
        ("Décote", current.decote, previous.decote),
        ("Net income tax", current.ir_net, previous.ir_net),
        ("Total tax", current.total_tax, previous.total_tax),
    ];
    for (label, a, b) in rows {
        builder.push_record([
            label.to_string(),
            a.normalize().to_string(),
            b.normalize().to_string(),
        ]);
    }

    format!("{}\n", Table::from(builder))
}
