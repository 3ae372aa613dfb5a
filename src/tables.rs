use choosemypower::{
    analysis::{Analysis, MARKET_AVERAGE_RATE},
    comparison::{Comparison, SHORT_TERM_MONTHS},
    plan::RateType,
    quantity::cost::Cost,
};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Savings shown as a negative amount, or a dash when there are none.
fn savings_cell(savings: Cost) -> Cell {
    if savings > Cost::ZERO {
        Cell::new(-savings).fg(Color::Green)
    } else {
        Cell::new("–").add_attribute(Attribute::Dim)
    }
}

#[must_use]
pub fn build_breakdown_table(analysis: &Analysis) -> Table {
    let breakdown = &analysis.breakdown;

    let mut table = new_table();
    table.set_header(vec!["Component", "Amount"]);
    table.add_row(vec![Cell::new("Energy"), Cell::new(breakdown.energy_cost)]);
    table.add_row(vec![Cell::new("Monthly fees"), Cell::new(breakdown.monthly_fees)]);
    table.add_row(vec![Cell::new("Connection fee"), Cell::new(breakdown.connection_fee)]);
    table.add_row(vec![
        Cell::new("Promotional savings"),
        savings_cell(breakdown.promotional_savings),
    ]);
    table.add_row(vec![Cell::new("Taxes"), Cell::new(breakdown.taxes)]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(breakdown.total_cost).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Average monthly"),
        Cell::new(analysis.average_monthly_cost),
    ]);
    table.add_row(vec![Cell::new("Effective rate"), Cell::new(analysis.effective_rate)]);
    table.add_row(vec![
        Cell::new("Early termination fee").add_attribute(Attribute::Dim),
        Cell::new(breakdown.early_termination_fee).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Below market average"),
        Cell::new(analysis.potential_savings).fg(if analysis.potential_savings > Cost::ZERO {
            Color::Green
        } else {
            Color::Reset
        }),
    ]);
    if let Some(month) = analysis.break_even_month {
        table.add_row(vec![Cell::new("Break-even month"), Cell::new(month)]);
    }
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

#[must_use]
pub fn build_projection_table(analysis: &Analysis) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Usage", "Energy", "Fees", "Promotion", "Net", "Cumulative"]);
    for month in &analysis.projection {
        table.add_row(vec![
            Cell::new(month.month),
            Cell::new(month.usage).add_attribute(Attribute::Dim),
            Cell::new(month.energy_cost),
            Cell::new(month.fees),
            savings_cell(month.promotional_savings),
            Cell::new(month.net_cost).fg(if month.net_cost < Cost::ZERO {
                Color::Green
            } else {
                Color::Reset
            }),
            Cell::new(month.cumulative_cost),
        ]);
    }
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Print the assumptions and disclaimers below the tables.
pub fn print_notes(analysis: &Analysis) {
    for assumption in &analysis.assumptions {
        println!("• {assumption}");
    }
    for disclaimer in &analysis.disclaimers {
        println!("⚠ {disclaimer}");
    }
    if analysis.is_estimate {
        println!("⚠ The figures above are an estimate");
    }
}

#[must_use]
pub fn build_comparison_table(comparison: &Comparison) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#",
        "Plan",
        "Provider",
        "Type",
        "Effective rate",
        "Total",
        "Monthly",
        "Promotion",
        "Short-term",
    ]);
    for analysis in &comparison.plans {
        let mut name = Cell::new(&analysis.plan_name);
        if analysis.plan_id == comparison.summary.best_value {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(analysis.cost_rank).fg(if analysis.cost_rank == 1 {
                Color::Green
            } else {
                Color::Reset
            }),
            name,
            Cell::new(&analysis.provider).add_attribute(Attribute::Dim),
            Cell::new(analysis.rate_type).fg(match analysis.rate_type {
                RateType::Fixed => Color::Reset,
                RateType::Variable => Color::DarkYellow,
                RateType::Indexed => Color::Magenta,
            }),
            Cell::new(analysis.effective_rate).set_alignment(CellAlignment::Right).fg(
                if analysis.effective_rate > MARKET_AVERAGE_RATE { Color::Red } else { Color::Green },
            ),
            Cell::new(analysis.total_cost).set_alignment(CellAlignment::Right),
            Cell::new(analysis.average_monthly_cost).set_alignment(CellAlignment::Right),
            savings_cell(analysis.breakdown.promotional_savings).set_alignment(CellAlignment::Right),
            analysis.cumulative_cost_at(SHORT_TERM_MONTHS).map_or_else(
                || Cell::new("–").add_attribute(Attribute::Dim),
                |cost| Cell::new(cost).set_alignment(CellAlignment::Right),
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_insights_table(comparison: &Comparison) -> Table {
    let summary = &comparison.summary;
    let insights = &comparison.insights;

    let mut table = new_table();
    table.set_header(vec!["Insight", "Value"]);
    table.add_row(vec![Cell::new("Lowest cost"), Cell::new(summary.lowest_cost)]);
    table.add_row(vec![Cell::new("Highest cost"), Cell::new(summary.highest_cost)]);
    table.add_row(vec![Cell::new("Average cost"), Cell::new(summary.average_cost)]);
    table.add_row(vec![Cell::new("Cost spread"), Cell::new(summary.cost_spread)]);
    table.add_row(vec![
        Cell::new("Best value").add_attribute(Attribute::Bold),
        Cell::new(&summary.best_value).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Best short-term"), Cell::new(&insights.short_term_best)]);
    table.add_row(vec![Cell::new("Best long-term"), Cell::new(&insights.long_term_best)]);
    table.add_row(vec![
        Cell::new("Promotional winners"),
        Cell::new(insights.promotional_winners.join(", ")).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Stable pricing"),
        Cell::new(insights.stable_pricing.join(", ")),
    ]);
    table
}
