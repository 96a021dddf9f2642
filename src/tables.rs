use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use rust_decimal::Decimal;

use crate::plan::PricePlan;

pub fn build_costs_table<'a>(entries: &[(&'a PricePlan, Decimal)]) -> Table {
    let cheapest = entries.iter().map(|(_, cost)| *cost).min();

    let mut table = new_table();
    table.set_header(vec!["Plan", "Supplier", "Unit rate", "Projected cost"]);
    for (plan, cost) in entries {
        table.add_row(vec![
            Cell::new(&plan.name),
            Cell::new(&plan.supplier).add_attribute(Attribute::Dim),
            Cell::new(plan.unit_rate).set_alignment(CellAlignment::Right),
            Cell::new(cost).set_alignment(CellAlignment::Right).fg(if Some(*cost) == cheapest {
                Color::Green
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}

pub fn build_plans_table<'a>(plans: impl IntoIterator<Item = &'a PricePlan>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Supplier", "Unit rate", "Peak-time multipliers"]);
    for plan in plans {
        let multipliers = plan
            .peak_time_multipliers
            .iter()
            .map(|multiplier| format!("{} ×{}", multiplier.day_of_week, multiplier.multiplier))
            .join(", ");
        table.add_row(vec![
            Cell::new(&plan.name),
            Cell::new(&plan.supplier).add_attribute(Attribute::Dim),
            Cell::new(plan.unit_rate).set_alignment(CellAlignment::Right),
            Cell::new(multipliers).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}
