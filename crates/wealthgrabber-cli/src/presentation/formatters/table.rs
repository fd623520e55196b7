use super::number::{format_money, format_percent, format_quantity, format_signed_money};
use super::text::{rule, truncate};
use super::{FormatError, Formatter, GroupLabel};
use crate::presentation::presenters::{
    CurrencyTotals, activity_sections, group_positions, position_totals, value_totals,
};
use wealthgrabber_types::{Account, Activity, Position};

const ACCOUNT_WIDTH: usize = 80;
const ACTIVITY_WIDTH: usize = 80;
const POSITION_WIDTH: usize = 92;

/// Fixed-width text tables for terminals.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn name(&self) -> &'static str {
        "table"
    }

    fn format_accounts(&self, accounts: &[Account]) -> Result<String, FormatError> {
        if accounts.is_empty() {
            return Ok("No accounts found.".to_string());
        }

        let mut lines = vec![
            rule('=', ACCOUNT_WIDTH),
            format!("{:<40} {:<20} {:>18}", "Account", "Number", "Value"),
            rule('-', ACCOUNT_WIDTH),
        ];
        for account in accounts {
            lines.push(format!(
                "{:<40} {:<20} {:>18}",
                truncate(&account.description, 40),
                truncate(&account.number, 20),
                with_currency(format_money(account.value), &account.currency)
            ));
        }

        lines.push(rule('-', ACCOUNT_WIDTH));
        let totals = value_totals(accounts.iter().map(|a| (a.currency.as_str(), a.value)));
        for (currency, total) in totals {
            lines.push(format!(
                "{:<61} {:>18}",
                "Total",
                with_currency(format_money(total), &currency)
            ));
        }
        lines.push(rule('=', ACCOUNT_WIDTH));

        Ok(lines.join("\n"))
    }

    fn format_activities(&self, activities: &[Activity]) -> Result<String, FormatError> {
        if activities.is_empty() {
            return Ok("No activities found.".to_string());
        }

        let mut lines = Vec::new();
        for (label, section) in activity_sections(activities) {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(rule('=', ACTIVITY_WIDTH));
            if let Some(label) = label {
                lines.push(format!("Account: {}", label));
                lines.push(rule('=', ACTIVITY_WIDTH));
            }
            lines.push(format!(
                "{:<11} {:<14} {:<34} {:>18}",
                "Date", "Type", "Description", "Amount"
            ));
            lines.push(rule('-', ACTIVITY_WIDTH));
            for activity in section {
                let amount = format!("{}{}", activity.sign, format_money(activity.amount));
                lines.push(format!(
                    "{:<11} {:<14} {:<34} {:>18}",
                    truncate(&activity.date, 11),
                    truncate(&activity.activity_type, 14),
                    truncate(&activity.description, 34),
                    with_currency(amount, &activity.currency)
                ));
            }
            lines.push(rule('=', ACTIVITY_WIDTH));
        }

        Ok(lines.join("\n"))
    }

    fn format_positions(
        &self,
        positions: &[Position],
        show_totals: bool,
        group_label: Option<GroupLabel>,
    ) -> Result<String, FormatError> {
        if positions.is_empty() {
            return Ok("No positions found.".to_string());
        }

        let Some(by) = group_label else {
            let all: Vec<&Position> = positions.iter().collect();
            return Ok(position_table(&all, show_totals.then_some("Total")).join("\n"));
        };

        let mut lines = Vec::new();
        for group in group_positions(positions, by) {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(rule('=', POSITION_WIDTH));
            lines.push(match group.label {
                Some(label) => format!("{}: {}", by.heading(), label),
                None => "Unassigned".to_string(),
            });
            lines.extend(position_table(
                &group.positions,
                show_totals.then_some(by.subtotal_label()),
            ));
        }

        if show_totals {
            lines.push(String::new());
            lines.push(rule('=', POSITION_WIDTH));
            for total in position_totals(positions) {
                lines.push(totals_row("Grand Total", &total));
            }
            lines.push(rule('=', POSITION_WIDTH));
        }

        Ok(lines.join("\n"))
    }
}

fn position_table(positions: &[&Position], totals_label: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        rule('=', POSITION_WIDTH),
        format!(
            "{:<10} {:<30} {:>10} {:>16} {:>13} {:>8}",
            "Symbol", "Name", "Qty", "Market Value", "P&L", "P&L %"
        ),
        rule('-', POSITION_WIDTH),
    ];
    lines.extend(positions.iter().map(|p| position_row(p)));

    if let Some(label) = totals_label {
        lines.push(rule('-', POSITION_WIDTH));
        for total in position_totals(positions.iter().copied()) {
            lines.push(totals_row(label, &total));
        }
    }
    lines.push(rule('=', POSITION_WIDTH));
    lines
}

fn position_row(position: &Position) -> String {
    format!(
        "{:<10} {:<30} {:>10} {:>16} {:>13} {:>8}",
        truncate(&position.symbol, 10),
        truncate(&position.name, 30),
        format_quantity(position.quantity),
        with_currency(format_money(position.market_value), &position.currency),
        format_signed_money(position.pnl),
        format_percent(position.pnl_pct)
    )
}

fn totals_row(label: &str, total: &CurrencyTotals) -> String {
    format!(
        "{:<52} {:>16} {:>13} {:>8}",
        label,
        with_currency(format_money(total.market_value), &total.currency),
        format_signed_money(total.pnl),
        format_percent(total.pnl_pct)
    )
}

fn with_currency(amount: String, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wealthgrabber_testing::fixtures::{sample_accounts, sample_activities, sample_positions};

    fn total_line<'a>(out: &'a str, label: &str, currency: &str) -> &'a str {
        out.lines()
            .find(|line| {
                line.starts_with(label) && line.split_whitespace().any(|word| word == currency)
            })
            .unwrap_or_else(|| panic!("no {} row for {} in:\n{}", label, currency, out))
    }

    #[test]
    fn test_empty_inputs_render_messages() {
        assert_eq!(TableFormatter.format_accounts(&[]).unwrap(), "No accounts found.");
        assert_eq!(
            TableFormatter.format_activities(&[]).unwrap(),
            "No activities found."
        );
        assert_eq!(
            TableFormatter.format_positions(&[], true, None).unwrap(),
            "No positions found."
        );
    }

    #[test]
    fn test_position_totals_per_currency() {
        let out = TableFormatter
            .format_positions(&sample_positions(), true, None)
            .unwrap();

        let cad = total_line(&out, "Total", "CAD");
        assert!(cad.contains("4,000.00 CAD"));
        assert!(cad.contains("+400.00"));
        assert!(cad.ends_with("+11.1%"));

        let usd = total_line(&out, "Total", "USD");
        assert!(usd.contains("+100.00"));
        assert!(out.lines().all(|line| line.chars().count() <= POSITION_WIDTH));
    }

    #[test]
    fn test_positions_without_totals() {
        let out = TableFormatter
            .format_positions(&sample_positions(), false, None)
            .unwrap();
        assert!(!out.lines().any(|line| line.starts_with("Total")));
        assert!(out.contains("-100.00"));
        assert!(out.contains("-3.8%"));
    }

    #[test]
    fn test_grouped_positions() {
        let mut positions = sample_positions();
        positions[0].account_label = Some("TFSA (TFSA-001)".to_string());
        positions[1].account_label = Some("TFSA (TFSA-001)".to_string());

        let out = TableFormatter
            .format_positions(&positions, true, Some(GroupLabel::Account))
            .unwrap();

        let tfsa = out.find("Account: TFSA (TFSA-001)").unwrap();
        let unassigned = out.find("Unassigned").unwrap();
        assert!(tfsa < unassigned);
        assert!(total_line(&out, "Account Total", "CAD").contains("+400.00"));
        assert!(total_line(&out, "Account Total", "USD").contains("+100.00"));
        assert!(total_line(&out, "Grand Total", "CAD").contains("+400.00"));
        assert!(out.rfind("Grand Total").unwrap() > unassigned);
    }

    #[test]
    fn test_accounts_table_has_total_per_currency() {
        let out = TableFormatter.format_accounts(&sample_accounts()).unwrap();

        assert!(out.contains("TFSA-001"));
        assert!(total_line(&out, "Total", "CAD").ends_with("63,234.56 CAD"));
        assert!(total_line(&out, "Total", "USD").ends_with("1,200.50 USD"));
        assert!(out.lines().all(|line| line.chars().count() <= ACCOUNT_WIDTH));
    }

    #[test]
    fn test_activities_are_sectioned_by_account() {
        let out = TableFormatter.format_activities(&sample_activities()).unwrap();

        let rrsp = out.find("Account: RRSP (RRSP-001)").unwrap();
        let tfsa = out.find("Account: TFSA (TFSA-001)").unwrap();
        assert!(rrsp < tfsa);
        assert!(out.contains("+12.34 CAD"));
        assert!(out.contains("-1,250.00 CAD"));
        assert!(out.lines().all(|line| line.chars().count() <= ACTIVITY_WIDTH));
    }

    #[test]
    fn test_unlabeled_activities_have_no_account_header() {
        let mut activities = sample_activities();
        for activity in &mut activities {
            activity.account_label = None;
        }
        let out = TableFormatter.format_activities(&activities).unwrap();
        assert!(!out.contains("Account:"));
        assert_eq!(out.lines().filter(|l| l.starts_with("Date")).count(), 1);
    }
}
