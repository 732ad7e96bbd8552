//! Account presentation: account summary and bandwidth usage.

use super::shared::{format_money, format_timestamp, or_dash, table};
use super::Renderable;
use crate::remote::{Account, AccountBandwidth, BandwidthPeriod};
use serde_json::{json, Value};

impl Renderable for Account {
    fn render_human(&self) -> String {
        let acls = if self.acls.is_empty() {
            "-".to_string()
        } else {
            self.acls.join(", ")
        };
        let mut table = table(vec!["Field", "Value"]);
        table.add_row(vec!["Name".to_string(), or_dash(&self.name)]);
        table.add_row(vec!["Email".to_string(), or_dash(&self.email)]);
        table.add_row(vec!["Balance".to_string(), format_money(self.balance)]);
        table.add_row(vec![
            "Pending charges".to_string(),
            format_money(self.pending_charges),
        ]);
        table.add_row(vec![
            "Last payment date".to_string(),
            format_timestamp(&self.last_payment_date),
        ]);
        table.add_row(vec![
            "Last payment amount".to_string(),
            format_money(self.last_payment_amount),
        ]);
        table.add_row(vec!["ACLs".to_string(), acls]);
        table.to_string()
    }

    fn render_structured(&self) -> Value {
        json!({
            "account": {
                "name": self.name,
                "email": self.email,
                "acls": self.acls,
                "balance": self.balance,
                "pending_charges": self.pending_charges,
                "last_payment_date": self.last_payment_date,
                "last_payment_amount": self.last_payment_amount,
            }
        })
    }
}

fn period_json(period: &BandwidthPeriod) -> Value {
    json!({
        "timestamp_start": period.timestamp_start,
        "timestamp_end": period.timestamp_end,
        "gb_in": period.gb_in,
        "gb_out": period.gb_out,
        "total_instance_hours": period.total_instance_hours,
        "overage": period.overage,
        "overage_cost": period.overage_cost,
    })
}

impl AccountBandwidth {
    fn periods(&self) -> [(&'static str, &BandwidthPeriod); 3] {
        [
            ("Previous month", &self.previous_month),
            ("Current month to date", &self.current_month_to_date),
            ("Current month projected", &self.current_month_projected),
        ]
    }
}

impl Renderable for AccountBandwidth {
    fn render_human(&self) -> String {
        let mut table = table(vec![
            "Period",
            "Start",
            "End",
            "GB in",
            "GB out",
            "Instance hours",
            "Overage",
            "Overage cost",
        ]);
        for (label, period) in self.periods() {
            table.add_row(vec![
                label.to_string(),
                format_timestamp(&period.timestamp_start),
                format_timestamp(&period.timestamp_end),
                period.gb_in.to_string(),
                period.gb_out.to_string(),
                period.total_instance_hours.to_string(),
                period.overage.to_string(),
                format_money(period.overage_cost),
            ]);
        }
        table.to_string()
    }

    fn render_structured(&self) -> Value {
        json!({
            "bandwidth": {
                "previous_month": period_json(&self.previous_month),
                "current_month_to_date": period_json(&self.current_month_to_date),
                "current_month_projected": period_json(&self.current_month_projected),
            }
        })
    }
}
