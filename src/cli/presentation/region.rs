//! Region presentation: one page of the region list.

use super::shared::{or_dash, table};
use super::Renderable;
use crate::remote::RegionPage;
use serde_json::{json, Value};

impl Renderable for RegionPage {
    fn render_human(&self) -> String {
        if self.regions.is_empty() {
            return "No regions found.".to_string();
        }

        let mut table = table(vec!["ID", "City", "Country", "Continent", "Options"]);
        for region in &self.regions {
            table.add_row(vec![
                region.id.clone(),
                or_dash(&region.city),
                or_dash(&region.country),
                or_dash(&region.continent),
                or_dash(&region.options.join(", ")),
            ]);
        }

        let mut out = format!("{}\n\nTotal: {}", table, self.meta.total);
        if !self.meta.links.next.is_empty() {
            out.push_str(&format!("\nNext cursor: {}", self.meta.links.next));
        }
        out
    }

    fn render_structured(&self) -> Value {
        json!({
            "regions": self.regions,
            "meta": {
                "total": self.meta.total,
                "links": {
                    "next": self.meta.links.next,
                    "prev": self.meta.links.prev,
                }
            }
        })
    }
}
