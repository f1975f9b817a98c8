//! Run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of a single labmerge run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub groups: usize,
    /// Rows that received a derived value: matched keys or included rows
    pub flagged_rows: usize,
    /// Label for `flagged_rows` in the report
    pub flagged_label: String,
    pub load_time: Duration,
    pub transform_time: Duration,
    pub save_time: Duration,
}

impl RunSummary {
    pub fn new(flagged_label: &str) -> Self {
        Self {
            flagged_label: flagged_label.to_string(),
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_transform_time(&mut self, elapsed: Duration) {
        self.transform_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    /// Share of output rows that received a derived value, in percent
    pub fn flagged_pct(&self) -> f64 {
        if self.output_rows > 0 {
            self.flagged_rows as f64 / self.output_rows as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.transform_time + self.save_time
    }

    /// Render the summary as a table string
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Input Rows"), Cell::new(self.input_rows)]);
        table.add_row(vec![Cell::new("🧩 Groups"), Cell::new(self.groups)]);
        table.add_row(vec![
            Cell::new(format!("✅ {}", self.flagged_label)),
            Cell::new(format!("{} ({:.1}%)", self.flagged_rows, self.flagged_pct()))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Row count must survive every transform
        let output_color = if self.output_rows == self.input_rows {
            Color::White
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("💾 Output Rows"),
            Cell::new(self.output_rows).fg(output_color),
        ]);
        for (label, elapsed) in [
            ("📥 Load Time", self.load_time),
            ("⚙️  Transform Time", self.transform_time),
            ("💾 Save Time", self.save_time),
        ] {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format!("{:.2?}", elapsed)).fg(Color::DarkGrey),
            ]);
        }
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2?}", self.total_time())).add_attribute(Attribute::Bold),
        ]);

        table.to_string()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.render().lines() {
            println!("    {}", line);
        }
    }
}
