/// ASCII chart visualization for terminal output
/// Gives a quick reassignment preview without opening the rendered PNGs
use colored::*;

/// ASCII bar chart for terminal display
pub struct AsciiBarChart {
    title: String,
    data: Vec<(String, usize)>,
    width: usize,
}

impl AsciiBarChart {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            data: Vec::new(),
            width: 50,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn add_bar(&mut self, label: &str, value: usize) {
        self.data.push((label.to_string(), value));
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.title.bold().cyan()));
        output.push_str(&"─".repeat(self.width + 20));
        output.push('\n');

        if self.data.is_empty() {
            return output;
        }

        let max_value = self.data.iter().map(|(_, v)| *v).max().unwrap_or(0);
        let max_label_len = self.data.iter().map(|(l, _)| l.len()).max().unwrap_or(10);

        for (label, value) in &self.data {
            let bar_width = if max_value > 0 {
                value * self.width / max_value
            } else {
                0
            };

            let bar = "█".repeat(bar_width);
            let padding = " ".repeat(self.width - bar_width);
            let formatted_label = format!("{:width$}", label, width = max_label_len);

            output.push_str(&format!(
                "{} │{}{} {}\n",
                formatted_label.yellow(),
                bar.green(),
                padding,
                value
            ));
        }

        output
    }
}
