//! Output formatting for the CLI.

use console::{style, StyledObject};
use helix_commerce::catalog::Product;
use helix_commerce::personalization::Variant;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg, false);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg, false);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        self.status(style("⚠").yellow(), msg, true);
    }

    fn status(&self, icon: StyledObject<&str>, msg: &str, stderr: bool) {
        if self.json {
            return;
        }
        if stderr {
            eprintln!("{icon} {msg}");
        } else {
            println!("{icon} {msg}");
        }
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table, optionally with star ratings.
    pub fn products(&self, products: &[&Product], show_ratings: bool) {
        if self.json {
            return;
        }
        if products.is_empty() {
            self.info("No products found");
            return;
        }
        let widths = [10, 22, 13, 10, 7, 12];
        self.table_row(
            &["ID", "NAME", "CATEGORY", "PRICE", "STOCK", "RATING"],
            &widths,
        );
        for product in products {
            let rating = if show_ratings {
                stars(product)
            } else {
                String::new()
            };
            let stock = if product.is_available() { "yes" } else { "no" };
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &product.category,
                    &product.display_price(),
                    stock,
                    &rating,
                ],
                &widths,
            );
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Star rating such as `★★★★☆ 4.5`.
pub fn stars(product: &Product) -> String {
    let (full, empty) = product.rating_stars();
    format!(
        "{}{} {:.1}",
        "★".repeat(usize::from(full)),
        "☆".repeat(usize::from(empty)),
        product.rating
    )
}

/// Colored variant name.
pub fn variant_badge(variant: Variant) -> String {
    match variant {
        Variant::Premium => style(variant).magenta().bold().to_string(),
        Variant::NewUser => style(variant).green().to_string(),
        Variant::ReturningCustomer => style(variant).cyan().to_string(),
        Variant::Budget => style(variant).yellow().to_string(),
        Variant::Standard => style(variant).dim().to_string(),
    }
}
