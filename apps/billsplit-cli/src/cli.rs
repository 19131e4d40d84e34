//! Command-line definitions.

use std::path::PathBuf;

use billsplit_core::BillConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "billsplit")]
#[command(
    author,
    version,
    about = "Split a restaurant bill in proportion to what everyone had"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write an empty bill sheet to fill in
    #[command(alias = "new")]
    Template(TemplateArgs),

    /// Recompute a filled-in bill sheet and render the split into it
    Compute {
        /// Sheet to compute (default: $BILLSPLIT_SHEET)
        input: Option<PathBuf>,

        /// Where to write the rendered sheet (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a JSON bill snapshot and print the result as JSON
    Split {
        /// Snapshot file (items, people, config)
        snapshot: PathBuf,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Number of food items on the bill
    #[arg(long)]
    pub food: usize,

    /// Number of alcohol items on the bill
    #[arg(long, default_value = "0")]
    pub alcohol: usize,

    /// Number of people at the table
    #[arg(long)]
    pub people: usize,

    /// Overall discount, gross of the service charge
    #[arg(long, default_value = "0")]
    pub discount_total: f64,

    /// Discount applied to food only
    #[arg(long, default_value = "0")]
    pub discount_food: f64,

    /// Discount applied to alcohol only
    #[arg(long, default_value = "0")]
    pub discount_alcohol: f64,

    /// Tax charged on food
    #[arg(long, default_value = "0")]
    pub food_tax: f64,

    /// Tax charged on alcohol
    #[arg(long, default_value = "0")]
    pub alcohol_tax: f64,

    /// Service charge added to the bill
    #[arg(long, default_value = "0")]
    pub service_charge: f64,

    /// Sheet file to create
    #[arg(short, long)]
    pub output: PathBuf,
}

impl TemplateArgs {
    pub fn config(&self) -> BillConfig {
        BillConfig {
            discount_total: self.discount_total,
            discount_food: self.discount_food,
            discount_alcohol: self.discount_alcohol,
            food_tax_amount: self.food_tax,
            alcohol_tax_amount: self.alcohol_tax,
            service_charge_amount: self.service_charge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_template() {
        let cli = Cli::parse_from([
            "billsplit",
            "template",
            "--food",
            "3",
            "--people",
            "4",
            "--service-charge",
            "12.5",
            "-o",
            "dinner.csv",
        ]);

        let Command::Template(args) = cli.command else {
            panic!("expected template command");
        };
        assert_eq!(args.food, 3);
        assert_eq!(args.alcohol, 0);
        assert_eq!(args.people, 4);
        assert_eq!(args.config().service_charge_amount, 12.5);
        assert_eq!(args.output, PathBuf::from("dinner.csv"));
    }

    #[test]
    fn test_parse_compute_without_file() {
        let cli = Cli::parse_from(["billsplit", "compute"]);
        assert!(matches!(
            cli.command,
            Command::Compute {
                input: None,
                output: None
            }
        ));
    }
}
