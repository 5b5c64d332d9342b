use std::borrow::Cow;
use std::io::Write;

use crate::complexity::Sample;
use crate::money::Cents;
use crate::portfolio::Outcome;
use crate::solvers::exhaustive::Combination;
use crate::Result;

/// Output writer that renders into a memory buffer.
pub struct Writer(Vec<u8>);

impl Writer {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn println<T: std::fmt::Display>(&mut self, value: T) -> Result<()> {
        writeln!(self.0, "{}", value)?;
        Ok(())
    }

    pub fn into_string(self) -> String {
        // Only `Display` output is ever written, so the buffer is valid UTF-8.
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Csv,
    Json,
}

pub fn render(outcome: &Outcome, format: Format) -> Result<String> {
    let mut out = Writer::new();
    match format {
        Format::Text => text(outcome, &mut out)?,
        Format::Csv => csv(outcome, &mut out)?,
        Format::Json => out.println(serde_json::to_string_pretty(outcome)?)?,
    }
    Ok(out.into_string())
}

pub fn text(outcome: &Outcome, out: &mut Writer) -> Result<()> {
    if outcome.actions.is_empty() {
        out.println("No affordable combination.")?;
    } else {
        out.println("Best combination of actions:")?;
        for action in &outcome.actions {
            out.println(format_args!(
                "{} - cost: {}, benefit: {}",
                action.name,
                Cents::from_decimal_up(action.cost)?,
                Cents::from_decimal(action.benefit())?
            ))?;
        }
    }
    out.println("")?;
    out.println(format_args!("Total cost: {}", outcome.total_cost))?;
    out.println(format_args!("Total benefit: {}", outcome.total_benefit))
}

pub fn csv(outcome: &Outcome, out: &mut Writer) -> Result<()> {
    out.println("name,cost,return_rate,benefit")?;
    for action in &outcome.actions {
        out.println(format_args!(
            "{},{},{},{}",
            csv_field(&action.name),
            Cents::from_decimal_up(action.cost)?,
            action.return_rate,
            Cents::from_decimal(action.benefit())?
        ))?;
    }
    Ok(())
}

pub fn audit(combinations: &[Combination]) -> Result<String> {
    let mut out = Writer::new();
    out.println("actions,total_cost,total_benefit")?;
    for combination in combinations {
        out.println(format_args!(
            "{},{},{}",
            csv_field(&combination.actions.join(";")),
            combination.total_cost,
            combination.total_benefit
        ))?;
    }
    Ok(out.into_string())
}

/// Quote a field when it holds a separator, a quote or a line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn complexity(samples: &[Sample]) -> Result<String> {
    let mut out = Writer::new();
    out.println("items,seconds,total_benefit")?;
    for sample in samples {
        out.println(format_args!(
            "{},{:.6},{}",
            sample.items,
            sample.elapsed.as_secs_f64(),
            sample.total_benefit
        ))?;
    }
    Ok(out.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{Item, Portfolio};

    fn outcome() -> Outcome {
        let portfolio = Portfolio::new(
            300.0,
            vec![Item::new("A", 100.0, 0.10), Item::new("B", 200.0, 0.20)],
        )
        .unwrap();
        portfolio.outcome(&[0, 1])
    }

    #[test]
    fn test_text() {
        let expected = "Best combination of actions:\n\
                        A - cost: 100.00, benefit: 10.00\n\
                        B - cost: 200.00, benefit: 40.00\n\
                        \n\
                        Total cost: 300.00\n\
                        Total benefit: 50.00\n";
        assert_eq!(expected, render(&outcome(), Format::Text).unwrap());
    }

    #[test]
    fn test_text_without_actions() {
        let rendered = render(&Outcome::empty(), Format::Text).unwrap();
        assert!(rendered.starts_with("No affordable combination.\n"));
        assert!(rendered.ends_with("Total benefit: 0.00\n"));
    }

    #[test]
    fn test_csv() {
        let expected = "name,cost,return_rate,benefit\nA,100.00,0.1,10.00\nB,200.00,0.2,40.00\n";
        assert_eq!(expected, render(&outcome(), Format::Csv).unwrap());
    }

    #[test]
    fn test_json() {
        let rendered = render(&outcome(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(50.0, value["total_benefit"]);
        assert_eq!(300.0, value["total_cost"]);
        assert_eq!("B", value["actions"][1]["name"]);
    }

    #[test]
    fn test_audit() {
        let rows = vec![Combination {
            actions: vec!["A".into(), "B".into()],
            total_cost: Cents(30000),
            total_benefit: Cents(5000),
        }];
        assert_eq!(
            "actions,total_cost,total_benefit\nA;B,300.00,50.00\n",
            audit(&rows).unwrap()
        );
    }

    #[test]
    fn test_quotes_names_with_separators() {
        let portfolio = Portfolio::new(
            300.0,
            vec![
                Item::new("Acme, Inc", 100.0, 0.10),
                Item::new("The \"Big\" One", 200.0, 0.20),
            ],
        )
        .unwrap();
        let expected = "name,cost,return_rate,benefit\n\
                        \"Acme, Inc\",100.00,0.1,10.00\n\
                        \"The \"\"Big\"\" One\",200.00,0.2,40.00\n";
        assert_eq!(expected, render(&portfolio.outcome(&[0, 1]), Format::Csv).unwrap());

        let rows = vec![Combination {
            actions: vec!["Acme, Inc".into(), "B".into()],
            total_cost: Cents(30000),
            total_benefit: Cents(5000),
        }];
        assert_eq!(
            "actions,total_cost,total_benefit\n\"Acme, Inc;B\",300.00,50.00\n",
            audit(&rows).unwrap()
        );
        assert_eq!("plain", csv_field("plain"));
    }
}
