use super::config::AdjustmentRule;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum AdjustmentRulesError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDelta { line: usize, value: f64 },
}

impl std::fmt::Display for AdjustmentRulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentRulesError::Io(err) => {
                write!(f, "failed to read adjustment rules: {}", err)
            }
            AdjustmentRulesError::Csv(err) => {
                write!(f, "invalid adjustment rules CSV data: {}", err)
            }
            AdjustmentRulesError::InvalidDelta { line, value } => {
                write!(f, "adjustment rule on line {line} has a non-finite delta ({value})")
            }
        }
    }
}

impl std::error::Error for AdjustmentRulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdjustmentRulesError::Io(err) => Some(err),
            AdjustmentRulesError::Csv(err) => Some(err),
            AdjustmentRulesError::InvalidDelta { .. } => None,
        }
    }
}

impl From<std::io::Error> for AdjustmentRulesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AdjustmentRulesError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct AdjustmentRow {
    #[serde(default = "wildcard")]
    industry: String,
    #[serde(default = "wildcard")]
    company_stage: String,
    #[serde(default = "wildcard")]
    industry_maturity: String,
    delta: f64,
}

fn wildcard() -> String {
    super::config::WILDCARD.to_string()
}

fn blank_as_wildcard(value: String) -> String {
    if value.trim().is_empty() {
        wildcard()
    } else {
        value
    }
}

/// Reads `industry,company_stage,industry_maturity,delta` rows; blank cells act as wildcards.
pub fn load_adjustment_rules<R: Read>(reader: R) -> Result<Vec<AdjustmentRule>, AdjustmentRulesError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rules = Vec::new();

    for (index, record) in csv_reader.deserialize::<AdjustmentRow>().enumerate() {
        let row = record?;
        if !row.delta.is_finite() {
            return Err(AdjustmentRulesError::InvalidDelta {
                line: index + 2,
                value: row.delta,
            });
        }

        rules.push(AdjustmentRule {
            industry: blank_as_wildcard(row.industry),
            company_stage: blank_as_wildcard(row.company_stage),
            industry_maturity: blank_as_wildcard(row.industry_maturity),
            delta: row.delta,
        });
    }

    Ok(rules)
}

pub fn load_adjustment_rules_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<AdjustmentRule>, AdjustmentRulesError> {
    let file = std::fs::File::open(path)?;
    load_adjustment_rules(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rules_with_blank_wildcards() {
        let csv = "industry,company_stage,industry_maturity,delta\n\
                   Healthcare,Startup,Immature,-7.5\n\
                   ,Enterprise,Mature,4\n";
        let rules = load_adjustment_rules(Cursor::new(csv)).expect("rules parse");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].industry, "Healthcare");
        assert_eq!(rules[0].delta, -7.5);
        assert_eq!(rules[1].industry, "*");
        assert_eq!(rules[1].company_stage, "Enterprise");
    }

    #[test]
    fn rejects_non_numeric_delta() {
        let csv = "industry,company_stage,industry_maturity,delta\n*,*,*,lots\n";
        let err = load_adjustment_rules(Cursor::new(csv)).expect_err("delta must be numeric");
        assert!(matches!(err, AdjustmentRulesError::Csv(_)));
    }

    #[test]
    fn rejects_non_finite_delta() {
        let csv = "industry,company_stage,industry_maturity,delta\n*,*,*,NaN\n";
        let err = load_adjustment_rules(Cursor::new(csv)).expect_err("delta must be finite");
        assert!(matches!(err, AdjustmentRulesError::InvalidDelta { line: 2, .. }));
    }
}
