//! Non-fatal findings collected while a run proceeds. Fatal problems are
//! errors; everything here travels alongside a successful result.

use tracing::{info, warn, Level};

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Projection columns absent from the claim-ratio input.
    MissingRatioColumns(Vec<String>),
    /// The claim-ratio input has no policy column, so nothing can be matched.
    RatioPolicyMissing,
    /// A claim date column had blank or unparseable values, coerced to empty.
    InvalidDates { column: String, count: usize },
    /// No benefit status column; benefit rows were not status-filtered.
    BenefitStatusMissing,
    /// No benefit claim-number column; benefit rows were not cross-filtered.
    BenefitClaimKeyMissing { column: String },
    /// Claim numbers that appeared on more than one settled row.
    DuplicateClaims(Vec<String>),
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::DuplicateClaims(_))
    }

    pub fn level(&self) -> Level {
        if self.is_warning() {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingRatioColumns(cols) => {
                write!(f, "Missing columns in claim ratio data: {}", cols.join(", "))
            }
            Diagnostic::RatioPolicyMissing => {
                f.write_str("Column 'Policy No' not found in claim ratio data; ratio table left empty.")
            }
            Diagnostic::InvalidDates { column, count } => write!(
                f,
                "Invalid date values detected in column '{column}' ({count} rows). Left blank."
            ),
            Diagnostic::BenefitStatusMissing => {
                f.write_str("Column 'Status Claim' not found in benefit data. Data not filtered.")
            }
            Diagnostic::BenefitClaimKeyMissing { column } => write!(
                f,
                "Column '{column}' not found in benefit data; skipping claim number filter."
            ),
            Diagnostic::DuplicateClaims(ids) => {
                write!(f, "Duplicated claim numbers ({}): {}", ids.len(), ids.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Diagnostic) {
        if item.level() == Level::WARN {
            warn!("{item}");
        } else {
            info!("{item}");
        }
        self.items.push(item);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.is_warning())
    }

    pub fn duplicate_claims(&self) -> &[String] {
        self.iter()
            .find_map(|d| match d {
                Diagnostic::DuplicateClaims(ids) => Some(ids.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_duplicates_are_informational() {
        let mut d = Diagnostics::new();
        d.push(Diagnostic::DuplicateClaims(vec!["C1".into()]));
        d.push(Diagnostic::BenefitStatusMissing);
        assert_eq!(d.len(), 2);
        assert_eq!(d.warnings().count(), 1);
        assert_eq!(d.duplicate_claims(), ["C1".to_string()]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_push_emits_warn_and_info_events() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut d = Diagnostics::new();
            d.push(Diagnostic::BenefitStatusMissing);
            d.push(Diagnostic::DuplicateClaims(vec!["C1".into()]));
        });

        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN") && lines[0].contains("Status Claim"));
        assert!(lines[1].contains("INFO") && lines[1].contains("Duplicated claim numbers (1): C1"));
    }

    #[test]
    fn test_missing_columns_message_names_columns() {
        let msg = Diagnostic::MissingRatioColumns(vec!["CR".into(), "Est Claim".into()]).to_string();
        assert!(msg.contains("CR, Est Claim"));
    }
}
