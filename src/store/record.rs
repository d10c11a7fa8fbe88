//! Record Module
//!
//! One person's names, network and handle as read from a record file line.

use crate::error::{DirectoryError, Result};

/// Minimum number of comma-separated fields in a record line.
const MIN_FIELDS: usize = 4;

// == Record ==
/// A single line of the record file.
///
/// Fields are read from the end: `handle`, then `network`, then the two
/// last names; everything before them is a given name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub given_names: Vec<String>,
    pub last_names: (String, String),
    pub network: String,
    pub handle: String,
}

impl Record {
    // == Parse ==
    /// Parses one record line.
    ///
    /// # Arguments
    /// * `line_no` - 1-based line number, reported in `ParseError`
    /// * `line` - The raw line, without its newline
    pub fn parse(line_no: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            return Err(DirectoryError::Parse {
                line: line_no,
                found: fields.len(),
            });
        }

        let n = fields.len();
        Ok(Self {
            given_names: fields[..n - 4].iter().map(|s| s.to_string()).collect(),
            last_names: (fields[n - 4].to_string(), fields[n - 3].to_string()),
            network: fields[n - 2].to_lowercase(),
            handle: fields[n - 1].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_given_name() {
        let record = Record::parse(1, "ana,garcia,lopez,instagram,@anag").unwrap();
        assert_eq!(record.given_names, vec!["ana"]);
        assert_eq!(record.last_names, ("garcia".to_string(), "lopez".to_string()));
        assert_eq!(record.network, "instagram");
        assert_eq!(record.handle, "@anag");
    }

    #[test]
    fn test_parse_multiple_given_names() {
        let record = Record::parse(1, "Maria,Jose,Perez,Ruiz,WhatsApp,+34600111222").unwrap();
        assert_eq!(record.given_names, vec!["Maria", "Jose"]);
        assert_eq!(record.network, "whatsapp");
        assert_eq!(record.handle, "+34600111222");
    }

    #[test]
    fn test_parse_no_given_names() {
        // Exactly four fields is enough; the given-name list is empty
        let record = Record::parse(1, "garcia,lopez,instagram,@gl").unwrap();
        assert!(record.given_names.is_empty());
    }

    #[test]
    fn test_parse_handle_kept_verbatim() {
        let record = Record::parse(1, "ana,garcia,lopez,instagram, @AnaG ").unwrap();
        assert_eq!(record.handle, "@AnaG");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let result = Record::parse(7, "ana,garcia,@anag");
        assert!(matches!(
            result,
            Err(DirectoryError::Parse { line: 7, found: 3 })
        ));
    }
}
