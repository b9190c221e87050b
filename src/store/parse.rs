//! Template list parsing.

use crate::util::{FrameGateError, FrameGateResult};

/// Delimiter between template identifiers.
pub const TEMPLATE_DELIMITER: char = ',';

/// Splits a comma-separated template list into identifiers.
///
/// Identifiers are returned verbatim. An empty list and empty entries
/// (leading, trailing or doubled commas) are rejected.
pub fn parse_template_list(list: &str) -> FrameGateResult<Vec<String>> {
    if list.is_empty() {
        return Err(FrameGateError::EmptyTemplateList);
    }
    list.split(TEMPLATE_DELIMITER)
        .enumerate()
        .map(|(index, id)| {
            if id.is_empty() {
                Err(FrameGateError::EmptyIdentifier { index })
            } else {
                Ok(id.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_template_list;
    use crate::util::FrameGateError;

    #[test]
    fn splits_in_configuration_order() {
        let ids = parse_template_list("logo.png,ads/banner.jpg,c").unwrap();
        assert_eq!(ids, vec!["logo.png", "ads/banner.jpg", "c"]);
    }

    #[test]
    fn single_identifier_without_delimiter() {
        assert_eq!(parse_template_list("only.png").unwrap(), vec!["only.png"]);
    }

    #[test]
    fn rejects_empty_list() {
        assert_eq!(
            parse_template_list("").unwrap_err(),
            FrameGateError::EmptyTemplateList
        );
    }

    #[test]
    fn rejects_empty_identifiers() {
        assert_eq!(
            parse_template_list("a.png,,b.png").unwrap_err(),
            FrameGateError::EmptyIdentifier { index: 1 }
        );
        assert_eq!(
            parse_template_list(",a.png").unwrap_err(),
            FrameGateError::EmptyIdentifier { index: 0 }
        );
        assert_eq!(
            parse_template_list("a.png,").unwrap_err(),
            FrameGateError::EmptyIdentifier { index: 1 }
        );
    }

    #[test]
    fn keeps_whitespace_verbatim() {
        assert_eq!(
            parse_template_list("my logo.png, b.png").unwrap(),
            vec!["my logo.png", " b.png"]
        );
    }
}
