//! Locator string parser.
//!
//! ```text
//! locator   := [ "outer" ] chain [ "outer" chain ]
//! chain     := node { node }
//! node      := "{" role { name | attribute } "}"
//! name      := '...' | "..."
//! attribute := ident ":" value
//! ```
//!
//! At most one `outer` may appear in a locator.

use std::collections::BTreeMap;

use crate::result::{LocatorError, LocatorResult};
use crate::semantics::{
    is_aria_role, is_supported_attribute, NameMatcher, SemanticLocator, SemanticNode,
    SUPPORTED_ATTRIBUTES,
};

const OUTER_KEYWORD: &str = "outer";

/// Parse a semantic locator string
///
/// # Errors
///
/// Returns [`LocatorError::Parse`] on malformed syntax, unknown roles or
/// unsupported attributes
pub fn parse_locator(input: &str) -> LocatorResult<SemanticLocator> {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> LocatorResult<SemanticLocator> {
        let mut pre_outer = Vec::new();
        let mut post_outer: Option<Vec<SemanticNode>> = None;

        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else { break };
            if c == '{' {
                let node = self.parse_node()?;
                match post_outer.as_mut() {
                    Some(post) => post.push(node),
                    None => pre_outer.push(node),
                }
            } else if is_word_char(c) {
                let start = self.pos;
                let word = self.read_word();
                if word != OUTER_KEYWORD {
                    return Err(LocatorError::parse(
                        format!("unexpected '{word}', expected '{{' or 'outer'"),
                        start,
                    ));
                }
                if post_outer.is_some() {
                    return Err(LocatorError::parse(
                        "only one 'outer' operator is supported per locator",
                        start,
                    ));
                }
                post_outer = Some(Vec::new());
            } else {
                return Err(LocatorError::parse(
                    format!("unexpected character '{c}'"),
                    self.pos,
                ));
            }
        }

        match post_outer {
            None if pre_outer.is_empty() => Err(LocatorError::parse("empty locator", 0)),
            None => Ok(SemanticLocator::chain(pre_outer)),
            Some(post) if post.is_empty() => Err(LocatorError::parse(
                "'outer' must be followed by at least one node",
                self.pos,
            )),
            Some(post) => Ok(SemanticLocator::new(pre_outer, post)),
        }
    }

    fn parse_node(&mut self) -> LocatorResult<SemanticNode> {
        let open = self.pos;
        self.bump(); // '{'
        self.skip_whitespace();

        let role_start = self.pos;
        let role = self.read_word();
        if role.is_empty() {
            return Err(LocatorError::parse("expected a role", role_start));
        }
        if !is_aria_role(role) {
            return Err(LocatorError::parse(
                format!("'{role}' is not a valid ARIA role"),
                role_start,
            ));
        }

        let mut name: Option<NameMatcher> = None;
        let mut attributes = BTreeMap::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(LocatorError::parse("unterminated node, expected '}'", open));
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(quote @ ('\'' | '"')) => {
                    let start = self.pos;
                    let value = self.read_quoted(quote)?;
                    if name.is_some() {
                        return Err(LocatorError::parse(
                            "a node may have at most one name",
                            start,
                        ));
                    }
                    name = Some(
                        NameMatcher::from_name(value)
                            .map_err(|_| LocatorError::parse("invalid name pattern", start))?,
                    );
                }
                Some(c) if is_word_char(c) => {
                    let start = self.pos;
                    let (key, value) = self.read_attribute()?;
                    if !is_supported_attribute(&key) {
                        return Err(LocatorError::parse(
                            format!(
                                "unsupported attribute '{key}', expected one of: {}",
                                SUPPORTED_ATTRIBUTES.join(", ")
                            ),
                            start,
                        ));
                    }
                    if attributes.insert(key.clone(), value).is_some() {
                        return Err(LocatorError::parse(
                            format!("attribute '{key}' specified more than once"),
                            start,
                        ));
                    }
                }
                Some(c) => {
                    return Err(LocatorError::parse(
                        format!("unexpected character '{c}' in node"),
                        self.pos,
                    ));
                }
            }
        }

        Ok(SemanticNode {
            role: role.to_string(),
            attributes,
            name,
        })
    }

    fn read_attribute(&mut self) -> LocatorResult<(String, String)> {
        let key = self.read_word().to_string();
        if self.peek() != Some(':') {
            return Err(LocatorError::parse(
                format!("expected ':' after attribute '{key}'"),
                self.pos,
            ));
        }
        self.bump();
        let value_start = self.pos;
        let value = self.read_word();
        if value.is_empty() {
            return Err(LocatorError::parse(
                format!("expected a value for attribute '{key}'"),
                value_start,
            ));
        }
        Ok((key, value.to_string()))
    }

    fn read_quoted(&mut self, quote: char) -> LocatorResult<String> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(LocatorError::parse("unterminated string", start)),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(LocatorError::parse("unterminated string", start)),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }

    fn read_word(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        &input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse_err(input: &str) -> (String, usize) {
        match parse_locator(input) {
            Err(LocatorError::Parse { message, position }) => (message, position),
            other => panic!("expected parse error for {input:?}, got {other:?}"),
        }
    }

    mod valid_locators {
        use super::*;

        #[test]
        fn test_single_role() {
            let locator = parse_locator("{button}").unwrap();
            assert_eq!(locator.pre_outer, vec![SemanticNode::new("button")]);
            assert!(locator.post_outer.is_empty());
        }

        #[test]
        fn test_role_with_name() {
            let locator = parse_locator("{button 'OK'}").unwrap();
            assert_eq!(
                locator.pre_outer[0],
                SemanticNode::new("button").with_name("OK")
            );
        }

        #[test]
        fn test_double_quoted_name_with_escape() {
            let locator = parse_locator(r#"{heading "Say \"hi\""}"#).unwrap();
            assert_eq!(
                locator.pre_outer[0].name.as_ref().unwrap().as_str(),
                r#"Say "hi""#
            );
        }

        #[test]
        fn test_wildcard_name() {
            let locator = parse_locator("{link 'Sign*'}").unwrap();
            let name = locator.pre_outer[0].name.as_ref().unwrap();
            assert!(matches!(name, NameMatcher::Pattern(_)));
            assert!(name.matches("Sign in"));
        }

        #[test]
        fn test_attributes_any_position() {
            let locator = parse_locator("{checkbox checked:true 'Agree' disabled:false}").unwrap();
            let node = &locator.pre_outer[0];
            assert_eq!(node.attributes.get("checked").unwrap(), "true");
            assert_eq!(node.attributes.get("disabled").unwrap(), "false");
            assert_eq!(node.name.as_ref().unwrap().as_str(), "Agree");
        }

        #[test]
        fn test_descendant_chain() {
            let locator = parse_locator("{list} {listitem 'a'}").unwrap();
            assert_eq!(locator.pre_outer.len(), 2);
            assert!(!locator.has_outer());
        }

        #[test]
        fn test_outer_split() {
            let locator = parse_locator("{list} outer {listitem}").unwrap();
            assert_eq!(locator.pre_outer, vec![SemanticNode::new("list")]);
            assert_eq!(locator.post_outer, vec![SemanticNode::new("listitem")]);
        }

        #[test]
        fn test_leading_outer() {
            let locator = parse_locator("outer {list}").unwrap();
            assert!(locator.pre_outer.is_empty());
            assert_eq!(locator.post_outer.len(), 1);
        }

        #[test]
        fn test_whitespace_tolerance() {
            let locator = parse_locator("  {  list  }outer{listitem}  ").unwrap();
            assert_eq!(locator.to_string(), "{list} outer {listitem}");
        }

        #[test]
        fn test_display_reparses_to_same_locator() {
            let source = "{region 'Main'} outer {button 'It\\'s *' pressed:true}";
            let locator = parse_locator(source).unwrap();
            assert_eq!(parse_locator(&locator.to_string()).unwrap(), locator);
        }
    }

    mod invalid_locators {
        use super::*;

        #[test]
        fn test_empty() {
            let (message, _) = parse_err("   ");
            assert!(message.contains("empty"));
        }

        #[test]
        fn test_unknown_role() {
            let (message, position) = parse_err("{div}");
            assert!(message.contains("not a valid ARIA role"));
            assert_eq!(position, 1);
        }

        #[test]
        fn test_missing_role() {
            let (message, _) = parse_err("{ 'OK'}");
            assert!(message.contains("expected a role"));
        }

        #[test]
        fn test_unterminated_node() {
            let (message, position) = parse_err("{button} {link");
            assert!(message.contains("unterminated node"));
            assert_eq!(position, 9);
        }

        #[test]
        fn test_unterminated_string() {
            let (message, _) = parse_err("{button 'OK}");
            assert!(message.contains("unterminated string"));
        }

        #[test]
        fn test_two_names() {
            let (message, _) = parse_err("{button 'a' 'b'}");
            assert!(message.contains("at most one name"));
        }

        #[test]
        fn test_duplicate_attribute() {
            let (message, _) = parse_err("{checkbox checked:true checked:false}");
            assert!(message.contains("more than once"));
        }

        #[test]
        fn test_unsupported_attribute() {
            let (message, _) = parse_err("{button label:x}");
            assert!(message.contains("unsupported attribute 'label'"));
        }

        #[test]
        fn test_attribute_without_value() {
            let (message, _) = parse_err("{checkbox checked:}");
            assert!(message.contains("expected a value"));
        }

        #[test]
        fn test_two_outer_operators() {
            let (message, _) = parse_err("{list} outer {list} outer {listitem}");
            assert!(message.contains("only one 'outer'"));
        }

        #[test]
        fn test_trailing_outer() {
            let (message, _) = parse_err("{list} outer");
            assert!(message.contains("followed by at least one node"));
        }

        #[test]
        fn test_unexpected_word() {
            let (message, position) = parse_err("{list} inner {listitem}");
            assert!(message.contains("unexpected 'inner'"));
            assert_eq!(position, 7);
        }

        #[test]
        fn test_unexpected_character() {
            let (message, _) = parse_err("{list} > {listitem}");
            assert!(message.contains("unexpected character '>'"));
        }
    }
}
