//! Line-oriented text form of move refactorings.
//!
//! One proposal per line:
//!
//! ```text
//! pkg.Source.member(java.lang.String,int) -> pkg.Target
//! ```
//!
//! Field moves and members recorded without parameter information have no
//! parentheses. Used for golden-file comparisons, so rendering is stable and
//! lists are sorted by source.

use super::Refactoring;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ARROW: &str = " -> ";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFormRefactoring {
    pub source_class: String,
    pub member: String,
    /// `None` renders without parentheses.
    pub params: Option<Vec<String>>,
    pub target_class: String,
}

impl TextFormRefactoring {
    pub fn new(
        source_class: impl Into<String>,
        member: impl Into<String>,
        params: Option<Vec<String>>,
        target_class: impl Into<String>,
    ) -> Self {
        Self {
            source_class: source_class.into(),
            member: member.into(),
            params,
            target_class: target_class.into(),
        }
    }

    /// Text form of a proposal whose source is a qualified member name.
    pub fn from_refactoring(refactoring: &Refactoring) -> Result<Self> {
        let (source_class, member, params) = split_member(refactoring.source())?;
        Ok(Self::new(source_class, member, params, refactoring.target()))
    }

    /// `source.member` plus the rendered parameter list.
    pub fn member_signature(&self) -> String {
        let mut signature = format!("{}.{}", self.source_class, self.member);
        match self.params.as_deref() {
            None => {}
            Some([]) => signature.push_str("()"),
            Some([only]) if only == "void" => signature.push_str("()"),
            Some(params) => {
                signature.push('(');
                signature.push_str(&params.join(","));
                signature.push(')');
            }
        }
        signature
    }

    /// Matches either the full signature or the signature without parameters.
    pub fn is_of_method(&self, signature: &str) -> bool {
        let rendered = self.member_signature();
        let without_params = signature.split('(').next().unwrap_or(signature);
        rendered == signature || rendered == without_params
    }

    pub fn is_to_class(&self, class_name: &str) -> bool {
        self.target_class == class_name
    }
}

impl fmt::Display for TextFormRefactoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.member_signature(), ARROW, self.target_class)
    }
}

impl FromStr for TextFormRefactoring {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let (source, target) = line
            .split_once(ARROW)
            .ok_or_else(|| Error::invalid_input(format!("missing '{}' in {:?}", ARROW.trim(), line)))?;
        let target = target.trim();
        if target.is_empty() || target.contains(char::is_whitespace) {
            return Err(Error::invalid_input(format!("bad target class in {:?}", line)));
        }
        let (source_class, member, params) = split_member(source.trim())?;
        Ok(Self::new(source_class, member, params, target))
    }
}

/// Splits `pkg.Class.member(p1,p2)` into class, member and parameters.
fn split_member(qualified: &str) -> Result<(String, String, Option<Vec<String>>)> {
    let (name, params) = match qualified.find('(') {
        None => (qualified, None),
        Some(open) => {
            let inner = qualified[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| Error::invalid_input(format!("unbalanced parameters in {:?}", qualified)))?;
            (&qualified[..open], Some(split_params(inner)))
        }
    };
    let (class, member) = name
        .rsplit_once('.')
        .filter(|(class, member)| !class.is_empty() && !member.is_empty())
        .ok_or_else(|| Error::invalid_input(format!("{:?} is not a qualified member name", qualified)))?;
    Ok((class.to_string(), member.to_string(), params))
}

/// Splits on commas outside of generic brackets.
fn split_params(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(inner[start..].trim().to_string());
    params
}

/// Renders proposals sorted by source, one per line, with a trailing newline.
pub fn to_text_form(refactorings: &[Refactoring]) -> Result<String> {
    let mut lines = refactorings
        .iter()
        .map(|r| TextFormRefactoring::from_refactoring(r).map(|t| t.to_string()))
        .collect::<Result<Vec<_>>>()?;
    lines.sort();
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Parses the text form, skipping blank lines and `#` comments.
pub fn parse_text_form(text: &str) -> Result<Vec<TextFormRefactoring>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            line.trim().parse::<TextFormRefactoring>().map_err(|e| {
                Error::invalid_input(format!("line {}: {}", number + 1, e))
            })
        })
        .collect()
}

/// The single proposal moving the given method, if any.
///
/// More than one match means the list is ambiguous, which is an error.
pub fn refactoring_of_method<'a>(
    refactorings: &'a [TextFormRefactoring],
    signature: &str,
) -> Result<Option<&'a TextFormRefactoring>> {
    let mut matches = refactorings.iter().filter(|r| r.is_of_method(signature));
    let first = matches.next();
    if matches.next().is_some() {
        return Err(Error::invalid_input(format!(
            "Refactorings list is ambiguous for {}",
            signature
        )));
    }
    Ok(first)
}

pub fn refactorings_to_class<'a>(
    refactorings: &'a [TextFormRefactoring],
    class_name: &str,
) -> Vec<&'a TextFormRefactoring> {
    refactorings
        .iter()
        .filter(|r| r.is_to_class(class_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn params(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn test_display_variants() {
        let field = TextFormRefactoring::new("a.A", "count", None, "a.B");
        assert_eq!(field.to_string(), "a.A.count -> a.B");

        let empty = TextFormRefactoring::new("a.A", "run", params(&[]), "a.B");
        assert_eq!(empty.to_string(), "a.A.run() -> a.B");

        let void = TextFormRefactoring::new("a.A", "run", params(&["void"]), "a.B");
        assert_eq!(void.to_string(), "a.A.run() -> a.B");

        let two = TextFormRefactoring::new("a.A", "put", params(&["java.util.Map<K,V>", "int"]), "a.B");
        assert_eq!(two.to_string(), "a.A.put(java.util.Map<K,V>,int) -> a.B");
    }

    #[test]
    fn test_parse_keeps_generic_commas() {
        let parsed: TextFormRefactoring = "a.A.put(java.util.Map<K, V>, int) -> b.B".parse().unwrap();
        assert_eq!(parsed.source_class, "a.A");
        assert_eq!(parsed.member, "put");
        assert_eq!(parsed.params, params(&["java.util.Map<K, V>", "int"]));
        assert_eq!(parsed.target_class, "b.B");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        for line in ["a.A.m()", "a.A.m( -> b.B", "m() -> b.B", "a.A.m() -> ", "a.A.m() -> b B"] {
            assert!(line.parse::<TextFormRefactoring>().is_err(), "{}", line);
        }
    }

    #[test]
    fn test_from_refactoring() {
        let method = Refactoring::new("p.Order.total(int)", "p.Customer", 0.5, false);
        let text = TextFormRefactoring::from_refactoring(&method).unwrap();
        assert_eq!(text.to_string(), "p.Order.total(int) -> p.Customer");

        let field = Refactoring::new("p.Order.discount", "p.Customer", 0.5, true);
        let text = TextFormRefactoring::from_refactoring(&field).unwrap();
        assert_eq!(text.params, None);
    }

    #[test]
    fn test_to_text_form_is_sorted_with_trailing_newline() {
        let text = to_text_form(&[
            Refactoring::new("b.B.m()", "a.A", 0.1, false),
            Refactoring::new("a.A.n(int)", "b.B", 0.9, false),
        ])
        .unwrap();
        assert_eq!(text, "a.A.n(int) -> b.B\nb.B.m() -> a.A\n");
        assert_eq!(to_text_form(&[]).unwrap(), "");
    }

    #[test]
    fn test_parse_text_form_reports_line_numbers() {
        let text = indoc! {"
            # golden
            a.A.n(int) -> b.B

            broken line
        "};
        let err = parse_text_form(text).unwrap_err();
        assert!(err.to_string().contains("line 4"), "{}", err);

        let ok = parse_text_form("a.A.n(int) -> b.B\nb.B.m() -> a.A\n").unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_refactoring_of_method_matches_with_or_without_params() {
        let list = vec![
            TextFormRefactoring::new("a.A", "m", None, "b.B"),
            TextFormRefactoring::new("a.A", "n", params(&["int"]), "b.B"),
        ];
        let found = refactoring_of_method(&list, "a.A.m(java.lang.String)").unwrap();
        assert_eq!(found.map(|r| r.member.as_str()), Some("m"));

        let found = refactoring_of_method(&list, "a.A.n(int)").unwrap();
        assert_eq!(found.map(|r| r.member.as_str()), Some("n"));

        assert!(refactoring_of_method(&list, "a.A.n(long)").unwrap().is_none());
    }

    #[test]
    fn test_ambiguous_lookup_fails() {
        let list = vec![
            TextFormRefactoring::new("a.A", "m", None, "b.B"),
            TextFormRefactoring::new("a.A", "m", params(&["int"]), "c.C"),
        ];
        assert!(refactoring_of_method(&list, "a.A.m(int)").is_err());
    }

    #[test]
    fn test_refactorings_to_class() {
        let list = vec![
            TextFormRefactoring::new("a.A", "m", None, "b.B"),
            TextFormRefactoring::new("a.A", "n", None, "c.C"),
            TextFormRefactoring::new("a.A", "o", None, "b.B"),
        ];
        assert_eq!(refactorings_to_class(&list, "b.B").len(), 2);
        assert!(refactorings_to_class(&list, "d.D").is_empty());
    }
}
