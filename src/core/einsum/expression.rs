use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use tracing::debug;

use crate::core::errors::{EinsumError, LabelError};

/// A parsed label expression such as `"ijk,il->jkl"`.
///
/// Each operand is described by one group of single-letter labels, one
/// label per axis. Labels missing from the output are summed over. Without
/// `->` the output is every label used exactly once, in alphabetical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelExpression {
    inputs: Vec<Vec<char>>,
    output: Vec<char>,
}

impl LabelExpression {
    pub fn parse(expression: &str) -> Result<LabelExpression, EinsumError> {
        let invalid = |reason| EinsumError::InvalidLabelExpression {
            expression: expression.to_string(),
            reason,
        };

        let compact = expression
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>();

        let mut parts = compact.split("->");
        let inputs = parts.next().unwrap_or_default();
        let output = parts.next();
        if parts.next().is_some() {
            return Err(invalid(LabelError::MultipleArrows));
        }

        let inputs = inputs
            .split(',')
            .map(labels)
            .collect::<Result<Vec<Vec<char>>, LabelError>>()
            .map_err(invalid)?;

        let output = match output {
            Some(output) => {
                let output = labels(output).map_err(invalid)?;
                valid_output(&inputs, &output).map_err(invalid)?;
                output
            }
            None => implicit_output(&inputs),
        };

        let parsed = LabelExpression { inputs, output };
        debug!(expression, parsed = %parsed, "parsed label expression");

        Ok(parsed)
    }

    /// Label groups, one per operand.
    pub fn inputs(&self) -> &[Vec<char>] {
        &self.inputs
    }

    pub fn output(&self) -> &[char] {
        &self.output
    }

    /// Distinct labels in order of first appearance across the operands.
    pub fn labels(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for &label in self.inputs.iter().flatten() {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Labels summed away, in order of first appearance.
    pub fn summed_labels(&self) -> Vec<char> {
        self.labels()
            .into_iter()
            .filter(|label| !self.output.contains(label))
            .collect()
    }
}

fn labels(group: &str) -> Result<Vec<char>, LabelError> {
    group
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                Ok(c)
            } else {
                Err(LabelError::InvalidCharacter(c))
            }
        })
        .collect()
}

fn valid_output(inputs: &[Vec<char>], output: &[char]) -> Result<(), LabelError> {
    for (position, &label) in output.iter().enumerate() {
        if output[..position].contains(&label) {
            return Err(LabelError::RepeatedOutput(label));
        }
        if !inputs.iter().any(|group| group.contains(&label)) {
            return Err(LabelError::UnknownOutput(label));
        }
    }

    Ok(())
}

fn implicit_output(inputs: &[Vec<char>]) -> Vec<char> {
    let all = inputs.iter().flatten().copied().collect::<Vec<char>>();
    let mut output = all
        .iter()
        .copied()
        .filter(|label| all.iter().filter(|&other| other == label).count() == 1)
        .collect::<Vec<char>>();
    output.sort_unstable();
    output
}

impl FromStr for LabelExpression {
    type Err = EinsumError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        LabelExpression::parse(expression)
    }
}

impl Display for LabelExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inputs = self
            .inputs
            .iter()
            .map(|group| group.iter().collect::<String>())
            .collect::<Vec<String>>()
            .join(",");
        let output = self.output.iter().collect::<String>();

        write!(f, "{inputs}->{output}")
    }
}

#[cfg(test)]
mod tests {
    use super::LabelExpression;
    use crate::{EinsumError, LabelError};

    fn reason(expression: &str) -> Option<LabelError> {
        match LabelExpression::parse(expression) {
            Err(EinsumError::InvalidLabelExpression { reason, .. }) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn explicit_output() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ijk,il->jkl")?;
        assert_eq!(expression.inputs(), &[vec!['i', 'j', 'k'], vec!['i', 'l']]);
        assert_eq!(expression.output(), &['j', 'k', 'l']);
        assert_eq!(expression.labels(), vec!['i', 'j', 'k', 'l']);
        assert_eq!(expression.summed_labels(), vec!['i']);
        Ok(())
    }

    #[test]
    fn implicit_output_is_sorted_singletons() -> anyhow::Result<()> {
        let expression: LabelExpression = "li,ijk".parse()?;
        assert_eq!(expression.output(), &['j', 'k', 'l']);
        assert_eq!(expression.to_string(), "li,ijk->jkl");

        let trace = LabelExpression::parse("ii")?;
        assert!(trace.output().is_empty());
        Ok(())
    }

    #[test]
    fn implicit_output_sorts_uppercase_first() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("Ij,jk")?;
        assert_eq!(expression.output(), &['I', 'k']);

        let mixed = LabelExpression::parse("iI")?;
        assert_eq!(mixed.output(), &['I', 'i']);
        assert_eq!(mixed.summed_labels(), Vec::<char>::new());
        Ok(())
    }

    #[test]
    fn whitespace_is_ignored() -> anyhow::Result<()> {
        let spaced = LabelExpression::parse(" ijk , il -> jkl ")?;
        assert_eq!(spaced, LabelExpression::parse("ijk,il->jkl")?);
        Ok(())
    }

    #[test]
    fn empty_output_and_scalar_operand() -> anyhow::Result<()> {
        let expression = LabelExpression::parse(",ij->")?;
        assert_eq!(expression.inputs(), &[vec![], vec!['i', 'j']]);
        assert!(expression.output().is_empty());
        Ok(())
    }

    #[test]
    fn malformed_expressions() {
        assert_eq!(reason("ijk,il->jjl"), Some(LabelError::RepeatedOutput('j')));
        assert_eq!(reason("ijk,il->jkm"), Some(LabelError::UnknownOutput('m')));
        assert_eq!(reason("ij->i->j"), Some(LabelError::MultipleArrows));
        assert_eq!(reason("i1,il->l"), Some(LabelError::InvalidCharacter('1')));
        assert_eq!(reason("...ij->ij"), Some(LabelError::InvalidCharacter('.')));
        assert_eq!(reason("ij-ji"), Some(LabelError::InvalidCharacter('-')));
    }

    #[test]
    fn error_keeps_source_text() {
        let err = LabelExpression::parse("ab->cc").unwrap_err();
        assert!(err.to_string().contains("\"ab->cc\""));
    }
}
