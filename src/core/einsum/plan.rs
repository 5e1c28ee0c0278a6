use crate::core::{
    einsum::LabelExpression,
    errors::{EinsumError, LabelError},
};

/// A label expression bound to concrete operand sizes.
///
/// Every label receives exactly one extent. Building the plan is where
/// operand count, operand rank and shared extents are checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractionPlan {
    inputs: Vec<Vec<char>>,
    output_labels: Vec<char>,
    output_sizes: Vec<usize>,
    summed_labels: Vec<char>,
    summed_sizes: Vec<usize>,
    extents: Vec<(char, usize)>,
}

impl ContractionPlan {
    pub fn new(
        expression: &LabelExpression,
        operand_sizes: &[&[usize]],
    ) -> Result<ContractionPlan, EinsumError> {
        let invalid = |reason| EinsumError::InvalidLabelExpression {
            expression: expression.to_string(),
            reason,
        };

        let groups = expression.inputs().len();
        let operands = operand_sizes.len();
        if groups != operands {
            return Err(invalid(LabelError::OperandCount { groups, operands }));
        }

        let mut extents: Vec<(char, usize)> = Vec::new();
        for (operand, (labels, sizes)) in expression.inputs().iter().zip(operand_sizes).enumerate()
        {
            if labels.len() != sizes.len() {
                return Err(invalid(LabelError::RankMismatch {
                    operand,
                    labels: labels.len(),
                    rank: sizes.len(),
                }));
            }

            for (&label, &size) in labels.iter().zip(sizes.iter()) {
                match extents.iter().find(|(known, _)| *known == label) {
                    Some(&(_, expected)) if expected != size => {
                        return Err(EinsumError::ShapeMismatch {
                            label,
                            expected,
                            found: size,
                        });
                    }
                    Some(_) => {}
                    None => extents.push((label, size)),
                }
            }
        }

        let extent_of = |label: &char| {
            extents
                .iter()
                .find(|(known, _)| known == label)
                .map_or(0, |&(_, size)| size)
        };

        let output_labels = expression.output().to_vec();
        let output_sizes = output_labels.iter().map(extent_of).collect();
        let summed_labels = expression.summed_labels();
        let summed_sizes = summed_labels.iter().map(extent_of).collect();

        Ok(ContractionPlan {
            inputs: expression.inputs().to_vec(),
            output_labels,
            output_sizes,
            summed_labels,
            summed_sizes,
            extents,
        })
    }

    pub fn output_labels(&self) -> &[char] {
        &self.output_labels
    }

    pub fn output_sizes(&self) -> &[usize] {
        &self.output_sizes
    }

    pub fn summed_labels(&self) -> &[char] {
        &self.summed_labels
    }

    pub fn summed_sizes(&self) -> &[usize] {
        &self.summed_sizes
    }

    pub fn extent(&self, label: char) -> Option<usize> {
        self.extents
            .iter()
            .find(|&&(known, _)| known == label)
            .map(|&(_, size)| size)
    }

    /// Number of multiply-accumulate steps the contraction performs.
    pub fn cost(&self) -> usize {
        let output: usize = self.output_sizes.iter().product();
        let summed: usize = self.summed_sizes.iter().product();
        output * summed * self.inputs.len().saturating_sub(1).max(1)
    }

    /// Folds an operand's axis strides onto the output and summed labels.
    ///
    /// An axis contributes its stride to the position of its label, so a
    /// label repeated within one operand walks that operand's diagonal.
    pub(crate) fn operand_strides(
        &self,
        operand: usize,
        strides: &[usize],
    ) -> (Vec<usize>, Vec<usize>) {
        let mut output_strides = vec![0; self.output_labels.len()];
        let mut summed_strides = vec![0; self.summed_labels.len()];

        for (label, &stride) in self.inputs[operand].iter().zip(strides) {
            if let Some(position) = self.output_labels.iter().position(|l| l == label) {
                output_strides[position] += stride;
            } else if let Some(position) = self.summed_labels.iter().position(|l| l == label) {
                summed_strides[position] += stride;
            }
        }

        (output_strides, summed_strides)
    }
}

#[cfg(test)]
mod tests {
    use super::ContractionPlan;
    use crate::{EinsumError, LabelError, LabelExpression};

    #[test]
    fn binds_extents() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ijk,il->jkl")?;
        let plan = ContractionPlan::new(&expression, &[&[2, 4, 3], &[2, 5]])?;

        assert_eq!(plan.output_labels(), &['j', 'k', 'l']);
        assert_eq!(plan.output_sizes(), &[4, 3, 5]);
        assert_eq!(plan.summed_labels(), &['i']);
        assert_eq!(plan.summed_sizes(), &[2]);
        assert_eq!(plan.extent('l'), Some(5));
        assert_eq!(plan.extent('z'), None);
        assert_eq!(plan.cost(), 120);
        Ok(())
    }

    #[test]
    fn shared_label_extent_mismatch() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ijk,jl->ikl")?;
        let err = ContractionPlan::new(&expression, &[&[2, 4, 3], &[2, 5]]).unwrap_err();

        assert_eq!(
            err,
            EinsumError::ShapeMismatch {
                label: 'j',
                expected: 4,
                found: 2
            }
        );
        Ok(())
    }

    #[test]
    fn rank_and_count_mismatch() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ij,il->jl")?;

        match ContractionPlan::new(&expression, &[&[2, 4, 3], &[2, 5]]) {
            Err(EinsumError::InvalidLabelExpression { reason, .. }) => assert_eq!(
                reason,
                LabelError::RankMismatch {
                    operand: 0,
                    labels: 2,
                    rank: 3
                }
            ),
            other => panic!("expected a rank mismatch, got {other:?}"),
        }

        match ContractionPlan::new(&expression, &[&[2, 4]]) {
            Err(EinsumError::InvalidLabelExpression { reason, .. }) => assert_eq!(
                reason,
                LabelError::OperandCount {
                    groups: 2,
                    operands: 1
                }
            ),
            other => panic!("expected an operand count mismatch, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn diagonal_strides_accumulate() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ii->i")?;
        let plan = ContractionPlan::new(&expression, &[&[3, 3]])?;

        assert_eq!(plan.operand_strides(0, &[3, 1]), (vec![4], vec![]));
        Ok(())
    }

    #[test]
    fn diagonal_needs_square_axes() -> anyhow::Result<()> {
        let expression = LabelExpression::parse("ii->")?;
        assert!(matches!(
            ContractionPlan::new(&expression, &[&[2, 3]]),
            Err(EinsumError::ShapeMismatch { label: 'i', .. })
        ));
        Ok(())
    }
}
