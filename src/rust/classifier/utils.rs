use super::error::ClassifierError;

/// Checks a concrete tensor shape against the input dims a model declares.
///
/// Negative (dynamic) dims match any size. An empty declaration means the
/// model did not publish a shape, so anything is accepted.
pub fn check_input_shape(declared: &[i64], shape: &[usize]) -> Result<(), ClassifierError> {
    if declared.is_empty() {
        return Ok(());
    }
    let matches = declared.len() == shape.len()
        && declared
            .iter()
            .zip(shape)
            .all(|(&want, &got)| want < 0 || usize::try_from(want) == Ok(got));
    if matches {
        Ok(())
    } else {
        Err(ClassifierError::InferenceError(format!(
            "Input tensor shape {:?} does not match model input {:?}",
            shape, declared
        )))
    }
}

/// Index of the largest value, preferring the lowest index on ties.
///
/// `NaN` entries never win; an empty or all-`NaN` slice yields `None`.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
