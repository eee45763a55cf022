//! Parsing of shell-supplied cell coordinates.

use lane_defence_core::{CellCoord, CommandError};

/// Parses `lane step`, `lane,step`, or either form wrapped in parentheses.
///
/// Range checks against the board happen later, in the colony.
pub(crate) fn parse(input: &str) -> Result<CellCoord, CommandError> {
    let illegal = || CommandError::IllegalLocation(input.to_owned());
    let trimmed = input.trim();
    let inner = match (trimmed.strip_prefix('('), trimmed.ends_with(')')) {
        (Some(rest), true) => rest.strip_suffix(')').ok_or_else(illegal)?,
        (None, false) => trimmed,
        _ => return Err(illegal()),
    };
    if inner.matches(',').count() > 1 {
        return Err(illegal());
    }

    let mut parts = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let (Some(lane), Some(step), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(illegal());
    };
    let lane = lane.parse::<u32>().map_err(|_| illegal())?;
    let step = step.parse::<u32>().map_err(|_| illegal())?;
    Ok(CellCoord::new(lane, step))
}
