//! Flat moderation state machine.
//!
//! ```text
//! created -> on_moderation -> approved
//!                          -> declined
//! ```

use estate_database::FlatStatus;

use crate::types::{ListingError, ListingResult};

pub fn can_transition(from: FlatStatus, to: FlatStatus) -> bool {
    matches!(
        (from, to),
        (FlatStatus::Created, FlatStatus::OnModeration)
            | (FlatStatus::OnModeration, FlatStatus::Approved)
            | (FlatStatus::OnModeration, FlatStatus::Declined)
    )
}

pub fn check_transition(from: FlatStatus, to: FlatStatus) -> ListingResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(ListingError::invalid_transition(from.as_str(), to.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_adjacent_forward_moves_are_allowed() {
        let allowed: Vec<(FlatStatus, FlatStatus)> = FlatStatus::ALL
            .into_iter()
            .flat_map(|from| FlatStatus::ALL.into_iter().map(move |to| (from, to)))
            .filter(|(from, to)| can_transition(*from, *to))
            .collect();

        assert_eq!(
            allowed,
            vec![
                (FlatStatus::Created, FlatStatus::OnModeration),
                (FlatStatus::OnModeration, FlatStatus::Approved),
                (FlatStatus::OnModeration, FlatStatus::Declined),
            ]
        );
    }

    #[test]
    fn test_rejection_names_both_states() {
        let err = check_transition(FlatStatus::Created, FlatStatus::Approved).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition: created -> approved"
        );
    }
}
