//! The order status state machine.
//!
//! Forward flow: `draft -> ordered -> shipping -> paid -> completed`.
//! No transition skips a state and none moves backward. `cancelled` is
//! reachable from any non-terminal state; `completed` and `cancelled`
//! are terminal.

use appejv_core::error::AppejvError;
use appejv_core::models::order::OrderStatus;

/// The next forward status, if any.
pub fn next_status(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::Draft => Some(OrderStatus::Ordered),
        OrderStatus::Ordered => Some(OrderStatus::Shipping),
        OrderStatus::Shipping => Some(OrderStatus::Paid),
        OrderStatus::Paid => Some(OrderStatus::Completed),
        OrderStatus::Completed | OrderStatus::Cancelled => None,
    }
}

/// Is `from -> to` a legal edge?
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    if to == OrderStatus::Cancelled {
        return !from.is_terminal();
    }
    next_status(from) == Some(to)
}

/// Validate an edge, producing the error callers propagate.
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppejvError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(AppejvError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn forward_chain_is_legal() {
        assert!(can_transition(Draft, Ordered));
        assert!(can_transition(Ordered, Shipping));
        assert!(can_transition(Shipping, Paid));
        assert!(can_transition(Paid, Completed));
    }

    #[test]
    fn skipping_a_state_is_illegal() {
        assert!(!can_transition(Draft, Shipping));
        assert!(!can_transition(Draft, Paid));
        assert!(!can_transition(Draft, Completed));
        assert!(!can_transition(Ordered, Paid));
        assert!(!can_transition(Shipping, Completed));
    }

    #[test]
    fn moving_backward_is_illegal() {
        assert!(!can_transition(Ordered, Draft));
        assert!(!can_transition(Shipping, Ordered));
        assert!(!can_transition(Paid, Shipping));
        assert!(!can_transition(Completed, Paid));
    }

    #[test]
    fn self_transition_is_illegal() {
        for status in OrderStatus::ALL {
            assert!(!can_transition(status, status), "{status} -> {status}");
        }
    }

    #[test]
    fn cancel_is_legal_from_any_non_terminal_state() {
        assert!(can_transition(Draft, Cancelled));
        assert!(can_transition(Ordered, Cancelled));
        assert!(can_transition(Shipping, Cancelled));
        assert!(can_transition(Paid, Cancelled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in OrderStatus::ALL {
            assert!(!can_transition(Completed, to), "completed -> {to}");
            assert!(!can_transition(Cancelled, to), "cancelled -> {to}");
        }
    }

    #[test]
    fn check_transition_reports_the_edge() {
        let err = check_transition(Draft, Shipping).unwrap_err();
        match err {
            AppejvError::InvalidTransition { from, to } => {
                assert_eq!(from, Draft);
                assert_eq!(to, Shipping);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }
}
