//! Booking lifecycle rules
//!
//! The whole state machine lives in one transition table:
//!
//! | Role | Action | From | To |
//! |------|--------|------|----|
//! | Owner | ACCEPT | PENDIENTE | CONFIRMADA |
//! | Owner | REJECT | PENDIENTE | RECHAZADA |
//! | Owner | FINISH | CONFIRMADA | FINALIZADA |
//! | Client | CANCEL | PENDIENTE | CANCELADA_CLIENTE |
//! | Client | CANCEL | CONFIRMADA | CANCELADA_CLIENTE |
//!
//! Anything not in the table is an invalid transition. RECHAZADA, FINALIZADA
//! and CANCELADA_CLIENTE are terminal.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Booking, BookingAction, BookingStatus, RejectReason};

use crate::auth::CurrentUser;

/// What a user is allowed to do with a particular booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Acts for the establishment (accept, reject, finish)
    Owner,
    /// Acts for the requesting client (cancel)
    Client,
}

/// Resolve the caller's side of a booking.
///
/// Owning an establishment is not enough: the booking must belong to it.
/// Returns None for users who are not party to the booking at all.
pub fn capability(user: &CurrentUser, booking: &Booking) -> Option<Capability> {
    if user.is_owner() && user.id == booking.establishment_id {
        return Some(Capability::Owner);
    }
    if user.id == booking.client_id {
        return Some(Capability::Client);
    }
    None
}

struct Transition {
    role: Capability,
    action: BookingAction,
    from: BookingStatus,
    to: BookingStatus,
}

const TRANSITIONS: &[Transition] = &[
    Transition {
        role: Capability::Owner,
        action: BookingAction::Accept,
        from: BookingStatus::Pendiente,
        to: BookingStatus::Confirmada,
    },
    Transition {
        role: Capability::Owner,
        action: BookingAction::Reject,
        from: BookingStatus::Pendiente,
        to: BookingStatus::Rechazada,
    },
    Transition {
        role: Capability::Owner,
        action: BookingAction::Finish,
        from: BookingStatus::Confirmada,
        to: BookingStatus::Finalizada,
    },
    Transition {
        role: Capability::Client,
        action: BookingAction::Cancel,
        from: BookingStatus::Pendiente,
        to: BookingStatus::CanceladaCliente,
    },
    Transition {
        role: Capability::Client,
        action: BookingAction::Cancel,
        from: BookingStatus::Confirmada,
        to: BookingStatus::CanceladaCliente,
    },
];

/// Look up the target status for (role, action, current status).
///
/// None means the combination is not allowed, regardless of why.
pub fn resolve_transition(
    role: Capability,
    action: BookingAction,
    from: BookingStatus,
) -> Option<BookingStatus> {
    TRANSITIONS
        .iter()
        .find(|t| t.role == role && t.action == action && t.from == from)
        .map(|t| t.to)
}

/// Validate REJECT metadata before anything is written.
///
/// A reason is always required; OTRO additionally requires a non-empty note.
/// Whitespace-only notes are treated as absent.
pub fn validate_reject_fields(
    reason: Option<RejectReason>,
    note: Option<&str>,
) -> AppResult<(RejectReason, Option<String>)> {
    let reason = reason.ok_or_else(|| AppError::new(ErrorCode::RejectReasonRequired))?;
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    if reason == RejectReason::Otro && note.is_none() {
        return Err(AppError::new(ErrorCode::RejectNoteRequired));
    }

    Ok((reason, note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;

    fn current(id: i64, role: UserRole) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{id}"),
            display_name: format!("User {id}"),
            role,
        }
    }

    fn booking(establishment_id: i64, client_id: i64, status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            establishment_id,
            client_id,
            room_id: None,
            status,
            duration_type: shared::models::DurationType::Night,
            price_clp: 30_000,
            start_at: None,
            note: None,
            reject_reason: None,
            reject_note: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn owner_capability_requires_matching_establishment() {
        let b = booking(10, 20, BookingStatus::Pendiente);

        assert_eq!(
            capability(&current(10, UserRole::Owner), &b),
            Some(Capability::Owner)
        );
        // A different establishment owner is a stranger here
        assert_eq!(capability(&current(11, UserRole::Owner), &b), None);
        assert_eq!(
            capability(&current(20, UserRole::Client), &b),
            Some(Capability::Client)
        );
        assert_eq!(capability(&current(21, UserRole::Client), &b), None);
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use BookingAction::*;
        use BookingStatus::*;
        use Capability::*;

        assert_eq!(resolve_transition(Owner, Accept, Pendiente), Some(Confirmada));
        assert_eq!(resolve_transition(Owner, Reject, Pendiente), Some(Rechazada));
        assert_eq!(resolve_transition(Owner, Finish, Confirmada), Some(Finalizada));
        assert_eq!(
            resolve_transition(Client, Cancel, Pendiente),
            Some(CanceladaCliente)
        );
        assert_eq!(
            resolve_transition(Client, Cancel, Confirmada),
            Some(CanceladaCliente)
        );

        // Wrong role
        assert_eq!(resolve_transition(Client, Accept, Pendiente), None);
        assert_eq!(resolve_transition(Client, Reject, Pendiente), None);
        assert_eq!(resolve_transition(Client, Finish, Confirmada), None);
        assert_eq!(resolve_transition(Owner, Cancel, Pendiente), None);

        // Wrong source status
        assert_eq!(resolve_transition(Owner, Accept, Confirmada), None);
        assert_eq!(resolve_transition(Owner, Finish, Pendiente), None);

        // Terminal states accept nothing
        for terminal in [Rechazada, Finalizada, CanceladaCliente] {
            for action in [Accept, Reject, Finish] {
                assert_eq!(resolve_transition(Owner, action, terminal), None);
            }
            assert_eq!(resolve_transition(Client, Cancel, terminal), None);
        }
    }

    #[test]
    fn reject_requires_reason() {
        let err = validate_reject_fields(None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::RejectReasonRequired);
    }

    #[test]
    fn reject_otro_requires_note() {
        let err = validate_reject_fields(Some(RejectReason::Otro), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::RejectNoteRequired);

        // Whitespace does not count as a note
        let err = validate_reject_fields(Some(RejectReason::Otro), Some("   ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::RejectNoteRequired);

        let (reason, note) =
            validate_reject_fields(Some(RejectReason::Otro), Some(" sin aseo ")).unwrap();
        assert_eq!(reason, RejectReason::Otro);
        assert_eq!(note.as_deref(), Some("sin aseo"));
    }

    #[test]
    fn reject_fixed_reasons_keep_optional_note() {
        let (reason, note) = validate_reject_fields(Some(RejectReason::Cerrado), None).unwrap();
        assert_eq!(reason, RejectReason::Cerrado);
        assert_eq!(note, None);

        let (reason, note) =
            validate_reject_fields(Some(RejectReason::SinHabitaciones), Some("todo lleno"))
                .unwrap();
        assert_eq!(reason, RejectReason::SinHabitaciones);
        assert_eq!(note.as_deref(), Some("todo lleno"));
    }
}
