use collab_core::{respond, respond_batch, Answer, Invitation, InvitationStatus, LifecycleError};
use std::collections::HashMap;
use uuid::Uuid;

fn invitation_with(status: InvitationStatus) -> Invitation {
    let mut invitation = Invitation::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    invitation.status = status;
    invitation
}

#[test]
fn waiting_invitation_accepts_and_refuses() {
    let waiting = invitation_with(InvitationStatus::Waiting);

    let accepted = respond(&waiting, Answer::Accept).unwrap();
    assert_eq!(accepted.status, InvitationStatus::Accepted);
    assert_eq!(accepted.id, waiting.id);

    let refused = respond(&waiting, Answer::Refuse).unwrap();
    assert_eq!(refused.status, InvitationStatus::Refused);

    assert_eq!(waiting.status, InvitationStatus::Waiting);
}

#[test]
fn respond_preserves_other_fields() {
    let mut waiting = invitation_with(InvitationStatus::Waiting);
    waiting.mark_read();

    let accepted = respond(&waiting, Answer::Accept).unwrap();
    assert!(accepted.is_read);
    assert_eq!(accepted.project_id, waiting.project_id);
    assert_eq!(accepted.inviter_id, waiting.inviter_id);
    assert_eq!(accepted.invitee_id, waiting.invitee_id);
}

#[test]
fn terminal_invitations_reject_any_answer() {
    for status in [InvitationStatus::Accepted, InvitationStatus::Refused] {
        let answered = invitation_with(status);
        let before = answered.clone();

        for answer in [Answer::Accept, Answer::Refuse] {
            let err = respond(&answered, answer).unwrap_err();
            assert_eq!(
                err,
                LifecycleError::InvalidTransition {
                    invitation_id: answered.id,
                    status,
                }
            );
        }

        assert_eq!(answered, before);
    }
}

#[test]
fn batch_isolates_failures_and_keeps_input_order() {
    let first = invitation_with(InvitationStatus::Waiting);
    let legacy = invitation_with(InvitationStatus::Accepted);
    let second = invitation_with(InvitationStatus::Waiting);
    let untouched = invitation_with(InvitationStatus::Waiting);
    let invitations = vec![
        first.clone(),
        legacy.clone(),
        second.clone(),
        untouched.clone(),
    ];

    let answers = HashMap::from([
        (second.id, Answer::Refuse),
        (legacy.id, Answer::Refuse),
        (first.id, Answer::Accept),
    ]);

    let result = respond_batch(&invitations, &answers);

    let succeeded: Vec<_> = result
        .succeeded
        .iter()
        .map(|invitation| (invitation.id, invitation.status))
        .collect();
    assert_eq!(
        succeeded,
        vec![
            (first.id, InvitationStatus::Accepted),
            (second.id, InvitationStatus::Refused),
        ]
    );

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].0, legacy.id);
    assert!(matches!(
        result.failures[0].1,
        LifecycleError::InvalidTransition { .. }
    ));
    assert!(!result.is_complete_success());
}

#[test]
fn batch_reports_answers_for_unknown_invitations() {
    let waiting = invitation_with(InvitationStatus::Waiting);
    let ghost_a = Uuid::new_v4();
    let ghost_b = Uuid::new_v4();
    let answers = HashMap::from([
        (ghost_b, Answer::Accept),
        (waiting.id, Answer::Accept),
        (ghost_a, Answer::Refuse),
    ]);

    let result = respond_batch(std::slice::from_ref(&waiting), &answers);

    assert_eq!(result.succeeded.len(), 1);
    let mut expected = vec![ghost_a, ghost_b];
    expected.sort();
    let failed: Vec<_> = result.failures.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, expected);
    assert!(result
        .failures
        .iter()
        .all(|(id, err)| *err == LifecycleError::UnknownInvitation(*id)));
}

#[test]
fn empty_answer_map_changes_nothing() {
    let invitations = vec![
        invitation_with(InvitationStatus::Waiting),
        invitation_with(InvitationStatus::Refused),
    ];

    let result = respond_batch(&invitations, &HashMap::new());
    assert!(result.succeeded.is_empty());
    assert!(result.is_complete_success());
}
