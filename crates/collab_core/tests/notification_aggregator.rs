use collab_core::{
    build_display_model, compute_close_mutations, format_invitation_row, format_timestamp,
    group_by_answer, AnswerLabel, Invitation, InvitationEntry, InvitationStatus,
    NotificationGroups, Project, StatusColor, Task, User,
};
use uuid::Uuid;

fn invitation(status: InvitationStatus, is_read: bool) -> Invitation {
    let mut invitation = Invitation::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    invitation.status = status;
    invitation.is_read = is_read;
    invitation
}

fn entry(username: &str, title: &str, status: InvitationStatus) -> InvitationEntry {
    let inviter = User::new(username, format!("{username}@example.org"), "", "");
    let project = Project::new(title, inviter.id);
    let mut invitation = Invitation::new(project.id, inviter.id, Uuid::new_v4());
    invitation.status = status;
    InvitationEntry {
        invitation,
        project,
        inviter,
    }
}

#[test]
fn grouping_is_a_stable_partition() {
    let items = vec![
        invitation(InvitationStatus::Waiting, false),
        invitation(InvitationStatus::Accepted, false),
        invitation(InvitationStatus::Refused, true),
        invitation(InvitationStatus::Accepted, true),
        invitation(InvitationStatus::Waiting, true),
        invitation(InvitationStatus::Accepted, false),
    ];

    let groups = group_by_answer(items.clone());
    assert_eq!(groups.len(), items.len());

    assert_eq!(
        groups.accepted,
        vec![items[1].clone(), items[3].clone(), items[5].clone()]
    );
    assert_eq!(groups.refused, vec![items[2].clone()]);
    assert_eq!(groups.waiting, vec![items[0].clone(), items[4].clone()]);
}

#[test]
fn grouping_borrowed_items_does_not_take_ownership() {
    let items = vec![
        invitation(InvitationStatus::Refused, false),
        invitation(InvitationStatus::Waiting, false),
    ];

    let groups = group_by_answer(items.iter());
    assert_eq!(groups.refused[0].id, items[0].id);
    assert_eq!(groups.waiting[0].id, items[1].id);
}

#[test]
fn empty_input_yields_empty_groups() {
    let groups = group_by_answer(Vec::<Invitation>::new());
    assert!(groups.is_empty());
    assert!(compute_close_mutations(&groups).is_empty());
}

#[test]
fn row_carries_username_label_and_title() {
    let item = entry("grace", "Compiler", InvitationStatus::Refused);

    let row = format_invitation_row(&item.invitation, &item.project, &item.inviter);
    assert_eq!(row.invitation_id, item.invitation.id);
    assert_eq!(row.inviter_username, "grace");
    assert_eq!(row.project_title, "Compiler");
    assert_eq!(row.answer.color, StatusColor::Red);
}

#[test]
fn labels_are_fixed_per_status() {
    let accepted = AnswerLabel::for_status(InvitationStatus::Accepted);
    let refused = AnswerLabel::for_status(InvitationStatus::Refused);
    let waiting = AnswerLabel::for_status(InvitationStatus::Waiting);

    assert_eq!(accepted.color, StatusColor::Green);
    assert_eq!(refused.color, StatusColor::Red);
    assert_eq!(waiting.color, StatusColor::Grey);
    assert_ne!(accepted.text, refused.text);
    assert_ne!(accepted.text, waiting.text);
    assert_ne!(refused.text, waiting.text);
}

#[test]
fn close_plan_scenario_deletes_refused_and_marks_unread_accepted() {
    let accepted = invitation(InvitationStatus::Accepted, false);
    let refused = invitation(InvitationStatus::Refused, false);
    let waiting = invitation(InvitationStatus::Waiting, true);

    let groups = group_by_answer(vec![accepted.clone(), refused.clone(), waiting.clone()]);
    let plan = compute_close_mutations(&groups);

    assert_eq!(plan.delete, vec![refused.id]);
    assert_eq!(plan.mark_read, vec![accepted.id]);
    assert!(!plan.delete.contains(&waiting.id));
    assert!(!plan.mark_read.contains(&waiting.id));
}

#[test]
fn close_plan_covers_every_status_and_read_combination() {
    let items = vec![
        invitation(InvitationStatus::Accepted, false),
        invitation(InvitationStatus::Accepted, true),
        invitation(InvitationStatus::Refused, false),
        invitation(InvitationStatus::Refused, true),
        invitation(InvitationStatus::Waiting, false),
        invitation(InvitationStatus::Waiting, true),
    ];

    let plan = compute_close_mutations(&group_by_answer(items.iter()));

    for item in &items {
        let deleted = plan.delete.contains(&item.id);
        let marked = plan.mark_read.contains(&item.id);
        match (item.status, item.is_read) {
            (InvitationStatus::Refused, _) => assert!(deleted && !marked),
            (_, false) => assert!(marked && !deleted),
            (_, true) => assert!(!marked && !deleted),
        }
    }
    assert_eq!(plan.delete.len(), 2);
    assert_eq!(plan.mark_read.len(), 2);
}

#[test]
fn close_plan_trusts_status_over_group_membership() {
    let refused = invitation(InvitationStatus::Refused, false);
    let groups = NotificationGroups {
        accepted: vec![refused.clone()],
        refused: Vec::new(),
        waiting: Vec::new(),
    };

    let plan = compute_close_mutations(&groups);
    assert_eq!(plan.delete, vec![refused.id]);
    assert!(plan.mark_read.is_empty());
}

#[test]
fn display_model_groups_rows_and_selects_deadlines() {
    let now = 1_700_000_000_000;
    let hour = 3_600_000;
    let entries = vec![
        entry("ada", "Engine", InvitationStatus::Waiting),
        entry("bob", "Loom", InvitationStatus::Accepted),
        entry("cy", "Mill", InvitationStatus::Waiting),
    ];
    let project_id = entries[0].project.id;
    let soon = Task::new("ship", project_id, now + hour);
    let later = Task::new("plan", project_id, now + 48 * hour);
    let overdue = Task::new("late", project_id, now - hour);

    let model = build_display_model(entries, &[later, overdue, soon.clone()], now, 24 * hour);

    let waiting: Vec<_> = model
        .waiting
        .iter()
        .map(|row| row.inviter_username.as_str())
        .collect();
    assert_eq!(waiting, vec!["ada", "cy"]);
    assert_eq!(model.accepted.len(), 1);
    assert!(model.refused.is_empty());

    assert_eq!(model.deadlines.len(), 1);
    assert_eq!(model.deadlines[0].task, soon);
    assert_eq!(model.deadlines[0].end_date, format_timestamp(soon.end_date));
    assert_eq!(model.deadlines[0].remaining, "01h00min");
}
