use std::time::{Duration, Instant};

use postboard::application::{
    flash::Flash,
    posts::POST_CREATED,
    screen::{FormMode, PostScreen, ScreenRequest, TOAST_TTL, ToastKind},
};
use postboard::domain::{entities::PostRecord, posts::ValidationErrors};
use time::OffsetDateTime;

fn post(id: i64, title: &str, content: Option<&str>) -> PostRecord {
    let now = OffsetDateTime::now_utc();
    PostRecord {
        id,
        title: title.to_string(),
        content: content.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}

fn title_required() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("title", "The title field is required.");
    errors
}

#[test]
fn success_toast_hides_at_deadline_and_not_before() {
    let start = Instant::now();
    let mut screen = PostScreen::new(Vec::new());
    screen.receive_flash(&Flash::success(POST_CREATED), start);

    let toast = screen.toast().expect("toast visible");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, POST_CREATED);

    assert!(!screen.tick(start + Duration::from_millis(2999)));
    assert!(screen.toast().is_some());

    assert!(screen.tick(start + TOAST_TTL));
    assert!(screen.toast().is_none());
    assert!(!screen.tick(start + TOAST_TTL + Duration::from_millis(1)));
}

#[test]
fn new_flash_replaces_toast_and_rearms_deadline() {
    let start = Instant::now();
    let mut screen = PostScreen::new(Vec::new());
    screen.receive_flash(&Flash::success("first"), start);

    let later = start + Duration::from_millis(2000);
    screen.receive_flash(&Flash::success("second"), later);

    assert!(!screen.tick(start + TOAST_TTL));
    assert_eq!(screen.toast().map(|t| t.message.as_str()), Some("second"));
    assert!(screen.tick(later + TOAST_TTL));
}

#[test]
fn error_wins_when_both_flash_keys_are_present() {
    let now = Instant::now();
    let mut screen = PostScreen::new(Vec::new());
    let flash = Flash {
        success: Some("saved".into()),
        error: Some("broken".into()),
    };
    screen.receive_flash(&flash, now);

    let toast = screen.toast().expect("toast visible");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "broken");
}

#[test]
fn receive_page_replaces_listing() {
    let mut screen = PostScreen::new(vec![post(1, "A", None)]);
    screen.receive_page(
        vec![post(1, "A", None), post(2, "B", None)],
        &Flash::default(),
        Instant::now(),
    );

    assert_eq!(screen.posts().len(), 2);
    assert_eq!(screen.find_post(2).map(|p| p.title.as_str()), Some("B"));
    assert!(screen.toast().is_none());
}

#[test]
fn create_flow_submits_once_until_outcome_arrives() {
    let mut screen = PostScreen::new(Vec::new());
    screen.open_create();
    screen.set_title("Hello");
    screen.set_content("World");

    assert_eq!(screen.form_mode(), FormMode::Create);
    assert_eq!(
        screen.submit(),
        Some(ScreenRequest::Create {
            title: "Hello".into(),
            content: "World".into(),
        })
    );
    assert!(screen.is_submitting());
    assert_eq!(screen.submit(), None);

    screen.submit_succeeded();
    assert!(!screen.is_dialog_open());
    assert!(!screen.is_submitting());
    assert_eq!(screen.form().title, "");
    assert_eq!(screen.form().content, "");
}

#[test]
fn edit_prefills_buffer_and_targets_post() {
    let target = post(4, "Old", None);
    let mut screen = PostScreen::new(vec![target.clone()]);
    screen.open_edit(target);

    assert_eq!(screen.form_mode(), FormMode::Edit);
    assert_eq!(screen.form().title, "Old");
    assert_eq!(screen.form().content, "");

    screen.set_title("New");
    assert_eq!(
        screen.submit(),
        Some(ScreenRequest::Update {
            id: 4,
            title: "New".into(),
            content: String::new(),
        })
    );

    screen.submit_succeeded();
    assert!(screen.editing().is_none());
}

#[test]
fn open_create_after_edit_clears_target_and_buffer() {
    let target = post(4, "Old", Some("body"));
    let mut screen = PostScreen::new(vec![target.clone()]);
    screen.open_edit(target);
    screen.close_dialog();
    screen.open_create();

    assert!(screen.editing().is_none());
    assert_eq!(screen.form().title, "");
    assert!(screen.is_dialog_open());
}

#[test]
fn failed_submit_keeps_dialog_buffer_and_errors() {
    let now = Instant::now();
    let target = post(2, "Keep", None);
    let mut screen = PostScreen::new(vec![target.clone()]);
    screen.open_edit(target);
    screen.set_title("");
    screen.submit().expect("request issued");
    screen.submit_failed(title_required(), now);

    assert!(screen.is_dialog_open());
    assert!(!screen.is_submitting());
    assert_eq!(screen.form().title, "");
    assert_eq!(
        screen.field_errors().first("title"),
        Some("The title field is required.")
    );
    let toast = screen.toast().expect("error toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to update post");
}

#[test]
fn failed_create_uses_create_message() {
    let now = Instant::now();
    let mut screen = PostScreen::new(Vec::new());
    screen.open_create();
    screen.submit().expect("request issued");
    screen.submit_failed(title_required(), now);

    assert_eq!(
        screen.toast().map(|t| t.message.as_str()),
        Some("Failed to create post")
    );
}

#[test]
fn delete_flow() {
    let target = post(9, "Gone", None);
    let mut screen = PostScreen::new(vec![target.clone()]);

    assert_eq!(screen.confirm_delete(), None);

    screen.request_delete(target);
    assert!(screen.is_delete_dialog_open());
    assert_eq!(screen.confirm_delete(), Some(ScreenRequest::Delete { id: 9 }));
    assert_eq!(screen.confirm_delete(), None);

    screen.delete_succeeded();
    assert!(!screen.is_delete_dialog_open());
    assert!(screen.deleting().is_none());
    assert!(!screen.is_submitting());
}

#[test]
fn failed_delete_keeps_dialog_and_shows_error() {
    let now = Instant::now();
    let target = post(9, "Stuck", None);
    let mut screen = PostScreen::new(vec![target.clone()]);
    screen.request_delete(target);
    screen.confirm_delete().expect("request issued");
    screen.delete_failed(now);

    assert!(screen.is_delete_dialog_open());
    assert_eq!(screen.deleting().map(|p| p.id), Some(9));
    assert_eq!(
        screen.toast().map(|t| t.message.as_str()),
        Some("Failed to delete post")
    );
    assert_eq!(screen.confirm_delete(), Some(ScreenRequest::Delete { id: 9 }));
}

#[test]
fn cancel_delete_has_no_side_effects() {
    let target = post(3, "Stay", None);
    let mut screen = PostScreen::new(vec![target.clone()]);
    screen.request_delete(target);
    screen.cancel_delete();

    assert!(!screen.is_delete_dialog_open());
    assert!(screen.toast().is_none());
    assert_eq!(screen.posts().len(), 1);
    assert_eq!(screen.confirm_delete(), None);
}
