//! Comment Access Scenarios
//!
//! Placeholder rendering, strict-mode rejections, unlock semantics, and
//! comment audiences under bans.

use std::collections::HashSet;

use visibility_engine::application::services::AccessOptions;
use visibility_engine::domain::value_objects::HideType;
use visibility_engine::shared::error::AppError;

use crate::common::{visibility, TestWorld};

/// A comment by a banned user renders as an anonymous placeholder
#[tokio::test]
async fn test_comment_by_banned_author_renders_placeholder() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, mars);

    world.ban(venus, mars);

    let service = visibility(&world);
    let view = service
        .comment_access(comment, Some(venus), &AccessOptions::default())
        .await
        .unwrap();

    assert_eq!(view.hide_type, HideType::HiddenAuthorBanned);
    assert_eq!(view.body, "Hidden comment");
    assert_eq!(view.created_by, None);
    assert_eq!(view.id, comment);
}

/// Strict mode rejects the same comment with the reason's message
#[tokio::test]
async fn test_strict_mode_rejects_banned_comment_author() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, mars);

    world.ban(venus, mars);

    let service = visibility(&world);
    let err = service
        .comment_access(comment, Some(venus), &AccessOptions::strict())
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::Forbidden(msg) if msg == "You have banned the author of this comment")
    );
}

/// `unlock_banned_comments` reveals comments the viewer banned away, but
/// never comments whose author banned the viewer
#[tokio::test]
async fn test_unlock_reveals_own_bans_only() {
    let world = TestWorld::new();
    let jupiter = world.add_user("jupiter");
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let post = world.publish(jupiter, &[world.posts_feed(jupiter)]);
    let mars_comment = world.comment(post, mars);
    let luna_comment = world.comment(post, luna);

    world.ban(venus, mars); // venus banned mars
    world.ban(luna, venus); // luna banned venus

    let options = AccessOptions {
        unlock_banned_comments: true,
        ..AccessOptions::default()
    };

    let service = visibility(&world);
    let view = service
        .comment_access(mars_comment, Some(venus), &options)
        .await
        .unwrap();
    assert_eq!(view.hide_type, HideType::Visible);
    assert_eq!(view.created_by, Some(mars));

    let view = service
        .comment_access(luna_comment, Some(venus), &options)
        .await
        .unwrap();
    assert_eq!(view.hide_type, HideType::HiddenViewerBanned);
    assert_eq!(view.created_by, None);
}

/// The post author sees every comment on their own post, even from users
/// who banned them
#[tokio::test]
async fn test_post_author_sees_comments_from_users_who_banned_them() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, mars);

    world.ban(mars, luna);

    let service = visibility(&world);
    let view = service
        .comment_access(comment, Some(luna), &AccessOptions::default())
        .await
        .unwrap();
    assert_eq!(view.hide_type, HideType::Visible);
    assert_eq!(view.created_by, Some(mars));
}

/// A comment of an invisible post fails as the post's failure
#[tokio::test]
async fn test_comment_on_invisible_post_is_forbidden() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let venus = world.add_user("venus");
    world.go_private(luna);
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, luna);

    let service = visibility(&world);
    let err = service
        .comment_access(comment, Some(venus), &AccessOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(msg) if msg == "You cannot see this post"));
}

/// A viewer preference hides comments carrying a matching stored hide type
#[tokio::test]
async fn test_stored_hide_type_preference() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let venus = world.add_user("venus");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, luna);
    world.set_hide_type(comment, HideType::HiddenViewerBanned);

    let service = visibility(&world);

    // No preference: the stored type alone hides nothing
    let view = service
        .comment_access(comment, Some(venus), &AccessOptions::default())
        .await
        .unwrap();
    assert_eq!(view.hide_type, HideType::Visible);

    let options = AccessOptions {
        hide_comments_of_types: HashSet::from([HideType::HiddenViewerBanned]),
        ..AccessOptions::default()
    };
    let view = service
        .comment_access(comment, Some(venus), &options)
        .await
        .unwrap();
    assert_eq!(view.hide_type, HideType::HiddenViewerBanned);
    assert_eq!(view.body, "Hidden comment");
}

/// Strict mode refuses comments carrying a stored hidden type
#[tokio::test]
async fn test_strict_mode_refuses_stored_hidden_comment() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let venus = world.add_user("venus");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, luna);
    world.set_hide_type(comment, HideType::HiddenAuthorBanned);

    let service = visibility(&world);
    let err = service
        .comment_access(comment, Some(venus), &AccessOptions::strict())
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::Forbidden(msg) if msg == "You don't have access to this comment")
    );
}

/// Unknown ids resolve to not-found, comment first
#[tokio::test]
async fn test_missing_comment_is_not_found() {
    let world = TestWorld::new();
    let service = visibility(&world);

    let err = service
        .comment_access(uuid::Uuid::new_v4(), None, &AccessOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Can't find comment"));
}

/// The comment audience keeps the post author even when the commenter
/// banned them, and drops everyone else the commenter is ban-related to
#[tokio::test]
async fn test_comment_audience_keeps_post_author() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let jupiter = world.add_user("jupiter");
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    world.ban(mars, luna); // commenter banned the post author
    world.ban(mars, venus); // and a bystander

    let service = visibility(&world);
    let audience = service.audience_of_comment(post, mars).await.unwrap();

    assert!(audience.contains(&luna));
    assert!(audience.contains(&jupiter));
    assert!(!audience.contains(&venus));
}

/// The comment audience also drops users who banned the commenter
#[tokio::test]
async fn test_comment_audience_drops_commenter_banners() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    world.ban(venus, mars);

    let service = visibility(&world);
    let audience = service.audience_of_comment(post, mars).await.unwrap();

    assert!(audience.contains(&luna));
    assert!(!audience.contains(&venus));
}
