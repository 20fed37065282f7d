//! Post Visibility Scenarios
//!
//! Privacy gates, gone authors, and the asymmetric ban gates, resolved
//! through the real service over an in-memory network.

use crate::common::{visibility, TestWorld};

/// Public posts are visible to anonymous viewers and strangers alike
#[tokio::test]
async fn test_public_post_is_visible_to_everybody() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let service = visibility(&world);
    assert!(service.is_post_visible(post, None).await.unwrap());
    assert!(service.is_post_visible(post, Some(mars)).await.unwrap());
    assert!(service.is_post_visible(post, Some(luna)).await.unwrap());
}

/// Protected posts hide from anonymous viewers only
#[tokio::test]
async fn test_protected_post_hides_from_anonymous() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    world.go_protected(luna);
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let service = visibility(&world);
    assert!(!service.is_post_visible(post, None).await.unwrap());
    assert!(service.is_post_visible(post, Some(mars)).await.unwrap());
}

/// Private posts require destination feed membership
#[tokio::test]
async fn test_private_post_requires_subscription() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    world.go_private(luna);
    world.subscribe(mars, world.posts_feed(luna));
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let service = visibility(&world);
    assert!(service.is_post_visible(post, Some(luna)).await.unwrap());
    assert!(service.is_post_visible(post, Some(mars)).await.unwrap());
    assert!(!service.is_post_visible(post, Some(venus)).await.unwrap());
    assert!(!service.is_post_visible(post, None).await.unwrap());
}

/// A suspended author's posts are invisible to everybody, even the author
#[tokio::test]
async fn test_suspended_author_posts_are_invisible() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    world.suspend(luna);

    let service = visibility(&world);
    assert!(!service.is_post_visible(post, Some(mars)).await.unwrap());
    assert!(!service.is_post_visible(post, Some(luna)).await.unwrap());
}

/// Banning an author hides their group posts until the viewer enables the
/// group's ban override; plain membership of the override is enough
#[tokio::test]
async fn test_viewer_ban_hides_post_until_override() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let group = world.add_group("celestials");
    let post = world.publish(luna, &[world.posts_feed(group)]);

    world.ban(mars, luna);

    let service = visibility(&world);
    assert!(!service.is_post_visible(post, Some(mars)).await.unwrap());

    world.enable_override(mars, group);
    assert!(service.is_post_visible(post, Some(mars)).await.unwrap());
}

/// Being banned by the author is only lifted by an admin-held override
#[tokio::test]
async fn test_being_banned_needs_admin_override() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let group = world.add_group("celestials");
    let post = world.publish(luna, &[world.posts_feed(group)]);

    world.ban(luna, mars);

    let service = visibility(&world);
    assert!(!service.is_post_visible(post, Some(mars)).await.unwrap());

    // Membership-level override does not restore this direction
    world.enable_override(mars, group);
    assert!(!service.is_post_visible(post, Some(mars)).await.unwrap());

    world.make_admin(mars, group);
    assert!(service.is_post_visible(post, Some(mars)).await.unwrap());
}

/// Bans only apply to posts landing in the overridden group's feed; the
/// same author's personal posts stay hidden
#[tokio::test]
async fn test_override_is_scoped_to_the_group_feed() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let group = world.add_group("celestials");
    let group_post = world.publish(luna, &[world.posts_feed(group)]);
    let personal_post = world.publish(luna, &[world.posts_feed(luna)]);

    world.ban(mars, luna);
    world.enable_override(mars, group);

    let service = visibility(&world);
    assert!(service.is_post_visible(group_post, Some(mars)).await.unwrap());
    assert!(!service
        .is_post_visible(personal_post, Some(mars))
        .await
        .unwrap());
}

/// Bulk selection keeps input order and drops invisible or unknown posts
#[tokio::test]
async fn test_select_visible_posts_filters_in_order() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let p1 = world.publish(luna, &[world.posts_feed(luna)]);
    let p2 = world.publish(mars, &[world.posts_feed(mars)]);
    let p3 = world.publish(luna, &[world.posts_feed(luna)]);

    world.ban(venus, luna);

    let service = visibility(&world);
    let visible = service
        .select_visible_posts(&[p1, p2, p3], Some(venus))
        .await
        .unwrap();
    assert_eq!(visible, vec![p2]);

    let visible = service
        .select_visible_posts(&[p3, p2, p1], None)
        .await
        .unwrap();
    assert_eq!(visible, vec![p3, p2, p1]);
}

/// The audience of a public post is everything minus the author's ban
/// relations, in both directions
#[tokio::test]
async fn test_audience_of_public_post_excludes_ban_relations() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let jupiter = world.add_user("jupiter");

    world.ban(luna, mars); // author banned mars
    world.ban(venus, luna); // venus banned the author

    let service = visibility(&world);
    let audience = service
        .audience_of(luna, &[world.posts_feed(luna)])
        .await
        .unwrap();

    assert!(audience.contains(&luna));
    assert!(audience.contains(&jupiter));
    assert!(!audience.contains(&mars));
    assert!(!audience.contains(&venus));
    assert!(!audience.is_everything());
}

/// A gone author has no audience at all
#[tokio::test]
async fn test_audience_of_gone_author_is_empty() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    world.suspend(luna);

    let service = visibility(&world);
    let audience = service
        .audience_of(luna, &[world.posts_feed(luna)])
        .await
        .unwrap();
    assert!(audience.is_empty());
}

/// The audience of a direct post is exactly its participants, even when
/// both of them are public users; "Directs" feeds are never open
#[tokio::test]
async fn test_audience_of_direct_post_is_its_participants() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    world.subscribe(mars, world.directs_feed(luna));
    world.subscribe(luna, world.directs_feed(mars));
    world.publish(luna, &[world.directs_feed(luna), world.directs_feed(mars)]);

    let service = visibility(&world);
    let audience = service
        .audience_of(luna, &[world.directs_feed(luna), world.directs_feed(mars)])
        .await
        .unwrap();

    assert!(!audience.is_everything());
    assert!(audience.contains(&luna));
    assert!(audience.contains(&mars));
    assert!(!audience.contains(&venus));
}

/// The audience of a private post is the finite member set minus bans
#[tokio::test]
async fn test_audience_of_private_post_is_finite() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    world.go_private(luna);
    world.subscribe(mars, world.posts_feed(luna));
    world.subscribe(venus, world.posts_feed(luna));
    world.ban(luna, venus);

    let service = visibility(&world);
    let audience = service
        .audience_of(luna, &[world.posts_feed(luna)])
        .await
        .unwrap();

    assert!(audience.contains(&luna));
    assert!(audience.contains(&mars));
    assert!(!audience.contains(&venus));
    assert!(!audience.is_everything());
}
