//! Aggregate Counter Scenarios
//!
//! Comment-like totals with folding, per-comment like info under bans, and
//! the unread-directs counter.

use chrono::{Duration, Utc};

use visibility_engine::domain::services::CommentLikesSummary;
use visibility_engine::shared::error::AppError;

use crate::common::{counters, TestWorld};

/// Four comments liked by their four distinct likers: the folded view keeps
/// the first and the last comment, omitting the two middle likes
#[tokio::test]
async fn test_comment_like_folding_totals() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let pluto = world.add_user("pluto");
    let mars = world.add_user("mars");
    let jupiter = world.add_user("jupiter");
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let c1 = world.comment(post, pluto);
    let c2 = world.comment(post, mars);
    let c3 = world.comment(post, jupiter);
    let c4 = world.comment(post, luna);
    world.like_comment(c1, pluto);
    world.like_comment(c2, mars);
    world.like_comment(c3, jupiter);
    world.like_comment(c4, luna);

    let service = counters(&world);

    let summary = service.post_comment_likes(post, None, true).await.unwrap();
    assert_eq!(
        summary,
        CommentLikesSummary {
            comment_likes: 4,
            own_comment_likes: 0,
            omitted_comment_likes: 2,
            omitted_own_comment_likes: 0,
        }
    );

    // Mars liked the second comment, which folds away
    let summary = service
        .post_comment_likes(post, Some(mars), true)
        .await
        .unwrap();
    assert_eq!(summary.own_comment_likes, 1);
    assert_eq!(summary.omitted_own_comment_likes, 1);

    // Luna liked the last comment, which stays shown
    let summary = service
        .post_comment_likes(post, Some(luna), true)
        .await
        .unwrap();
    assert_eq!(summary.own_comment_likes, 1);
    assert_eq!(summary.omitted_own_comment_likes, 0);

    // Folding disabled: nothing is omitted
    let summary = service.post_comment_likes(post, None, false).await.unwrap();
    assert_eq!(summary.omitted_comment_likes, 0);
}

/// Likes on a banned user's comment disappear, and so do likes made by a
/// banned user on anyone's comment
#[tokio::test]
async fn test_likes_hidden_by_bans() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let venus = world.add_user("venus");
    let jupiter = world.add_user("jupiter");
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let mars_comment = world.comment(post, mars);
    let luna_comment = world.comment(post, luna);
    world.like_comment(mars_comment, jupiter);
    world.like_comment(luna_comment, mars);
    world.like_comment(luna_comment, jupiter);

    world.ban(venus, mars);

    let service = counters(&world);
    let info = service
        .comment_likes_info(&[mars_comment, luna_comment], Some(venus))
        .await
        .unwrap();

    // The banned user's comment reports no likes at all
    assert_eq!(info[&mars_comment].likes, 0);
    // The banned user's like on a visible comment is filtered out
    assert_eq!(info[&luna_comment].likes, 1);
}

/// `has_own_like` reflects the viewer's own like on a visible comment
#[tokio::test]
async fn test_own_like_flag() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");
    let post = world.publish(luna, &[world.posts_feed(luna)]);
    let comment = world.comment(post, luna);
    world.like_comment(comment, mars);

    let service = counters(&world);

    let info = service
        .comment_likes_info(&[comment], Some(mars))
        .await
        .unwrap();
    assert!(info[&comment].has_own_like);
    assert_eq!(info[&comment].likes, 1);

    let info = service
        .comment_likes_info(&[comment], Some(luna))
        .await
        .unwrap();
    assert!(!info[&comment].has_own_like);
}

/// A post the viewer cannot see yields no comment-like summary
#[tokio::test]
async fn test_comment_likes_of_invisible_post_are_forbidden() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let venus = world.add_user("venus");
    world.go_private(luna);
    let post = world.publish(luna, &[world.posts_feed(luna)]);

    let service = counters(&world);
    let err = service
        .post_comment_likes(post, Some(venus), true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(msg) if msg == "You cannot see this post"));
}

/// Unread directs: fresh posts from the other side count, the viewer's own
/// activity never does, and reading resets the counter
#[tokio::test]
async fn test_unread_directs_watermark() {
    let world = TestWorld::new();
    let luna = world.add_user("luna");
    let mars = world.add_user("mars");

    // Luna sends a direct to mars
    let direct = world.publish(luna, &[world.directs_feed(luna), world.directs_feed(mars)]);
    world.subscribe(mars, world.directs_feed(luna));
    world.subscribe(luna, world.directs_feed(mars));

    let service = counters(&world);

    // Mars has never read directs
    assert_eq!(service.count_unread_directs(mars).await.unwrap(), 1);
    // Luna's own post is not unread for luna
    assert_eq!(service.count_unread_directs(luna).await.unwrap(), 0);

    // Mars reads the conversation
    world.set_directs_read_at(mars, Utc::now());
    assert_eq!(service.count_unread_directs(mars).await.unwrap(), 0);

    // A fresh comment from luna makes the post unread again
    let comment = world.comment(direct, luna);
    world.age_comment(comment, 5);
    assert_eq!(service.count_unread_directs(mars).await.unwrap(), 1);

    // But mars commenting on it does not
    world.set_directs_read_at(mars, Utc::now() + Duration::minutes(10));
    let own = world.comment(direct, mars);
    world.age_comment(own, 15);
    assert_eq!(service.count_unread_directs(mars).await.unwrap(), 0);
}
