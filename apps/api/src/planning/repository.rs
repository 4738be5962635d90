//! Persistence for generated calendars.
//!
//! The calendar header, its posts, and their comments are written in one
//! transaction: a failed write never leaves a partial calendar behind.
//! Listing never joins against personas, so a persona deleted after being
//! referenced by an old calendar is just a dangling id in the output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::calendar::{CalendarAggregate, CalendarRow, CommentRow, PostAggregate, PostRow};
use crate::planning::generator::GeneratedCalendar;

/// Writes the generated week and returns the persisted aggregate.
pub async fn insert_calendar(
    pool: &PgPool,
    owner_id: Uuid,
    generated: &GeneratedCalendar,
) -> Result<CalendarAggregate, AppError> {
    let mut tx = pool.begin().await?;

    let calendar_id = Uuid::new_v4();
    let created_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
        INSERT INTO calendars (id, owner_id, week_start, quality_score)
        VALUES ($1, $2, $3, $4)
        RETURNING created_at
        "#,
    )
    .bind(calendar_id)
    .bind(owner_id)
    .bind(generated.week_start)
    .bind(generated.quality_score)
    .fetch_one(&mut *tx)
    .await?;

    let mut posts = Vec::with_capacity(generated.posts.len());
    for post in &generated.posts {
        let post_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO posts
                (id, calendar_id, subreddit, persona_id, title, body, scheduled_time, keyword_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post_id)
        .bind(calendar_id)
        .bind(&post.subreddit)
        .bind(post.persona_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.scheduled_time)
        .bind(post.keyword_id)
        .execute(&mut *tx)
        .await?;

        let mut comments = Vec::with_capacity(post.comments.len());
        for comment in &post.comments {
            let comment_id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO comments (id, post_id, persona_id, text, scheduled_time)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(comment_id)
            .bind(post_id)
            .bind(comment.persona_id)
            .bind(&comment.text)
            .bind(comment.scheduled_time)
            .execute(&mut *tx)
            .await?;

            comments.push(CommentRow {
                id: comment_id,
                post_id,
                persona_id: comment.persona_id,
                text: comment.text.clone(),
                scheduled_time: comment.scheduled_time,
            });
        }

        posts.push(PostAggregate {
            post: PostRow {
                id: post_id,
                calendar_id,
                subreddit: post.subreddit.clone(),
                persona_id: post.persona_id,
                title: post.title.clone(),
                body: post.body.clone(),
                scheduled_time: post.scheduled_time,
                keyword_id: post.keyword_id,
            },
            comments,
        });
    }

    tx.commit().await?;

    info!(
        "Persisted calendar {calendar_id} with {} posts for owner {owner_id}",
        posts.len()
    );

    Ok(CalendarAggregate {
        id: calendar_id,
        owner_id,
        week_start: generated.week_start,
        quality_score: generated.quality_score,
        created_at,
        posts,
    })
}

/// Returns a page of the owner's calendars, newest week first, with posts and
/// comments nested.
pub async fn list_calendars(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CalendarAggregate>, AppError> {
    let calendars: Vec<CalendarRow> = sqlx::query_as(
        r#"
        SELECT * FROM calendars
        WHERE owner_id = $1
        ORDER BY week_start DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    if calendars.is_empty() {
        return Ok(Vec::new());
    }

    let calendar_ids: Vec<Uuid> = calendars.iter().map(|c| c.id).collect();
    let posts: Vec<PostRow> = sqlx::query_as(
        "SELECT * FROM posts WHERE calendar_id = ANY($1) ORDER BY scheduled_time",
    )
    .bind(&calendar_ids)
    .fetch_all(pool)
    .await?;

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let comments: Vec<CommentRow> = sqlx::query_as(
        "SELECT * FROM comments WHERE post_id = ANY($1) ORDER BY scheduled_time",
    )
    .bind(&post_ids)
    .fetch_all(pool)
    .await?;

    Ok(assemble(calendars, posts, comments))
}

/// Groups flat rows into nested aggregates, preserving calendar order.
fn assemble(
    calendars: Vec<CalendarRow>,
    posts: Vec<PostRow>,
    comments: Vec<CommentRow>,
) -> Vec<CalendarAggregate> {
    let mut comments_by_post: HashMap<Uuid, Vec<CommentRow>> = HashMap::new();
    for comment in comments {
        comments_by_post.entry(comment.post_id).or_default().push(comment);
    }

    let mut posts_by_calendar: HashMap<Uuid, Vec<PostAggregate>> = HashMap::new();
    for post in posts {
        let aggregate = PostAggregate {
            comments: comments_by_post.remove(&post.id).unwrap_or_default(),
            post,
        };
        posts_by_calendar
            .entry(aggregate.post.calendar_id)
            .or_default()
            .push(aggregate);
    }

    calendars
        .into_iter()
        .map(|calendar| CalendarAggregate {
            posts: posts_by_calendar.remove(&calendar.id).unwrap_or_default(),
            id: calendar.id,
            owner_id: calendar.owner_id,
            week_start: calendar.week_start,
            quality_score: calendar.quality_score,
            created_at: calendar.created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_calendar(owner_id: Uuid, week_start: NaiveDate) -> CalendarRow {
        CalendarRow {
            id: Uuid::new_v4(),
            owner_id,
            week_start,
            quality_score: 0.9,
            created_at: Utc::now(),
        }
    }

    fn make_post(calendar_id: Uuid) -> PostRow {
        PostRow {
            id: Uuid::new_v4(),
            calendar_id,
            subreddit: "r/technology".to_string(),
            persona_id: Uuid::new_v4(),
            title: "t".to_string(),
            body: "b".to_string(),
            scheduled_time: Utc::now(),
            keyword_id: Uuid::new_v4(),
        }
    }

    fn make_comment(post_id: Uuid) -> CommentRow {
        CommentRow {
            id: Uuid::new_v4(),
            post_id,
            persona_id: Uuid::new_v4(),
            text: "c".to_string(),
            scheduled_time: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_nests_posts_and_comments() {
        let owner_id = Uuid::new_v4();
        let cal_a = make_calendar(owner_id, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        let cal_b = make_calendar(owner_id, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let post_a1 = make_post(cal_a.id);
        let post_a2 = make_post(cal_a.id);
        let post_b1 = make_post(cal_b.id);
        let comment_a1 = make_comment(post_a1.id);
        let comment_a2 = make_comment(post_a1.id);
        let comment_b1 = make_comment(post_b1.id);

        let result = assemble(
            vec![cal_a.clone(), cal_b.clone()],
            vec![post_a1.clone(), post_a2.clone(), post_b1.clone()],
            vec![comment_a1.clone(), comment_a2, comment_b1.clone()],
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, cal_a.id, "calendar order preserved");
        assert_eq!(result[0].posts.len(), 2);
        assert_eq!(result[1].posts.len(), 1);

        let first_post = &result[0].posts[0];
        assert_eq!(first_post.post.id, post_a1.id);
        assert_eq!(first_post.comments.len(), 2);
        assert_eq!(first_post.comments[0].id, comment_a1.id);
        assert_eq!(result[1].posts[0].comments[0].id, comment_b1.id);
    }

    #[test]
    fn test_assemble_tolerates_post_without_comments() {
        let cal = make_calendar(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let post = make_post(cal.id);

        let result = assemble(vec![cal], vec![post], vec![]);
        assert_eq!(result[0].posts.len(), 1);
        assert!(result[0].posts[0].comments.is_empty());
    }

    #[test]
    fn test_assemble_empty_is_empty() {
        assert!(assemble(vec![], vec![], vec![]).is_empty());
    }
}
